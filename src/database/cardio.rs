// ABOUTME: Cardio session database operations
// ABOUTME: Insert shared with the workout transaction, scoped reads by user and workout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::CardioSession;

/// Fields for a cardio session logged alongside a workout
#[derive(Debug, Clone)]
pub struct NewCardioSession {
    /// Free-text activity kind, e.g. "Corrida"
    pub kind: String,
    /// Duration in minutes
    pub duration: i32,
    /// Distance in meters
    pub distance: Option<i32>,
    /// Average heart rate
    pub avg_heart_rate: Option<i32>,
    /// Pace in seconds per km
    pub pace: Option<i32>,
    /// Calories burned
    pub calories_burned: Option<i32>,
    /// Optional notes
    pub notes: Option<String>,
}

/// Insert a cardio session row
///
/// Takes any SQLite executor so the workout creation transaction can reuse
/// it. Returns the new session id.
pub(super) async fn insert_cardio_session<'e, E>(
    executor: E,
    user_id: i64,
    workout_id: Option<i64>,
    date: DateTime<Utc>,
    cardio: &NewCardioSession,
) -> AppResult<i64>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let result = sqlx::query(
        r"
        INSERT INTO cardio_sessions (
            workout_id, user_id, kind, duration, distance,
            avg_heart_rate, pace, calories_burned, date, notes
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ",
    )
    .bind(workout_id)
    .bind(user_id)
    .bind(&cardio.kind)
    .bind(cardio.duration)
    .bind(cardio.distance)
    .bind(cardio.avg_heart_rate)
    .bind(cardio.pace)
    .bind(cardio.calories_burned)
    .bind(date)
    .bind(&cardio.notes)
    .execute(executor)
    .await
    .map_err(|e| AppError::database(format!("Failed to create cardio session: {e}")))?;

    Ok(result.last_insert_rowid())
}

impl Database {
    /// Create the cardio sessions table
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unavailable or table creation fails
    pub(super) async fn migrate_cardio(&self) -> AppResult<()> {
        let pool = self.write_pool()?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS cardio_sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                workout_id INTEGER,
                user_id INTEGER NOT NULL,
                kind TEXT NOT NULL,
                duration INTEGER NOT NULL,
                distance INTEGER,
                avg_heart_rate INTEGER,
                pace INTEGER,
                calories_burned INTEGER,
                date DATETIME NOT NULL,
                notes TEXT,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create cardio table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_cardio_user_date ON cardio_sessions(user_id, date)",
        )
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create cardio index: {e}")))?;

        Ok(())
    }

    /// List a user's cardio sessions, most recent date first
    ///
    /// Degrades to an empty list when the database is unavailable.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_cardio_by_user(&self, user_id: i64) -> AppResult<Vec<CardioSession>> {
        let Some(pool) = self.read_pool() else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query(
            r"
            SELECT id, workout_id, user_id, kind, duration, distance,
                   avg_heart_rate, pace, calories_burned, date, notes, created_at
            FROM cardio_sessions
            WHERE user_id = $1
            ORDER BY date DESC
            ",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list cardio sessions: {e}")))?;

        Ok(rows.iter().map(row_to_cardio).collect())
    }

    /// List the cardio sessions linked to one of the user's workouts
    ///
    /// Degrades to an empty list when the database is unavailable.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_cardio_by_workout(
        &self,
        workout_id: i64,
        user_id: i64,
    ) -> AppResult<Vec<CardioSession>> {
        let Some(pool) = self.read_pool() else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query(
            r"
            SELECT id, workout_id, user_id, kind, duration, distance,
                   avg_heart_rate, pace, calories_burned, date, notes, created_at
            FROM cardio_sessions
            WHERE workout_id = $1 AND user_id = $2
            ",
        )
        .bind(workout_id)
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list workout cardio: {e}")))?;

        Ok(rows.iter().map(row_to_cardio).collect())
    }
}

/// Convert a database row to a `CardioSession`
fn row_to_cardio(row: &SqliteRow) -> CardioSession {
    CardioSession {
        id: row.get("id"),
        workout_id: row.get("workout_id"),
        user_id: row.get("user_id"),
        kind: row.get("kind"),
        duration: row.get("duration"),
        distance: row.get("distance"),
        avg_heart_rate: row.get("avg_heart_rate"),
        pace: row.get("pace"),
        calories_burned: row.get("calories_burned"),
        date: row.get("date"),
        notes: row.get("notes"),
        created_at: row.get("created_at"),
    }
}
