// ABOUTME: Workout and exercise database operations
// ABOUTME: Transactional create with child exercises, scoped reads, cascade delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};

use super::cardio::{insert_cardio_session, NewCardioSession};
use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{Exercise, Workout, WorkoutWithExercises};

/// Fields for logging a new workout with its exercises
#[derive(Debug, Clone)]
pub struct NewWorkout {
    /// Display name
    pub name: String,
    /// When the workout was performed
    pub date: DateTime<Utc>,
    /// General notes
    pub notes: Option<String>,
    /// Duration in minutes
    pub duration: Option<i32>,
    /// Hours of sleep before the workout
    pub sleep_hours: Option<i32>,
    /// Average heart rate
    pub avg_heart_rate: Option<i32>,
    /// Calories burned
    pub calories_burned: Option<i32>,
    /// Exercises performed, at least one
    pub exercises: Vec<NewExercise>,
    /// Optional cardio session logged with the workout
    pub cardio: Option<NewCardioSession>,
}

/// Fields for one exercise within a new workout
#[derive(Debug, Clone)]
pub struct NewExercise {
    /// Exercise name
    pub name: String,
    /// Number of sets
    pub sets: i32,
    /// Number of reps per set
    pub reps: i32,
    /// Weight in whole kilograms
    pub weight: i32,
    /// Exercise-specific notes
    pub notes: Option<String>,
}

/// Partial update for a workout; absent fields keep their stored value
#[derive(Debug, Clone, Default)]
pub struct WorkoutUpdate {
    /// New name
    pub name: Option<String>,
    /// New performed date
    pub date: Option<DateTime<Utc>>,
    /// New notes
    pub notes: Option<String>,
}

/// Partial update for an exercise; absent fields keep their stored value
#[derive(Debug, Clone, Default)]
pub struct ExerciseUpdate {
    /// New completed flag
    pub completed: Option<bool>,
    /// New weight in whole kilograms
    pub weight: Option<i32>,
    /// New notes
    pub notes: Option<String>,
}

impl Database {
    /// Create workouts and exercises tables
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unavailable or table creation fails
    pub(super) async fn migrate_workouts(&self) -> AppResult<()> {
        let pool = self.write_pool()?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                date DATETIME NOT NULL,
                notes TEXT,
                duration INTEGER,
                sleep_hours INTEGER,
                avg_heart_rate INTEGER,
                calories_burned INTEGER,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workouts table: {e}")))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                workout_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                sets INTEGER NOT NULL,
                reps INTEGER NOT NULL,
                weight INTEGER NOT NULL,
                completed BOOLEAN NOT NULL DEFAULT 0,
                notes TEXT,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create exercises table: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_workouts_user_date ON workouts(user_id, date)")
            .execute(pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create workouts index: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_exercises_workout_id ON exercises(workout_id)",
        )
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create exercises index: {e}")))?;

        Ok(())
    }

    /// Log a workout with its exercises and optional cardio session
    ///
    /// The whole creation runs inside one transaction so a partial failure
    /// never leaves a workout without its children. Exercises are stored
    /// with `completed = 1`: a logged workout records what was done.
    /// Returns the new workout id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unavailable or a write fails
    pub async fn create_workout(&self, user_id: i64, workout: &NewWorkout) -> AppResult<i64> {
        let pool = self.write_pool()?;
        let mut tx = pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let result = sqlx::query(
            r"
            INSERT INTO workouts (
                user_id, name, date, notes, duration, sleep_hours,
                avg_heart_rate, calories_burned
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(user_id)
        .bind(&workout.name)
        .bind(workout.date)
        .bind(&workout.notes)
        .bind(workout.duration)
        .bind(workout.sleep_hours)
        .bind(workout.avg_heart_rate)
        .bind(workout.calories_burned)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout: {e}")))?;

        let workout_id = result.last_insert_rowid();

        for exercise in &workout.exercises {
            sqlx::query(
                r"
                INSERT INTO exercises (workout_id, name, sets, reps, weight, completed, notes)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ",
            )
            .bind(workout_id)
            .bind(&exercise.name)
            .bind(exercise.sets)
            .bind(exercise.reps)
            .bind(exercise.weight)
            .bind(true)
            .bind(&exercise.notes)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to create exercise: {e}")))?;
        }

        if let Some(cardio) = &workout.cardio {
            insert_cardio_session(&mut *tx, user_id, Some(workout_id), workout.date, cardio)
                .await?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit workout: {e}")))?;

        Ok(workout_id)
    }

    /// List a user's workouts, most recent date first
    ///
    /// Degrades to an empty list when the database is unavailable.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_workouts_by_user(&self, user_id: i64) -> AppResult<Vec<Workout>> {
        let Some(pool) = self.read_pool() else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query(
            r"
            SELECT id, user_id, name, date, notes, duration, sleep_hours,
                   avg_heart_rate, calories_burned, created_at, updated_at
            FROM workouts
            WHERE user_id = $1
            ORDER BY date DESC
            ",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list workouts: {e}")))?;

        Ok(rows.iter().map(row_to_workout).collect())
    }

    /// List a user's workouts with their exercises attached
    ///
    /// The composite shape every caller depends on: one list query plus a
    /// child query per workout. Degrades to an empty list when the
    /// database is unavailable.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn get_workouts_with_exercises(
        &self,
        user_id: i64,
    ) -> AppResult<Vec<WorkoutWithExercises>> {
        let workouts = self.get_workouts_by_user(user_id).await?;
        let mut result = Vec::with_capacity(workouts.len());
        for workout in workouts {
            let exercises = self.get_exercises_by_workout(workout.id).await?;
            result.push(WorkoutWithExercises { workout, exercises });
        }
        Ok(result)
    }

    /// Get a single workout, validated to belong to the given user
    ///
    /// Degrades to `None` when the database is unavailable.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_workout_by_id(&self, id: i64, user_id: i64) -> AppResult<Option<Workout>> {
        let Some(pool) = self.read_pool() else {
            return Ok(None);
        };

        let row = sqlx::query(
            r"
            SELECT id, user_id, name, date, notes, duration, sleep_hours,
                   avg_heart_rate, calories_burned, created_at, updated_at
            FROM workouts
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get workout {id}: {e}")))?;

        Ok(row.as_ref().map(row_to_workout))
    }

    /// List the exercises of a workout
    ///
    /// Degrades to an empty list when the database is unavailable.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_exercises_by_workout(&self, workout_id: i64) -> AppResult<Vec<Exercise>> {
        let Some(pool) = self.read_pool() else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query(
            r"
            SELECT id, workout_id, name, sets, reps, weight, completed, notes, created_at
            FROM exercises
            WHERE workout_id = $1
            ORDER BY id
            ",
        )
        .bind(workout_id)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list exercises: {e}")))?;

        Ok(rows.iter().map(row_to_exercise).collect())
    }

    /// Apply a partial update to a workout owned by the given user
    ///
    /// Returns `false` when no matching row exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unavailable or the write fails
    pub async fn update_workout(
        &self,
        id: i64,
        user_id: i64,
        update: &WorkoutUpdate,
    ) -> AppResult<bool> {
        let pool = self.write_pool()?;

        let result = sqlx::query(
            r"
            UPDATE workouts SET
                name = COALESCE($3, name),
                date = COALESCE($4, date),
                notes = COALESCE($5, notes),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(user_id)
        .bind(&update.name)
        .bind(update.date)
        .bind(&update.notes)
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update workout {id}: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a workout with its exercises and any linked cardio sessions
    ///
    /// Children are deleted before the parent inside one transaction; the
    /// cascade is application-level, nothing relies on database-level
    /// `ON DELETE`. Returns `false` when the workout does not exist or is
    /// owned by another user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unavailable or a write fails
    pub async fn delete_workout(&self, id: i64, user_id: i64) -> AppResult<bool> {
        let pool = self.write_pool()?;
        let mut tx = pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let owned: Option<i64> =
            sqlx::query_scalar("SELECT id FROM workouts WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to check workout {id}: {e}")))?;

        if owned.is_none() {
            return Ok(false);
        }

        sqlx::query("DELETE FROM exercises WHERE workout_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete exercises: {e}")))?;

        sqlx::query("DELETE FROM cardio_sessions WHERE workout_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete cardio sessions: {e}")))?;

        sqlx::query("DELETE FROM workouts WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete workout {id}: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit delete: {e}")))?;

        Ok(true)
    }

    /// Apply a partial update to an exercise owned (via its workout) by the
    /// given user
    ///
    /// Returns `false` when no matching row exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unavailable or the write fails
    pub async fn update_exercise(
        &self,
        id: i64,
        user_id: i64,
        update: &ExerciseUpdate,
    ) -> AppResult<bool> {
        let pool = self.write_pool()?;

        let result = sqlx::query(
            r"
            UPDATE exercises SET
                completed = COALESCE($3, completed),
                weight = COALESCE($4, weight),
                notes = COALESCE($5, notes)
            WHERE id = $1
              AND workout_id IN (SELECT id FROM workouts WHERE user_id = $2)
            ",
        )
        .bind(id)
        .bind(user_id)
        .bind(update.completed)
        .bind(update.weight)
        .bind(&update.notes)
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update exercise {id}: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Convert a database row to a `Workout`
fn row_to_workout(row: &SqliteRow) -> Workout {
    Workout {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        date: row.get("date"),
        notes: row.get("notes"),
        duration: row.get("duration"),
        sleep_hours: row.get("sleep_hours"),
        avg_heart_rate: row.get("avg_heart_rate"),
        calories_burned: row.get("calories_burned"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Convert a database row to an `Exercise`
fn row_to_exercise(row: &SqliteRow) -> Exercise {
    Exercise {
        id: row.get("id"),
        workout_id: row.get("workout_id"),
        name: row.get("name"),
        sets: row.get("sets"),
        reps: row.get("reps"),
        weight: row.get("weight"),
        completed: row.get("completed"),
        notes: row.get("notes"),
        created_at: row.get("created_at"),
    }
}
