// ABOUTME: Progress photo database operations
// ABOUTME: Metadata rows referencing externally stored objects, scoped by user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{Pose, ProgressPhoto};

/// Fields for a new progress photo row
///
/// The binary payload is written to object storage first; `file_key` and
/// `url` are the durable references that write returns.
#[derive(Debug, Clone)]
pub struct NewProgressPhoto {
    /// Object storage key
    pub file_key: String,
    /// Public URL of the stored object
    pub url: String,
    /// Photo angle
    pub pose: Pose,
    /// User-assigned week number
    pub week: i32,
    /// When the photo was taken
    pub date: DateTime<Utc>,
    /// Optional notes
    pub notes: Option<String>,
    /// Body weight in kg
    pub weight: Option<i32>,
    /// Chest circumference in cm
    pub chest: Option<i32>,
    /// Waist circumference in cm
    pub waist: Option<i32>,
    /// Hips circumference in cm
    pub hips: Option<i32>,
    /// Left arm circumference in cm
    pub left_arm: Option<i32>,
    /// Right arm circumference in cm
    pub right_arm: Option<i32>,
    /// Left thigh circumference in cm
    pub left_thigh: Option<i32>,
    /// Right thigh circumference in cm
    pub right_thigh: Option<i32>,
    /// Left calf circumference in cm
    pub left_calf: Option<i32>,
    /// Right calf circumference in cm
    pub right_calf: Option<i32>,
}

impl Database {
    /// Create the progress photos table
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unavailable or table creation fails
    pub(super) async fn migrate_photos(&self) -> AppResult<()> {
        let pool = self.write_pool()?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS progress_photos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                file_key TEXT NOT NULL,
                url TEXT NOT NULL,
                pose TEXT NOT NULL CHECK (pose IN ('front', 'back', 'side')),
                week INTEGER NOT NULL,
                date DATETIME NOT NULL,
                notes TEXT,
                weight INTEGER,
                chest INTEGER,
                waist INTEGER,
                hips INTEGER,
                left_arm INTEGER,
                right_arm INTEGER,
                left_thigh INTEGER,
                right_thigh INTEGER,
                left_calf INTEGER,
                right_calf INTEGER,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create photos table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_photos_user_date ON progress_photos(user_id, date)",
        )
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create photos index: {e}")))?;

        Ok(())
    }

    /// Create a progress photo row; returns the new id
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unavailable or the write fails
    pub async fn create_progress_photo(
        &self,
        user_id: i64,
        photo: &NewProgressPhoto,
    ) -> AppResult<i64> {
        let pool = self.write_pool()?;

        let result = sqlx::query(
            r"
            INSERT INTO progress_photos (
                user_id, file_key, url, pose, week, date, notes,
                weight, chest, waist, hips, left_arm, right_arm,
                left_thigh, right_thigh, left_calf, right_calf
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ",
        )
        .bind(user_id)
        .bind(&photo.file_key)
        .bind(&photo.url)
        .bind(photo.pose.as_str())
        .bind(photo.week)
        .bind(photo.date)
        .bind(&photo.notes)
        .bind(photo.weight)
        .bind(photo.chest)
        .bind(photo.waist)
        .bind(photo.hips)
        .bind(photo.left_arm)
        .bind(photo.right_arm)
        .bind(photo.left_thigh)
        .bind(photo.right_thigh)
        .bind(photo.left_calf)
        .bind(photo.right_calf)
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create progress photo: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// List a user's progress photos, most recent date first
    ///
    /// Degrades to an empty list when the database is unavailable.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_progress_photos_by_user(&self, user_id: i64) -> AppResult<Vec<ProgressPhoto>> {
        let Some(pool) = self.read_pool() else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query(
            r"
            SELECT id, user_id, file_key, url, pose, week, date, notes,
                   weight, chest, waist, hips, left_arm, right_arm,
                   left_thigh, right_thigh, left_calf, right_calf, created_at
            FROM progress_photos
            WHERE user_id = $1
            ORDER BY date DESC
            ",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list progress photos: {e}")))?;

        rows.iter().map(row_to_photo).collect()
    }

    /// Get a single progress photo, validated to belong to the given user
    ///
    /// Degrades to `None` when the database is unavailable.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_progress_photo(
        &self,
        id: i64,
        user_id: i64,
    ) -> AppResult<Option<ProgressPhoto>> {
        let Some(pool) = self.read_pool() else {
            return Ok(None);
        };

        let row = sqlx::query(
            r"
            SELECT id, user_id, file_key, url, pose, week, date, notes,
                   weight, chest, waist, hips, left_arm, right_arm,
                   left_thigh, right_thigh, left_calf, right_calf, created_at
            FROM progress_photos
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get progress photo {id}: {e}")))?;

        row.as_ref().map(row_to_photo).transpose()
    }

    /// Delete a progress photo row owned by the given user
    ///
    /// Returns `false` when no matching row exists. Removing the stored
    /// object is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unavailable or the write fails
    pub async fn delete_progress_photo(&self, id: i64, user_id: i64) -> AppResult<bool> {
        let pool = self.write_pool()?;

        let result = sqlx::query("DELETE FROM progress_photos WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete progress photo: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Convert a database row to a `ProgressPhoto`
fn row_to_photo(row: &SqliteRow) -> AppResult<ProgressPhoto> {
    let pose: String = row.get("pose");
    Ok(ProgressPhoto {
        id: row.get("id"),
        user_id: row.get("user_id"),
        file_key: row.get("file_key"),
        url: row.get("url"),
        pose: pose.parse()?,
        week: row.get("week"),
        date: row.get("date"),
        notes: row.get("notes"),
        weight: row.get("weight"),
        chest: row.get("chest"),
        waist: row.get("waist"),
        hips: row.get("hips"),
        left_arm: row.get("left_arm"),
        right_arm: row.get("right_arm"),
        left_thigh: row.get("left_thigh"),
        right_thigh: row.get("right_thigh"),
        left_calf: row.get("left_calf"),
        right_calf: row.get("right_calf"),
        created_at: row.get("created_at"),
    })
}
