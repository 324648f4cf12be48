// ABOUTME: Exercise library database operations
// ABOUTME: Shared global library reads and owner-scoped custom exercise CRUD
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

use sqlx::{sqlite::SqliteRow, Row};

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{Difficulty, LibraryExercise, MediaType, UserCustomExercise};

/// Fields for seeding a global library exercise
#[derive(Debug, Clone)]
pub struct NewLibraryExercise {
    /// Exercise name
    pub name: String,
    /// Muscle group
    pub muscle_group: String,
    /// Equipment used
    pub equipment: Option<String>,
    /// Difficulty level
    pub difficulty: Difficulty,
    /// URL of the demonstration asset
    pub media_url: String,
    /// Media type of the demonstration asset
    pub media_type: MediaType,
    /// How to perform the exercise
    pub description: Option<String>,
}

/// Fields for creating a user custom exercise
#[derive(Debug, Clone)]
pub struct NewUserExercise {
    /// Exercise name
    pub name: String,
    /// Muscle group
    pub muscle_group: String,
    /// Equipment used
    pub equipment: Option<String>,
    /// Difficulty level
    pub difficulty: Difficulty,
    /// URL of the uploaded media, when any
    pub media_url: Option<String>,
    /// Media type of the uploaded asset
    pub media_type: MediaType,
    /// How to perform the exercise
    pub description: Option<String>,
}

/// Update for a user custom exercise
///
/// `name` and `muscle_group` are full values (the surface requires them);
/// the rest keep their stored value when absent, so media survives an
/// update without a new upload.
#[derive(Debug, Clone)]
pub struct UserExerciseUpdate {
    /// New name
    pub name: String,
    /// New muscle group
    pub muscle_group: String,
    /// New equipment
    pub equipment: Option<String>,
    /// New difficulty
    pub difficulty: Option<Difficulty>,
    /// Replacement media URL when a new image was uploaded
    pub media_url: Option<String>,
    /// Replacement media type when a new image was uploaded
    pub media_type: Option<MediaType>,
    /// New description
    pub description: Option<String>,
}

impl Database {
    /// Create exercise library tables
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unavailable or table creation fails
    pub(super) async fn migrate_exercise_library(&self) -> AppResult<()> {
        let pool = self.write_pool()?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercise_library (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                muscle_group TEXT NOT NULL,
                equipment TEXT,
                difficulty TEXT NOT NULL DEFAULT 'intermediario'
                    CHECK (difficulty IN ('iniciante', 'intermediario', 'avancado')),
                media_url TEXT NOT NULL,
                media_type TEXT NOT NULL DEFAULT 'gif' CHECK (media_type IN ('gif', 'image')),
                description TEXT,
                is_global INTEGER NOT NULL DEFAULT 1,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create exercise library: {e}")))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_custom_exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                muscle_group TEXT NOT NULL,
                equipment TEXT,
                difficulty TEXT NOT NULL DEFAULT 'intermediario'
                    CHECK (difficulty IN ('iniciante', 'intermediario', 'avancado')),
                media_url TEXT,
                media_type TEXT NOT NULL DEFAULT 'image' CHECK (media_type IN ('gif', 'image')),
                description TEXT,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create custom exercises: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_library_muscle_group
             ON exercise_library(muscle_group)",
        )
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create library index: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_custom_exercises_user_id
             ON user_custom_exercises(user_id)",
        )
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create custom exercises index: {e}")))?;

        Ok(())
    }

    /// List the shared global library, ordered by name for stable output
    ///
    /// No user scoping: the global library is shared read-only data.
    /// Degrades to an empty list when the database is unavailable.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_library_exercises(
        &self,
        muscle_group: Option<&str>,
    ) -> AppResult<Vec<LibraryExercise>> {
        let Some(pool) = self.read_pool() else {
            return Ok(Vec::new());
        };

        let rows = match muscle_group {
            Some(group) => {
                sqlx::query(
                    r"
                    SELECT id, name, muscle_group, equipment, difficulty,
                           media_url, media_type, description, created_at
                    FROM exercise_library
                    WHERE is_global = 1 AND muscle_group = $1
                    ORDER BY name
                    ",
                )
                .bind(group)
                .fetch_all(pool)
                .await
            }
            None => {
                sqlx::query(
                    r"
                    SELECT id, name, muscle_group, equipment, difficulty,
                           media_url, media_type, description, created_at
                    FROM exercise_library
                    WHERE is_global = 1
                    ORDER BY name
                    ",
                )
                .fetch_all(pool)
                .await
            }
        }
        .map_err(|e| AppError::database(format!("Failed to list exercise library: {e}")))?;

        Ok(rows.iter().map(row_to_library_exercise).collect())
    }

    /// Count the global library rows (used by the seed binary)
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unavailable or the query fails
    pub async fn count_library_exercises(&self) -> AppResult<i64> {
        let pool = self.write_pool()?;
        sqlx::query_scalar("SELECT COUNT(*) FROM exercise_library WHERE is_global = 1")
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count exercise library: {e}")))
    }

    /// Insert a global library exercise; returns the new id
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unavailable or the write fails
    pub async fn seed_library_exercise(&self, exercise: &NewLibraryExercise) -> AppResult<i64> {
        let pool = self.write_pool()?;

        let result = sqlx::query(
            r"
            INSERT INTO exercise_library (
                name, muscle_group, equipment, difficulty, media_url,
                media_type, description, is_global
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, 1)
            ",
        )
        .bind(&exercise.name)
        .bind(&exercise.muscle_group)
        .bind(&exercise.equipment)
        .bind(exercise.difficulty.as_str())
        .bind(&exercise.media_url)
        .bind(exercise.media_type.as_str())
        .bind(&exercise.description)
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to seed library exercise: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// Create a user custom exercise; returns the new id
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unavailable or the write fails
    pub async fn create_user_exercise(
        &self,
        user_id: i64,
        exercise: &NewUserExercise,
    ) -> AppResult<i64> {
        let pool = self.write_pool()?;

        let result = sqlx::query(
            r"
            INSERT INTO user_custom_exercises (
                user_id, name, muscle_group, equipment, difficulty,
                media_url, media_type, description
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(user_id)
        .bind(&exercise.name)
        .bind(&exercise.muscle_group)
        .bind(&exercise.equipment)
        .bind(exercise.difficulty.as_str())
        .bind(&exercise.media_url)
        .bind(exercise.media_type.as_str())
        .bind(&exercise.description)
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create custom exercise: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// List a user's custom exercises, ordered by name for stable output
    ///
    /// Degrades to an empty list when the database is unavailable.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user_exercises(&self, user_id: i64) -> AppResult<Vec<UserCustomExercise>> {
        let Some(pool) = self.read_pool() else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query(
            r"
            SELECT id, user_id, name, muscle_group, equipment, difficulty,
                   media_url, media_type, description, created_at
            FROM user_custom_exercises
            WHERE user_id = $1
            ORDER BY name
            ",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list custom exercises: {e}")))?;

        Ok(rows.iter().map(row_to_user_exercise).collect())
    }

    /// Get a single custom exercise, validated to belong to the given user
    ///
    /// Degrades to `None` when the database is unavailable.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user_exercise(
        &self,
        id: i64,
        user_id: i64,
    ) -> AppResult<Option<UserCustomExercise>> {
        let Some(pool) = self.read_pool() else {
            return Ok(None);
        };

        let row = sqlx::query(
            r"
            SELECT id, user_id, name, muscle_group, equipment, difficulty,
                   media_url, media_type, description, created_at
            FROM user_custom_exercises
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get custom exercise {id}: {e}")))?;

        Ok(row.as_ref().map(row_to_user_exercise))
    }

    /// Update a custom exercise owned by the given user
    ///
    /// Returns `false` when no matching row exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unavailable or the write fails
    pub async fn update_user_exercise(
        &self,
        id: i64,
        user_id: i64,
        update: &UserExerciseUpdate,
    ) -> AppResult<bool> {
        let pool = self.write_pool()?;

        let result = sqlx::query(
            r"
            UPDATE user_custom_exercises SET
                name = $3,
                muscle_group = $4,
                equipment = COALESCE($5, equipment),
                difficulty = COALESCE($6, difficulty),
                media_url = COALESCE($7, media_url),
                media_type = COALESCE($8, media_type),
                description = COALESCE($9, description)
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(user_id)
        .bind(&update.name)
        .bind(&update.muscle_group)
        .bind(&update.equipment)
        .bind(update.difficulty.map(|d| d.as_str()))
        .bind(&update.media_url)
        .bind(update.media_type.map(|m| m.as_str()))
        .bind(&update.description)
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update custom exercise {id}: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a custom exercise owned by the given user
    ///
    /// Returns `false` when no matching row exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unavailable or the write fails
    pub async fn delete_user_exercise(&self, id: i64, user_id: i64) -> AppResult<bool> {
        let pool = self.write_pool()?;

        let result = sqlx::query("DELETE FROM user_custom_exercises WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete custom exercise: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Convert a database row to a `LibraryExercise`
fn row_to_library_exercise(row: &SqliteRow) -> LibraryExercise {
    let difficulty: String = row.get("difficulty");
    let media_type: String = row.get("media_type");
    LibraryExercise {
        id: row.get("id"),
        name: row.get("name"),
        muscle_group: row.get("muscle_group"),
        equipment: row.get("equipment"),
        difficulty: Difficulty::parse(&difficulty),
        media_url: row.get("media_url"),
        media_type: MediaType::parse(&media_type),
        description: row.get("description"),
        created_at: row.get("created_at"),
    }
}

/// Convert a database row to a `UserCustomExercise`
fn row_to_user_exercise(row: &SqliteRow) -> UserCustomExercise {
    let difficulty: String = row.get("difficulty");
    let media_type: String = row.get("media_type");
    UserCustomExercise {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        muscle_group: row.get("muscle_group"),
        equipment: row.get("equipment"),
        difficulty: Difficulty::parse(&difficulty),
        media_url: row.get("media_url"),
        media_type: MediaType::parse(&media_type),
        description: row.get("description"),
        created_at: row.get("created_at"),
    }
}
