// ABOUTME: Workout template database operations
// ABOUTME: Transactional create with ordered exercises, scoped reads, cascade delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

use sqlx::{sqlite::SqliteRow, Row};

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{TemplateExercise, WorkoutTemplate};

/// Fields for creating a new workout template with its exercises
#[derive(Debug, Clone)]
pub struct NewTemplate {
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Exercise entries in display order
    pub exercises: Vec<NewTemplateExercise>,
}

/// Fields for one exercise entry within a new template
#[derive(Debug, Clone)]
pub struct NewTemplateExercise {
    /// Exercise name
    pub name: String,
    /// Default number of sets
    pub sets: i32,
    /// Default number of reps
    pub reps: i32,
    /// Default weight in whole kilograms
    pub weight: i32,
    /// Exercise-specific notes
    pub notes: Option<String>,
}

/// Partial update for a template; absent fields keep their stored value
#[derive(Debug, Clone, Default)]
pub struct TemplateUpdate {
    /// New name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
}

impl Database {
    /// Create template tables
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unavailable or table creation fails
    pub(super) async fn migrate_templates(&self) -> AppResult<()> {
        let pool = self.write_pool()?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_templates (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                description TEXT,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create templates table: {e}")))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS template_exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                template_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                sets INTEGER NOT NULL,
                reps INTEGER NOT NULL,
                weight INTEGER NOT NULL,
                notes TEXT,
                position INTEGER NOT NULL,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(pool)
        .await
        .map_err(|e| {
            AppError::database(format!("Failed to create template exercises table: {e}"))
        })?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_templates_user_id ON workout_templates(user_id)",
        )
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create templates index: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_template_exercises_template_id
             ON template_exercises(template_id)",
        )
        .execute(pool)
        .await
        .map_err(|e| {
            AppError::database(format!("Failed to create template exercises index: {e}"))
        })?;

        Ok(())
    }

    /// Create a template with its exercises; returns the new template id
    ///
    /// Exercise `position` is assigned from the creation sequence,
    /// zero-based. The whole creation runs inside one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unavailable or a write fails
    pub async fn create_template(&self, user_id: i64, template: &NewTemplate) -> AppResult<i64> {
        let pool = self.write_pool()?;
        let mut tx = pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let result = sqlx::query(
            "INSERT INTO workout_templates (user_id, name, description) VALUES ($1, $2, $3)",
        )
        .bind(user_id)
        .bind(&template.name)
        .bind(&template.description)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create template: {e}")))?;

        let template_id = result.last_insert_rowid();

        for (position, exercise) in template.exercises.iter().enumerate() {
            let position = i64::try_from(position).unwrap_or(i64::MAX);
            sqlx::query(
                r"
                INSERT INTO template_exercises (template_id, name, sets, reps, weight, notes, position)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ",
            )
            .bind(template_id)
            .bind(&exercise.name)
            .bind(exercise.sets)
            .bind(exercise.reps)
            .bind(exercise.weight)
            .bind(&exercise.notes)
            .bind(position)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to create template exercise: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit template: {e}")))?;

        Ok(template_id)
    }

    /// List a user's templates, most recently created first
    ///
    /// Degrades to an empty list when the database is unavailable.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_templates_by_user(&self, user_id: i64) -> AppResult<Vec<WorkoutTemplate>> {
        let Some(pool) = self.read_pool() else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query(
            r"
            SELECT id, user_id, name, description, created_at, updated_at
            FROM workout_templates
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list templates: {e}")))?;

        Ok(rows.iter().map(row_to_template).collect())
    }

    /// Get a single template, validated to belong to the given user
    ///
    /// Degrades to `None` when the database is unavailable.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_template_by_id(
        &self,
        id: i64,
        user_id: i64,
    ) -> AppResult<Option<WorkoutTemplate>> {
        let Some(pool) = self.read_pool() else {
            return Ok(None);
        };

        let row = sqlx::query(
            r"
            SELECT id, user_id, name, description, created_at, updated_at
            FROM workout_templates
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get template {id}: {e}")))?;

        Ok(row.as_ref().map(row_to_template))
    }

    /// List the exercises of a template, ordered by position ascending
    ///
    /// Degrades to an empty list when the database is unavailable.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_template_exercises(
        &self,
        template_id: i64,
    ) -> AppResult<Vec<TemplateExercise>> {
        let Some(pool) = self.read_pool() else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query(
            r"
            SELECT id, template_id, name, sets, reps, weight, notes, position, created_at
            FROM template_exercises
            WHERE template_id = $1
            ORDER BY position
            ",
        )
        .bind(template_id)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list template exercises: {e}")))?;

        Ok(rows.iter().map(row_to_template_exercise).collect())
    }

    /// Apply a partial update to a template owned by the given user
    ///
    /// Returns `false` when no matching row exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unavailable or the write fails
    pub async fn update_template(
        &self,
        id: i64,
        user_id: i64,
        update: &TemplateUpdate,
    ) -> AppResult<bool> {
        let pool = self.write_pool()?;

        let result = sqlx::query(
            r"
            UPDATE workout_templates SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(user_id)
        .bind(&update.name)
        .bind(&update.description)
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update template {id}: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a template with its exercises
    ///
    /// Children are deleted before the parent inside one transaction.
    /// Returns `false` when the template does not exist or is owned by
    /// another user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unavailable or a write fails
    pub async fn delete_template(&self, id: i64, user_id: i64) -> AppResult<bool> {
        let pool = self.write_pool()?;
        let mut tx = pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let owned: Option<i64> =
            sqlx::query_scalar("SELECT id FROM workout_templates WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to check template {id}: {e}")))?;

        if owned.is_none() {
            return Ok(false);
        }

        sqlx::query("DELETE FROM template_exercises WHERE template_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete template exercises: {e}")))?;

        sqlx::query("DELETE FROM workout_templates WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete template {id}: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit delete: {e}")))?;

        Ok(true)
    }
}

/// Convert a database row to a `WorkoutTemplate`
fn row_to_template(row: &SqliteRow) -> WorkoutTemplate {
    WorkoutTemplate {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        description: row.get("description"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Convert a database row to a `TemplateExercise`
fn row_to_template_exercise(row: &SqliteRow) -> TemplateExercise {
    TemplateExercise {
        id: row.get("id"),
        template_id: row.get("template_id"),
        name: row.get("name"),
        sets: row.get("sets"),
        reps: row.get("reps"),
        weight: row.get("weight"),
        notes: row.get("notes"),
        position: row.get("position"),
        created_at: row.get("created_at"),
    }
}
