// ABOUTME: Data access layer for the Ferro fitness tracker
// ABOUTME: Database handle with explicit unavailable state and per-entity operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

//! Data access layer
//!
//! A single [`Database`] handle wraps the SQLite pool and is injected into
//! route handlers at startup. The "unavailable" state is typed rather than a
//! nullable global: read operations degrade to empty results so callers can
//! render an empty state, while write operations fail loudly — silently
//! dropping a write would corrupt user trust in data durability.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::warn;

use crate::errors::{AppError, AppResult};

/// Cardio session operations
pub mod cardio;
/// Exercise library and user custom exercise operations
pub mod exercise_library;
/// Progress photo operations
pub mod photos;
/// Workout template operations
pub mod templates;
/// User account operations
pub mod users;
/// Workout and exercise operations
pub mod workouts;

pub use cardio::NewCardioSession;
pub use exercise_library::{NewLibraryExercise, NewUserExercise, UserExerciseUpdate};
pub use photos::NewProgressPhoto;
pub use templates::{NewTemplate, NewTemplateExercise, TemplateUpdate};
pub use users::UpsertUser;
pub use workouts::{ExerciseUpdate, NewExercise, NewWorkout, WorkoutUpdate};

/// Maximum pooled connections for the SQLite backend
const MAX_CONNECTIONS: u32 = 5;

/// Injected persistence handle with an explicit unavailable state
#[derive(Debug, Clone)]
pub struct Database {
    pool: Option<SqlitePool>,
}

impl Database {
    /// Open a connection pool for the given database URL
    ///
    /// Connection failures degrade to the unavailable state instead of
    /// aborting startup; reads then return empty results and writes fail
    /// with [`crate::errors::ErrorCode::DatabaseUnavailable`].
    pub async fn connect(database_url: &str) -> Self {
        let options = match SqliteConnectOptions::from_str(database_url) {
            Ok(options) => options.create_if_missing(true),
            Err(e) => {
                warn!("Invalid database URL {database_url}: {e}");
                return Self { pool: None };
            }
        };

        match SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
        {
            Ok(pool) => Self { pool: Some(pool) },
            Err(e) => {
                warn!("Failed to connect to database {database_url}: {e}");
                Self { pool: None }
            }
        }
    }

    /// Wrap an existing pool (used by tests and embedded setups)
    #[must_use]
    pub const fn from_pool(pool: SqlitePool) -> Self {
        Self { pool: Some(pool) }
    }

    /// Construct a handle in the unavailable state
    #[must_use]
    pub const fn unavailable() -> Self {
        Self { pool: None }
    }

    /// Whether the underlying storage is reachable
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.pool.is_some()
    }

    /// Pool for read operations; `None` lets the caller degrade to empty
    pub(crate) const fn read_pool(&self) -> Option<&SqlitePool> {
        self.pool.as_ref()
    }

    /// Pool for write operations; errors when the storage is unreachable
    pub(crate) fn write_pool(&self) -> AppResult<&SqlitePool> {
        self.pool.as_ref().ok_or_else(AppError::database_unavailable)
    }

    /// Run schema migrations for every entity
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unavailable or a table/index
    /// creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_workouts().await?;
        self.migrate_photos().await?;
        self.migrate_templates().await?;
        self.migrate_cardio().await?;
        self.migrate_exercise_library().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unavailable_database_reports_state() {
        let db = Database::unavailable();
        assert!(!db.is_available());
        assert!(db.write_pool().is_err());
        assert!(db.read_pool().is_none());
    }

    #[tokio::test]
    async fn test_connect_bad_url_degrades() {
        let db = Database::connect("not-a-valid-url://nowhere").await;
        assert!(!db.is_available());
    }
}
