// ABOUTME: User account database operations
// ABOUTME: Upsert on external authentication, lookup by subject id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row};

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{User, UserRole};

/// Fields accepted when upserting a user on login
///
/// Absent optional fields leave the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct UpsertUser {
    /// External-auth subject identifier
    pub open_id: String,
    /// Display name
    pub name: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Authentication method used at the gateway
    pub login_method: Option<String>,
    /// Role override (seed/admin tooling only)
    pub role: Option<UserRole>,
}

impl Database {
    /// Create the users table
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unavailable or table creation fails
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        let pool = self.write_pool()?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                open_id TEXT NOT NULL UNIQUE,
                name TEXT,
                email TEXT,
                login_method TEXT,
                role TEXT NOT NULL DEFAULT 'user' CHECK (role IN ('user', 'admin')),
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                last_signed_in DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create users table: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_open_id ON users(open_id)")
            .execute(pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create users index: {e}")))?;

        Ok(())
    }

    /// Create or update a user on external authentication
    ///
    /// Refreshes `last_signed_in` on every call. Returns the user id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unavailable or the write fails
    pub async fn upsert_user(&self, user: &UpsertUser) -> AppResult<i64> {
        if user.open_id.is_empty() {
            return Err(AppError::missing_field("open_id"));
        }
        let pool = self.write_pool()?;
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO users (open_id, name, email, login_method, role, last_signed_in)
            VALUES ($1, $2, $3, $4, COALESCE($5, 'user'), $6)
            ON CONFLICT(open_id) DO UPDATE SET
                name = COALESCE(excluded.name, users.name),
                email = COALESCE(excluded.email, users.email),
                login_method = COALESCE(excluded.login_method, users.login_method),
                role = COALESCE($5, users.role),
                last_signed_in = excluded.last_signed_in,
                updated_at = CURRENT_TIMESTAMP
            ",
        )
        .bind(&user.open_id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.login_method)
        .bind(user.role.map(|r| r.as_str()))
        .bind(now)
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert user: {e}")))?;

        let id: i64 = sqlx::query_scalar("SELECT id FROM users WHERE open_id = $1")
            .bind(&user.open_id)
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to read back user id: {e}")))?;

        Ok(id)
    }

    /// Get a user by external-auth subject id
    ///
    /// Degrades to `None` when the database is unavailable.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user_by_open_id(&self, open_id: &str) -> AppResult<Option<User>> {
        let Some(pool) = self.read_pool() else {
            return Ok(None);
        };

        let row = sqlx::query(
            r"
            SELECT id, open_id, name, email, login_method, role,
                   created_at, updated_at, last_signed_in
            FROM users WHERE open_id = $1
            ",
        )
        .bind(open_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    /// Get a user by id
    ///
    /// Degrades to `None` when the database is unavailable.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user(&self, user_id: i64) -> AppResult<Option<User>> {
        let Some(pool) = self.read_pool() else {
            return Ok(None);
        };

        let row = sqlx::query(
            r"
            SELECT id, open_id, name, email, login_method, role,
                   created_at, updated_at, last_signed_in
            FROM users WHERE id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user {user_id}: {e}")))?;

        row.map(|r| row_to_user(&r)).transpose()
    }
}

/// Convert a database row to a `User`
fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    let role: String = row.get("role");
    Ok(User {
        id: row.get("id"),
        open_id: row.get("open_id"),
        name: row.get("name"),
        email: row.get("email"),
        login_method: row.get("login_method"),
        role: role.parse()?,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        last_signed_in: row.get("last_signed_in"),
    })
}
