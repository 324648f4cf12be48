// ABOUTME: User account model backed by external authentication
// ABOUTME: User and UserRole definitions with database string conversions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// User role for the permission system
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular user
    #[default]
    User,
    /// Administrator (seed data management)
    Admin,
}

impl UserRole {
    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(AppError::invalid_input(format!("Invalid user role: {s}"))),
        }
    }
}

/// Represents a user account
///
/// Users are created on first successful external authentication and are
/// identified by the subject id (`open_id`) the auth gateway returns.
/// Accounts are never hard-deleted by the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Surrogate primary key
    pub id: i64,
    /// External-auth subject identifier, unique per user
    pub open_id: String,
    /// Display name
    pub name: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Authentication method used at the gateway
    pub login_method: Option<String>,
    /// Role for the permission system
    pub role: UserRole,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// Last time the account row was modified
    pub updated_at: DateTime<Utc>,
    /// Refreshed on each login
    pub last_signed_in: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [UserRole::User, UserRole::Admin] {
            let restored: UserRole = role.as_str().parse().unwrap();
            assert_eq!(role, restored);
        }
    }

    #[test]
    fn test_role_rejects_unknown() {
        assert!("superuser".parse::<UserRole>().is_err());
    }
}
