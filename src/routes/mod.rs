// ABOUTME: Route module organization for Ferro HTTP endpoints
// ABOUTME: Per-resource route definitions plus shared caller authentication
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

//! Route module
//!
//! Routes are organized by resource. Each module contains route
//! definitions and thin handlers that validate input, call the data access
//! layer and shape composite responses.

use std::sync::Arc;

use http::HeaderMap;

use crate::auth::bearer_token;
use crate::errors::AppError;
use crate::models::User;
use crate::resources::ServerResources;

/// Authentication and session routes
pub mod auth;
/// Cardio session routes
pub mod cardio;
/// Standalone exercise mutation routes
pub mod exercises;
/// Shared exercise library routes
pub mod exercise_library;
/// Health check and system status routes
pub mod health;
/// Progress photo routes
pub mod photos;
/// Derived training statistics routes
pub mod stats;
/// Workout template routes
pub mod templates;
/// User custom exercise routes
pub mod user_exercises;
/// Workout routes
pub mod workouts;

/// Authentication route handlers
pub use auth::AuthRoutes;
/// Cardio route handlers
pub use cardio::CardioRoutes;
/// Exercise library route handlers
pub use exercise_library::ExerciseLibraryRoutes;
/// Exercise route handlers
pub use exercises::ExerciseRoutes;
/// Health check route handlers
pub use health::HealthRoutes;
/// Progress photo route handlers
pub use photos::PhotoRoutes;
/// Statistics route handlers
pub use stats::StatsRoutes;
/// Template route handlers
pub use templates::TemplateRoutes;
/// User custom exercise route handlers
pub use user_exercises::UserExerciseRoutes;
/// Workout route handlers
pub use workouts::WorkoutRoutes;

/// Authenticate the caller from the `Authorization` header or the session
/// cookie, resolving the full user row
pub(crate) async fn require_user(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> Result<User, AppError> {
    let Some(token) = bearer_token(headers) else {
        return Err(AppError::auth_required());
    };

    let claims = resources.auth_manager.validate_token(&token)?;

    resources
        .database
        .get_user_by_open_id(&claims.sub)
        .await?
        .ok_or_else(|| AppError::auth_invalid("Session token references an unknown user"))
}

/// Resolve the caller when credentials are present and valid, `None`
/// otherwise
///
/// Public endpoints (e.g. `auth.me`) render an anonymous state instead of
/// failing on missing or stale credentials.
pub(crate) async fn optional_user(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> Result<Option<User>, AppError> {
    let Some(token) = bearer_token(headers) else {
        return Ok(None);
    };

    let Ok(claims) = resources.auth_manager.validate_token(&token) else {
        return Ok(None);
    };

    resources.database.get_user_by_open_id(&claims.sub).await
}
