// ABOUTME: Route handlers for cardio sessions
// ABOUTME: Read-only surface: sessions are created with their workout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::CardioSession;
use crate::resources::ServerResources;

use super::require_user;

/// Response shape for a cardio session
#[derive(Debug, Serialize, Deserialize)]
pub struct CardioResponse {
    /// Unique identifier
    pub id: i64,
    /// Linked workout, when part of one
    pub workout_id: Option<i64>,
    /// Activity kind
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
    /// When the session happened
    pub date: String,
    /// Optional notes
    pub notes: Option<String>,
}

impl From<CardioSession> for CardioResponse {
    fn from(session: CardioSession) -> Self {
        Self {
            id: session.id,
            workout_id: session.workout_id,
            kind: session.kind,
            duration: session.duration,
            distance: session.distance,
            avg_heart_rate: session.avg_heart_rate,
            pace: session.pace,
            calories_burned: session.calories_burned,
            date: session.date.to_rfc3339(),
            notes: session.notes,
        }
    }
}

/// Cardio routes handler
pub struct CardioRoutes;

impl CardioRoutes {
    /// Create all cardio routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/cardio", get(Self::handle_list))
            .route("/api/workouts/:id/cardio", get(Self::handle_by_workout))
            .with_state(resources)
    }

    /// Handle GET /api/cardio - List the caller's sessions, newest first
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = require_user(&headers, &resources).await?;

        let sessions = resources.database.get_cardio_by_user(user.id).await?;
        let response: Vec<CardioResponse> = sessions.into_iter().map(Into::into).collect();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/workouts/:id/cardio - Sessions linked to a workout
    async fn handle_by_workout(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let user = require_user(&headers, &resources).await?;

        let sessions = resources.database.get_cardio_by_workout(id, user.id).await?;
        let response: Vec<CardioResponse> = sessions.into_iter().map(Into::into).collect();
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
