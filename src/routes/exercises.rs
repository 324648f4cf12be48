// ABOUTME: Route handlers for standalone exercise mutations
// ABOUTME: Toggling completion, adjusting weight and notes on logged exercises
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::put;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::database::ExerciseUpdate;
use crate::errors::AppError;
use crate::resources::ServerResources;

use super::require_user;

/// Request body for a partial exercise update
#[derive(Debug, Deserialize, Default)]
pub struct UpdateExerciseBody {
    /// New completed flag
    pub completed: Option<bool>,
    /// New weight in whole kilograms
    pub weight: Option<i32>,
    /// New notes
    pub notes: Option<String>,
}

/// Response for a successful mutation
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateExerciseResponse {
    /// Whether the row was updated
    pub success: bool,
}

/// Exercise routes handler
pub struct ExerciseRoutes;

impl ExerciseRoutes {
    /// Create all exercise routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/exercises/:id", put(Self::handle_update))
            .with_state(resources)
    }

    /// Handle PUT /api/exercises/:id - Partially update an exercise
    ///
    /// Ownership is enforced through the parent workout.
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(body): Json<UpdateExerciseBody>,
    ) -> Result<Response, AppError> {
        let user = require_user(&headers, &resources).await?;

        if body.weight.is_some_and(|w| w < 0) {
            return Err(AppError::out_of_range("weight must be non-negative"));
        }

        let update = ExerciseUpdate {
            completed: body.completed,
            weight: body.weight,
            notes: body.notes,
        };
        let updated = resources.database.update_exercise(id, user.id, &update).await?;

        if !updated {
            return Err(AppError::not_found(format!("Exercise {id}")));
        }
        Ok((StatusCode::OK, Json(UpdateExerciseResponse { success: true })).into_response())
    }
}
