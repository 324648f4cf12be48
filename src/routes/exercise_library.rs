// ABOUTME: Route handlers for the shared exercise library
// ABOUTME: Read-only global catalog, optionally filtered by muscle group
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::LibraryExercise;
use crate::resources::ServerResources;

use super::require_user;

/// Response shape for a library exercise
#[derive(Debug, Serialize, Deserialize)]
pub struct LibraryExerciseResponse {
    /// Unique identifier
    pub id: i64,
    /// Exercise name
    pub name: String,
    /// Muscle group
    pub muscle_group: String,
    /// Equipment used
    pub equipment: Option<String>,
    /// Difficulty level
    pub difficulty: String,
    /// URL of the demonstration asset
    pub media_url: String,
    /// Media type of the demonstration asset
    pub media_type: String,
    /// How to perform the exercise
    pub description: Option<String>,
}

impl From<LibraryExercise> for LibraryExerciseResponse {
    fn from(exercise: LibraryExercise) -> Self {
        Self {
            id: exercise.id,
            name: exercise.name,
            muscle_group: exercise.muscle_group,
            equipment: exercise.equipment,
            difficulty: exercise.difficulty.as_str().to_owned(),
            media_url: exercise.media_url,
            media_type: exercise.media_type.as_str().to_owned(),
            description: exercise.description,
        }
    }
}

/// Query parameters for listing the library
#[derive(Debug, Deserialize, Default)]
pub struct ListLibraryQuery {
    /// Filter by muscle group
    pub muscle_group: Option<String>,
}

/// Exercise library routes handler
pub struct ExerciseLibraryRoutes;

impl ExerciseLibraryRoutes {
    /// Create all library routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/exercise-library", get(Self::handle_list))
            .with_state(resources)
    }

    /// Handle GET /api/exercise-library - List the global library
    ///
    /// The library is shared read-only data: the caller must be
    /// authenticated, but results are not scoped to a user.
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ListLibraryQuery>,
    ) -> Result<Response, AppError> {
        require_user(&headers, &resources).await?;

        let exercises = resources
            .database
            .get_library_exercises(query.muscle_group.as_deref())
            .await?;
        let response: Vec<LibraryExerciseResponse> =
            exercises.into_iter().map(Into::into).collect();
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
