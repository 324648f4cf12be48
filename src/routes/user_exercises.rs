// ABOUTME: Route handlers for user custom exercises
// ABOUTME: CRUD with optional data-URL image upload to object storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

//! User custom exercise routes
//!
//! Custom exercises are always per-user, never shared. Media arrives as a
//! base64 data URL; it is decoded and written to object storage, and only
//! the resulting URL/type is recorded in the row.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::database::{NewUserExercise, UserExerciseUpdate};
use crate::errors::AppError;
use crate::models::{Difficulty, MediaType, UserCustomExercise};
use crate::resources::ServerResources;
use crate::storage::{exercise_media_key, parse_image_data_url};

use super::require_user;

/// Response shape for a custom exercise
#[derive(Debug, Serialize, Deserialize)]
pub struct UserExerciseResponse {
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
    /// URL of the uploaded media, when any
    pub media_url: Option<String>,
    /// Media type of the uploaded asset
    pub media_type: String,
    /// How to perform the exercise
    pub description: Option<String>,
    /// Creation timestamp
    pub created_at: String,
}

impl From<UserCustomExercise> for UserExerciseResponse {
    fn from(exercise: UserCustomExercise) -> Self {
        Self {
            id: exercise.id,
            name: exercise.name,
            muscle_group: exercise.muscle_group,
            equipment: exercise.equipment,
            difficulty: exercise.difficulty.as_str().to_owned(),
            media_url: exercise.media_url,
            media_type: exercise.media_type.as_str().to_owned(),
            description: exercise.description,
            created_at: exercise.created_at.to_rfc3339(),
        }
    }
}

/// Request body for creating or updating a custom exercise
#[derive(Debug, Deserialize)]
pub struct UserExerciseBody {
    /// Exercise name
    pub name: String,
    /// Muscle group
    pub muscle_group: String,
    /// Equipment used
    pub equipment: Option<String>,
    /// Difficulty level
    pub difficulty: Option<String>,
    /// Base64 data URL of the image/GIF, when uploading media
    pub image_data: Option<String>,
    /// How to perform the exercise
    pub description: Option<String>,
}

/// Response for a created custom exercise
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserExerciseResponse {
    /// The new exercise id
    pub id: i64,
}

/// Response for a successful mutation
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateUserExerciseResponse {
    /// Whether the row was updated
    pub success: bool,
}

/// Uploaded media recorded as a URL/type pair
struct UploadedMedia {
    url: String,
    media_type: MediaType,
}

/// User custom exercise routes handler
pub struct UserExerciseRoutes;

impl UserExerciseRoutes {
    /// Create all custom exercise routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/user-exercises", get(Self::handle_list))
            .route("/api/user-exercises", post(Self::handle_create))
            .route("/api/user-exercises/:id", put(Self::handle_update))
            .route("/api/user-exercises/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// Validate the required fields shared by create and update
    fn validate(body: &UserExerciseBody) -> Result<(), AppError> {
        if body.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }
        if body.muscle_group.trim().is_empty() {
            return Err(AppError::missing_field("muscle_group"));
        }
        Ok(())
    }

    /// Decode and store the media payload, when one was supplied
    async fn store_media(
        resources: &Arc<ServerResources>,
        user_id: i64,
        image_data: Option<&str>,
    ) -> Result<Option<UploadedMedia>, AppError> {
        let Some(data) = image_data else {
            return Ok(None);
        };
        let Some(image) = parse_image_data_url(data)? else {
            return Ok(None);
        };

        let key = exercise_media_key(user_id, Utc::now().timestamp_millis(), &image.extension);
        let content_type = image.content_type();
        let media_type = MediaType::from_extension(&image.extension);
        let stored = resources.storage.put(&key, image.bytes, &content_type).await?;

        Ok(Some(UploadedMedia {
            url: stored.url,
            media_type,
        }))
    }

    /// Handle GET /api/user-exercises - List the caller's custom exercises
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = require_user(&headers, &resources).await?;

        let exercises = resources.database.get_user_exercises(user.id).await?;
        let response: Vec<UserExerciseResponse> = exercises.into_iter().map(Into::into).collect();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/user-exercises - Create a custom exercise
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<UserExerciseBody>,
    ) -> Result<Response, AppError> {
        let user = require_user(&headers, &resources).await?;
        Self::validate(&body)?;

        let media = Self::store_media(&resources, user.id, body.image_data.as_deref()).await?;
        let (media_url, media_type) = match media {
            Some(media) => (Some(media.url), media.media_type),
            None => (None, MediaType::default()),
        };

        let exercise = NewUserExercise {
            name: body.name,
            muscle_group: body.muscle_group,
            equipment: body.equipment,
            difficulty: body
                .difficulty
                .as_deref()
                .map(Difficulty::parse)
                .unwrap_or_default(),
            media_url,
            media_type,
            description: body.description,
        };
        let id = resources.database.create_user_exercise(user.id, &exercise).await?;

        Ok((StatusCode::CREATED, Json(CreateUserExerciseResponse { id })).into_response())
    }

    /// Handle PUT /api/user-exercises/:id - Update a custom exercise
    ///
    /// Media is replaced only when a new image is supplied; otherwise the
    /// stored asset is kept.
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(body): Json<UserExerciseBody>,
    ) -> Result<Response, AppError> {
        let user = require_user(&headers, &resources).await?;
        Self::validate(&body)?;

        let media = Self::store_media(&resources, user.id, body.image_data.as_deref()).await?;
        let (media_url, media_type) = match media {
            Some(media) => (Some(media.url), Some(media.media_type)),
            None => (None, None),
        };

        let update = UserExerciseUpdate {
            name: body.name,
            muscle_group: body.muscle_group,
            equipment: body.equipment,
            difficulty: body.difficulty.as_deref().map(Difficulty::parse),
            media_url,
            media_type,
            description: body.description,
        };
        let updated = resources
            .database
            .update_user_exercise(id, user.id, &update)
            .await?;

        if !updated {
            return Err(AppError::not_found(format!("Custom exercise {id}")));
        }
        Ok((StatusCode::OK, Json(UpdateUserExerciseResponse { success: true })).into_response())
    }

    /// Handle DELETE /api/user-exercises/:id - Delete a custom exercise
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let user = require_user(&headers, &resources).await?;

        let deleted = resources.database.delete_user_exercise(id, user.id).await?;
        if !deleted {
            return Err(AppError::not_found(format!("Custom exercise {id}")));
        }

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
