// ABOUTME: Route handlers for progress photos
// ABOUTME: Base64 upload to object storage before the metadata row, scoped list/delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

//! Progress photo routes
//!
//! Uploads are synchronous: decode base64, write to object storage, then
//! record the metadata row. A storage failure aborts the operation before
//! any row exists, so the database never references a missing object.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::database::NewProgressPhoto;
use crate::errors::AppError;
use crate::models::{Pose, ProgressPhoto};
use crate::resources::ServerResources;
use crate::storage::{decode_base64, photo_key};

use super::require_user;

/// Response shape for a progress photo
#[derive(Debug, Serialize, Deserialize)]
pub struct PhotoResponse {
    /// Unique identifier
    pub id: i64,
    /// Public URL of the stored image
    pub url: String,
    /// Photo angle
    pub pose: String,
    /// User-assigned week number
    pub week: i32,
    /// When the photo was taken
    pub date: String,
    /// Optional notes
    pub notes: Option<String>,
    /// Body weight in kg
    pub weight: Option<i32>,
    /// Chest circumference in cm
    pub chest: Option<i32>,
    /// Waist circumference in cm
    pub waist: Option<i32>,
    /// Hips circumference in cm
    pub hips: Option<i32>,
    /// Left arm circumference in cm
    pub left_arm: Option<i32>,
    /// Right arm circumference in cm
    pub right_arm: Option<i32>,
    /// Left thigh circumference in cm
    pub left_thigh: Option<i32>,
    /// Right thigh circumference in cm
    pub right_thigh: Option<i32>,
    /// Left calf circumference in cm
    pub left_calf: Option<i32>,
    /// Right calf circumference in cm
    pub right_calf: Option<i32>,
    /// Creation timestamp
    pub created_at: String,
}

impl From<ProgressPhoto> for PhotoResponse {
    fn from(photo: ProgressPhoto) -> Self {
        Self {
            id: photo.id,
            url: photo.url,
            pose: photo.pose.as_str().to_owned(),
            week: photo.week,
            date: photo.date.to_rfc3339(),
            notes: photo.notes,
            weight: photo.weight,
            chest: photo.chest,
            waist: photo.waist,
            hips: photo.hips,
            left_arm: photo.left_arm,
            right_arm: photo.right_arm,
            left_thigh: photo.left_thigh,
            right_thigh: photo.right_thigh,
            left_calf: photo.left_calf,
            right_calf: photo.right_calf,
            created_at: photo.created_at.to_rfc3339(),
        }
    }
}

/// Request body for a photo upload
#[derive(Debug, Deserialize)]
pub struct UploadPhotoBody {
    /// Base64-encoded image payload
    pub file_data: String,
    /// Original file name, used in the storage key
    pub file_name: String,
    /// MIME content type of the payload
    pub content_type: String,
    /// Photo angle: front, back or side
    pub pose: String,
    /// User-assigned week number, positive
    pub week: i32,
    /// When the photo was taken
    pub date: DateTime<Utc>,
    /// Optional notes
    pub notes: Option<String>,
    /// Body weight in kg
    pub weight: Option<i32>,
    /// Chest circumference in cm
    pub chest: Option<i32>,
    /// Waist circumference in cm
    pub waist: Option<i32>,
    /// Hips circumference in cm
    pub hips: Option<i32>,
    /// Left arm circumference in cm
    pub left_arm: Option<i32>,
    /// Right arm circumference in cm
    pub right_arm: Option<i32>,
    /// Left thigh circumference in cm
    pub left_thigh: Option<i32>,
    /// Right thigh circumference in cm
    pub right_thigh: Option<i32>,
    /// Left calf circumference in cm
    pub left_calf: Option<i32>,
    /// Right calf circumference in cm
    pub right_calf: Option<i32>,
}

/// Response for a completed upload
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadPhotoResponse {
    /// Public URL of the stored image
    pub url: String,
}

/// Progress photo routes handler
pub struct PhotoRoutes;

impl PhotoRoutes {
    /// Create all photo routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/photos", get(Self::handle_list))
            .route("/api/photos", post(Self::handle_upload))
            .route("/api/photos/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// Handle GET /api/photos - List photos, most recent date first
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = require_user(&headers, &resources).await?;

        let photos = resources
            .database
            .get_progress_photos_by_user(user.id)
            .await?;
        let response: Vec<PhotoResponse> = photos.into_iter().map(Into::into).collect();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/photos - Upload a photo with measurements
    async fn handle_upload(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<UploadPhotoBody>,
    ) -> Result<Response, AppError> {
        let user = require_user(&headers, &resources).await?;

        let pose: Pose = body.pose.parse()?;
        if body.week < 1 {
            return Err(AppError::out_of_range("week must be a positive integer"));
        }
        if body.file_data.is_empty() {
            return Err(AppError::missing_field("file_data"));
        }

        let bytes = decode_base64(&body.file_data)?;
        let key = photo_key(user.id, Utc::now().timestamp_millis(), &body.file_name);

        // The storage write must return a durable reference before the row
        // references it
        let stored = resources
            .storage
            .put(&key, bytes, &body.content_type)
            .await?;

        let photo = NewProgressPhoto {
            file_key: stored.key,
            url: stored.url.clone(),
            pose,
            week: body.week,
            date: body.date,
            notes: body.notes,
            weight: body.weight,
            chest: body.chest,
            waist: body.waist,
            hips: body.hips,
            left_arm: body.left_arm,
            right_arm: body.right_arm,
            left_thigh: body.left_thigh,
            right_thigh: body.right_thigh,
            left_calf: body.left_calf,
            right_calf: body.right_calf,
        };
        resources.database.create_progress_photo(user.id, &photo).await?;

        Ok((StatusCode::CREATED, Json(UploadPhotoResponse { url: stored.url })).into_response())
    }

    /// Handle DELETE /api/photos/:id - Delete a photo and its stored object
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let user = require_user(&headers, &resources).await?;

        let photo = resources
            .database
            .get_progress_photo(id, user.id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Photo {id}")))?;

        let deleted = resources.database.delete_progress_photo(id, user.id).await?;
        if !deleted {
            return Err(AppError::not_found(format!("Photo {id}")));
        }

        // The row is gone; an orphaned object is only a cleanup concern
        if let Err(e) = resources.storage.delete(&photo.file_key).await {
            warn!("Failed to delete stored object {}: {e}", photo.file_key);
        }

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
