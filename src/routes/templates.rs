// ABOUTME: Route handlers for workout templates
// ABOUTME: List/get with ordered exercises, validated create, partial update, cascade delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::database::{NewTemplate, NewTemplateExercise, TemplateUpdate};
use crate::errors::AppError;
use crate::models::{TemplateExercise, WorkoutTemplate};
use crate::resources::ServerResources;

use super::require_user;

/// Response shape for one template exercise
#[derive(Debug, Serialize, Deserialize)]
pub struct TemplateExerciseResponse {
    /// Unique identifier
    pub id: i64,
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
    /// Zero-based display order
    pub position: i32,
}

impl From<TemplateExercise> for TemplateExerciseResponse {
    fn from(exercise: TemplateExercise) -> Self {
        Self {
            id: exercise.id,
            name: exercise.name,
            sets: exercise.sets,
            reps: exercise.reps,
            weight: exercise.weight,
            notes: exercise.notes,
            position: exercise.position,
        }
    }
}

/// Response shape for a template with ordered exercises
#[derive(Debug, Serialize, Deserialize)]
pub struct TemplateResponse {
    /// Unique identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Ordered exercises
    pub exercises: Vec<TemplateExerciseResponse>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl TemplateResponse {
    /// Assemble the composite response from a template and its exercises
    fn from_parts(template: WorkoutTemplate, exercises: Vec<TemplateExercise>) -> Self {
        Self {
            id: template.id,
            name: template.name,
            description: template.description,
            exercises: exercises.into_iter().map(Into::into).collect(),
            created_at: template.created_at.to_rfc3339(),
            updated_at: template.updated_at.to_rfc3339(),
        }
    }
}

/// Request body for one exercise within a new template
#[derive(Debug, Deserialize)]
pub struct CreateTemplateExerciseBody {
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

/// Request body for creating a template
#[derive(Debug, Deserialize)]
pub struct CreateTemplateBody {
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Exercise entries in display order
    pub exercises: Vec<CreateTemplateExerciseBody>,
}

/// Request body for a partial template update
#[derive(Debug, Deserialize, Default)]
pub struct UpdateTemplateBody {
    /// New name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
}

/// Response for a created template
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTemplateResponse {
    /// The new template id
    pub id: i64,
}

/// Response for a successful mutation
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateTemplateResponse {
    /// Whether the row was updated
    pub success: bool,
}

impl TryFrom<CreateTemplateBody> for NewTemplate {
    type Error = AppError;

    fn try_from(body: CreateTemplateBody) -> Result<Self, Self::Error> {
        if body.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }

        let mut exercises = Vec::with_capacity(body.exercises.len());
        for exercise in body.exercises {
            if exercise.name.trim().is_empty() {
                return Err(AppError::missing_field("exercise name"));
            }
            if exercise.sets < 0 || exercise.reps < 0 || exercise.weight < 0 {
                return Err(AppError::out_of_range(
                    "sets, reps and weight must be non-negative",
                ));
            }
            exercises.push(NewTemplateExercise {
                name: exercise.name,
                sets: exercise.sets,
                reps: exercise.reps,
                weight: exercise.weight,
                notes: exercise.notes,
            });
        }

        Ok(Self {
            name: body.name,
            description: body.description,
            exercises,
        })
    }
}

/// Template routes handler
pub struct TemplateRoutes;

impl TemplateRoutes {
    /// Create all template routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/templates", get(Self::handle_list))
            .route("/api/templates", post(Self::handle_create))
            .route("/api/templates/:id", get(Self::handle_get))
            .route("/api/templates/:id", put(Self::handle_update))
            .route("/api/templates/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// Handle GET /api/templates - List templates with ordered exercises
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = require_user(&headers, &resources).await?;

        let templates = resources.database.get_templates_by_user(user.id).await?;
        let mut responses = Vec::with_capacity(templates.len());
        for template in templates {
            let exercises = resources
                .database
                .get_template_exercises(template.id)
                .await?;
            responses.push(TemplateResponse::from_parts(template, exercises));
        }

        Ok((StatusCode::OK, Json(responses)).into_response())
    }

    /// Handle GET /api/templates/:id - Get a single template
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let user = require_user(&headers, &resources).await?;

        let template = resources
            .database
            .get_template_by_id(id, user.id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Template {id}")))?;
        let exercises = resources.database.get_template_exercises(id).await?;

        let response = TemplateResponse::from_parts(template, exercises);
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/templates - Create a template
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<CreateTemplateBody>,
    ) -> Result<Response, AppError> {
        let user = require_user(&headers, &resources).await?;

        let new_template: NewTemplate = body.try_into()?;
        let id = resources.database.create_template(user.id, &new_template).await?;

        Ok((StatusCode::CREATED, Json(CreateTemplateResponse { id })).into_response())
    }

    /// Handle PUT /api/templates/:id - Partially update a template
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(body): Json<UpdateTemplateBody>,
    ) -> Result<Response, AppError> {
        let user = require_user(&headers, &resources).await?;

        let update = TemplateUpdate {
            name: body.name,
            description: body.description,
        };
        let updated = resources.database.update_template(id, user.id, &update).await?;

        if !updated {
            return Err(AppError::not_found(format!("Template {id}")));
        }
        Ok((StatusCode::OK, Json(UpdateTemplateResponse { success: true })).into_response())
    }

    /// Handle DELETE /api/templates/:id - Delete a template and its exercises
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let user = require_user(&headers, &resources).await?;

        let deleted = resources.database.delete_template(id, user.id).await?;
        if !deleted {
            return Err(AppError::not_found(format!("Template {id}")));
        }

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
