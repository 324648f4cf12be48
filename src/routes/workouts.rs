// ABOUTME: Route handlers for the workouts REST API
// ABOUTME: List/get with nested exercises, validated create, partial update, cascade delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

//! Workout routes
//!
//! Every read attaches the child exercises before returning: callers
//! depend on `exercises` being populated, so omitting it would break the
//! contract.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::{NewCardioSession, NewExercise, NewWorkout, WorkoutUpdate};
use crate::errors::AppError;
use crate::models::{Exercise, Workout};
use crate::resources::ServerResources;

use super::require_user;

/// Response shape for one exercise
#[derive(Debug, Serialize, Deserialize)]
pub struct ExerciseResponse {
    /// Unique identifier
    pub id: i64,
    /// Exercise name
    pub name: String,
    /// Number of sets
    pub sets: i32,
    /// Number of reps per set
    pub reps: i32,
    /// Weight in whole kilograms
    pub weight: i32,
    /// Whether the exercise was completed
    pub completed: bool,
    /// Exercise-specific notes
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: String,
}

impl From<Exercise> for ExerciseResponse {
    fn from(exercise: Exercise) -> Self {
        Self {
            id: exercise.id,
            name: exercise.name,
            sets: exercise.sets,
            reps: exercise.reps,
            weight: exercise.weight,
            completed: exercise.completed,
            notes: exercise.notes,
            created_at: exercise.created_at.to_rfc3339(),
        }
    }
}

/// Response shape for a workout with nested exercises
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkoutResponse {
    /// Unique identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// When the workout was performed
    pub date: String,
    /// General notes
    pub notes: Option<String>,
    /// Duration in minutes
    pub duration: Option<i32>,
    /// Hours of sleep before the workout
    pub sleep_hours: Option<i32>,
    /// Average heart rate
    pub avg_heart_rate: Option<i32>,
    /// Calories burned
    pub calories_burned: Option<i32>,
    /// Child exercises
    pub exercises: Vec<ExerciseResponse>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl WorkoutResponse {
    /// Assemble the composite response from a workout and its exercises
    fn from_parts(workout: Workout, exercises: Vec<Exercise>) -> Self {
        Self {
            id: workout.id,
            name: workout.name,
            date: workout.date.to_rfc3339(),
            notes: workout.notes,
            duration: workout.duration,
            sleep_hours: workout.sleep_hours,
            avg_heart_rate: workout.avg_heart_rate,
            calories_burned: workout.calories_burned,
            exercises: exercises.into_iter().map(Into::into).collect(),
            created_at: workout.created_at.to_rfc3339(),
            updated_at: workout.updated_at.to_rfc3339(),
        }
    }
}

/// Request body for one exercise within a new workout
#[derive(Debug, Deserialize)]
pub struct CreateExerciseBody {
    /// Exercise name
    pub name: String,
    /// Number of sets
    pub sets: i32,
    /// Number of reps per set
    pub reps: i32,
    /// Weight in whole kilograms
    pub weight: i32,
    /// Exercise-specific notes
    pub notes: Option<String>,
}

/// Request body for a cardio session logged with a workout
#[derive(Debug, Deserialize)]
pub struct CreateCardioBody {
    /// Activity kind, e.g. "Corrida"
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
    /// Optional notes
    pub notes: Option<String>,
}

/// Request body for logging a workout
#[derive(Debug, Deserialize)]
pub struct CreateWorkoutBody {
    /// Display name
    pub name: String,
    /// When the workout was performed
    pub date: DateTime<Utc>,
    /// General notes
    pub notes: Option<String>,
    /// Duration in minutes
    pub duration: Option<i32>,
    /// Hours of sleep before the workout
    pub sleep_hours: Option<i32>,
    /// Average heart rate
    pub avg_heart_rate: Option<i32>,
    /// Calories burned
    pub calories_burned: Option<i32>,
    /// Exercises performed, at least one
    pub exercises: Vec<CreateExerciseBody>,
    /// Optional cardio session
    pub cardio: Option<CreateCardioBody>,
}

/// Request body for a partial workout update
#[derive(Debug, Deserialize, Default)]
pub struct UpdateWorkoutBody {
    /// New name
    pub name: Option<String>,
    /// New performed date
    pub date: Option<DateTime<Utc>>,
    /// New notes
    pub notes: Option<String>,
}

/// Response for a created workout
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateWorkoutResponse {
    /// The new workout id
    pub id: i64,
}

/// Response for a successful mutation
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateResponse {
    /// Whether the row was updated
    pub success: bool,
}

impl TryFrom<CreateWorkoutBody> for NewWorkout {
    type Error = AppError;

    fn try_from(body: CreateWorkoutBody) -> Result<Self, Self::Error> {
        if body.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }
        if body.exercises.is_empty() {
            return Err(AppError::invalid_input(
                "Workout must include at least one exercise",
            ));
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
            exercises.push(NewExercise {
                name: exercise.name,
                sets: exercise.sets,
                reps: exercise.reps,
                weight: exercise.weight,
                notes: exercise.notes,
            });
        }

        let cardio = match body.cardio {
            Some(cardio) => {
                if cardio.kind.trim().is_empty() {
                    return Err(AppError::missing_field("cardio kind"));
                }
                if cardio.duration < 0 {
                    return Err(AppError::out_of_range("cardio duration must be non-negative"));
                }
                Some(NewCardioSession {
                    kind: cardio.kind,
                    duration: cardio.duration,
                    distance: cardio.distance,
                    avg_heart_rate: cardio.avg_heart_rate,
                    pace: cardio.pace,
                    calories_burned: cardio.calories_burned,
                    notes: cardio.notes,
                })
            }
            None => None,
        };

        Ok(Self {
            name: body.name,
            date: body.date,
            notes: body.notes,
            duration: body.duration,
            sleep_hours: body.sleep_hours,
            avg_heart_rate: body.avg_heart_rate,
            calories_burned: body.calories_burned,
            exercises,
            cardio,
        })
    }
}

/// Workout routes handler
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/workouts", get(Self::handle_list))
            .route("/api/workouts", post(Self::handle_create))
            .route("/api/workouts/:id", get(Self::handle_get))
            .route("/api/workouts/:id", put(Self::handle_update))
            .route("/api/workouts/:id", delete(Self::handle_delete))
            .route("/api/workouts/:id/exercises", get(Self::handle_list_exercises))
            .with_state(resources)
    }

    /// Handle GET /api/workouts - List workouts with nested exercises
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = require_user(&headers, &resources).await?;

        let workouts = resources
            .database
            .get_workouts_with_exercises(user.id)
            .await?;
        let responses: Vec<WorkoutResponse> = workouts
            .into_iter()
            .map(|w| WorkoutResponse::from_parts(w.workout, w.exercises))
            .collect();

        Ok((StatusCode::OK, Json(responses)).into_response())
    }

    /// Handle GET /api/workouts/:id - Get a single workout
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let user = require_user(&headers, &resources).await?;

        let workout = resources
            .database
            .get_workout_by_id(id, user.id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Workout {id}")))?;
        let exercises = resources.database.get_exercises_by_workout(id).await?;

        let response = WorkoutResponse::from_parts(workout, exercises);
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/workouts - Log a new workout
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<CreateWorkoutBody>,
    ) -> Result<Response, AppError> {
        let user = require_user(&headers, &resources).await?;

        let new_workout: NewWorkout = body.try_into()?;
        let id = resources.database.create_workout(user.id, &new_workout).await?;

        Ok((StatusCode::CREATED, Json(CreateWorkoutResponse { id })).into_response())
    }

    /// Handle PUT /api/workouts/:id - Partially update a workout
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(body): Json<UpdateWorkoutBody>,
    ) -> Result<Response, AppError> {
        let user = require_user(&headers, &resources).await?;

        let update = WorkoutUpdate {
            name: body.name,
            date: body.date,
            notes: body.notes,
        };
        let updated = resources.database.update_workout(id, user.id, &update).await?;

        if !updated {
            return Err(AppError::not_found(format!("Workout {id}")));
        }
        Ok((StatusCode::OK, Json(UpdateResponse { success: true })).into_response())
    }

    /// Handle DELETE /api/workouts/:id - Delete a workout and its children
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let user = require_user(&headers, &resources).await?;

        let deleted = resources.database.delete_workout(id, user.id).await?;
        if !deleted {
            return Err(AppError::not_found(format!("Workout {id}")));
        }

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    /// Handle GET /api/workouts/:id/exercises - List a workout's exercises
    async fn handle_list_exercises(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let user = require_user(&headers, &resources).await?;

        // Ownership check before touching the child table
        resources
            .database
            .get_workout_by_id(id, user.id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Workout {id}")))?;

        let exercises = resources.database.get_exercises_by_workout(id).await?;
        let response: Vec<ExerciseResponse> = exercises.into_iter().map(Into::into).collect();
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
