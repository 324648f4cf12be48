// ABOUTME: Common data models for the Ferro fitness tracking API
// ABOUTME: Entities shared by the database, route and intelligence layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

//! Data models for workouts, photos, templates and the exercise library

/// Cardio session model
pub mod cardio;
/// Exercise library and user custom exercise models
pub mod exercise_library;
/// Progress photo models
pub mod photo;
/// Workout template models
pub mod template;
/// User account model
pub mod user;
/// Workout and exercise models
pub mod workout;

pub use cardio::CardioSession;
pub use exercise_library::{Difficulty, LibraryExercise, MediaType, UserCustomExercise};
pub use photo::{Pose, ProgressPhoto};
pub use template::{TemplateExercise, TemplateWithExercises, WorkoutTemplate};
pub use user::{User, UserRole};
pub use workout::{Exercise, Workout, WorkoutWithExercises};
