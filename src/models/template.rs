// ABOUTME: Workout template models for reusable workout structures
// ABOUTME: WorkoutTemplate, TemplateExercise and the composite read shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reusable, named list of exercises used to pre-fill new workouts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutTemplate {
    /// Surrogate primary key
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// An exercise entry within a template
///
/// `position` is zero-based creation order, used only for display ordering.
/// It is never recomputed after individual deletions, so gaps are fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateExercise {
    /// Surrogate primary key
    pub id: i64,
    /// Owning template
    pub template_id: i64,
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
    /// Zero-based display order assigned at creation
    pub position: i32,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A template with its ordered exercises attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateWithExercises {
    /// The template row
    #[serde(flatten)]
    pub template: WorkoutTemplate,
    /// Child exercises, ordered by `position` ascending
    pub exercises: Vec<TemplateExercise>,
}
