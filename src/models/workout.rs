// ABOUTME: Workout and exercise models, the core entities of the tracker
// ABOUTME: Workout, Exercise and the composite WorkoutWithExercises read shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A workout session performed on a given date
///
/// Optional session metrics are stored as `None` when unset, never zero, so
/// aggregates can distinguish "unset" from "zero".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    /// Surrogate primary key
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Display name, e.g. "Treino A - Peito e Tríceps"
    pub name: String,
    /// When the workout was performed (distinct from creation time)
    pub date: DateTime<Utc>,
    /// General notes about the workout
    pub notes: Option<String>,
    /// Duration in minutes
    pub duration: Option<i32>,
    /// Hours of sleep before the workout
    pub sleep_hours: Option<i32>,
    /// Average heart rate during the workout
    pub avg_heart_rate: Option<i32>,
    /// Total calories burned
    pub calories_burned: Option<i32>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// A strength exercise performed within a workout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    /// Surrogate primary key
    pub id: i64,
    /// Owning workout
    pub workout_id: i64,
    /// Exercise name, e.g. "Supino Reto"
    pub name: String,
    /// Number of sets
    pub sets: i32,
    /// Number of reps per set
    pub reps: i32,
    /// Weight in whole kilograms (integer storage avoids decimal drift in
    /// volume sums)
    pub weight: i32,
    /// Whether the exercise was completed
    pub completed: bool,
    /// Exercise-specific notes
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A workout with its child exercises attached
///
/// Every list/get response carries this shape; callers depend on
/// `exercises` being populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutWithExercises {
    /// The workout row
    #[serde(flatten)]
    pub workout: Workout,
    /// Child exercises
    pub exercises: Vec<Exercise>,
}
