// ABOUTME: Cardio session model, optionally linked to a workout
// ABOUTME: Duration is required; distance, pace and heart rate are optional
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cardio session
///
/// Created alongside a workout when cardio data is supplied with the log
/// action; not independently editable in the current surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardioSession {
    /// Surrogate primary key
    pub id: i64,
    /// Linked workout, when part of one
    pub workout_id: Option<i64>,
    /// Owning user
    pub user_id: i64,
    /// Free-text activity kind, e.g. "Corrida", "Bicicleta", "Esteira"
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
    pub date: DateTime<Utc>,
    /// Optional notes
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
