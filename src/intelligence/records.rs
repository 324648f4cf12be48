// ABOUTME: Personal records per exercise name: the heaviest weight ever logged
// ABOUTME: Strict-greater replacement keeps the first occurrence on ties
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::WorkoutWithExercises;

/// The heaviest occurrence of one exercise across all workouts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    /// Exercise name
    pub exercise_name: String,
    /// Heaviest weight logged, in kg
    pub max_weight: i32,
    /// Date of the workout that set the record
    pub date: DateTime<Utc>,
    /// Sets performed in the record occurrence
    pub sets: i32,
    /// Reps performed in the record occurrence
    pub reps: i32,
}

/// Summary statistics over a record list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordsSummary {
    /// Number of distinct exercises with a record
    pub total_records: u32,
    /// Average of the record weights, rounded to the nearest kg
    pub average_weight: i32,
    /// The heaviest record overall, when any
    pub top: Option<ExerciseRecord>,
}

/// Compute personal records from a workout list
///
/// Walks the workouts in their listed order; a record is replaced only on a
/// strictly greater weight, so the first-encountered occurrence wins ties.
/// The result is sorted by `max_weight` descending for display; ranking is
/// purely positional after sorting. Ties keep first-encounter order (the
/// sort is stable). An empty input yields an empty list.
#[must_use]
pub fn personal_records(workouts: &[WorkoutWithExercises]) -> Vec<ExerciseRecord> {
    let mut records: Vec<ExerciseRecord> = Vec::new();
    let mut index_by_name: HashMap<&str, usize> = HashMap::new();

    for workout in workouts {
        for exercise in &workout.exercises {
            match index_by_name.get(exercise.name.as_str()) {
                Some(&i) => {
                    if exercise.weight > records[i].max_weight {
                        records[i] = ExerciseRecord {
                            exercise_name: exercise.name.clone(),
                            max_weight: exercise.weight,
                            date: workout.workout.date,
                            sets: exercise.sets,
                            reps: exercise.reps,
                        };
                    }
                }
                None => {
                    index_by_name.insert(exercise.name.as_str(), records.len());
                    records.push(ExerciseRecord {
                        exercise_name: exercise.name.clone(),
                        max_weight: exercise.weight,
                        date: workout.workout.date,
                        sets: exercise.sets,
                        reps: exercise.reps,
                    });
                }
            }
        }
    }

    records.sort_by(|a, b| b.max_weight.cmp(&a.max_weight));
    records
}

/// Summarize a record list
///
/// The zero-state for an empty list is zero counts and no top record.
#[must_use]
pub fn records_summary(records: &[ExerciseRecord]) -> RecordsSummary {
    if records.is_empty() {
        return RecordsSummary {
            total_records: 0,
            average_weight: 0,
            top: None,
        };
    }

    let total: i64 = records.iter().map(|r| i64::from(r.max_weight)).sum();
    #[allow(clippy::cast_precision_loss)]
    let average = (total as f64 / records.len() as f64).round();
    #[allow(clippy::cast_possible_truncation)]
    let average_weight = average as i32;

    RecordsSummary {
        total_records: u32::try_from(records.len()).unwrap_or(u32::MAX),
        average_weight,
        top: records.first().cloned(),
    }
}
