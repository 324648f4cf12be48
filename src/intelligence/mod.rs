// ABOUTME: Derived training metrics computed from in-memory workout lists
// ABOUTME: Centralized volume math shared by weekly stats, calendar, records and charts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

//! Derived-metrics module
//!
//! Pure, stateless functions over a list of workouts with nested exercises.
//! No I/O, no panics: malformed or partial input is absorbed into
//! zero-valued aggregates, and every function has a documented zero-state
//! for empty input.
//!
//! Volume — sets × reps × weight summed across exercises — is the primary
//! training-load metric. It is computed here and only here, so weekly
//! stats, calendar day coloring, history views and the progress chart can
//! never disagree on rounding or null handling.

use crate::models::{Exercise, WorkoutWithExercises};

/// Calendar heat-map aggregation
pub mod calendar;
/// Chart series and consistency over trailing windows
pub mod progress;
/// Personal records per exercise name
pub mod records;
/// Week-over-week comparison
pub mod weekly;

pub use calendar::{month_grid, workouts_on_day, CalendarDay, Intensity, CALENDAR_CELLS};
pub use progress::{
    progress_stats, strength_progression, volume_over_time, ProgressStats, StrengthPoint,
    StrengthSeries, TimeWindow, VolumePoint, MAX_STRENGTH_SERIES,
};
pub use records::{personal_records, records_summary, ExerciseRecord, RecordsSummary};
pub use weekly::{weekly_comparison, ChangeIndicator, WeekSummary, WeeklyComparison};

/// Training volume of a single exercise: sets × reps × weight
///
/// Negative components (which the API boundary rejects anyway) contribute
/// 0, and the multiplication saturates rather than overflowing.
#[must_use]
pub fn exercise_volume(exercise: &Exercise) -> i64 {
    i64::from(exercise.sets.max(0))
        .saturating_mul(i64::from(exercise.reps.max(0)))
        .saturating_mul(i64::from(exercise.weight.max(0)))
}

/// Training volume of a workout: the sum over its exercises
///
/// A workout with no exercises has volume 0.
#[must_use]
pub fn workout_volume(workout: &WorkoutWithExercises) -> i64 {
    workout
        .exercises
        .iter()
        .fold(0_i64, |sum, exercise| {
            sum.saturating_add(exercise_volume(exercise))
        })
}

/// Total training volume of a set of workouts
///
/// Additive by construction: equals the sum of each workout's own volume.
#[must_use]
pub fn total_volume(workouts: &[WorkoutWithExercises]) -> i64 {
    workouts.iter().fold(0_i64, |sum, workout| {
        sum.saturating_add(workout_volume(workout))
    })
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    //! Shared builders for intelligence tests

    use chrono::{DateTime, Utc};

    use crate::models::{Exercise, Workout, WorkoutWithExercises};

    /// Build an exercise with the given name/sets/reps/weight
    pub fn exercise(name: &str, sets: i32, reps: i32, weight: i32) -> Exercise {
        Exercise {
            id: 0,
            workout_id: 0,
            name: name.to_owned(),
            sets,
            reps,
            weight,
            completed: true,
            notes: None,
            created_at: Utc::now(),
        }
    }

    /// Build a workout dated `date` with the given exercises
    pub fn workout(
        name: &str,
        date: DateTime<Utc>,
        exercises: Vec<Exercise>,
    ) -> WorkoutWithExercises {
        WorkoutWithExercises {
            workout: Workout {
                id: 0,
                user_id: 1,
                name: name.to_owned(),
                date,
                notes: None,
                duration: None,
                sleep_hours: None,
                avg_heart_rate: None,
                calories_burned: None,
                created_at: date,
                updated_at: date,
            },
            exercises,
        }
    }

    /// Parse an RFC 3339 timestamp; test-only convenience
    pub fn ts(value: &str) -> DateTime<Utc> {
        value.parse().expect("valid test timestamp")
    }
}

#[cfg(test)]
mod tests {
    use super::test_fixtures::{exercise, ts, workout};
    use super::*;

    #[test]
    fn test_exercise_volume() {
        let ex = exercise("Supino Reto", 4, 10, 80);
        assert_eq!(exercise_volume(&ex), 3200);
    }

    #[test]
    fn test_negative_components_contribute_zero() {
        let ex = exercise("Broken", -4, 10, 80);
        assert_eq!(exercise_volume(&ex), 0);
    }

    #[test]
    fn test_empty_workout_has_zero_volume() {
        let w = workout("Descanso", ts("2025-06-02T10:00:00Z"), vec![]);
        assert_eq!(workout_volume(&w), 0);
    }

    #[test]
    fn test_total_volume_is_additive() {
        let workouts = vec![
            workout(
                "Treino A",
                ts("2025-06-02T10:00:00Z"),
                vec![
                    exercise("Supino Reto", 4, 10, 80),
                    exercise("Crucifixo", 3, 12, 20),
                ],
            ),
            workout(
                "Treino B",
                ts("2025-06-04T10:00:00Z"),
                vec![exercise("Agachamento", 5, 5, 120)],
            ),
        ];

        let summed: i64 = workouts.iter().map(workout_volume).sum();
        assert_eq!(total_volume(&workouts), summed);
        assert_eq!(total_volume(&workouts), 3200 + 720 + 3000);
    }

    #[test]
    fn test_total_volume_empty_list() {
        assert_eq!(total_volume(&[]), 0);
    }
}
