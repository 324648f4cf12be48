// ABOUTME: Week-over-week comparison of workout count, volume and exercise variety
// ABOUTME: Sunday-anchored windows with a neutral indicator when last week is empty
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::WorkoutWithExercises;

use super::workout_volume;

/// Aggregates for one weekly window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSummary {
    /// Number of workouts in the window
    pub workouts: u32,
    /// Total training volume in the window
    pub volume: i64,
    /// Number of distinct exercise names (case-sensitive exact match)
    pub distinct_exercises: u32,
}

impl WeekSummary {
    /// The documented zero-state for an empty window
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            workouts: 0,
            volume: 0,
            distinct_exercises: 0,
        }
    }
}

/// Direction and magnitude of a week-over-week change
///
/// `Neutral` means the previous window was empty: the change is undefined
/// and renders as a dash, never a division by zero or an infinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "direction", content = "percent", rename_all = "snake_case")]
pub enum ChangeIndicator {
    /// Previous window was empty; change is undefined
    Neutral,
    /// No change
    Flat,
    /// Increase, with the rounded signed percentage
    Up(i32),
    /// Decrease, with the rounded signed percentage
    Down(i32),
}

impl ChangeIndicator {
    /// Compare a current value against the previous window's value
    #[must_use]
    pub fn from_values(current: i64, previous: i64) -> Self {
        if previous == 0 {
            return Self::Neutral;
        }

        #[allow(clippy::cast_precision_loss)]
        let percent = (current - previous) as f64 / previous as f64 * 100.0;
        #[allow(clippy::cast_possible_truncation)]
        let rounded = percent.round() as i32;

        if rounded > 0 {
            Self::Up(rounded)
        } else if rounded < 0 {
            Self::Down(rounded)
        } else {
            Self::Flat
        }
    }

    /// Display label, e.g. "+50%", "-50%", "0%" or "—"
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Neutral => "—".to_owned(),
            Self::Flat => "0%".to_owned(),
            Self::Up(percent) => format!("+{percent}%"),
            Self::Down(percent) => format!("{percent}%"),
        }
    }
}

/// Week-over-week comparison result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyComparison {
    /// Aggregates for the current week (most recent Sunday 00:00 → now)
    pub this_week: WeekSummary,
    /// Aggregates for the preceding 7-day window
    pub last_week: WeekSummary,
    /// Change in workout count
    pub workouts_change: ChangeIndicator,
    /// Change in total volume
    pub volume_change: ChangeIndicator,
    /// Change in distinct exercise count
    pub exercises_change: ChangeIndicator,
}

/// Compare this week against last week
///
/// "This week" starts at the most recent Sunday at midnight relative to the
/// caller-supplied `now` and runs through `now`; "last week" is the
/// preceding 7-day window, ending the instant before this week starts.
/// An empty workout list yields both windows at their zero-state with
/// neutral indicators.
#[must_use]
pub fn weekly_comparison(
    workouts: &[WorkoutWithExercises],
    now: DateTime<Utc>,
) -> WeeklyComparison {
    let days_from_sunday = i64::from(now.date_naive().weekday().num_days_from_sunday());
    let this_week_start = (now.date_naive() - Duration::days(days_from_sunday))
        .and_time(NaiveTime::MIN)
        .and_utc();
    let last_week_start = this_week_start - Duration::days(7);

    let this_week = summarize(
        workouts
            .iter()
            .filter(|w| w.workout.date >= this_week_start),
    );
    let last_week = summarize(
        workouts
            .iter()
            .filter(|w| w.workout.date >= last_week_start && w.workout.date < this_week_start),
    );

    let workouts_change =
        ChangeIndicator::from_values(i64::from(this_week.workouts), i64::from(last_week.workouts));
    let volume_change = ChangeIndicator::from_values(this_week.volume, last_week.volume);
    let exercises_change = ChangeIndicator::from_values(
        i64::from(this_week.distinct_exercises),
        i64::from(last_week.distinct_exercises),
    );

    WeeklyComparison {
        this_week,
        last_week,
        workouts_change,
        volume_change,
        exercises_change,
    }
}

/// Aggregate one window of workouts
fn summarize<'a>(window: impl Iterator<Item = &'a WorkoutWithExercises>) -> WeekSummary {
    let mut count: u32 = 0;
    let mut volume: i64 = 0;
    let mut names: HashSet<&str> = HashSet::new();

    for workout in window {
        count += 1;
        volume = volume.saturating_add(workout_volume(workout));
        for exercise in &workout.exercises {
            names.insert(exercise.name.as_str());
        }
    }

    WeekSummary {
        workouts: count,
        volume,
        distinct_exercises: u32::try_from(names.len()).unwrap_or(u32::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_fixtures::{exercise, ts, workout};
    use super::*;

    // 2025-06-18 is a Wednesday; the week anchor is Sunday 2025-06-15.
    fn now() -> DateTime<Utc> {
        ts("2025-06-18T15:30:00Z")
    }

    #[test]
    fn test_empty_list_zero_state() {
        let result = weekly_comparison(&[], now());
        assert_eq!(result.this_week, WeekSummary::empty());
        assert_eq!(result.last_week, WeekSummary::empty());
        assert_eq!(result.workouts_change, ChangeIndicator::Neutral);
        assert_eq!(result.volume_change, ChangeIndicator::Neutral);
        assert_eq!(result.exercises_change, ChangeIndicator::Neutral);
        assert_eq!(result.volume_change.label(), "—");
    }

    #[test]
    fn test_window_boundaries_are_sunday_midnight() {
        let workouts = vec![
            // Sunday 00:00 of this week: inside this week
            workout("Limite", ts("2025-06-15T00:00:00Z"), vec![]),
            // The instant before: inside last week
            workout("Anterior", ts("2025-06-14T23:59:59Z"), vec![]),
            // Last Sunday 00:00: inside last week
            workout("Inicio", ts("2025-06-08T00:00:00Z"), vec![]),
            // Before last week: counted nowhere
            workout("Antigo", ts("2025-06-07T12:00:00Z"), vec![]),
        ];

        let result = weekly_comparison(&workouts, now());
        assert_eq!(result.this_week.workouts, 1);
        assert_eq!(result.last_week.workouts, 2);
    }

    #[test]
    fn test_distinct_exercises_are_case_sensitive() {
        let workouts = vec![workout(
            "Treino",
            ts("2025-06-16T10:00:00Z"),
            vec![
                exercise("Supino Reto", 4, 10, 80),
                exercise("supino reto", 4, 10, 80),
                exercise("Supino Reto", 3, 8, 85),
            ],
        )];

        let result = weekly_comparison(&workouts, now());
        assert_eq!(result.this_week.distinct_exercises, 2);
    }

    #[test]
    fn test_change_indicator_values() {
        assert_eq!(ChangeIndicator::from_values(10, 0), ChangeIndicator::Neutral);
        assert_eq!(ChangeIndicator::from_values(15, 10), ChangeIndicator::Up(50));
        assert_eq!(ChangeIndicator::from_values(5, 10), ChangeIndicator::Down(-50));
        assert_eq!(ChangeIndicator::from_values(10, 10), ChangeIndicator::Flat);
    }

    #[test]
    fn test_change_indicator_labels() {
        assert_eq!(ChangeIndicator::from_values(15, 10).label(), "+50%");
        assert_eq!(ChangeIndicator::from_values(5, 10).label(), "-50%");
        assert_eq!(ChangeIndicator::from_values(10, 10).label(), "0%");
    }

    #[test]
    fn test_volume_change_between_weeks() {
        let workouts = vec![
            workout(
                "Atual",
                ts("2025-06-16T10:00:00Z"),
                vec![exercise("Supino Reto", 4, 10, 90)],
            ),
            workout(
                "Passado",
                ts("2025-06-10T10:00:00Z"),
                vec![exercise("Supino Reto", 4, 10, 60)],
            ),
        ];

        let result = weekly_comparison(&workouts, now());
        assert_eq!(result.this_week.volume, 3600);
        assert_eq!(result.last_week.volume, 2400);
        assert_eq!(result.volume_change, ChangeIndicator::Up(50));
    }
}
