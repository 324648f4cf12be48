// ABOUTME: Chart series over trailing windows: strength progression and volume per workout
// ABOUTME: Consistency percentage from distinct workout days within the window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::WorkoutWithExercises;

use super::workout_volume;

/// Maximum number of series when charting all exercises, for legend
/// readability
pub const MAX_STRENGTH_SERIES: usize = 6;

/// Trailing window used to scope analytics queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimeWindow {
    /// Last 7 days
    Week,
    /// Last 30 days
    #[default]
    Month,
    /// Last 90 days
    Quarter,
    /// Last 180 days
    HalfYear,
    /// Last 365 days
    Year,
}

impl TimeWindow {
    /// Window length in days
    #[must_use]
    pub const fn days(&self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
            Self::HalfYear => 180,
            Self::Year => 365,
        }
    }

    /// Parse the day-count selector the client sends (7/30/90/180/365)
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "7" => Some(Self::Week),
            "30" => Some(Self::Month),
            "90" => Some(Self::Quarter),
            "180" => Some(Self::HalfYear),
            "365" => Some(Self::Year),
            _ => None,
        }
    }
}

/// Maximum weight logged for an exercise on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthPoint {
    /// The calendar day
    pub date: NaiveDate,
    /// Heaviest weight logged that day, in kg
    pub max_weight: i32,
}

/// One chart line: an exercise's max weight per day it appears
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthSeries {
    /// Exercise name
    pub exercise: String,
    /// Points in chronological ascending order
    pub points: Vec<StrengthPoint>,
}

/// One workout's own volume, for the volume-over-time chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumePoint {
    /// The workout's calendar day
    pub date: NaiveDate,
    /// Workout name, shown in tooltips
    pub workout_name: String,
    /// The workout's own volume
    pub volume: i64,
}

/// Summary statistics for a trailing window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressStats {
    /// Workouts in the window
    pub total_workouts: u32,
    /// Total volume in the window
    pub total_volume: i64,
    /// Average volume per workout, rounded; 0 when there are no workouts
    pub average_volume: i64,
    /// Percentage of window days with at least one workout, rounded
    pub consistency_pct: u32,
}

/// Max-weight-per-day series for charting strength progression
///
/// Workouts outside the trailing window are ignored. With
/// `selected = Some(name)` only that exercise is tracked; with `None` all
/// exercises are tracked, capped to [`MAX_STRENGTH_SERIES`] series in
/// first-appearance order. Points are ascending by day. Empty input yields
/// an empty vector.
#[must_use]
pub fn strength_progression(
    workouts: &[WorkoutWithExercises],
    window: TimeWindow,
    now: DateTime<Utc>,
    selected: Option<&str>,
) -> Vec<StrengthSeries> {
    let cutoff = now - Duration::days(window.days());

    let mut order: Vec<String> = Vec::new();
    let mut by_exercise: BTreeMap<String, BTreeMap<NaiveDate, i32>> = BTreeMap::new();

    for workout in workouts {
        if workout.workout.date < cutoff {
            continue;
        }
        let day = workout.workout.date.date_naive();
        for exercise in &workout.exercises {
            if selected.is_some_and(|name| name != exercise.name) {
                continue;
            }
            if !by_exercise.contains_key(&exercise.name) {
                order.push(exercise.name.clone());
            }
            let days = by_exercise.entry(exercise.name.clone()).or_default();
            let best = days.entry(day).or_insert(exercise.weight);
            if exercise.weight > *best {
                *best = exercise.weight;
            }
        }
    }

    let cap = if selected.is_some() {
        usize::MAX
    } else {
        MAX_STRENGTH_SERIES
    };

    order
        .into_iter()
        .take(cap)
        .filter_map(|name| {
            let days = by_exercise.remove(&name)?;
            Some(StrengthSeries {
                exercise: name,
                points: days
                    .into_iter()
                    .map(|(date, max_weight)| StrengthPoint { date, max_weight })
                    .collect(),
            })
        })
        .collect()
}

/// One volume point per workout within the window, oldest first
///
/// The source list arrives newest-first from the database; the chart wants
/// chronological ascending order, so points are sorted by date (stable, so
/// same-day workouts keep their relative order).
#[must_use]
pub fn volume_over_time(
    workouts: &[WorkoutWithExercises],
    window: TimeWindow,
    now: DateTime<Utc>,
) -> Vec<VolumePoint> {
    let cutoff = now - Duration::days(window.days());

    let mut points: Vec<(DateTime<Utc>, VolumePoint)> = workouts
        .iter()
        .filter(|w| w.workout.date >= cutoff)
        .map(|w| {
            (
                w.workout.date,
                VolumePoint {
                    date: w.workout.date.date_naive(),
                    workout_name: w.workout.name.clone(),
                    volume: workout_volume(w),
                },
            )
        })
        .collect();

    points.sort_by_key(|(date, _)| *date);
    points.into_iter().map(|(_, point)| point).collect()
}

/// Summary statistics for the window
///
/// Consistency is the share of window days with at least one workout,
/// rounded to an integer percentage. The zero-state for an empty window is
/// all zeros.
#[must_use]
pub fn progress_stats(
    workouts: &[WorkoutWithExercises],
    window: TimeWindow,
    now: DateTime<Utc>,
) -> ProgressStats {
    let cutoff = now - Duration::days(window.days());
    let filtered: Vec<&WorkoutWithExercises> = workouts
        .iter()
        .filter(|w| w.workout.date >= cutoff)
        .collect();

    let total_workouts = u32::try_from(filtered.len()).unwrap_or(u32::MAX);
    let volume: i64 = filtered.iter().fold(0, |sum, w| {
        sum.saturating_add(workout_volume(w))
    });

    let average_volume = if filtered.is_empty() {
        0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let average = volume as f64 / filtered.len() as f64;
        #[allow(clippy::cast_possible_truncation)]
        {
            average.round() as i64
        }
    };

    let distinct_days: std::collections::HashSet<NaiveDate> = filtered
        .iter()
        .map(|w| w.workout.date.date_naive())
        .collect();
    #[allow(clippy::cast_precision_loss)]
    let consistency = distinct_days.len() as f64 / window.days() as f64 * 100.0;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let consistency_pct = consistency.round() as u32;

    ProgressStats {
        total_workouts,
        total_volume: volume,
        average_volume,
        consistency_pct,
    }
}
