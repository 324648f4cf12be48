// ABOUTME: Calendar heat-map aggregation: a fixed 42-cell month grid
// ABOUTME: Sunday-first grid padded with real adjacent-month dates, volume intensity bands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::WorkoutWithExercises;

use super::workout_volume;

/// Number of cells in the month grid: 6 weeks × 7 days
pub const CALENDAR_CELLS: usize = 42;

/// Volume below this is a low-intensity day
const MEDIUM_VOLUME_FLOOR: i64 = 6_000;
/// Volume at or above this is a high-intensity day
const HIGH_VOLUME_FLOOR: i64 = 12_000;

/// Heat-map intensity band for a calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    /// No workouts on the day
    None,
    /// Volume below the medium band
    Low,
    /// Volume between the medium and high floors
    Medium,
    /// Volume at or above the high floor
    High,
}

impl Intensity {
    /// Band for a day's total volume
    #[must_use]
    pub const fn from_volume(volume: i64) -> Self {
        if volume <= 0 {
            Self::None
        } else if volume < MEDIUM_VOLUME_FLOOR {
            Self::Low
        } else if volume < HIGH_VOLUME_FLOOR {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// One cell of the month grid
///
/// Padding cells from adjacent months carry real dates but no workout
/// aggregates, mirroring how the grid is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// The calendar date of this cell
    pub date: NaiveDate,
    /// Whether the cell belongs to the target month
    pub in_month: bool,
    /// Number of workouts on this day (0 for padding cells)
    pub workout_count: u32,
    /// Total training volume on this day (0 for padding cells)
    pub volume: i64,
    /// Intensity band for coloring
    pub intensity: Intensity,
}

/// Build the 42-cell grid for a target month
///
/// The first cell is always a Sunday and the last always a Saturday;
/// leading and trailing cells are real dates from the adjacent months.
/// Workouts are matched to current-month cells by calendar day (year,
/// month, day — time of day ignored). An invalid month yields an empty
/// vector rather than a panic.
#[must_use]
pub fn month_grid(workouts: &[WorkoutWithExercises], year: i32, month: u32) -> Vec<CalendarDay> {
    let Some(first_of_month) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let offset = i64::from(first_of_month.weekday().num_days_from_sunday());
    let grid_start = first_of_month - Duration::days(offset);

    grid_start
        .iter_days()
        .take(CALENDAR_CELLS)
        .map(|date| {
            let in_month = date.year() == year && date.month() == month;
            if !in_month {
                return CalendarDay {
                    date,
                    in_month,
                    workout_count: 0,
                    volume: 0,
                    intensity: Intensity::None,
                };
            }

            let mut count: u32 = 0;
            let mut volume: i64 = 0;
            for workout in workouts {
                if workout.workout.date.date_naive() == date {
                    count += 1;
                    volume = volume.saturating_add(workout_volume(workout));
                }
            }

            CalendarDay {
                date,
                in_month,
                workout_count: count,
                volume,
                intensity: Intensity::from_volume(volume),
            }
        })
        .collect()
}

/// The workouts performed on one calendar day
///
/// Matches by exact calendar day (year, month, day), ignoring time of day.
#[must_use]
pub fn workouts_on_day<'a>(
    workouts: &'a [WorkoutWithExercises],
    date: NaiveDate,
) -> Vec<&'a WorkoutWithExercises> {
    workouts
        .iter()
        .filter(|w| w.workout.date.date_naive() == date)
        .collect()
}
