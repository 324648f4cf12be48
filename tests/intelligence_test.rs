// ABOUTME: Integration tests for the derived-metrics module
// ABOUTME: Exercises the documented aggregate properties end to end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{DateTime, Datelike, Utc, Weekday};

use ferro::intelligence::{
    month_grid, personal_records, progress_stats, total_volume, volume_over_time,
    weekly_comparison, workout_volume, workouts_on_day, ChangeIndicator, TimeWindow,
    CALENDAR_CELLS,
};
use ferro::models::{Exercise, Workout, WorkoutWithExercises};

fn ts(value: &str) -> DateTime<Utc> {
    value.parse().expect("valid test timestamp")
}

fn exercise(name: &str, sets: i32, reps: i32, weight: i32) -> Exercise {
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

fn workout(name: &str, date: &str, exercises: Vec<Exercise>) -> WorkoutWithExercises {
    let date = ts(date);
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

#[test]
fn test_total_volume_additivity() {
    let workouts = vec![
        workout(
            "Treino A",
            "2025-06-02T10:00:00Z",
            vec![
                exercise("Supino Reto", 4, 10, 80),
                exercise("Crucifixo", 3, 12, 20),
            ],
        ),
        workout(
            "Treino B",
            "2025-06-04T10:00:00Z",
            vec![exercise("Agachamento", 5, 5, 120)],
        ),
        workout("Descanso ativo", "2025-06-05T10:00:00Z", vec![]),
    ];

    let per_workout: i64 = workouts.iter().map(workout_volume).sum();
    assert_eq!(total_volume(&workouts), per_workout);
}

#[test]
fn test_weekly_stats_empty_zero_state() {
    let result = weekly_comparison(&[], Utc::now());

    assert_eq!(result.this_week.workouts, 0);
    assert_eq!(result.this_week.volume, 0);
    assert_eq!(result.this_week.distinct_exercises, 0);
    assert_eq!(result.last_week.workouts, 0);
    assert_eq!(result.last_week.volume, 0);
    assert_eq!(result.last_week.distinct_exercises, 0);
    // Neutral renders as a dash, never a division by zero
    assert_eq!(result.volume_change, ChangeIndicator::Neutral);
    assert_eq!(result.volume_change.label(), "—");
}

#[test]
fn test_personal_record_prefers_heavier_weight() {
    let workouts = vec![
        workout(
            "Treino 1",
            "2025-05-05T10:00:00Z",
            vec![exercise("Supino Reto", 4, 10, 80)],
        ),
        workout(
            "Treino 2",
            "2025-05-12T10:00:00Z",
            vec![exercise("Supino Reto", 4, 8, 90)],
        ),
    ];

    let records = personal_records(&workouts);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].max_weight, 90);
    assert_eq!(records[0].date, ts("2025-05-12T10:00:00Z"));
}

#[test]
fn test_personal_record_tie_keeps_first_seen() {
    let workouts = vec![
        workout(
            "Primeiro",
            "2025-05-05T10:00:00Z",
            vec![exercise("Agachamento", 5, 5, 100)],
        ),
        workout(
            "Segundo",
            "2025-05-12T10:00:00Z",
            vec![exercise("Agachamento", 3, 8, 100)],
        ),
    ];

    let records = personal_records(&workouts);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sets, 5);
    assert_eq!(records[0].date, ts("2025-05-05T10:00:00Z"));
}

#[test]
fn test_calendar_grid_shape_across_months() {
    for (year, month) in [(2025, 1), (2025, 2), (2024, 2), (2025, 6), (2025, 12)] {
        let grid = month_grid(&[], year, month);
        assert_eq!(grid.len(), CALENDAR_CELLS);
        assert_eq!(grid.first().unwrap().date.weekday(), Weekday::Sun);
        assert_eq!(grid.last().unwrap().date.weekday(), Weekday::Sat);
        // Every cell carries a real calendar date
        assert!(grid.iter().all(|c| c.date.year() >= 2023));
    }
}

#[test]
fn test_percent_change_properties() {
    assert_eq!(ChangeIndicator::from_values(10, 0), ChangeIndicator::Neutral);
    assert_eq!(ChangeIndicator::from_values(15, 10), ChangeIndicator::Up(50));
    assert_eq!(ChangeIndicator::from_values(5, 10), ChangeIndicator::Down(-50));
    assert_eq!(ChangeIndicator::from_values(15, 10).label(), "+50%");
    assert_eq!(ChangeIndicator::from_values(5, 10).label(), "-50%");
}

#[test]
fn test_end_to_end_treino_a_scenario() {
    let workouts = vec![workout(
        "Treino A",
        "2025-06-10T10:00:00Z",
        vec![exercise("Supino Reto", 4, 10, 80)],
    )];

    assert_eq!(workouts[0].workout.name, "Treino A");
    assert_eq!(workouts[0].exercises.len(), 1);
    assert_eq!(workout_volume(&workouts[0]), 3200);
    assert_eq!(total_volume(&workouts), 3200);

    let records = personal_records(&workouts);
    assert_eq!(records[0].exercise_name, "Supino Reto");
    assert_eq!(records[0].max_weight, 80);

    let day = ts("2025-06-10T00:00:00Z").date_naive();
    let selected = workouts_on_day(&workouts, day);
    assert_eq!(selected.len(), 1);

    let grid = month_grid(&workouts, 2025, 6);
    let cell = grid.iter().find(|c| c.date == day).unwrap();
    assert_eq!(cell.workout_count, 1);
    assert_eq!(cell.volume, 3200);
}

#[test]
fn test_chart_series_and_consistency() {
    let now = ts("2025-06-30T12:00:00Z");
    // Source list newest-first, as the database returns it
    let workouts = vec![
        workout(
            "Recente",
            "2025-06-25T10:00:00Z",
            vec![exercise("Supino Reto", 4, 10, 85)],
        ),
        workout(
            "Antigo",
            "2025-06-20T10:00:00Z",
            vec![exercise("Supino Reto", 4, 10, 80)],
        ),
    ];

    let points = volume_over_time(&workouts, TimeWindow::Month, now);
    assert_eq!(points.len(), 2);
    assert!(points[0].date < points[1].date);
    assert_eq!(points[0].workout_name, "Antigo");

    let stats = progress_stats(&workouts, TimeWindow::Month, now);
    assert_eq!(stats.total_workouts, 2);
    assert_eq!(stats.total_volume, 3400 + 3200);
    assert_eq!(stats.average_volume, 3300);
    // 2 distinct days over 30 = 6.67% rounds to 7
    assert_eq!(stats.consistency_pct, 7);
}
