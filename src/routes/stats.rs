// ABOUTME: Route handlers for derived training statistics
// ABOUTME: Server-side weekly comparison, records, calendar grid and chart series
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

//! Statistics routes
//!
//! Thin wrappers over the intelligence module: fetch the caller's
//! workouts with exercises, run the pure aggregation, return the shaped
//! result. Aggregates are recomputed per request; per-user datasets are
//! small enough that memoization is not worth its invalidation logic yet.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::intelligence::{
    month_grid, personal_records, progress_stats, records_summary, strength_progression,
    volume_over_time, weekly_comparison, ExerciseRecord, ProgressStats, RecordsSummary,
    StrengthSeries, TimeWindow, VolumePoint,
};
use crate::resources::ServerResources;

use super::require_user;

/// Query parameters for the calendar grid
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    /// Target year
    pub year: i32,
    /// Target month (1-12)
    pub month: u32,
}

/// Query parameters for progress charts
#[derive(Debug, Deserialize, Default)]
pub struct ProgressQuery {
    /// Trailing window in days: 7, 30, 90, 180 or 365 (default 30)
    pub days: Option<String>,
    /// Restrict the strength series to one exercise name
    pub exercise: Option<String>,
}

/// Response for the records endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordsResponse {
    /// Records sorted by max weight descending
    pub records: Vec<ExerciseRecord>,
    /// Summary statistics
    pub summary: RecordsSummary,
}

/// Response for the progress endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressResponse {
    /// Max-weight-per-day series for the strength chart
    pub series: Vec<StrengthSeries>,
    /// Per-workout volume points, oldest first
    pub volume: Vec<VolumePoint>,
    /// Window summary statistics
    pub stats: ProgressStats,
}

/// Statistics routes handler
pub struct StatsRoutes;

impl StatsRoutes {
    /// Create all statistics routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/stats/weekly", get(Self::handle_weekly))
            .route("/api/stats/records", get(Self::handle_records))
            .route("/api/stats/calendar", get(Self::handle_calendar))
            .route("/api/stats/progress", get(Self::handle_progress))
            .with_state(resources)
    }

    /// Handle GET /api/stats/weekly - Week-over-week comparison
    async fn handle_weekly(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = require_user(&headers, &resources).await?;

        let workouts = resources
            .database
            .get_workouts_with_exercises(user.id)
            .await?;
        let comparison = weekly_comparison(&workouts, Utc::now());
        Ok((StatusCode::OK, Json(comparison)).into_response())
    }

    /// Handle GET /api/stats/records - Personal records
    async fn handle_records(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = require_user(&headers, &resources).await?;

        let workouts = resources
            .database
            .get_workouts_with_exercises(user.id)
            .await?;
        let records = personal_records(&workouts);
        let summary = records_summary(&records);
        Ok((StatusCode::OK, Json(RecordsResponse { records, summary })).into_response())
    }

    /// Handle GET /api/stats/calendar - 42-cell month grid
    async fn handle_calendar(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<CalendarQuery>,
    ) -> Result<Response, AppError> {
        let user = require_user(&headers, &resources).await?;

        let workouts = resources
            .database
            .get_workouts_with_exercises(user.id)
            .await?;
        let grid = month_grid(&workouts, query.year, query.month);
        if grid.is_empty() {
            return Err(AppError::invalid_input(format!(
                "Invalid month: {}-{}",
                query.year, query.month
            )));
        }
        Ok((StatusCode::OK, Json(grid)).into_response())
    }

    /// Handle GET /api/stats/progress - Chart series for a trailing window
    async fn handle_progress(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ProgressQuery>,
    ) -> Result<Response, AppError> {
        let user = require_user(&headers, &resources).await?;

        let window = match query.days.as_deref() {
            Some(days) => TimeWindow::parse(days).ok_or_else(|| {
                AppError::invalid_input(format!(
                    "Invalid window: {days} (expected 7, 30, 90, 180 or 365)"
                ))
            })?,
            None => TimeWindow::default(),
        };

        let workouts = resources
            .database
            .get_workouts_with_exercises(user.id)
            .await?;
        let now = Utc::now();

        let response = ProgressResponse {
            series: strength_progression(&workouts, window, now, query.exercise.as_deref()),
            volume: volume_over_time(&workouts, window, now),
            stats: progress_stats(&workouts, window, now),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
