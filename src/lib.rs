// ABOUTME: Main library entry point for the Ferro fitness tracking API
// ABOUTME: Exposes workout logging, progress photos, templates and derived analytics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

#![deny(unsafe_code)]

//! # Ferro
//!
//! A personal fitness-tracking backend. Users log workouts (exercises with
//! sets/reps/weight, optional cardio), store progress photos with body
//! measurements, reuse workout templates, manage a custom exercise library,
//! and read derived analytics: weekly volume trends, personal records, a
//! calendar heat-map and chart series.
//!
//! ## Architecture
//!
//! - **Models**: typed entities shared by the database and API layers
//! - **Database**: `sqlx`/SQLite data access scoped by owning user
//! - **Routes**: axum REST endpoints grouped per resource under `/api`
//! - **Intelligence**: pure derived-metrics functions over workout lists
//! - **Storage**: object storage abstraction for photo and media uploads

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by the binaries (src/bin/) and integration tests.

/// Session token management and caller authentication
pub mod auth;

/// Configuration management from environment variables
pub mod config;

/// Data access layer scoped by owning user
pub mod database;

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// Derived training metrics: volume, weekly trends, records, calendar, charts
pub mod intelligence;

/// Production logging and structured output
pub mod logging;

/// Common data models for workouts, photos, templates and the exercise library
pub mod models;

/// Shared server resources injected into route handlers
pub mod resources;

/// `HTTP` routes grouped per resource
pub mod routes;

/// HTTP server composition: router, middleware layers, listener
pub mod server;

/// Object storage abstraction for uploaded images
pub mod storage;
