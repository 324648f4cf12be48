// ABOUTME: Configuration module organization for the Ferro server
// ABOUTME: Environment-based settings for ports, database, auth and storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

/// Environment-based server configuration
pub mod environment;

pub use environment::{AuthConfig, ServerConfig, StorageBackend, StorageConfig};
