// ABOUTME: Shared server resources injected into route handlers
// ABOUTME: Database handle, auth manager, object storage and configuration behind Arcs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::storage::ObjectStorage;

/// Shared resources constructed once at startup
///
/// Handlers receive these through axum state; nothing in the application
/// reaches for module-level globals.
pub struct ServerResources {
    /// Injected persistence handle
    pub database: Arc<Database>,
    /// Session token manager
    pub auth_manager: Arc<AuthManager>,
    /// Object storage backend for uploads
    pub storage: Arc<dyn ObjectStorage>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create new server resources with proper Arc sharing
    #[must_use]
    pub fn new(
        database: Database,
        auth_manager: AuthManager,
        storage: Arc<dyn ObjectStorage>,
        config: Arc<ServerConfig>,
    ) -> Self {
        Self {
            database: Arc::new(database),
            auth_manager: Arc::new(auth_manager),
            storage,
            config,
        }
    }
}
