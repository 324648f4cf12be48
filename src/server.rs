// ABOUTME: HTTP server composition: router, middleware layers and the listener
// ABOUTME: Merges per-resource routers and serves uploads for the local storage backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::Router;
use http::HeaderValue;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::StorageBackend;
use crate::resources::ServerResources;
use crate::routes::{
    AuthRoutes, CardioRoutes, ExerciseLibraryRoutes, ExerciseRoutes, HealthRoutes, PhotoRoutes,
    StatsRoutes, TemplateRoutes, UserExerciseRoutes, WorkoutRoutes,
};

/// Request timeout for all endpoints
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Body size limit; photo uploads arrive base64-encoded in JSON
const BODY_LIMIT_BYTES: usize = 20 * 1024 * 1024;

/// HTTP server for the Ferro API
pub struct HttpServer {
    resources: Arc<ServerResources>,
}

impl HttpServer {
    /// Create a server over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Compose the full application router
    #[must_use]
    pub fn router(&self) -> Router {
        let resources = &self.resources;

        let mut router = Router::new()
            .merge(HealthRoutes::routes(resources.clone()))
            .merge(AuthRoutes::routes(resources.clone()))
            .merge(WorkoutRoutes::routes(resources.clone()))
            .merge(ExerciseRoutes::routes(resources.clone()))
            .merge(PhotoRoutes::routes(resources.clone()))
            .merge(TemplateRoutes::routes(resources.clone()))
            .merge(CardioRoutes::routes(resources.clone()))
            .merge(UserExerciseRoutes::routes(resources.clone()))
            .merge(ExerciseLibraryRoutes::routes(resources.clone()))
            .merge(StatsRoutes::routes(resources.clone()));

        // The local backend serves its own uploads; S3 objects are public
        // through the bucket/CDN URL instead
        if let StorageBackend::Local { root } = &resources.config.storage.backend {
            router = router.nest_service("/uploads", ServeDir::new(root));
        }

        router
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(self.cors_layer())
            .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
    }

    /// CORS layer from configuration
    ///
    /// A configured origin enables credentialed requests for the web
    /// client; without one the layer is permissive for development.
    fn cors_layer(&self) -> CorsLayer {
        match self
            .resources
            .config
            .cors_origin
            .as_deref()
            .and_then(|origin| origin.parse::<HeaderValue>().ok())
        {
            Some(origin) => CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
            None => CorsLayer::permissive(),
        }
    }

    /// Bind and serve until shutdown
    ///
    /// # Errors
    ///
    /// Returns an error if binding the port or serving fails
    pub async fn serve(self, port: u16) -> Result<()> {
        let router = self.router();

        let listener = TcpListener::bind(("0.0.0.0", port))
            .await
            .with_context(|| format!("Failed to bind port {port}"))?;
        info!("HTTP server listening on http://0.0.0.0:{port}");

        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("Shutdown signal received");
            })
            .await
            .context("HTTP server failed")?;

        Ok(())
    }
}
