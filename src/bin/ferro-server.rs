// ABOUTME: Server binary for the Ferro fitness tracking API
// ABOUTME: Loads configuration, connects storage backends and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

//! # Ferro Server Binary
//!
//! Starts the Ferro fitness tracking API: loads configuration from the
//! environment, opens the database, selects the object storage backend and
//! serves the HTTP API.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use ferro::auth::AuthManager;
use ferro::config::{environment::ServerConfig, StorageBackend};
use ferro::database::Database;
use ferro::logging;
use ferro::resources::ServerResources;
use ferro::server::HttpServer;
use ferro::storage::{LocalStorage, ObjectStorage};

#[derive(Parser)]
#[command(name = "ferro-server")]
#[command(about = "Ferro - personal fitness tracking API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    logging::init_from_env()?;

    info!("Starting Ferro fitness tracking API");
    info!("{}", config.summary());

    let database = Database::connect(&config.database_url).await;
    if database.is_available() {
        database.migrate().await?;
        info!("Database migrated successfully");
    } else {
        // Reads degrade to empty state; writes will surface 503s
        warn!("Database unavailable at startup; serving in degraded mode");
    }

    let storage = build_storage(&config).await;
    let auth_manager = AuthManager::new(
        config.auth.secret.as_bytes(),
        config.auth.token_expiry_hours,
    );

    let config = Arc::new(config);
    let resources = Arc::new(ServerResources::new(
        database,
        auth_manager,
        storage,
        config.clone(),
    ));

    HttpServer::new(resources).serve(config.http_port).await
}

/// Select the object storage backend from configuration
async fn build_storage(config: &ServerConfig) -> Arc<dyn ObjectStorage> {
    match &config.storage.backend {
        StorageBackend::Local { root } => Arc::new(LocalStorage::new(
            root.clone(),
            config.storage.public_base_url.clone(),
        )),
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 { bucket } => Arc::new(
            ferro::storage::S3Storage::from_env(bucket, config.storage.public_base_url.clone())
                .await,
        ),
        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 { .. } => {
            warn!("Built without the storage-s3 feature; falling back to local storage");
            Arc::new(LocalStorage::new(
                "uploads".into(),
                config.storage.public_base_url.clone(),
            ))
        }
    }
}
