// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

//! Environment-based configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Top-level server configuration loaded from environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Database URL (SQLite path or connection string)
    pub database_url: String,
    /// Allowed CORS origin; `None` allows any origin (development)
    pub cors_origin: Option<String>,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Object storage configuration
    pub storage: StorageConfig,
}

/// Authentication settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 secret for session tokens and gateway identity assertions
    pub secret: String,
    /// Session token expiry in hours
    pub token_expiry_hours: i64,
}

/// Object storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Selected backend
    pub backend: StorageBackend,
    /// Base URL prepended to object keys when building public URLs
    pub public_base_url: String,
}

/// Supported object storage backends
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StorageBackend {
    /// Filesystem-backed storage, served by this server under `/uploads`
    Local {
        /// Directory where uploaded objects are written
        root: PathBuf,
    },
    /// S3-backed storage (requires the `storage-s3` feature)
    S3 {
        /// Bucket name
        bucket: String,
    },
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `FERRO_AUTH_SECRET` is not set
    /// - A numeric variable cannot be parsed
    /// - The selected storage backend is missing its required settings
    pub fn from_env() -> Result<Self> {
        let http_port = env_parse("FERRO_HTTP_PORT", 8081_u16)?;

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:ferro.db".to_owned());

        let secret = env::var("FERRO_AUTH_SECRET")
            .context("FERRO_AUTH_SECRET must be set to a shared signing secret")?;

        let token_expiry_hours = env_parse("FERRO_TOKEN_EXPIRY_HOURS", 24_i64)?;

        let cors_origin = env::var("FERRO_CORS_ORIGIN").ok();

        let public_base_url = env::var("FERRO_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{http_port}"));

        let backend = match env::var("FERRO_STORAGE_BACKEND").as_deref() {
            Ok("s3") => StorageBackend::S3 {
                bucket: env::var("FERRO_S3_BUCKET")
                    .context("FERRO_S3_BUCKET must be set when FERRO_STORAGE_BACKEND=s3")?,
            },
            _ => StorageBackend::Local {
                root: env::var("FERRO_STORAGE_ROOT")
                    .map_or_else(|_| PathBuf::from("uploads"), PathBuf::from),
            },
        };

        Ok(Self {
            http_port,
            database_url,
            cors_origin,
            auth: AuthConfig {
                secret,
                token_expiry_hours,
            },
            storage: StorageConfig {
                backend,
                public_base_url,
            },
        })
    }

    /// Human-readable configuration summary for startup logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Ferro Server Configuration:\n\
             - HTTP Port: {}\n\
             - Database: {}\n\
             - CORS Origin: {}\n\
             - Token Expiry: {}h\n\
             - Storage: {}",
            self.http_port,
            self.database_url,
            self.cors_origin.as_deref().unwrap_or("any"),
            self.auth.token_expiry_hours,
            self.storage.describe(),
        )
    }
}

impl StorageConfig {
    /// One-line backend description for logs
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.backend {
            StorageBackend::Local { root } => format!("local ({})", root.display()),
            StorageBackend::S3 { bucket } => format!("s3 ({bucket})"),
        }
    }
}

/// Parse an environment variable, falling back to a default when unset
fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("Invalid value for {name}: {value}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_describe() {
        let config = StorageConfig {
            backend: StorageBackend::S3 {
                bucket: "ferro-media".into(),
            },
            public_base_url: "https://cdn.example.com".into(),
        };
        assert_eq!(config.describe(), "s3 (ferro-media)");
    }
}
