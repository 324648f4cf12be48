// ABOUTME: S3-backed object storage for production deployments
// ABOUTME: Uses the AWS SDK; public URLs come from the configured CDN/bucket base
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::errors::{AppError, AppResult};

use super::{ObjectStorage, StoredObject};

/// S3-backed storage
///
/// Credentials and region resolve through the standard AWS environment.
/// `public_base_url` is the bucket or CDN origin prepended to keys when
/// building the public URL recorded in metadata rows.
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3Storage {
    /// Create an S3 storage backend from the ambient AWS configuration
    pub async fn from_env(bucket: impl Into<String>, public_base_url: impl Into<String>) -> Self {
        let config = aws_config::load_from_env().await;
        let mut public_base_url = public_base_url.into();
        while public_base_url.ends_with('/') {
            public_base_url.pop();
        }
        Self {
            client: Client::new(&config),
            bucket: bucket.into(),
            public_base_url,
        }
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> AppResult<StoredObject> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::storage(format!("S3 put {key} failed: {e}")))?;

        Ok(StoredObject {
            key: key.to_owned(),
            url: format!("{}/{key}", self.public_base_url),
        })
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::storage(format!("S3 delete {key} failed: {e}")))?;
        Ok(())
    }
}
