// ABOUTME: Filesystem-backed object storage for development and single-host deployments
// ABOUTME: Objects land under a root directory served by the server at /uploads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::errors::{AppError, AppResult};

use super::{ObjectStorage, StoredObject};

/// Filesystem-backed storage
///
/// Objects are written below `root` and exposed publicly under
/// `{public_base_url}/uploads/{key}`, where the server serves `root` as
/// static files.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalStorage {
    /// Create a local storage backend
    #[must_use]
    pub fn new(root: PathBuf, public_base_url: impl Into<String>) -> Self {
        let mut public_base_url = public_base_url.into();
        while public_base_url.ends_with('/') {
            public_base_url.pop();
        }
        Self {
            root,
            public_base_url,
        }
    }

    /// Directory served under `/uploads`
    #[must_use]
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn object_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl ObjectStorage for LocalStorage {
    async fn put(&self, key: &str, bytes: Vec<u8>, _content_type: &str) -> AppResult<StoredObject> {
        let path = self.object_path(key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::storage(format!("Failed to create {}: {e}", parent.display())))?;
        }

        fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::storage(format!("Failed to write {}: {e}", path.display())))?;

        Ok(StoredObject {
            key: key.to_owned(),
            url: format!("{}/uploads/{key}", self.public_base_url),
        })
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.object_path(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::storage(format!(
                "Failed to delete {}: {e}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_delete_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().to_path_buf(), "http://localhost:8081/");

        let stored = storage
            .put("photos/1/123-frente.jpg", b"jpeg bytes".to_vec(), "image/jpeg")
            .await
            .unwrap();
        assert_eq!(stored.url, "http://localhost:8081/uploads/photos/1/123-frente.jpg");
        assert!(dir.path().join("photos/1/123-frente.jpg").exists());

        storage.delete("photos/1/123-frente.jpg").await.unwrap();
        assert!(!dir.path().join("photos/1/123-frente.jpg").exists());
    }

    #[tokio::test]
    async fn test_delete_missing_object_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().to_path_buf(), "http://localhost:8081");
        assert!(storage.delete("photos/1/missing.jpg").await.is_ok());
    }
}
