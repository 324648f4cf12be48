// ABOUTME: Object storage abstraction for uploaded photos and exercise media
// ABOUTME: Key construction, base64/data-URL decoding, local and S3 backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

//! Object storage abstraction
//!
//! Binary payloads never reach the database: uploads are decoded, written
//! to a storage backend, and only the durable key/URL pair is recorded in
//! the row. A failed storage write aborts the enclosing operation before
//! any metadata row exists.

use async_trait::async_trait;
use base64::Engine;
use regex::Regex;
use std::sync::OnceLock;

use crate::errors::{AppError, AppResult};

/// Filesystem-backed storage
pub mod local;
/// S3-backed storage (requires the `storage-s3` feature)
#[cfg(feature = "storage-s3")]
pub mod s3;

pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;

/// Durable reference returned by a completed storage write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Storage key, recorded so the object can be deleted later
    pub key: String,
    /// Public URL recorded in the metadata row
    pub url: String,
}

/// Pluggable object storage backend
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Write an object and return its durable key/URL pair
    ///
    /// # Errors
    ///
    /// Returns a storage error when the write fails; callers must abort
    /// before writing any metadata row
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> AppResult<StoredObject>;

    /// Delete an object; missing objects are not an error
    ///
    /// # Errors
    ///
    /// Returns a storage error when the backend fails
    async fn delete(&self, key: &str) -> AppResult<()>;
}

/// Key for a progress photo upload: `photos/{user}/{millis}-{file}`
#[must_use]
pub fn photo_key(user_id: i64, timestamp_millis: i64, file_name: &str) -> String {
    format!(
        "photos/{user_id}/{timestamp_millis}-{}",
        sanitize_file_name(file_name)
    )
}

/// Key for custom exercise media: `exercises/{user}/{millis}.{ext}`
#[must_use]
pub fn exercise_media_key(user_id: i64, timestamp_millis: i64, extension: &str) -> String {
    format!("exercises/{user_id}/{timestamp_millis}.{extension}")
}

/// Strip path separators so a client-supplied file name cannot escape its
/// prefix
fn sanitize_file_name(file_name: &str) -> String {
    file_name.replace(['/', '\\'], "_")
}

/// Decode a plain base64 payload
///
/// # Errors
///
/// Returns an invalid-input error when the payload is not valid base64
pub fn decode_base64(data: &str) -> AppResult<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(data)
        .map_err(|e| AppError::invalid_input(format!("Invalid base64 payload: {e}")))
}

/// A decoded `data:image/...;base64,...` URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrlImage {
    /// File extension from the MIME subtype, e.g. "png" or "gif"
    pub extension: String,
    /// Decoded image bytes
    pub bytes: Vec<u8>,
}

impl DataUrlImage {
    /// MIME content type for the stored object
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("image/{}", self.extension)
    }
}

/// Parse an image data URL
///
/// Returns `None` when the string is not an image data URL; the caller
/// decides whether that is an error or simply "no media supplied".
///
/// # Errors
///
/// Returns an invalid-input error when the base64 section does not decode
pub fn parse_image_data_url(data: &str) -> AppResult<Option<DataUrlImage>> {
    static DATA_URL: OnceLock<Option<Regex>> = OnceLock::new();
    let Some(pattern) = DATA_URL
        .get_or_init(|| Regex::new(r"^data:image/(\w+);base64,(.+)$").ok())
        .as_ref()
    else {
        return Ok(None);
    };

    let Some(captures) = pattern.captures(data) else {
        return Ok(None);
    };

    let extension = captures
        .get(1)
        .map(|m| m.as_str().to_owned())
        .unwrap_or_default();
    let encoded = captures.get(2).map_or("", |m| m.as_str());
    let bytes = decode_base64(encoded)?;

    Ok(Some(DataUrlImage { extension, bytes }))
}
