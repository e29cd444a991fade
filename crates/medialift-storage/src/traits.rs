//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::{StorageBackend, Visibility};
use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// The ingestion pipeline only needs two capabilities from a backend: put
/// bytes at a key with a visibility, and resolve a key in a bucket to a raw
/// (non-CDN) URL. Backend failures are returned as-is; the pipeline does not
/// retry or reinterpret them.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store `data` at `storage_key` in the default bucket.
    async fn put(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        content_type: &str,
        visibility: Visibility,
    ) -> StorageResult<()>;

    /// Resolve `storage_key` in `bucket` to the backend's raw URL.
    ///
    /// This never touches the network and does not check that the object exists.
    fn raw_url(&self, bucket: &str, storage_key: &str) -> StorageResult<String>;

    /// Bucket used for uploads and for URL resolution without an override.
    fn default_bucket(&self) -> &str;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
