//! In-memory storage backend
//!
//! Keeps objects in a map and resolves URLs against a fixed base URL. Used by
//! tests and by the CLI for dry runs.

use crate::keys::{join_url, validate_key};
use crate::traits::{Storage, StorageResult};
use crate::{StorageBackend, Visibility};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// An object held by [`MemoryStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: String,
    pub visibility: Visibility,
}

/// Memory storage implementation
///
/// `raw_url` returns `{base_url}/{key}` for every bucket, like a single
/// virtual host, and records each `(bucket, key)` it was asked to resolve.
#[derive(Clone)]
pub struct MemoryStorage {
    objects: Arc<Mutex<HashMap<String, StoredObject>>>,
    resolved: Arc<Mutex<Vec<(String, String)>>>,
    bucket: String,
    base_url: String,
}

impl MemoryStorage {
    pub fn new(bucket: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            objects: Arc::new(Mutex::new(HashMap::new())),
            resolved: Arc::new(Mutex::new(Vec::new())),
            bucket: bucket.into(),
            base_url: base_url.into(),
        }
    }

    /// Get a stored object (for test assertions)
    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    /// All stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .objects
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    /// `(bucket, key)` pairs passed to `raw_url`, in call order.
    pub fn resolved(&self) -> Vec<(String, String)> {
        self.resolved
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new("memory", "http://memory.local")
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn put(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        content_type: &str,
        visibility: Visibility,
    ) -> StorageResult<()> {
        validate_key(storage_key)?;
        let size = data.len();

        self.objects
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(
                storage_key.to_string(),
                StoredObject {
                    data,
                    content_type: content_type.to_string(),
                    visibility,
                },
            );

        tracing::debug!(
            bucket = %self.bucket,
            key = %storage_key,
            visibility = %visibility,
            size_bytes = size,
            "Memory storage upload successful"
        );

        Ok(())
    }

    fn raw_url(&self, bucket: &str, storage_key: &str) -> StorageResult<String> {
        validate_key(storage_key)?;
        self.resolved
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((bucket.to_string(), storage_key.to_string()));
        Ok(join_url(&self.base_url, storage_key))
    }

    fn default_bucket(&self) -> &str {
        &self.bucket
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
