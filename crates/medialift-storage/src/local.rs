use crate::keys::{join_url, validate_key};
use crate::traits::{Storage, StorageError, StorageResult};
use crate::{StorageBackend, Visibility};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
///
/// Objects live at `{base_path}/{bucket}/{key}` and are served from
/// `{base_url}/{bucket}/{key}`. Visibility is not enforced on disk; access
/// control is left to whatever serves `base_url`.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
    bucket: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "/var/lib/medialift")
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:3000/files")
    /// * `bucket` - Default bucket, a subdirectory of `base_path`
    pub async fn new(
        base_path: impl Into<PathBuf>,
        base_url: String,
        bucket: String,
    ) -> StorageResult<Self> {
        let base_path = base_path.into();

        if bucket.is_empty() || bucket.contains('/') || bucket == ".." {
            return Err(StorageError::ConfigError(format!(
                "Invalid local bucket name: {:?}",
                bucket
            )));
        }

        fs::create_dir_all(base_path.join(&bucket)).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
            bucket,
        })
    }

    /// Convert storage key to filesystem path with security validation
    ///
    /// Rejects keys that would escape the bucket directory.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        validate_key(storage_key)?;

        let bucket_path = self.base_path.join(&self.bucket);
        let path = bucket_path.join(storage_key);

        if path.strip_prefix(&bucket_path).is_err() {
            return Err(StorageError::InvalidKey(
                "Storage key resolves outside storage directory".to_string(),
            ));
        }

        Ok(path)
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        _content_type: &str,
        visibility: Visibility,
    ) -> StorageResult<()> {
        let path = self.key_to_path(storage_key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            visibility = %visibility,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(())
    }

    fn raw_url(&self, bucket: &str, storage_key: &str) -> StorageResult<String> {
        validate_key(storage_key)?;
        Ok(join_url(
            &format!("{}/{}", self.base_url.trim_end_matches('/'), bucket),
            storage_key,
        ))
    }

    fn default_bucket(&self) -> &str {
        &self.bucket
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn storage_in(dir: &Path) -> LocalStorage {
        LocalStorage::new(
            dir,
            "http://localhost:3000/files".to_string(),
            "media".to_string(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_local_storage_put_writes_file() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        let data = b"%PDF-1.4 test".to_vec();
        storage
            .put(
                "images/profile_pictures/abc.pdf",
                data.clone(),
                "application/pdf",
                Visibility::Public,
            )
            .await
            .unwrap();

        let written = std::fs::read(dir.path().join("media/images/profile_pictures/abc.pdf")).unwrap();
        assert_eq!(data, written);
    }

    #[tokio::test]
    async fn test_local_storage_raw_url() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        assert_eq!(
            storage.raw_url("media", "file_key.pdf").unwrap(),
            "http://localhost:3000/files/media/file_key.pdf"
        );
        assert_eq!(
            storage.raw_url("other", "file_key.pdf").unwrap(),
            "http://localhost:3000/files/other/file_key.pdf"
        );
        assert_eq!(storage.default_bucket(), "media");
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        let result = storage
            .put("../../../etc/passwd", vec![1], "text/plain", Visibility::Private)
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.raw_url("media", "/etc/passwd");
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_invalid_bucket_rejected() {
        let dir = tempdir().unwrap();
        let result = LocalStorage::new(
            dir.path(),
            "http://localhost:3000/files".to_string(),
            "a/b".to_string(),
        )
        .await;
        assert!(matches!(result, Err(StorageError::ConfigError(_))));
    }
}
