pub mod fixtures;

use std::sync::Arc;

use medialift_core::CdnConfig;
use medialift_processing::{MediaUploader, MediaValidator};
use medialift_storage::MemoryStorage;

pub const DEFAULT_CDN_DOMAIN: &str = "http://media.example.com";
pub const BACKEND_URL: &str = "http://s3.com";
pub const DEFAULT_BUCKET: &str = "bucket1";

/// CDN registry with `default_cdn1` -> `http://media.example.com`, defaulting to `default_cdn`.
pub fn cdn_config(default_cdn: &str) -> CdnConfig {
    CdnConfig::new()
        .with_cdn("default_cdn1", DEFAULT_CDN_DOMAIN)
        .with_default(default_cdn)
}

pub struct TestUploader {
    pub storage: MemoryStorage,
    pub uploader: MediaUploader,
}

pub fn setup_uploader(cdn: CdnConfig) -> TestUploader {
    let storage = MemoryStorage::new(DEFAULT_BUCKET, BACKEND_URL);
    let uploader = MediaUploader::new(
        Arc::new(storage.clone()),
        cdn,
        MediaValidator::default(),
    );
    TestUploader { storage, uploader }
}
