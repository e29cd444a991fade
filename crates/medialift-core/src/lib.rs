//! Medialift Core Library
//!
//! This crate provides the configuration, CDN registry, visibility levels and
//! storage backend kinds shared by all Medialift components.

pub mod config;
pub mod constants;
pub mod storage_types;

// Re-export commonly used types
pub use config::{CdnConfig, Config, StorageConfig};
pub use storage_types::{StorageBackend, Visibility};
// Note: Storage, StorageError, StorageResult live in medialift-storage,
// MediaError lives in medialift-processing
