//! Medialift Storage Library
//!
//! This crate provides the object-storage abstraction used by the ingestion
//! pipeline, with implementations for S3, the local filesystem and memory.
//!
//! # Storage key format
//!
//! Keys are caller-chosen, path-like strings such as
//! `images/profile_pictures/3f2a...e1.png`. Keys must not be empty, contain
//! `..` segments or start with `/`. Validation and URL construction live in
//! the `keys` module so all backends stay consistent.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use medialift_core::{StorageBackend, Visibility};
pub use memory::{MemoryStorage, StoredObject};
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
