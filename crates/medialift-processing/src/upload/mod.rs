//! Ingestion pipeline: classify → validate/sniff → finalize key → store → resolve URL.

pub mod pipeline;
pub mod types;

pub use pipeline::MediaUploader;
pub use types::UploadOptions;
