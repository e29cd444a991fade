//! Medialift Media Processing Library
//!
//! This crate turns arbitrary inputs into stored media and resolvable URLs:
//! classify the input, sniff its real content type, reject anything that is
//! not an accepted media type, derive a storage key, upload, and rewrite the
//! resulting URL through a CDN when one is configured.

pub mod cdn;
pub mod error;
pub mod input;
pub mod keys;
pub mod sniff;
pub mod upload;
pub mod validator;

// Re-export commonly used types
pub use cdn::UrlOverrides;
pub use error::{MediaError, MediaResult};
pub use input::{classify, MediaInput, MediaValue};
pub use keys::{finalize_key, generate_key};
pub use sniff::SniffResult;
pub use upload::{MediaUploader, UploadOptions};
pub use validator::MediaValidator;
