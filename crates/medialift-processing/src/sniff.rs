//! Content-based type detection.
//!
//! Only the leading bytes are inspected. File names and declared content
//! types are never consulted.

use serde::Serialize;

/// Number of leading bytes inspected when sniffing.
pub const SNIFF_LEN: usize = 8192;

/// Type reported for content without a recognized signature.
pub const FALLBACK_MIME_TYPE: &str = "text/plain";
pub const FALLBACK_EXTENSION: &str = "txt";

/// Canonical MIME type and extension for a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentType {
    pub mime_type: &'static str,
    pub extension: &'static str,
}

/// Outcome of sniffing some content against an allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SniffResult {
    pub mime_type: String,
    pub extension: String,
    pub is_supported_media: bool,
}

/// Detect the content type from magic numbers.
///
/// Unrecognized and empty content maps to `text/plain` / `txt`.
pub fn detect(bytes: &[u8]) -> ContentType {
    let head = &bytes[..bytes.len().min(SNIFF_LEN)];

    match infer::get(head) {
        Some(kind) => ContentType {
            mime_type: kind.mime_type(),
            extension: kind.extension(),
        },
        None => ContentType {
            mime_type: FALLBACK_MIME_TYPE,
            extension: FALLBACK_EXTENSION,
        },
    }
}

/// MIME type of `bytes`, e.g. `application/pdf`.
pub fn mime_type(bytes: &[u8]) -> &'static str {
    detect(bytes).mime_type
}

/// Canonical extension of `bytes`, without the dot, e.g. `pdf`.
pub fn extension(bytes: &[u8]) -> &'static str {
    detect(bytes).extension
}
