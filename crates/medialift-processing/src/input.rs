//! Input classification.
//!
//! Callers hand the pipeline whatever they hold: a path to a file, some text
//! or some bytes. [`classify`] turns that into exactly one [`MediaInput`]
//! variant. Classification never fails and never looks at the content beyond
//! the base64 round-trip check; whether the content is media is decided later
//! by the validator.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// An unclassified input value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaValue {
    /// A reference to on-disk content.
    File(PathBuf),
    /// Text: either base64 or raw content.
    Text(String),
    /// Bytes: either base64 text or raw content.
    Bytes(Vec<u8>),
}

impl From<PathBuf> for MediaValue {
    fn from(path: PathBuf) -> Self {
        MediaValue::File(path)
    }
}

impl From<&Path> for MediaValue {
    fn from(path: &Path) -> Self {
        MediaValue::File(path.to_path_buf())
    }
}

impl From<String> for MediaValue {
    fn from(text: String) -> Self {
        MediaValue::Text(text)
    }
}

impl From<&str> for MediaValue {
    fn from(text: &str) -> Self {
        MediaValue::Text(text.to_string())
    }
}

impl From<Vec<u8>> for MediaValue {
    fn from(bytes: Vec<u8>) -> Self {
        MediaValue::Bytes(bytes)
    }
}

impl From<&[u8]> for MediaValue {
    fn from(bytes: &[u8]) -> Self {
        MediaValue::Bytes(bytes.to_vec())
    }
}

/// A classified input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaInput {
    /// Already-decoded binary content.
    RawStream(Vec<u8>),
    /// Text that round-trips through standard base64.
    Base64Text(String),
    /// A file on disk. The path may not exist; that surfaces at validation.
    FileHandle(PathBuf),
}

impl MediaInput {
    pub fn kind(&self) -> &'static str {
        match self {
            MediaInput::RawStream(_) => "raw_stream",
            MediaInput::Base64Text(_) => "base64_text",
            MediaInput::FileHandle(_) => "file_handle",
        }
    }

    pub fn is_file_handle(&self) -> bool {
        matches!(self, MediaInput::FileHandle(_))
    }
}

/// Classify a value: file handle first, then base64 text, then raw content.
pub fn classify(value: impl Into<MediaValue>) -> MediaInput {
    let input = match value.into() {
        MediaValue::File(path) => MediaInput::FileHandle(path),
        MediaValue::Text(text) => classify_text(text),
        MediaValue::Bytes(bytes) => match String::from_utf8(bytes) {
            Ok(text) => classify_text(text),
            Err(e) => MediaInput::RawStream(e.into_bytes()),
        },
    };

    tracing::debug!(kind = input.kind(), "Classified media input");
    input
}

fn classify_text(text: String) -> MediaInput {
    if is_base64(&text) {
        MediaInput::Base64Text(text)
    } else {
        MediaInput::RawStream(text.into_bytes())
    }
}

/// Whether `value` refers to a file rather than carrying content.
pub fn is_file(value: &MediaValue) -> bool {
    matches!(value, MediaValue::File(_))
}

/// Whether `text` is standard base64 that decodes to at least one byte and
/// re-encodes to exactly the same string.
pub fn is_base64(text: &str) -> bool {
    decode_base64(text).is_some()
}

/// Decode `text` if it passes the round-trip check in [`is_base64`].
pub fn decode_base64(text: &str) -> Option<Vec<u8>> {
    let decoded = STANDARD.decode(text).ok()?;
    if decoded.is_empty() || STANDARD.encode(&decoded) != text {
        return None;
    }
    Some(decoded)
}
