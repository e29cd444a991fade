use std::path::Path;

use medialift_core::constants::DEFAULT_ALLOWED_CONTENT_TYPES;
use medialift_core::Config;
use tokio::io::AsyncReadExt;

use crate::input::decode_base64;
use crate::sniff::{self, SniffResult, SNIFF_LEN};

/// Media validator
///
/// Decides whether content qualifies as media by sniffing it and checking the
/// detected MIME type against an allow-list. The checks never fail: anything
/// that cannot be read or recognized is simply not valid media.
#[derive(Debug, Clone)]
pub struct MediaValidator {
    allowed_content_types: Vec<String>,
}

impl MediaValidator {
    pub fn new(allowed_content_types: Vec<String>) -> Self {
        Self {
            allowed_content_types: allowed_content_types
                .into_iter()
                .map(|ct| ct.trim().to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.allowed_content_types().to_vec())
    }

    pub fn allowed_content_types(&self) -> &[String] {
        &self.allowed_content_types
    }

    pub fn is_supported(&self, mime_type: &str) -> bool {
        let normalized = mime_type.to_lowercase();
        self.allowed_content_types.iter().any(|ct| ct == &normalized)
    }

    /// Sniff `bytes` and check the result against the allow-list.
    pub fn sniff(&self, bytes: &[u8]) -> SniffResult {
        let detected = sniff::detect(bytes);
        let is_supported_media = self.is_supported(detected.mime_type);

        tracing::debug!(
            mime_type = detected.mime_type,
            extension = detected.extension,
            is_supported_media,
            "Sniffed content type"
        );

        SniffResult {
            mime_type: detected.mime_type.to_string(),
            extension: detected.extension.to_string(),
            is_supported_media,
        }
    }

    pub fn is_valid_media_bytes(&self, bytes: &[u8]) -> bool {
        self.sniff(bytes).is_supported_media
    }

    /// Whether `path` is an existing, readable file whose content is accepted media.
    ///
    /// Only the leading bytes are read.
    pub async fn is_valid_media_file(&self, path: &Path) -> bool {
        match read_head(path).await {
            Ok(head) => self.is_valid_media_bytes(&head),
            Err(e) => {
                tracing::debug!(
                    path = %path.display(),
                    error = %e,
                    "Media file could not be read"
                );
                false
            }
        }
    }

    /// Whether `text` is base64 whose decoded content is accepted media.
    pub fn is_base64_media(&self, text: &str) -> bool {
        decode_base64(text)
            .map(|decoded| self.is_valid_media_bytes(&decoded))
            .unwrap_or(false)
    }
}

impl Default for MediaValidator {
    fn default() -> Self {
        Self::new(
            DEFAULT_ALLOWED_CONTENT_TYPES
                .iter()
                .map(|ct| ct.to_string())
                .collect(),
        )
    }
}

async fn read_head(path: &Path) -> std::io::Result<Vec<u8>> {
    let file = tokio::fs::File::open(path).await?;
    let mut head = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64).read_to_end(&mut head).await?;
    Ok(head)
}
