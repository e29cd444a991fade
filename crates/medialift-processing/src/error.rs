//! Error types surfaced by the ingestion pipeline.

use medialift_storage::StorageError;

/// Errors returned by [`MediaUploader`](crate::MediaUploader).
///
/// The two media variants are caller-correctable input errors. Storage
/// failures are passed through untouched.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// Input selected as base64 media did not decode to accepted media content.
    #[error("The base64 encoded string is not a valid image.")]
    InvalidBase64Media,

    /// Input was not a file reference, could not be read, or is not accepted media.
    #[error("The file could not be processed. It is not a valid media file.")]
    InvalidMediaFile,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl MediaError {
    /// Whether the caller can fix the error by sending different input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            MediaError::InvalidBase64Media | MediaError::InvalidMediaFile
        )
    }
}

pub type MediaResult<T> = Result<T, MediaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MediaError::InvalidBase64Media.to_string(),
            "The base64 encoded string is not a valid image."
        );
        assert_eq!(
            MediaError::InvalidMediaFile.to_string(),
            "The file could not be processed. It is not a valid media file."
        );
    }

    #[test]
    fn test_storage_errors_pass_through() {
        let err = MediaError::from(StorageError::UploadFailed("timeout".to_string()));
        assert_eq!(err.to_string(), "Upload failed: timeout");
        assert!(!err.is_invalid_input());
        assert!(MediaError::InvalidMediaFile.is_invalid_input());
    }
}
