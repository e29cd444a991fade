//! Application-wide constants.

/// Content types accepted as media when `MEDIA_ALLOWED_CONTENT_TYPES` is not set.
///
/// Values are the canonical MIME types reported by content sniffing, so e.g.
/// WAV is `audio/x-wav` and ICO is `image/vnd.microsoft.icon`.
pub const DEFAULT_ALLOWED_CONTENT_TYPES: &[&str] = &[
    // Images
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/bmp",
    "image/tiff",
    "image/avif",
    "image/heif",
    "image/vnd.microsoft.icon",
    // Documents
    "application/pdf",
    // Video
    "video/mp4",
    "video/webm",
    "video/quicktime",
    // Audio
    "audio/mpeg",
    "audio/ogg",
    "audio/x-wav",
    "audio/x-flac",
];

/// Bucket used by the local backend when `LOCAL_STORAGE_BUCKET` is not set.
pub const DEFAULT_LOCAL_BUCKET: &str = "media";
