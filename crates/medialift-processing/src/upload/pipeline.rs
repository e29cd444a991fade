//! Upload pipeline: classify → validate → store → resolve.
//!
//! [`MediaUploader`] is the single entry point for callers that want to turn
//! some input into a stored media object and a URL. It carries its storage
//! backend, CDN registry and allow-list explicitly; nothing is read from
//! global state. Each call runs one linear sequence with no retries, and
//! backend errors are returned unchanged.

use std::path::Path;
use std::sync::Arc;

use medialift_core::{CdnConfig, Config};
use medialift_storage::Storage;

use super::types::UploadOptions;
use crate::cdn::{rewrite_origin, UrlOverrides};
use crate::error::{MediaError, MediaResult};
use crate::input::{classify, decode_base64, MediaInput, MediaValue};
use crate::keys::{finalize_key, generate_key};
use crate::sniff::SniffResult;
use crate::validator::MediaValidator;

#[derive(Clone)]
pub struct MediaUploader {
    storage: Arc<dyn Storage>,
    cdn: CdnConfig,
    validator: MediaValidator,
}

impl MediaUploader {
    pub fn new(storage: Arc<dyn Storage>, cdn: CdnConfig, validator: MediaValidator) -> Self {
        Self {
            storage,
            cdn,
            validator,
        }
    }

    pub fn from_config(storage: Arc<dyn Storage>, config: &Config) -> Self {
        Self::new(
            storage,
            config.cdn().clone(),
            MediaValidator::from_config(config),
        )
    }

    pub fn validator(&self) -> &MediaValidator {
        &self.validator
    }

    pub fn cdn(&self) -> &CdnConfig {
        &self.cdn
    }

    /// `prefix` followed by a fresh random token. See [`generate_key`].
    pub fn generate_key(&self, prefix: &str) -> String {
        generate_key(prefix)
    }

    /// Upload any supported representation.
    ///
    /// The value is classified first and then dispatched to
    /// [`upload_file`](Self::upload_file), [`upload_base64`](Self::upload_base64)
    /// or [`upload_stream`](Self::upload_stream).
    pub async fn upload_media(
        &self,
        key: &str,
        value: impl Into<MediaValue>,
        options: impl Into<UploadOptions>,
    ) -> MediaResult<String> {
        let options = options.into();

        match classify(value) {
            MediaInput::FileHandle(path) => self.upload_file(key, path, options).await,
            MediaInput::Base64Text(text) => self.upload_base64(key, &text, options).await,
            MediaInput::RawStream(data) => self.upload_stream(key, data, options).await,
        }
    }

    /// Decode base64 media and upload it under `key.<extension>`.
    pub async fn upload_base64(
        &self,
        key: &str,
        text: &str,
        options: impl Into<UploadOptions>,
    ) -> MediaResult<String> {
        let Some(data) = decode_base64(text) else {
            tracing::warn!(key = %key, "Rejected upload: input is not base64");
            return Err(MediaError::InvalidBase64Media);
        };

        let sniffed = self.validator.sniff(&data);
        if !sniffed.is_supported_media {
            tracing::warn!(
                key = %key,
                mime_type = %sniffed.mime_type,
                "Rejected upload: base64 content is not accepted media"
            );
            return Err(MediaError::InvalidBase64Media);
        }

        self.store(key, data, sniffed, options.into()).await
    }

    /// Upload the file referenced by `value` under `key.<extension>`.
    ///
    /// Anything other than a file reference is rejected, as is a file that is
    /// missing, unreadable or not accepted media.
    pub async fn upload_file(
        &self,
        key: &str,
        value: impl Into<MediaValue>,
        options: impl Into<UploadOptions>,
    ) -> MediaResult<String> {
        let path = match value.into() {
            MediaValue::File(path) => path,
            _ => {
                tracing::warn!(key = %key, "Rejected upload: input is not a file");
                return Err(MediaError::InvalidMediaFile);
            }
        };

        if !self.validator.is_valid_media_file(&path).await {
            tracing::warn!(
                key = %key,
                path = %path.display(),
                "Rejected upload: file is not accepted media"
            );
            return Err(MediaError::InvalidMediaFile);
        }

        let data = read_file(&path).await?;

        // the file may have changed since the header check
        let sniffed = self.validator.sniff(&data);
        if !sniffed.is_supported_media {
            return Err(MediaError::InvalidMediaFile);
        }

        self.store(key, data, sniffed, options.into()).await
    }

    /// Upload raw bytes under `key.<extension>`.
    ///
    /// Raw bytes go through the same media check as files.
    pub async fn upload_stream(
        &self,
        key: &str,
        data: Vec<u8>,
        options: impl Into<UploadOptions>,
    ) -> MediaResult<String> {
        let sniffed = self.validator.sniff(&data);
        if !sniffed.is_supported_media {
            tracing::warn!(
                key = %key,
                mime_type = %sniffed.mime_type,
                "Rejected upload: stream is not accepted media"
            );
            return Err(MediaError::InvalidMediaFile);
        }

        self.store(key, data, sniffed, options.into()).await
    }

    /// Raw backend URL for `key`, in `bucket` or the backend's default bucket.
    ///
    /// Never uploads and never applies a CDN.
    pub fn raw_url(&self, key: &str, bucket: Option<&str>) -> MediaResult<String> {
        let bucket = bucket.unwrap_or_else(|| self.storage.default_bucket());
        Ok(self.storage.raw_url(bucket, key)?)
    }

    /// Public URL for `key`.
    ///
    /// Resolves the raw URL, then rewrites its origin to the override CDN, or
    /// else to the default CDN. With neither, the raw URL is returned. An
    /// override CDN that is not an http(s) URL is rejected.
    pub fn media_url(&self, key: &str, overrides: &UrlOverrides) -> MediaResult<String> {
        overrides.validate()?;

        let raw = self.raw_url(key, overrides.bucket.as_deref())?;
        let cdn_domain = overrides
            .cdn_domain()
            .or_else(|| self.cdn.default_domain());

        match cdn_domain {
            Some(domain) => rewrite_origin(&raw, domain),
            None => Ok(raw),
        }
    }

    async fn store(
        &self,
        key: &str,
        data: Vec<u8>,
        sniffed: SniffResult,
        options: UploadOptions,
    ) -> MediaResult<String> {
        // reject a bad override before anything is written
        options.overrides.validate()?;

        let final_key = finalize_key(key, &sniffed.extension);
        let size = data.len();
        let start = std::time::Instant::now();

        self.storage
            .put(&final_key, data, &sniffed.mime_type, options.visibility)
            .await?;

        tracing::info!(
            key = %final_key,
            mime_type = %sniffed.mime_type,
            visibility = %options.visibility,
            size_bytes = size,
            backend = %self.storage.backend_type(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Media uploaded"
        );

        self.media_url(&final_key, &options.overrides)
    }
}

async fn read_file(path: &Path) -> MediaResult<Vec<u8>> {
    tokio::fs::read(path).await.map_err(|e| {
        tracing::warn!(
            path = %path.display(),
            error = %e,
            "Rejected upload: file could not be read"
        );
        MediaError::InvalidMediaFile
    })
}
