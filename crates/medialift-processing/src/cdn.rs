//! CDN URL rewriting.

use url::Url;

use crate::error::{MediaError, MediaResult};

/// Per-call overrides for URL resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlOverrides {
    /// Bucket to resolve against instead of the backend's default.
    pub bucket: Option<String>,
    /// CDN domain (e.g. `http://customcdn.com`) to use instead of the default CDN.
    pub cdn: Option<String>,
}

impl UrlOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    pub fn with_cdn(mut self, cdn: impl Into<String>) -> Self {
        self.cdn = Some(cdn.into());
        self
    }

    /// The override CDN, ignoring blank values.
    pub fn cdn_domain(&self) -> Option<&str> {
        self.cdn.as_deref().filter(|cdn| !cdn.trim().is_empty())
    }

    /// Reject an override CDN that is not an http(s) URL.
    pub fn validate(&self) -> MediaResult<()> {
        match self.cdn_domain() {
            Some(cdn) => validate_cdn_domain(cdn),
            None => Ok(()),
        }
    }
}

/// Check that `cdn_domain` is an absolute http(s) URL.
pub fn validate_cdn_domain(cdn_domain: &str) -> MediaResult<()> {
    let parsed = Url::parse(cdn_domain).map_err(|e| MediaError::InvalidUrl {
        url: cdn_domain.to_string(),
        reason: e.to_string(),
    })?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(MediaError::InvalidUrl {
            url: cdn_domain.to_string(),
            reason: "CDN domain must be an http(s) URL".to_string(),
        });
    }
    Ok(())
}

/// Replace the origin of `raw_url` with `cdn_domain`, keeping path and query.
///
/// The path is copied verbatim from `raw_url`, never re-serialized. A path
/// on `cdn_domain` itself is kept as a prefix, so
/// `https://cdn.example.com/assets` + `https://s3/x.png` gives
/// `https://cdn.example.com/assets/x.png`.
pub fn rewrite_origin(raw_url: &str, cdn_domain: &str) -> MediaResult<String> {
    let invalid = |reason: String| MediaError::InvalidUrl {
        url: raw_url.to_string(),
        reason,
    };

    let parsed = Url::parse(raw_url).map_err(|e| invalid(e.to_string()))?;
    if !parsed.has_host() {
        return Err(invalid("URL has no host".to_string()));
    }

    let (_, rest) = raw_url
        .split_once("://")
        .ok_or_else(|| invalid("URL has no authority".to_string()))?;
    let path_start = rest.find(['/', '?', '#']).unwrap_or(rest.len());

    Ok(format!(
        "{}{}",
        cdn_domain.trim_end_matches('/'),
        &rest[path_start..]
    ))
}
