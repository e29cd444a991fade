//! Types for the upload pipeline.

use medialift_core::Visibility;

use crate::cdn::UrlOverrides;

/// How an upload is stored and how its URL is resolved.
///
/// Every [`Visibility`] converts into options without overrides, so upload
/// calls accept either `Visibility::Public` or a fully built value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadOptions {
    pub visibility: Visibility,
    pub overrides: UrlOverrides,
}

impl UploadOptions {
    pub fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            overrides: UrlOverrides::default(),
        }
    }

    pub fn public() -> Self {
        Self::new(Visibility::Public)
    }

    pub fn private() -> Self {
        Self::new(Visibility::Private)
    }

    pub fn with_cdn(mut self, cdn: impl Into<String>) -> Self {
        self.overrides.cdn = Some(cdn.into());
        self
    }

    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.overrides.bucket = Some(bucket.into());
        self
    }
}

impl From<Visibility> for UploadOptions {
    fn from(visibility: Visibility) -> Self {
        Self::new(visibility)
    }
}
