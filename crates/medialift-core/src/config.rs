//! Configuration module
//!
//! This module provides the configuration structures for the ingestion
//! pipeline: storage backend settings, the CDN registry and the media
//! allow-list. Values are read from the environment (with `.env` support) and
//! handed to the pipeline explicitly, so several configurations can coexist in
//! one process.

use std::collections::HashMap;
use std::env;

use url::Url;

use crate::constants::{DEFAULT_ALLOWED_CONTENT_TYPES, DEFAULT_LOCAL_BUCKET};
use crate::storage_types::StorageBackend;

/// CDN registry: CDN name -> domain, plus the name used when a call does not
/// supply its own CDN.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CdnConfig {
    pub default_cdn: Option<String>,
    pub cdns: HashMap<String, String>,
}

impl CdnConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `domain` under `name`.
    pub fn with_cdn(mut self, name: impl Into<String>, domain: impl Into<String>) -> Self {
        self.cdns.insert(name.into(), domain.into());
        self
    }

    /// Set the CDN name used for URL rewriting by default.
    pub fn with_default(mut self, name: impl Into<String>) -> Self {
        self.default_cdn = Some(name.into());
        self
    }

    pub fn domain(&self, name: &str) -> Option<&str> {
        self.cdns.get(name).map(String::as_str)
    }

    /// Domain registered under the default CDN name.
    ///
    /// `None` when no default is configured or the name is not registered;
    /// both mean "no CDN rewriting".
    pub fn default_domain(&self) -> Option<&str> {
        self.default_cdn
            .as_deref()
            .and_then(|name| self.domain(name))
    }

    /// Parse a `name=domain,name=domain` list.
    pub fn parse_domains(raw: &str) -> Result<HashMap<String, String>, anyhow::Error> {
        let mut cdns = HashMap::new();
        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, domain) = entry.split_once('=').ok_or_else(|| {
                anyhow::anyhow!("CDN_DOMAINS entry '{}' must have the form name=domain", entry)
            })?;
            let (name, domain) = (name.trim(), domain.trim());
            if name.is_empty() || domain.is_empty() {
                return Err(anyhow::anyhow!(
                    "CDN_DOMAINS entry '{}' has an empty name or domain",
                    entry
                ));
            }
            cdns.insert(name.to_string(), domain.to_string());
        }
        Ok(cdns)
    }
}

/// Storage backend configuration
#[derive(Clone, Debug, Default)]
pub struct StorageConfig {
    pub backend: Option<StorageBackend>,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, etc.)
    pub aws_region: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    pub local_storage_bucket: String,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub storage: StorageConfig,
    pub cdn: CdnConfig,
    pub allowed_content_types: Vec<String>,
}

impl Config {
    /// Load configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = var("STORAGE_BACKEND")
            .map(|s| s.parse::<StorageBackend>())
            .transpose()?;

        let storage = StorageConfig {
            backend,
            s3_bucket: var("S3_BUCKET"),
            s3_region: var("S3_REGION"),
            s3_endpoint: var("S3_ENDPOINT"),
            aws_region: var("AWS_REGION"),
            local_storage_path: var("LOCAL_STORAGE_PATH"),
            local_storage_base_url: var("LOCAL_STORAGE_BASE_URL"),
            local_storage_bucket: var("LOCAL_STORAGE_BUCKET")
                .unwrap_or_else(|| DEFAULT_LOCAL_BUCKET.to_string()),
        };

        let cdn = CdnConfig {
            default_cdn: var("DEFAULT_CDN").filter(|s| !s.trim().is_empty()),
            cdns: CdnConfig::parse_domains(&var("CDN_DOMAINS").unwrap_or_default())?,
        };

        let allowed_content_types = var("MEDIA_ALLOWED_CONTENT_TYPES")
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| {
                DEFAULT_ALLOWED_CONTENT_TYPES
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            });

        tracing::debug!(
            backend = ?storage.backend,
            default_cdn = ?cdn.default_cdn,
            cdn_count = cdn.cdns.len(),
            "Configuration loaded"
        );

        Ok(Config {
            storage,
            cdn,
            allowed_content_types,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        match self.storage_backend() {
            StorageBackend::S3 => {
                if self.s3_bucket().is_none() {
                    return Err(anyhow::anyhow!("S3_BUCKET must be set for the s3 backend"));
                }
                if self.s3_region().is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set for the s3 backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path().is_none() || self.local_storage_base_url().is_none()
                {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH and LOCAL_STORAGE_BASE_URL must be set for the local backend"
                    ));
                }
            }
            StorageBackend::Memory => {}
        }

        for (name, domain) in &self.cdn.cdns {
            let parsed = Url::parse(domain)
                .map_err(|e| anyhow::anyhow!("CDN '{}' has an invalid domain '{}': {}", name, domain, e))?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(anyhow::anyhow!(
                    "CDN '{}' domain must be an http(s) URL, got '{}'",
                    name,
                    domain
                ));
            }
        }

        if self.allowed_content_types.is_empty() {
            return Err(anyhow::anyhow!("MEDIA_ALLOWED_CONTENT_TYPES must not be empty"));
        }

        Ok(())
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.storage.backend.unwrap_or(StorageBackend::S3)
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.storage.s3_bucket.as_deref()
    }

    /// `S3_REGION`, falling back to `AWS_REGION`.
    pub fn s3_region(&self) -> Option<&str> {
        self.storage
            .s3_region
            .as_deref()
            .or(self.storage.aws_region.as_deref())
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.storage.s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.storage.local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.storage.local_storage_base_url.as_deref()
    }

    pub fn local_storage_bucket(&self) -> &str {
        &self.storage.local_storage_bucket
    }

    pub fn cdn(&self) -> &CdnConfig {
        &self.cdn
    }

    pub fn allowed_content_types(&self) -> &[String] {
        &self.allowed_content_types
    }
}
