//! medialift: command-line front end for the media ingestion pipeline.
//!
//! Storage and CDN settings are read from the environment or a `.env` file.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use medialift_cli::{init_tracing, print_json, UploadOutput, UrlOutput};
use medialift_core::{Config, Visibility};
use medialift_processing::{MediaUploader, MediaValue, UploadOptions, UrlOverrides};
use medialift_storage::create_storage;

#[derive(Parser)]
#[command(name = "medialift", about = "Validate, store and resolve media")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a file (or base64 content with --base64)
    Upload {
        /// Path to the file, or base64 text with --base64
        value: String,
        /// Key prefix, e.g. "images/profile_pictures/"
        #[arg(long, default_value = "")]
        prefix: String,
        /// Store with private visibility
        #[arg(long)]
        private: bool,
        /// Treat VALUE as base64 encoded content
        #[arg(long)]
        base64: bool,
        /// CDN domain to use instead of the default CDN
        #[arg(long)]
        cdn: Option<String>,
        /// Bucket to resolve the URL against
        #[arg(long)]
        bucket: Option<String>,
    },
    /// Detect the content type of a file
    Sniff {
        /// Path to the file
        path: PathBuf,
    },
    /// Resolve the URL of a stored key
    Url {
        /// Final storage key, including the extension
        key: String,
        #[arg(long)]
        cdn: Option<String>,
        #[arg(long)]
        bucket: Option<String>,
        /// Print the backend URL without CDN rewriting
        #[arg(long)]
        raw: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    let storage = create_storage(&config)
        .await
        .context("Failed to initialize storage backend")?;
    tracing::debug!(backend = %storage.backend_type(), "Storage backend ready");
    let uploader = MediaUploader::from_config(storage, &config);

    match cli.command {
        Commands::Upload {
            value,
            prefix,
            private,
            base64,
            cdn,
            bucket,
        } => {
            let visibility = if private {
                Visibility::Private
            } else {
                Visibility::Public
            };
            let mut options = UploadOptions::new(visibility);
            if let Some(cdn) = cdn {
                options = options.with_cdn(cdn);
            }
            if let Some(bucket) = bucket {
                options = options.with_bucket(bucket);
            }

            let key = uploader.generate_key(&prefix);
            let url = if base64 {
                uploader.upload_base64(&key, &value, options).await?
            } else {
                uploader
                    .upload_file(&key, MediaValue::File(PathBuf::from(value)), options)
                    .await?
            };

            print_json(&UploadOutput { key, url })?;
        }
        Commands::Sniff { path } => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            print_json(&uploader.validator().sniff(&bytes))?;
        }
        Commands::Url {
            key,
            cdn,
            bucket,
            raw,
        } => {
            let url = if raw {
                uploader.raw_url(&key, bucket.as_deref())?
            } else {
                let overrides = UrlOverrides { bucket, cdn };
                uploader.media_url(&key, &overrides)?
            };

            print_json(&UrlOutput { key, url, raw })?;
        }
    }

    Ok(())
}
