use anyhow::Context;
use serde::Serialize;

/// Initialize tracing for the CLI.
///
/// Logs go to stderr so that stdout carries only JSON output.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Render `value` as pretty JSON.
pub fn to_json(value: &impl Serialize) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("Serialize output")
}

pub fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", to_json(value)?);
    Ok(())
}

/// Output of `upload`.
#[derive(Debug, Serialize)]
pub struct UploadOutput {
    pub key: String,
    pub url: String,
}

/// Output of `url`.
#[derive(Debug, Serialize)]
pub struct UrlOutput {
    pub key: String,
    pub url: String,
    pub raw: bool,
}
