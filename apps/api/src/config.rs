use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::export::{PdfFont, DEFAULT_DOCUMENT_NAME};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on a single block generation call.
    pub generation_timeout: Duration,
    /// Base name for exported files when a request does not supply one.
    pub document_name: String,
    pub pdf_font: PdfFont,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let timeout_secs = optional_env("GENERATION_TIMEOUT_SECS", "60")
            .parse::<u64>()
            .context("GENERATION_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
            generation_timeout: Duration::from_secs(timeout_secs),
            document_name: optional_env("DOCUMENT_NAME", DEFAULT_DOCUMENT_NAME),
            pdf_font: optional_env("PDF_FONT", "helvetica")
                .parse::<PdfFont>()
                .map_err(|e| anyhow!("PDF_FONT: {e}"))?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
