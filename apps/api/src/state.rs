use std::sync::Arc;

use crate::assembly::fulfillment::ContentSource;
use crate::config::Config;
use crate::export::Exporter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable content source. Default: the Gemini `LlmClient`.
    pub content_source: Arc<dyn ContentSource>,
    /// Page layout and sanitization table used by every export.
    pub exporter: Arc<Exporter>,
    pub config: Config,
}
