// Format Exporter
// Renders one assembled Document into independent output artifacts (HTML, PDF).
// PDF layout is CPU-bound; async callers run it inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod html;
pub mod pagination;
pub mod pdf;
pub mod sanitize;

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::assembly::Document;

pub use font_metrics::PdfFont;
pub use pagination::{default_page_layout, PageLayout};
pub use sanitize::Sanitizer;

// ────────────────────────────────────────────────────────────────────────────
// Formats and artifacts
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Html,
    Pdf,
}

impl ExportFormat {
    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Html => "text/html; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.name()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(ExportFormat::Html),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(format!("unsupported export format '{other}'")),
        }
    }
}

/// One exported file. Owned outright by whoever requested it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

/// A format-specific rendering failure. Never affects other formats.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{format} export failed: {reason}")]
pub struct ExportError {
    pub format: ExportFormat,
    pub reason: String,
}

impl ExportError {
    pub fn pdf(reason: impl Into<String>) -> Self {
        Self {
            format: ExportFormat::Pdf,
            reason: reason.into(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Exporter
// ────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_DOCUMENT_NAME: &str = "landing_page";

/// Format settings shared by every export call. Holds no per-document state.
#[derive(Debug, Clone)]
pub struct Exporter {
    pub layout: PageLayout,
    pub sanitizer: Sanitizer,
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(default_page_layout(PdfFont::Helvetica))
    }
}

impl Exporter {
    pub fn new(layout: PageLayout) -> Self {
        Self {
            layout,
            sanitizer: Sanitizer::default(),
        }
    }

    /// Renders `document` in one format. Same inputs, same bytes.
    pub fn export(
        &self,
        document: &Document,
        format: ExportFormat,
        document_name: &str,
    ) -> Result<ExportArtifact, ExportError> {
        let bytes = match format {
            ExportFormat::Html => html::render_html(document).into_bytes(),
            ExportFormat::Pdf => pdf::render_pdf(document, &self.layout, &self.sanitizer)?,
        };

        info!(
            "Exported '{}' ({} theme) as {} ({} bytes)",
            document.title(),
            document.theme().name(),
            format,
            bytes.len()
        );

        Ok(ExportArtifact {
            format,
            file_name: format!("{document_name}.{}", format.extension()),
            content_type: format.content_type(),
            bytes: Bytes::from(bytes),
        })
    }

    /// Renders every requested format independently. Duplicate formats are
    /// rendered once; results follow the order of first appearance.
    pub fn export_all(
        &self,
        document: &Document,
        formats: &[ExportFormat],
        document_name: &str,
    ) -> Vec<Result<ExportArtifact, ExportError>> {
        let mut seen = Vec::with_capacity(formats.len());
        for format in formats {
            if !seen.contains(format) {
                seen.push(*format);
            }
        }

        seen.into_iter()
            .map(|format| {
                let result = self.export(document, format, document_name);
                if let Err(e) = &result {
                    warn!("{e}");
                }
                result
            })
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
