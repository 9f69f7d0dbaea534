//! Page build pipeline: request → validated styling → fulfilled blocks → Document.
//!
//! Flow: validate inputs → validate_styling (fail fast) → blocks_for_selection →
//!       fulfill_blocks (concurrent LLM calls) → assemble.
//!
//! Styling is validated before any generation call so an invalid theme or color
//! never costs a round-trip to the content source.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::assembly::blocks::{blocks_for_selection, BlockKind};
use crate::assembly::fulfillment::{fulfill_blocks, ContentSource, FulfillmentReport};
use crate::assembly::theme::PaletteInput;
use crate::assembly::{assemble, validate_styling, Document};
use crate::errors::AppError;

// ────────────────────────────────────────────────────────────────────────────
// Request model
// ────────────────────────────────────────────────────────────────────────────

/// Everything a caller supplies to build one landing page.
#[derive(Debug, Clone, Deserialize)]
pub struct PageRequest {
    pub title: String,
    pub description: String,
    pub theme: String,
    #[serde(default)]
    pub palette: PaletteInput,
    /// Block slugs or display names, in any order. Omitted means About Us
    /// and Features; an explicit empty list selects nothing.
    #[serde(default = "default_sections")]
    pub sections: Vec<String>,
    /// Per-block prompt keyed by slug or display name. Missing entries fall
    /// back to the block's default prompt.
    #[serde(default)]
    pub prompts: HashMap<String, String>,
    /// Base file name for exported artifacts (no extension).
    pub document_name: Option<String>,
}

fn default_sections() -> Vec<String> {
    [BlockKind::AboutUs, BlockKind::Features]
        .iter()
        .map(|kind| kind.display_name().to_string())
        .collect()
}

/// A document together with how its blocks were obtained.
#[derive(Debug, Clone)]
pub struct BuiltPage {
    pub document: Document,
    pub fulfillment: FulfillmentReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full build pipeline for one request.
pub async fn build_page(
    source: &dyn ContentSource,
    request: &PageRequest,
    generation_timeout: Duration,
) -> Result<BuiltPage, AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    if request.description.trim().is_empty() {
        return Err(AppError::Validation(
            "description cannot be empty".to_string(),
        ));
    }

    // Fail fast on styling before spending generation calls.
    validate_styling(&request.theme, &request.palette)?;

    let selection = parse_sections(&request.sections)?;
    let prompts = parse_prompts(&request.prompts)?;

    info!(
        "Building page '{}' with {} selected section(s)",
        request.title,
        selection.len()
    );

    let blocks = blocks_for_selection(&selection, |kind| prompts.get(&kind).cloned());
    let (blocks, fulfillment) = fulfill_blocks(source, blocks, generation_timeout).await;

    let document = assemble(
        &request.title,
        &request.description,
        &request.theme,
        &request.palette,
        blocks,
    )?;

    Ok(BuiltPage {
        document,
        fulfillment,
    })
}

/// Resolves the requested document name, falling back to `default_name`.
///
/// Names become file names, so only ASCII letters, digits, `-` and `_` are allowed.
pub fn resolve_document_name(
    requested: Option<&str>,
    default_name: &str,
) -> Result<String, AppError> {
    let name = requested.map(str::trim).unwrap_or(default_name);
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(AppError::Validation(format!(
            "document_name '{name}' must be non-empty and contain only letters, digits, '-' or '_'"
        )));
    }
    Ok(name.to_string())
}

fn parse_sections(sections: &[String]) -> Result<Vec<BlockKind>, AppError> {
    sections
        .iter()
        .map(|s| {
            s.parse::<BlockKind>()
                .map_err(|e| AppError::Validation(e.to_string()))
        })
        .collect()
}

fn parse_prompts(prompts: &HashMap<String, String>) -> Result<HashMap<BlockKind, String>, AppError> {
    prompts
        .iter()
        .map(|(key, prompt)| {
            key.parse::<BlockKind>()
                .map(|kind| (kind, prompt.clone()))
                .map_err(|e| AppError::Validation(format!("prompts: {e}")))
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
