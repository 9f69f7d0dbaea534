//! Axum route handlers for the Pages API.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assembly::blocks::BlockKind;
use crate::assembly::fulfillment::FulfillmentReport;
use crate::assembly::pipeline::{build_page, resolve_document_name, PageRequest};
use crate::assembly::Document;
use crate::errors::AppError;
use crate::export::{ExportArtifact, ExportError, ExportFormat};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BlockInfo {
    pub slug: &'static str,
    pub name: &'static str,
    pub default_prompt: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub document: Document,
    pub fulfillment: FulfillmentReport,
}

#[derive(Debug, Deserialize)]
pub struct BundleRequest {
    #[serde(flatten)]
    pub page: PageRequest,
    #[serde(default = "default_formats")]
    pub formats: Vec<ExportFormat>,
}

fn default_formats() -> Vec<ExportFormat> {
    vec![ExportFormat::Html, ExportFormat::Pdf]
}

#[derive(Debug, Serialize)]
pub struct EncodedArtifact {
    pub format: ExportFormat,
    pub file_name: String,
    pub content_type: &'static str,
    pub size_bytes: usize,
    pub data_base64: String,
}

impl From<&ExportArtifact> for EncodedArtifact {
    fn from(artifact: &ExportArtifact) -> Self {
        Self {
            format: artifact.format,
            file_name: artifact.file_name.clone(),
            content_type: artifact.content_type,
            size_bytes: artifact.bytes.len(),
            data_base64: BASE64.encode(&artifact.bytes),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FormatFailure {
    pub format: ExportFormat,
    pub message: String,
}

impl From<&ExportError> for FormatFailure {
    fn from(err: &ExportError) -> Self {
        Self {
            format: err.format,
            message: err.reason.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BundleResponse {
    pub document_name: String,
    pub fulfillment: FulfillmentReport,
    pub artifacts: Vec<EncodedArtifact>,
    pub errors: Vec<FormatFailure>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/pages/blocks
///
/// Lists the available sections in canonical render order.
pub async fn handle_list_blocks() -> Json<Vec<BlockInfo>> {
    Json(
        BlockKind::CANONICAL
            .iter()
            .map(|kind| BlockInfo {
                slug: kind.slug(),
                name: kind.display_name(),
                default_prompt: kind.default_prompt(),
            })
            .collect(),
    )
}

/// POST /api/v1/pages/preview
///
/// Generates content for the selected sections and returns the assembled
/// document without exporting it.
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(request): Json<PageRequest>,
) -> Result<Json<PreviewResponse>, AppError> {
    let built = build_page(
        state.content_source.as_ref(),
        &request,
        state.config.generation_timeout,
    )
    .await?;

    Ok(Json(PreviewResponse {
        document: built.document,
        fulfillment: built.fulfillment,
    }))
}

/// POST /api/v1/pages/export/:format
///
/// Builds the page and returns a single artifact as a file download.
pub async fn handle_export_format(
    State(state): State<AppState>,
    Path(format): Path<String>,
    Json(request): Json<PageRequest>,
) -> Result<Response, AppError> {
    let format: ExportFormat = format.parse().map_err(AppError::Validation)?;
    let document_name =
        resolve_document_name(request.document_name.as_deref(), &state.config.document_name)?;

    let built = build_page(
        state.content_source.as_ref(),
        &request,
        state.config.generation_timeout,
    )
    .await?;

    let mut results = export_blocking(&state, built.document, vec![format], document_name).await?;
    let artifact = results
        .pop()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("exporter returned no result")))??;

    info!(
        "Serving {} ({} bytes)",
        artifact.file_name,
        artifact.bytes.len()
    );

    let disposition = format!("attachment; filename=\"{}\"", artifact.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response())
}

/// POST /api/v1/pages/export
///
/// Builds the page once and exports every requested format. A failed format
/// is reported in `errors` without hiding the formats that succeeded.
pub async fn handle_export_bundle(
    State(state): State<AppState>,
    Json(request): Json<BundleRequest>,
) -> Result<Json<BundleResponse>, AppError> {
    if request.formats.is_empty() {
        return Err(AppError::Validation(
            "formats cannot be empty".to_string(),
        ));
    }
    let document_name = resolve_document_name(
        request.page.document_name.as_deref(),
        &state.config.document_name,
    )?;

    let built = build_page(
        state.content_source.as_ref(),
        &request.page,
        state.config.generation_timeout,
    )
    .await?;

    let results = export_blocking(
        &state,
        built.document,
        request.formats.clone(),
        document_name.clone(),
    )
    .await?;

    let mut artifacts = Vec::new();
    let mut errors = Vec::new();
    for result in &results {
        match result {
            Ok(artifact) => artifacts.push(EncodedArtifact::from(artifact)),
            Err(e) => errors.push(FormatFailure::from(e)),
        }
    }

    Ok(Json(BundleResponse {
        document_name,
        fulfillment: built.fulfillment,
        artifacts,
        errors,
    }))
}

/// Runs the exporter on the blocking pool; PDF layout is CPU-bound.
async fn export_blocking(
    state: &AppState,
    document: Document,
    formats: Vec<ExportFormat>,
    document_name: String,
) -> Result<Vec<Result<ExportArtifact, ExportError>>, AppError> {
    let exporter = state.exporter.clone();
    tokio::task::spawn_blocking(move || exporter.export_all(&document, &formats, &document_name))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export: {e}")))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
