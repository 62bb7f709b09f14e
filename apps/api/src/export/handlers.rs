//! Axum route handlers for the Export API.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::export::RenderedDocument;
use crate::models::PolishedResumeData;
use crate::state::AppState;

/// POST /api/v1/export/preview
///
/// Renders the PDF for display in the browser.
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(data): Json<PolishedResumeData>,
) -> Result<RenderedDocument, AppError> {
    Ok(state.exporter.preview(Arc::new(data)).await?)
}

/// POST /api/v1/export/pdf
pub async fn handle_download_pdf(
    State(state): State<AppState>,
    Json(data): Json<PolishedResumeData>,
) -> Result<RenderedDocument, AppError> {
    Ok(state.exporter.download_pdf(Arc::new(data)).await?)
}

/// POST /api/v1/export/docx
pub async fn handle_download_docx(
    State(state): State<AppState>,
    Json(data): Json<PolishedResumeData>,
) -> Result<RenderedDocument, AppError> {
    Ok(state.exporter.download_docx(Arc::new(data)).await?)
}
