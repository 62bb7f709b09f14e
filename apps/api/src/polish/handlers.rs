//! Axum route handler for the Polish API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::{PolishedResumeData, RawResumeData};
use crate::state::AppState;

/// POST /api/v1/resumes/polish
///
/// Sends the raw wizard data to the configured polisher and returns the
/// polished snapshot the export endpoints accept.
pub async fn handle_polish(
    State(state): State<AppState>,
    Json(raw): Json<RawResumeData>,
) -> Result<Json<PolishedResumeData>, AppError> {
    let polished = state.polisher.polish(&raw).await?;
    Ok(Json(polished))
}
