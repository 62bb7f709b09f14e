use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;
use crate::polish::PolishError;

/// Message shown for any failed render. The request can simply be repeated.
pub const EXPORT_FAILED_MESSAGE: &str = "Error generating document";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Polish error: {0}")]
    Polish(#[from] PolishError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Export(e) => {
                tracing::error!("Export error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    EXPORT_FAILED_MESSAGE.to_string(),
                )
            }
            AppError::Polish(e) => {
                let status = match e {
                    PolishError::InvalidInput => StatusCode::BAD_REQUEST,
                    PolishError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
                    PolishError::Network(_) | PolishError::Parse(_) | PolishError::Server(_) => {
                        StatusCode::BAD_GATEWAY
                    }
                };
                if status.is_server_error() {
                    tracing::error!("Polish error: {e}");
                }
                (status, e.code(), e.hint().to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
