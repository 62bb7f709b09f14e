pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::export::handlers as export;
use crate::polish::handlers as polish;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Polish API
        .route("/api/v1/resumes/polish", post(polish::handle_polish))
        // Export API
        .route("/api/v1/export/preview", post(export::handle_preview))
        .route("/api/v1/export/pdf", post(export::handle_download_pdf))
        .route("/api/v1/export/docx", post(export::handle_download_docx))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::export::ExportService;
    use crate::models::resume::fixtures::sample_resume;
    use crate::models::{PolishedResumeData, RawResumeData};
    use crate::polish::{validate_raw, PolishError, ResumePolisher};

    /// Echoes a fixed polished resume after the usual validation.
    struct FixedPolisher;

    #[async_trait]
    impl ResumePolisher for FixedPolisher {
        async fn polish(&self, raw: &RawResumeData) -> Result<PolishedResumeData, PolishError> {
            validate_raw(raw)?;
            Ok(sample_resume())
        }
    }

    fn test_router() -> Router {
        build_router(AppState {
            config: Config {
                anthropic_api_key: None,
                port: 0,
                rust_log: "info".to_string(),
                cors_permissive: true,
            },
            exporter: ExportService::default(),
            polisher: Arc::new(FixedPolisher),
        })
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn sample_json() -> Value {
        serde_json::to_value(sample_resume()).unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(json["service"], "folio");
        assert_eq!(json["polishConfigured"], false);
    }

    #[tokio::test]
    async fn test_preview_returns_inline_pdf() {
        let response = test_router()
            .oneshot(post_json("/api/v1/export/preview", &sample_json()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert!(response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .starts_with("inline"));
        assert!(body_bytes(response).await.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_pdf_download_is_attachment_with_file_name() {
        let response = test_router()
            .oneshot(post_json("/api/v1/export/pdf", &sample_json()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Jane_Q._Public_Resume.pdf\""
        );
    }

    #[tokio::test]
    async fn test_docx_download() {
        let response = test_router()
            .oneshot(post_json("/api/v1/export/docx", &sample_json()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert!(body_bytes(response).await.starts_with(b"PK"));
    }

    #[tokio::test]
    async fn test_export_accepts_payload_without_full_name() {
        let body = serde_json::json!({ "personalInfo": { "email": "x@y.z" } });
        let response = test_router()
            .oneshot(post_json("/api/v1/export/pdf", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"_Resume.pdf\""
        );
    }

    #[tokio::test]
    async fn test_polish_returns_polished_data() {
        let body = serde_json::json!({
            "personalInfo": { "fullName": "Jane Q. Public" },
            "experiences": []
        });
        let response = test_router()
            .oneshot(post_json("/api/v1/resumes/polish", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(json["personalInfo"]["fullName"], "Jane Q. Public");
    }

    #[tokio::test]
    async fn test_polish_rejects_missing_sections() {
        let body = serde_json::json!({ "personalInfo": { "fullName": "Jane" } });
        let response = test_router()
            .oneshot(post_json("/api/v1/resumes/polish", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(json["error"]["code"], "INVALID_RESUME_DATA");
        assert_eq!(json["error"]["message"], "Invalid resume data");
    }
}
