//! Export Orchestrator.
//!
//! Three operations over an immutable `Arc<PolishedResumeData>` snapshot:
//! `preview` (inline PDF), `download_pdf` and `download_docx` (attachments).
//! Rendering is CPU-bound and runs on the blocking pool. A render error or a
//! panic inside the render surfaces as [`ExportError`]; the caller's data is
//! never touched, so the same call can simply be retried.

use std::sync::Arc;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use tracing::{error, info};

use crate::export::sections::resume_file_name;
use crate::export::{DocxExporter, ExportError, PdfExporter};
use crate::models::PolishedResumeData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// Whether the client should display the document or save it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Inline,
    Attachment,
}

/// Finished document bytes plus what the client needs to show or save them.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub format: ExportFormat,
    pub file_name: String,
    pub disposition: Disposition,
    pub bytes: Bytes,
}

impl RenderedDocument {
    /// `Content-Disposition` value. Header values must be visible ASCII, so
    /// anything else in the file name is replaced with `_`.
    pub fn content_disposition(&self) -> String {
        let kind = match self.disposition {
            Disposition::Inline => "inline",
            Disposition::Attachment => "attachment",
        };
        let safe: String = self
            .file_name
            .chars()
            .map(|c| match c {
                '"' | '\\' => '_',
                c if c.is_ascii_graphic() => c,
                _ => '_',
            })
            .collect();
        format!("{kind}; filename=\"{safe}\"")
    }
}

impl IntoResponse for RenderedDocument {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, self.format.content_type().to_string()),
                (header::CONTENT_DISPOSITION, self.content_disposition()),
            ],
            self.bytes,
        )
            .into_response()
    }
}

/// Stateless façade over both exporters; cheap to clone into handlers.
#[derive(Debug, Clone, Default)]
pub struct ExportService {
    pdf: Arc<PdfExporter>,
    docx: Arc<DocxExporter>,
}

impl ExportService {
    /// PDF for on-screen rendering.
    pub async fn preview(
        &self,
        data: Arc<PolishedResumeData>,
    ) -> Result<RenderedDocument, ExportError> {
        self.render(data, ExportFormat::Pdf, Disposition::Inline).await
    }

    pub async fn download_pdf(
        &self,
        data: Arc<PolishedResumeData>,
    ) -> Result<RenderedDocument, ExportError> {
        self.render(data, ExportFormat::Pdf, Disposition::Attachment).await
    }

    pub async fn download_docx(
        &self,
        data: Arc<PolishedResumeData>,
    ) -> Result<RenderedDocument, ExportError> {
        self.render(data, ExportFormat::Docx, Disposition::Attachment).await
    }

    async fn render(
        &self,
        data: Arc<PolishedResumeData>,
        format: ExportFormat,
        disposition: Disposition,
    ) -> Result<RenderedDocument, ExportError> {
        let file_name = resume_file_name(&data.personal_info.full_name, format.extension());
        let pdf = Arc::clone(&self.pdf);
        let docx = Arc::clone(&self.docx);

        run_render(file_name, format, disposition, move || match format {
            ExportFormat::Pdf => pdf.to_bytes(&data),
            ExportFormat::Docx => docx.to_bytes(&data),
        })
        .await
    }
}

/// Runs `job` on the blocking pool. A panicking job surfaces as [`ExportError::Task`].
async fn run_render<F>(
    file_name: String,
    format: ExportFormat,
    disposition: Disposition,
    job: F,
) -> Result<RenderedDocument, ExportError>
where
    F: FnOnce() -> Result<Vec<u8>, ExportError> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| ExportError::Task(e.to_string()))
        .and_then(|rendered| rendered);

    match result {
        Ok(bytes) => {
            info!(
                file_name = %file_name,
                format = format.extension(),
                size = bytes.len(),
                "document rendered"
            );
            Ok(RenderedDocument {
                format,
                file_name,
                disposition,
                bytes: Bytes::from(bytes),
            })
        }
        Err(e) => {
            error!(file_name = %file_name, format = format.extension(), "render failed: {e}");
            Err(e)
        }
    }
}
