//! Resume export: one shared section composition, two format projections
//! (PDF and DOCX), and the orchestrator that runs them off the async runtime.

pub mod dates;
pub mod docx;
pub mod handlers;
pub mod pdf;
pub mod sections;
pub mod service;

use thiserror::Error;

pub use docx::DocxExporter;
pub use pdf::PdfExporter;
pub use service::{ExportService, RenderedDocument};

/// Anything that can go wrong while turning polished data into document bytes.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF serialization failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("DOCX packaging failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("DOCX markup failed: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error while writing document: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking render task failed to complete (panic or cancellation).
    #[error("render task failed: {0}")]
    Task(String),
}
