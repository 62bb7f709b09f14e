use std::sync::Arc;

use crate::config::Config;
use crate::export::ExportService;
use crate::polish::ResumePolisher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub exporter: ExportService,
    /// `LlmPolisher` when an API key is configured, `UnconfiguredPolisher` otherwise.
    pub polisher: Arc<dyn ResumePolisher>,
}
