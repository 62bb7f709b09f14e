//! Upstream AI polishing: raw wizard input in, `PolishedResumeData` out.
//!
//! The exporters never call this; it only produces the snapshot they consume.
//! Failures are categorised (network, parse, server) so the client can give an
//! actionable hint. Nothing here retries on a bad reply.

pub mod handlers;
pub mod prompts;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::{LlmClient, LlmError};
use crate::models::{PolishedResumeData, RawResumeData};
use crate::polish::prompts::{build_polish_prompt, POLISH_SYSTEM};

pub const INVALID_RESUME_DATA: &str = "Invalid resume data";

#[derive(Debug, Error)]
pub enum PolishError {
    #[error("Invalid resume data")]
    InvalidInput,

    #[error("AI polishing is not configured (ANTHROPIC_API_KEY is not set)")]
    NotConfigured,

    #[error("could not reach the AI service: {0}")]
    Network(String),

    #[error("the AI service returned an unreadable response: {0}")]
    Parse(String),

    #[error("the AI service reported an error: {0}")]
    Server(String),
}

impl PolishError {
    /// Stable machine-readable code for the error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            PolishError::InvalidInput => "INVALID_RESUME_DATA",
            PolishError::NotConfigured => "POLISH_NOT_CONFIGURED",
            PolishError::Network(_) => "POLISH_NETWORK_ERROR",
            PolishError::Parse(_) => "POLISH_PARSE_ERROR",
            PolishError::Server(_) => "POLISH_SERVER_ERROR",
        }
    }

    /// What the user can do about it.
    pub fn hint(&self) -> &'static str {
        match self {
            PolishError::InvalidInput => INVALID_RESUME_DATA,
            PolishError::NotConfigured => {
                "The AI service is not configured on this server. Contact the administrator."
            }
            PolishError::Network(_) => {
                "Could not reach the AI service. Check your connection and try again."
            }
            PolishError::Parse(_) => {
                "The AI service returned an invalid response. Please try again."
            }
            PolishError::Server(_) => "The AI service is unavailable right now. Please try again later.",
        }
    }
}

impl From<LlmError> for PolishError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Http(e) => PolishError::Network(e.to_string()),
            LlmError::Parse(e) => PolishError::Parse(e.to_string()),
            LlmError::EmptyContent => PolishError::Parse("empty response".to_string()),
            e @ LlmError::Api { .. } => PolishError::Server(e.to_string()),
        }
    }
}

/// Rejects requests missing personal info or the experiences list.
pub fn validate_raw(raw: &RawResumeData) -> Result<(), PolishError> {
    if raw.personal_info.is_none() || raw.experiences.is_none() {
        return Err(PolishError::InvalidInput);
    }
    Ok(())
}

#[async_trait]
pub trait ResumePolisher: Send + Sync {
    async fn polish(&self, raw: &RawResumeData) -> Result<PolishedResumeData, PolishError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmPolisher
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmPolisher(pub LlmClient);

#[async_trait]
impl ResumePolisher for LlmPolisher {
    async fn polish(&self, raw: &RawResumeData) -> Result<PolishedResumeData, PolishError> {
        validate_raw(raw)?;

        let resume_json =
            serde_json::to_string_pretty(raw).map_err(|e| PolishError::Parse(e.to_string()))?;
        let prompt = build_polish_prompt(&resume_json);

        let polished: PolishedResumeData = self
            .0
            .call_json(&prompt, POLISH_SYSTEM)
            .await
            .map_err(|e| {
                warn!("resume polishing failed: {e}");
                PolishError::from(e)
            })?;

        info!(
            experiences = polished.experiences.len(),
            "resume polished"
        );
        Ok(polished)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// UnconfiguredPolisher
// ────────────────────────────────────────────────────────────────────────────

/// Used when no API key is configured: validates, then reports `NotConfigured`.
pub struct UnconfiguredPolisher;

#[async_trait]
impl ResumePolisher for UnconfiguredPolisher {
    async fn polish(&self, raw: &RawResumeData) -> Result<PolishedResumeData, PolishError> {
        validate_raw(raw)?;
        Err(PolishError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::parse_json_reply;
    use crate::models::PersonalInfo;

    fn raw_with(personal: bool, experiences: bool) -> RawResumeData {
        RawResumeData {
            personal_info: personal.then(PersonalInfo::default),
            experiences: experiences.then(Vec::new),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_requires_personal_info_and_experiences() {
        assert!(validate_raw(&raw_with(true, true)).is_ok());
        for raw in [raw_with(false, true), raw_with(true, false), raw_with(false, false)] {
            let err = validate_raw(&raw).unwrap_err();
            assert!(matches!(err, PolishError::InvalidInput));
            assert_eq!(err.to_string(), "Invalid resume data");
        }
    }

    #[test]
    fn test_llm_errors_map_to_categories() {
        let parse = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        assert!(matches!(PolishError::from(LlmError::Parse(parse)), PolishError::Parse(_)));
        assert!(matches!(PolishError::from(LlmError::EmptyContent), PolishError::Parse(_)));
        assert!(matches!(
            PolishError::from(LlmError::Api { status: 500, message: "boom".into() }),
            PolishError::Server(_)
        ));
    }

    #[test]
    fn test_unreadable_ok_body_is_parse_category() {
        let err = serde_json::from_str::<serde_json::Value>("<html>not json</html>").unwrap_err();
        let polish = PolishError::from(LlmError::Parse(err));
        assert_eq!(polish.code(), "POLISH_PARSE_ERROR");
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            PolishError::InvalidInput,
            PolishError::NotConfigured,
            PolishError::Network(String::new()),
            PolishError::Parse(String::new()),
            PolishError::Server(String::new()),
        ];
        let codes: std::collections::HashSet<&str> = errors.iter().map(PolishError::code).collect();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_fenced_model_reply_parses_into_polished_data() {
        let reply = "```json\n{\"personalInfo\":{\"fullName\":\"Ada\",\"summary\":\"Engineer.\"},\
                     \"experiences\":[{\"id\":\"1\",\"type\":\"project\",\"bulletPoints\":[\"Built X\"]}]}\n```";
        let polished: PolishedResumeData = parse_json_reply(reply).unwrap();
        assert_eq!(polished.personal_info.full_name, "Ada");
        assert_eq!(polished.experiences[0].bullet_points, vec!["Built X"]);
    }

    #[tokio::test]
    async fn test_unconfigured_polisher_validates_first() {
        let err = UnconfiguredPolisher.polish(&raw_with(false, true)).await.unwrap_err();
        assert!(matches!(err, PolishError::InvalidInput));

        let err = UnconfiguredPolisher.polish(&raw_with(true, true)).await.unwrap_err();
        assert!(matches!(err, PolishError::NotConfigured));
    }

    #[test]
    fn test_prompt_embeds_resume_json() {
        let prompt = build_polish_prompt("{\"x\":1}");
        assert!(prompt.contains("{\"x\":1}"));
        assert!(!prompt.contains("{resume_json}"));
    }
}
