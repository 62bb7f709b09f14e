//! LLM Client: the only code in folio that talks to the Anthropic Messages API.
//!
//! One operation matters to folio: send a prompt, get back a JSON document.
//! Transport failures, 429 and 5xx are retried with backoff; anything the
//! model actually said is decoded once and never retried.

use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const MAX_ATTEMPTS: u32 = 3;
const BASE_BACKOFF_MS: u64 = 1000;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [UserMessage<'a>; 1],
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesReply {
    content: Vec<ReplyBlock>,
}

#[derive(Deserialize)]
struct ReplyBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorReply {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// What one HTTP round trip amounted to.
enum Attempt {
    Retry(LlmError),
    Done(Result<String, LlmError>),
}

#[derive(Clone)]
pub struct LlmClient {
    http: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, api_key })
    }

    /// Sends `prompt` and deserializes the model's text reply as JSON.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<T, LlmError> {
        let text = self.complete(prompt, system).await?;
        parse_json_reply(&text)
    }

    /// Text of the model's reply, retrying transient failures.
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let request = MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: [UserMessage { role: "user", content: prompt }],
        };

        let mut attempt = 1;
        loop {
            let err = match self.send(&request).await {
                Attempt::Done(result) => return result,
                Attempt::Retry(err) => err,
            };
            if attempt == MAX_ATTEMPTS {
                return Err(err);
            }
            let delay = Duration::from_millis(BASE_BACKOFF_MS << (attempt - 1));
            warn!(attempt, delay_ms = delay.as_millis() as u64, "LLM call failed, retrying: {err}");
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn send(&self, request: &MessagesRequest<'_>) -> Attempt {
        let response = match self
            .http
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Attempt::Retry(e.into()),
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => classify(status, &body),
            Err(e) => Attempt::Retry(e.into()),
        }
    }
}

/// Sorts a finished response into retry, failure or decoded reply text.
fn classify(status: u16, body: &str) -> Attempt {
    match status {
        200..=299 => Attempt::Done(reply_text(body)),
        429 | 500..=599 => Attempt::Retry(api_error(status, body)),
        _ => Attempt::Done(Err(api_error(status, body))),
    }
}

fn api_error(status: u16, body: &str) -> LlmError {
    let message = serde_json::from_str::<ErrorReply>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string());
    LlmError::Api { status, message }
}

/// First text block of a successful Messages reply.
fn reply_text(body: &str) -> Result<String, LlmError> {
    let reply: MessagesReply = serde_json::from_str(body)?;
    let text = reply
        .content
        .into_iter()
        .find(|block| block.kind == "text")
        .and_then(|block| block.text)
        .ok_or(LlmError::EmptyContent)?;
    debug!(chars = text.len(), "LLM reply received");
    Ok(text)
}

/// Parses a model reply, tolerating Markdown code fences around the JSON.
pub fn parse_json_reply<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    let text = strip_json_fences(text);
    if text.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    Ok(serde_json::from_str(text)?)
}

/// Strips ```json ... ``` or ``` ... ``` code fences.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(stripped) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };
    let stripped = stripped.trim();
    stripped.strip_suffix("```").unwrap_or(stripped).trim()
}
