// src/services/completion.rs
//! Outbound call to an OpenAI-compatible `/chat/completions` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, instrument, warn};

use crate::config::Settings;

pub const COMPLETION_TIMEOUT: Duration = Duration::from_secs(60);
const REFERER: &str = "http://localhost:3000";
const APP_TITLE: &str = "TMAS AI Tutor";

/// Every way the remote model can be unusable. Callers recover from all of them.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("no API key configured")]
    MissingCredential,

    #[error("completion endpoint returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("unexpected completion response: {0}")]
    MalformedResponse(String),

    #[error("completion request timed out")]
    Timeout,

    #[error("completion transport error: {0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for CompletionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(e)
        }
    }
}

/// Something that turns prompts into model text.
#[async_trait]
pub trait Completion: Send + Sync {
    /// One round-trip. `system_prompt` of `None` sends only the user message.
    async fn complete(
        &self,
        system_prompt: Option<&str>,
        user_message: &str,
    ) -> Result<String, CompletionError>;
}

#[derive(Clone, Debug)]
pub struct CompletionClient {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl CompletionClient {
    pub fn new(settings: &Settings) -> Result<Self, CompletionError> {
        Self::with_timeout(settings, COMPLETION_TIMEOUT)
    }

    pub fn with_timeout(settings: &Settings, timeout: Duration) -> Result<Self, CompletionError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CompletionError::Transport)?;

        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", settings.base_url),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Completion for CompletionClient {
    #[instrument(skip_all, fields(model = %self.model))]
    async fn complete(
        &self,
        system_prompt: Option<&str>,
        user_message: &str,
    ) -> Result<String, CompletionError> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("no API key configured, skipping completion call");
            return Err(CompletionError::MissingCredential);
        };

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system_prompt {
            messages.push(WireMessage { role: "system", content: system });
        }
        messages.push(WireMessage { role: "user", content: user_message });

        let payload = ChatCompletionRequest {
            model: &self.model,
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!(
            endpoint = %self.endpoint,
            system_len = system_prompt.map_or(0, str::len),
            user_len = user_message.len(),
            "sending completion request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .header("HTTP-Referer", REFERER)
            .header("X-Title", APP_TITLE)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, timeout = e.is_timeout(), "completion request failed");
                CompletionError::from(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %body, "completion endpoint returned an error");
            return Err(CompletionError::Status { status, body });
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                CompletionError::Timeout
            } else {
                warn!(error = %e, "completion body is not the expected JSON");
                CompletionError::MalformedResponse(e.to_string())
            }
        })?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .ok_or_else(|| {
                warn!("completion response has no choices");
                CompletionError::MalformedResponse("missing choices[0].message.content".into())
            })?;

        debug!(response_len = text.len(), "completion received");
        Ok(text)
    }
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
