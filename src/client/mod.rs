//! Typed client for the `/generate` boundary endpoint.
//!
//! This is the transport the UI session drives: it shapes request payloads,
//! maps the endpoint's status-code contract back onto the error taxonomy, and
//! runs the response decoder so callers receive typed results, never raw
//! JSON strings.

use crate::error::{Result, ServiceError};
use crate::models::api::{
    ChatTurnRequest, GenerateRequest, GenerateResponse, GenerationResult, Mode,
};
use crate::session::TurnTransport;
use crate::translation;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| ServiceError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// POST a payload to `/generate` and return the raw reply text.
    async fn call(&self, payload: &GenerateRequest) -> Result<String> {
        let response = self
            .http
            .post(format!("{}/generate", self.base_url))
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ServiceError::UpstreamTimeout(e.to_string())
                } else {
                    ServiceError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| format!("API error: {}", status));

            return Err(match status.as_u16() {
                413 => ServiceError::PayloadTooLarge("File too large (Max 4.5MB)".to_string()),
                504 => ServiceError::UpstreamTimeout(detail),
                400 => ServiceError::InvalidRequest(detail),
                _ => ServiceError::Upstream(detail),
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Upstream(format!("Malformed response body: {}", e)))?;

        Ok(body.text)
    }

    /// Generate study material and decode it into a typed result.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerationResult> {
        request.validate()?;
        let text = self.call(request).await?;
        translation::decode(request.mode, &text)
    }
}

#[async_trait]
impl TurnTransport for ApiClient {
    /// Replay the transcript and document context as a CHAT-mode request.
    /// Everything is re-sent each call because the endpoint is stateless.
    async fn send_chat_turn(&self, turn: ChatTurnRequest) -> Result<String> {
        let payload = GenerateRequest {
            mode: Mode::Chat,
            language: turn.language,
            text_input: turn.context.text_input,
            file_data: turn.context.file_data,
            additional_context: turn.context.additional_context,
            history: Some(turn.prior_transcript),
            message: Some(turn.new_message),
        };
        self.call(&payload).await
    }
}
