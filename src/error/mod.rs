// Error types for the studygenius gateway

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Upstream timeout: {0}")]
    UpstreamTimeout(String),

    #[error("Gemini API error: {0}")]
    Upstream(String),

    #[error("Response decoding failed: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),
}

impl ServiceError {
    /// Stable machine-readable tag for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Config(_) | ServiceError::ConfigParsing(_) => "configuration_error",
            ServiceError::InvalidRequest(_) => "validation_error",
            ServiceError::PayloadTooLarge(_) => "payload_too_large",
            ServiceError::Transport(_) => "transport_error",
            ServiceError::UpstreamTimeout(_) => "upstream_timeout",
            ServiceError::Upstream(_) => "upstream_error",
            ServiceError::Parse(_) => "parse_error",
            ServiceError::Io(_) | ServiceError::Json(_) => "internal_error",
        }
    }
}

// Convert ServiceError to HTTP responses for Axum.
//
// Status contract: 400 caller's fault, 413 oversized attachment, 504 upstream
// timeout, 500 for missing credential / upstream model error / undecodable
// model output. Upstream and Parse details stay in the server log; the client
// gets a generic message.
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServiceError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ServiceError::PayloadTooLarge(_) => {
                (StatusCode::PAYLOAD_TOO_LARGE, self.to_string())
            }
            ServiceError::Transport(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
            ServiceError::UpstreamTimeout(_) => (
                StatusCode::GATEWAY_TIMEOUT,
                "The AI took too long to respond.".to_string(),
            ),
            ServiceError::Config(_) | ServiceError::ConfigParsing(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            ServiceError::Upstream(detail) => {
                tracing::error!("Upstream failure: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The AI service failed to generate a response.".to_string(),
                )
            }
            ServiceError::Parse(detail) => {
                tracing::error!("Undecodable model output: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The AI returned an invalid response.".to_string(),
                )
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = json!({ "error": message });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
