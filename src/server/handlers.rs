// HTTP request handlers

use super::routes::AppState;
use crate::error::ServiceError;
use crate::gemini::API_KEY_ENV;
use crate::metrics;
use crate::models::api::{DocumentContext, GenerateRequest, GenerateResponse, Mode};
use crate::translation;
use axum::http::header;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    // Credential presence. The key itself is never echoed.
    let credential_check = if std::env::var(API_KEY_ENV).map_or(true, |k| k.trim().is_empty()) {
        overall_status = HealthStatus::Unhealthy;
        HealthCheck {
            status: "error".to_string(),
            message: format!("{} missing from environment", API_KEY_ENV),
        }
    } else {
        HealthCheck {
            status: "ok".to_string(),
            message: "API key configured".to_string(),
        }
    };
    checks.insert("credential".to_string(), credential_check);

    let config_check = HealthCheck {
        status: "ok".to_string(),
        message: format!(
            "Model: {}, API base: {}",
            state.gemini_client.model(),
            state.config.gemini.api_base_url
        ),
    };
    checks.insert("configuration".to_string(), config_check);

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Handler for the `/generate` endpoint.
///
/// One request, one model call, one full response; CHAT requests rebuild a
/// transient conversation from the replayed history.
pub async fn generate_handler(
    State(state): State<AppState>,
    body: String, // Raw JSON so deserialization failures can be logged with detail
) -> Result<Response, ServiceError> {
    let req: GenerateRequest = serde_json::from_str(&body).map_err(|e| {
        debug!(
            "Undeserializable request body (first 500 chars): {}",
            body.chars().take(500).collect::<String>()
        );
        ServiceError::InvalidRequest(format!("JSON deserialization error: {}", e))
    })?;

    info!(
        "Received generate request: mode={}, language={}, attachment={}",
        req.mode.as_str(),
        req.language.code(),
        req.file_data.is_some()
    );

    let started = Instant::now();
    let result = handle_request(&state, &req).await;

    let status = match &result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    metrics::record_request(
        req.mode,
        req.language,
        status,
        started.elapsed().as_secs_f64(),
    );

    let text = result?;
    Ok(Json(GenerateResponse { text }).into_response())
}

async fn handle_request(
    state: &AppState,
    req: &GenerateRequest,
) -> Result<String, ServiceError> {
    req.validate()?;

    match req.mode {
        Mode::Chat => chat_turn(state, req).await,
        _ => generate_material(state, req).await,
    }
}

async fn generate_material(
    state: &AppState,
    req: &GenerateRequest,
) -> Result<String, ServiceError> {
    let gemini_req = translation::build_generation_request(req)?;
    let text = state.gemini_client.generate_text(gemini_req).await?;

    // Structured modes are validated before the reply leaves the server, so a
    // reply that would not decode never reaches the UI or its cache.
    if req.mode.expects_json() {
        if let Err(err) = translation::decode(req.mode, &text) {
            metrics::record_decode_failure(req.mode);
            return Err(err);
        }
    }

    Ok(text)
}

async fn chat_turn(state: &AppState, req: &GenerateRequest) -> Result<String, ServiceError> {
    let history = req.history.clone().unwrap_or_default();
    let message = req.message.as_deref().unwrap_or_default();
    let context = DocumentContext {
        text_input: req.text_input.clone(),
        file_data: req.file_data.clone(),
        additional_context: req.additional_context.clone(),
    };

    debug!("Rebuilding chat with {} prior messages", history.len());

    let gemini_req = translation::build_chat_request(&history, message, &context, req.language);
    state.gemini_client.generate_text(gemini_req).await
}

/// Prometheus text exposition.
pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics::gather_metrics(),
    )
}
