// Gemini generateContent client (API-key auth)

use crate::config::GeminiConfig;
use crate::error::{Result, ServiceError};
use crate::metrics;
use crate::models::gemini::{GenerateContentRequest, GenerateContentResponse};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error};

/// Environment variable holding the model-provider credential. Required; the
/// client refuses to construct without it, so no request is ever attempted
/// unauthenticated.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Client for the Google Generative Language API.
///
/// One instance per process, configured once from the environment at startup
/// and shared behind the router state. Sends blocking (non-streaming)
/// `generateContent` requests; retry policy, if any, belongs to the caller.
pub struct GeminiClient {
    http_client: Client,
    config: GeminiConfig,
    api_key: String,
}

impl GeminiClient {
    /// Create a client, reading the credential from the process environment.
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ServiceError::Config(format!("{} missing from environment", API_KEY_ENV))
            })?;
        Self::with_api_key(config, api_key)
    }

    /// Create a client with an explicit credential.
    pub fn with_api_key(config: &GeminiConfig, api_key: String) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .map_err(|e| ServiceError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            config: config.clone(),
            api_key,
        })
    }

    /// The configured model ID.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Call Gemini `generateContent` (blocking, one request per turn).
    ///
    /// Failures are surfaced as distinct kinds, never retried here: transport
    /// timeout, network failure, non-success upstream status, and
    /// malformed/empty response body.
    pub async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base_url, self.config.model
        );
        debug!("Calling generateContent for model: {}", self.config.model);

        let started = Instant::now();
        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| classify_send_error(&e))?;

        let status = response.status();
        metrics::record_gemini_call(
            &self.config.model,
            status.as_u16(),
            started.elapsed().as_secs_f64(),
        );

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "Gemini API error: HTTP {} - {}",
                status,
                crate::utils::logging::sanitize(&error_text)
            );
            return Err(match status.as_u16() {
                413 => ServiceError::PayloadTooLarge(
                    "attachment rejected by the model provider".to_string(),
                ),
                _ => ServiceError::Upstream(format!("HTTP {}: {}", status, error_text)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ServiceError::Upstream(format!("Failed to read response body: {}", e)))?;

        if response_text.trim().is_empty() {
            return Err(ServiceError::Upstream("empty response body".to_string()));
        }

        serde_json::from_str(&response_text).map_err(|e| {
            error!("Failed to parse Gemini response: {}", e);
            ServiceError::Upstream(format!("Response parsing error: {}", e))
        })
    }

    /// Call `generateContent` and extract the reply text.
    ///
    /// A successful HTTP exchange with no text candidate is still an upstream
    /// failure; callers always get either text or an error.
    pub async fn generate_text(&self, request: GenerateContentRequest) -> Result<String> {
        let response = self.generate_content(request).await?;
        response
            .primary_text()
            .map(str::to_string)
            .ok_or_else(|| ServiceError::Upstream("no text in Gemini response".to_string()))
    }
}

/// Map reqwest send failures onto the error taxonomy: expiry of the transport
/// timeout is its own kind, everything else is a transport failure.
fn classify_send_error(e: &reqwest::Error) -> ServiceError {
    if e.is_timeout() {
        ServiceError::UpstreamTimeout(e.to_string())
    } else {
        ServiceError::Transport(e.to_string())
    }
}
