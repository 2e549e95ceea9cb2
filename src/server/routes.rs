// HTTP routes configuration

use super::handlers::{generate_handler, health_handler, metrics_handler};
use crate::config::AppConfig;
use crate::error::Result;
use crate::gemini::GeminiClient;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub gemini_client: Arc<GeminiClient>,
}

pub fn create_router(config: AppConfig, gemini_client: GeminiClient) -> Result<Router> {
    // Oversized uploads bounce with 413 before any model call.
    let max_body_bytes = config.server.max_body_bytes;

    let state = AppState {
        config,
        gemini_client: Arc::new(gemini_client),
    };

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/generate", post(generate_handler))
        .route("/metrics", get(metrics_handler))
        .layer(tower_http::limit::RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state);

    Ok(app)
}
