//! Axum-based HTTP server for the studygenius gateway.
//!
//! Exposes the stateless generation endpoint plus health and metrics probes.
//! Chat state never lives here: every CHAT request carries its full history
//! and is rebuilt into a transient conversation per call.
//!
//! # Components
//!
//! - `handlers`: the `/generate`, `/health`, and `/metrics` endpoints.
//! - `routes`: router configuration, shared state, and the tower layers.

mod handlers;
mod routes;

pub use routes::{create_router, AppState};
