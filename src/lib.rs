// studygenius - Stateless study-material generation gateway for the Gemini API

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod gemini;
pub mod locale;
pub mod metrics;
pub mod models;
pub mod server;
pub mod session;
pub mod translation;
pub mod utils;
