//! Configuration data structures for the studygenius gateway.
//!
//! The Gemini API key is deliberately absent from these structs: it is a
//! secret read straight from the process environment at client construction
//! and never serialized, logged, or echoed back.

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port, body limit).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8080`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum accepted request body size in bytes. Sized for a ~4.5 MB
    /// attachment after base64 inflation plus JSON overhead.
    /// Default: `8388608` (8 MB)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Settings for the upstream Gemini API connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Base URL for the Generative Language API.
    /// Default: `https://generativelanguage.googleapis.com`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// The Gemini model used for every generation task.
    /// Default: `gemini-2.5-flash`
    #[serde(default = "default_model")]
    pub model: String,

    /// Connection and request timeout in seconds. Timeout expiry surfaces to
    /// callers as its own failure kind.
    /// Default: `120`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default trait implementations linking to custom logic

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            model: default_model(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Helper functions for serde defaults and shared constants

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    8 * 1024 * 1024
}

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
