//! Structured logging and credential redaction.
//!
//! Configures the `tracing` ecosystem and provides a sanitizer so the Gemini
//! API key can never leak into log sinks through upstream error bodies or
//! echoed URLs.

use crate::config::LoggingConfig;
use crate::error::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports two output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `pretty` (default): Human-readable, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

/// Replaces Google API key material in a string with a placeholder.
///
/// Covers the two ways a key can surface: the literal `AIza…` token (Google
/// API keys share that prefix) and `key=` URL query parameters.
pub fn sanitize(input: &str) -> String {
    let mut result = input.to_string();

    // Pattern 1: raw Google API keys ("AIza" prefix)
    while let Some(pos) = result.find("AIza") {
        let start = pos;
        let end = result[start..]
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
            .map(|i| start + i)
            .unwrap_or(result.len());
        result.replace_range(start..end, "[REDACTED_API_KEY]");
    }

    // Pattern 2: key= query parameters
    if let Some(pos) = result.find("key=") {
        let start = pos + "key=".len();
        let end = result[start..]
            .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
            .map(|i| start + i)
            .unwrap_or(result.len());
        if start < end {
            result.replace_range(start..end, "[REDACTED_API_KEY]");
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_raw_key() {
        let input = "header x-goog-api-key: AIzaSyB0gUs3rK3yF0rT3st1ngPurp0ses0nly12 sent";
        let output = sanitize(input);
        assert!(output.contains("[REDACTED_API_KEY]"));
        assert!(!output.contains("AIzaSy"));
    }

    #[test]
    fn test_sanitize_query_param() {
        let input = "GET /v1beta/models?key=secret123&alt=json";
        let output = sanitize(input);
        assert!(output.contains("key=[REDACTED_API_KEY]"));
        assert!(!output.contains("secret123"));
    }

    #[test]
    fn test_sanitize_leaves_clean_input_alone() {
        let input = "Gemini API error: HTTP 500 - internal";
        assert_eq!(sanitize(input), input);
    }
}
