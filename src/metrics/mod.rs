// Metrics module for Prometheus observability

mod registry;

pub use registry::{
    gather_metrics, DECODE_FAILURES, GEMINI_API_CALLS, GEMINI_API_DURATION, REQUESTS_TOTAL,
    REQUEST_DURATION,
};

use crate::models::api::{Language, Mode};

/// Record one `/generate` request and its duration.
pub fn record_request(mode: Mode, language: Language, status: &str, duration_secs: f64) {
    REQUESTS_TOTAL
        .with_label_values(&[mode.as_str(), language.code(), status])
        .inc();

    REQUEST_DURATION
        .with_label_values(&[mode.as_str()])
        .observe(duration_secs);
}

/// Record one upstream Gemini call.
pub fn record_gemini_call(model: &str, status_code: u16, duration_secs: f64) {
    GEMINI_API_CALLS
        .with_label_values(&[&status_code.to_string()])
        .inc();

    GEMINI_API_DURATION
        .with_label_values(&[model])
        .observe(duration_secs);
}

/// Record a structured-output reply that failed validation.
pub fn record_decode_failure(mode: Mode) {
    DECODE_FAILURES.with_label_values(&[mode.as_str()]).inc();
}
