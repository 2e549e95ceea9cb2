// Prometheus metrics registry and collectors

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry, CounterVec, Encoder,
    HistogramVec, Opts, Registry, TextEncoder,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Generation requests by mode, language, and outcome
    pub static ref REQUESTS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("requests_total", "Total generation requests"),
        &["mode", "language", "status"],
        REGISTRY
    ).unwrap();

    /// End-to-end request duration
    pub static ref REQUEST_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("request_duration_seconds", "Request duration in seconds")
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["mode"],
        REGISTRY
    ).unwrap();

    /// Upstream Gemini calls by HTTP status
    pub static ref GEMINI_API_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("gemini_api_calls_total", "Total Gemini API calls"),
        &["status_code"],
        REGISTRY
    ).unwrap();

    /// Upstream Gemini call duration
    pub static ref GEMINI_API_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("gemini_api_duration_seconds", "Gemini API call duration")
            .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["model"],
        REGISTRY
    ).unwrap();

    /// Structured-output replies that failed decoding
    pub static ref DECODE_FAILURES: CounterVec = register_counter_vec_with_registry!(
        Opts::new("decode_failures_total", "Model replies that failed structural validation"),
        &["mode"],
        REGISTRY
    ).unwrap();
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}
