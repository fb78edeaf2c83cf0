// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics,
    REQUESTS_TOTAL,
    REQUEST_DURATION,
    UPSTREAM_ATTEMPTS,
    UPSTREAM_DURATION,
    FALLBACK_EXHAUSTED,
    CACHE_OPERATIONS,
    CACHE_ENTRIES,
};

/// Helper to record request metrics
pub fn record_request(endpoint: &str, status_code: u16, outcome: &str, duration_secs: f64) {
    REQUESTS_TOTAL
        .with_label_values(&[endpoint, &status_code.to_string(), outcome])
        .inc();

    REQUEST_DURATION
        .with_label_values(&[endpoint])
        .observe(duration_secs);
}

/// Helper to record one upstream candidate attempt
pub fn record_upstream_attempt(model: &str, outcome: &str, duration_secs: f64) {
    UPSTREAM_ATTEMPTS
        .with_label_values(&[model, outcome])
        .inc();

    UPSTREAM_DURATION
        .with_label_values(&[model])
        .observe(duration_secs);
}

pub fn record_fallback_exhausted(last_model: &str) {
    FALLBACK_EXHAUSTED.with_label_values(&[last_model]).inc();
}

/// Helpers to record response cache operations
pub fn record_cache_hit() {
    CACHE_OPERATIONS.with_label_values(&["hit"]).inc();
}

pub fn record_cache_miss() {
    CACHE_OPERATIONS.with_label_values(&["miss"]).inc();
}

pub fn record_cache_write() {
    CACHE_OPERATIONS.with_label_values(&["write"]).inc();
}

pub fn update_cache_entries(count: usize) {
    CACHE_ENTRIES.with_label_values(&["stored"]).set(count as f64);
}
