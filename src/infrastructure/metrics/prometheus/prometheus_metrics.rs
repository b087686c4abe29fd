//! Prometheus metrics implementation.
//!
//! Concrete implementation of the `Metrics` trait. It delegates to utility
//! functions in sibling modules (`counters.rs`, `recorder.rs`) which handle
//! collection via the global `metrics` crate registry.

use crate::domain::Metrics;
use std::time::Instant;

/// Prometheus-based metrics implementation.
///
/// Empty because the `metrics` crate keeps a global registry; the
/// `PrometheusHandle` stored in `recorder.rs` does the rendering.
pub struct PrometheusMetrics {
    // Empty - uses global metrics registry pattern
}

impl PrometheusMetrics {
    pub fn new() -> Self {
        tracing::info!("Creating Prometheus metrics");
        PrometheusMetrics {}
    }
}

impl Metrics for PrometheusMetrics {
    fn render(&self) -> String {
        super::render_metrics()
    }

    fn record_user_created(&self) {
        tracing::debug!("Recording user created event");
        super::increment_user_created();
    }

    fn record_login(&self, success: bool) {
        super::increment_login(success);
    }

    fn record_spot_created(&self) {
        tracing::debug!("Recording spot created event");
        super::increment_spot_created();
    }

    fn record_http_request(&self, start: Instant, _path: &str, method: &str, status: u16) {
        // Path is left out of the labels; the client shell fallback would
        // make its cardinality unbounded.
        super::track_http_request(start, method, status);
    }
}
