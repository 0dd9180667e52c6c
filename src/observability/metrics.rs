//! Metrics collection and exposition.
//!
//! # Metrics
//! - `probe_requests_total` (counter): invocations by method, outcome
//! - `probe_duration_seconds` (histogram): invocation latency
//! - `probe_rate_limited_total` (counter): invocations shed by the limiter
//!
//! # Design Decisions
//! - Outcome label is the stable `ProbeError::kind` string, or
//!   "completed" for a finished exchange
//! - Exporter is optional; recording is a no-op until installed

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one probe invocation.
pub fn record_probe(method: &str, outcome: &'static str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("outcome", outcome.to_string()),
    ];
    metrics::counter!("probe_requests_total", &labels).increment(1);
    metrics::histogram!("probe_duration_seconds", &labels).record(start.elapsed().as_secs_f64());
}

/// Record an invocation shed by the rate limiter.
pub fn record_rate_limited() {
    metrics::counter!("probe_rate_limited_total").increment(1);
}
