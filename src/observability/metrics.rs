//! Metrics collection and exposition.
//!
//! # Metrics
//! - `board_proxy_requests_total` (counter): action requests by outcome, status
//! - `board_proxy_upstream_duration_seconds` (histogram): webhook latency by outcome
//!
//! Recording goes through the `metrics` facade and is a no-op until
//! [`init_metrics`] installs the Prometheus recorder.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Count one handled action request.
pub fn record_request(outcome: &'static str, status: u16) {
    metrics::counter!(
        "board_proxy_requests_total",
        "outcome" => outcome,
        "status" => status.to_string()
    )
    .increment(1);
}

/// Time one webhook call.
pub fn record_upstream(outcome: &'static str, start: Instant) {
    metrics::histogram!(
        "board_proxy_upstream_duration_seconds",
        "outcome" => outcome
    )
    .record(start.elapsed().as_secs_f64());
}
