//! Metrics collection and exposition.
//!
//! # Metrics
//! - `geo_redirect_decisions_total` (counter): outcome per rule
//! - `geo_redirect_lookups_total` (counter): geo lookups by result
//! - `geo_redirect_evaluation_seconds` (histogram): time spent deciding

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter")
        }
    }
}

/// Record the outcome of one rule evaluation.
pub fn record_decision(rule: &str, outcome: &'static str, start: Instant) {
    counter!(
        "geo_redirect_decisions_total",
        "rule" => rule.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    histogram!("geo_redirect_evaluation_seconds", "rule" => rule.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_lookup(found: bool) {
    let result = if found { "found" } else { "not_found" };
    counter!("geo_redirect_lookups_total", "result" => result).increment(1);
}
