//! Metrics collection and exposition.
//!
//! # Metrics
//! - `sass_requests_total` (counter): handled requests by kind, status
//! - `sass_request_duration_seconds` (histogram): end-to-end latency
//! - `sass_compilations_total` (counter): compilations by result
//! - `sass_compile_duration_seconds` (histogram): compiler latency
//! - `sass_declined_total` (counter): declined requests by reason
//! - `sass_artifact_writes_total` (counter): cache writes by result

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a request answered by the server.
pub fn record_request(kind: &str, status: u16, start: Instant) {
    counter!(
        "sass_requests_total",
        "kind" => kind.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("sass_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record one compiler invocation.
pub fn record_compile(result: &'static str, start: Instant) {
    counter!("sass_compilations_total", "result" => result).increment(1);
    histogram!("sass_compile_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_declined(reason: &'static str) {
    counter!("sass_declined_total", "reason" => reason).increment(1);
}

pub fn record_artifact_write(ok: bool) {
    let result = if ok { "ok" } else { "error" };
    counter!("sass_artifact_writes_total", "result" => result).increment(1);
}
