//! Metrics collection and exposition.
//!
//! # Metrics
//! - `lookup_requests_total` (counter): lookups by outcome
//!   (`dvla_ok`, `fallback`, `rejected`, `error`)
//! - `lookup_request_duration_seconds` (histogram): end-to-end latency
//! - `lookup_upstream_duration_seconds` (histogram): DVLA call latency
//! - `lookup_upstream_failures_total` (counter): DVLA failures by kind
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::lookup::UpstreamError;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    ::metrics::describe_counter!("lookup_requests_total", "Lookups by outcome");
    ::metrics::describe_histogram!(
        "lookup_request_duration_seconds",
        "End-to-end lookup latency"
    );
    ::metrics::describe_histogram!(
        "lookup_upstream_duration_seconds",
        "Vehicle-enquiry call latency"
    );
    ::metrics::describe_counter!(
        "lookup_upstream_failures_total",
        "Vehicle-enquiry failures by kind"
    );

    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a finished `/lookup` request.
pub fn record_lookup(outcome: &'static str, start: Instant) {
    ::metrics::counter!("lookup_requests_total", "outcome" => outcome).increment(1);
    ::metrics::histogram!("lookup_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Record one vehicle-enquiry call.
pub fn record_upstream_call(start: Instant, failure: Option<&UpstreamError>) {
    ::metrics::histogram!("lookup_upstream_duration_seconds")
        .record(start.elapsed().as_secs_f64());

    if let Some(err) = failure {
        ::metrics::counter!("lookup_upstream_failures_total", "kind" => err.kind()).increment(1);
    }
}
