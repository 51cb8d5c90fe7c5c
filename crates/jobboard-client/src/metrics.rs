//! API client metrics.
//!
//! Recorded through the `metrics` facade; nothing is exported unless the host
//! application installs a recorder.

use metrics::{counter, histogram};

/// Metric name constants for consistency.
pub mod names {
    /// Total API requests by operation and status.
    pub const REQUESTS_TOTAL: &str = "jobboard_api_requests_total";

    /// Request latency in seconds by operation.
    pub const LATENCY_SECONDS: &str = "jobboard_api_latency_seconds";
}

/// Record metrics for a completed API request.
///
/// `status` is the HTTP status, or 0 when no response was received.
pub fn record_request(operation: &str, status: u16, latency_ms: f64) {
    counter!(
        names::REQUESTS_TOTAL,
        "operation" => operation.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        names::LATENCY_SECONDS,
        "operation" => operation.to_string()
    )
    .record(latency_ms / 1000.0);
}
