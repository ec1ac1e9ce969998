// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Metrics instrumentation for solrify.
//!
//! Uses the `metrics` crate for backend-agnostic metrics collection.
//! The application is responsible for choosing the exporter (Prometheus, OTEL, etc.)
//!
//! # Metric Naming Convention
//! - `solrify_` prefix for all metrics
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Labels
//! - `operation`: search, num_found, get_one, facet, ping
//! - `status`: HTTP status code, or `error` when no response arrived

use metrics::{counter, histogram};
use std::time::{Duration, Instant};

/// Record a completed HTTP request
pub fn record_request(operation: &str, status: &str) {
    counter!(
        "solrify_requests_total",
        "operation" => operation.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record request latency
pub fn record_latency(operation: &str, duration: Duration) {
    histogram!(
        "solrify_request_seconds",
        "operation" => operation.to_string()
    )
    .record(duration.as_secs_f64());
}

/// Record a retry after a transient failure
pub fn record_retry(operation: &str) {
    counter!(
        "solrify_retries_total",
        "operation" => operation.to_string()
    )
    .increment(1);
}

/// Record documents returned by a page
pub fn record_documents(count: usize) {
    counter!("solrify_documents_total").increment(count as u64);
}

/// RAII timer recording request latency on drop
pub struct LatencyTimer {
    operation: &'static str,
    start: Instant,
}

impl LatencyTimer {
    /// Start a new latency timer
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            start: Instant::now(),
        }
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        record_latency(self.operation, self.start.elapsed());
    }
}
