//! Basic metrics instrumentation for exports and backend calls.
//!
//! Provides counters and duration tracking for HTTP requests, export outcomes
//! per delivery strategy, and dropped analytics notifications.

use crate::delivery::DeliveryStrategy;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector shared by the client and the export service.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of HTTP requests made
    http_requests_total: Arc<AtomicU64>,

    /// Total number of HTTP errors
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of all HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,

    /// Export invocations
    exports_total: Arc<AtomicU64>,

    /// Exports delivered through the native share sheet
    shared_total: Arc<AtomicU64>,

    /// Exports delivered as a direct download
    downloaded_total: Arc<AtomicU64>,

    /// Exports delivered from the server copy
    server_fallback_total: Arc<AtomicU64>,

    /// Exports that exhausted every strategy
    exports_failed_total: Arc<AtomicU64>,

    /// Analytics notifications that failed and were dropped
    analytics_dropped_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

fn counter() -> Arc<AtomicU64> {
    Arc::new(AtomicU64::new(0))
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            http_requests_total: counter(),
            http_errors_total: counter(),
            http_duration_total_ms: counter(),
            exports_total: counter(),
            shared_total: counter(),
            downloaded_total: counter(),
            server_fallback_total: counter(),
            exports_failed_total: counter(),
            analytics_dropped_total: counter(),
        }
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP error.
    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the start of an export.
    pub fn record_export_started(&self) {
        self.exports_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record which strategy delivered an export.
    pub fn record_delivery(&self, strategy: DeliveryStrategy) {
        let counter = match strategy {
            DeliveryStrategy::NativeShare => &self.shared_total,
            DeliveryStrategy::DirectDownload => &self.downloaded_total,
            DeliveryStrategy::ServerFallback => &self.server_fallback_total,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an export that failed on every strategy.
    pub fn record_export_failed(&self) {
        self.exports_failed_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an analytics notification that was dropped.
    pub fn record_analytics_dropped(&self) {
        self.analytics_dropped_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total HTTP requests.
    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP errors.
    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP duration in milliseconds.
    pub fn http_duration_total_ms(&self) -> u64 {
        self.http_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Get total export invocations.
    pub fn exports_total(&self) -> u64 {
        self.exports_total.load(Ordering::Relaxed)
    }

    /// Get the number of exports a strategy delivered.
    pub fn delivered_by(&self, strategy: DeliveryStrategy) -> u64 {
        match strategy {
            DeliveryStrategy::NativeShare => &self.shared_total,
            DeliveryStrategy::DirectDownload => &self.downloaded_total,
            DeliveryStrategy::ServerFallback => &self.server_fallback_total,
        }
        .load(Ordering::Relaxed)
    }

    /// Get total failed exports.
    pub fn exports_failed_total(&self) -> u64 {
        self.exports_failed_total.load(Ordering::Relaxed)
    }

    /// Get total dropped analytics notifications.
    pub fn analytics_dropped_total(&self) -> u64 {
        self.analytics_dropped_total.load(Ordering::Relaxed)
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_total_ms: self.http_duration_total_ms(),
            exports_total: self.exports_total(),
            shared_total: self.delivered_by(DeliveryStrategy::NativeShare),
            downloaded_total: self.delivered_by(DeliveryStrategy::DirectDownload),
            server_fallback_total: self.delivered_by(DeliveryStrategy::ServerFallback),
            exports_failed_total: self.exports_failed_total(),
            analytics_dropped_total: self.analytics_dropped_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_total_ms: u64,
    pub exports_total: u64,
    pub shared_total: u64,
    pub downloaded_total: u64,
    pub server_fallback_total: u64,
    pub exports_failed_total: u64,
    pub analytics_dropped_total: u64,
}

/// Helper for timing HTTP requests.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    /// Start timing an HTTP request.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) {
        self.metrics.record_http_request(self.start.elapsed());
    }

    /// Complete the timing and record as an error.
    pub fn complete_with_error(self) {
        self.metrics.record_http_request(self.start.elapsed());
        self.metrics.record_http_error();
    }
}
