//! Basic metrics instrumentation for tracking a sync run.
//!
//! Provides counters and duration tracking for HTTP requests and CRM writes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Metrics collector for tracking API usage.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of HTTP requests made (retries included)
    http_requests_total: Arc<AtomicU64>,

    /// Total number of HTTP requests that failed
    http_errors_total: Arc<AtomicU64>,

    /// Requests repeated after a 429
    http_retries_total: Arc<AtomicU64>,

    /// Conflict responses resolved to an existing record
    http_recovered_total: Arc<AtomicU64>,

    /// Total duration of all HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,

    contacts_created_total: Arc<AtomicU64>,
    contacts_reused_total: Arc<AtomicU64>,
    companies_created_total: Arc<AtomicU64>,
    companies_reused_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_errors_total: Arc::new(AtomicU64::new(0)),
            http_retries_total: Arc::new(AtomicU64::new(0)),
            http_recovered_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
            contacts_created_total: Arc::new(AtomicU64::new(0)),
            contacts_reused_total: Arc::new(AtomicU64::new(0)),
            companies_created_total: Arc::new(AtomicU64::new(0)),
            companies_reused_total: Arc::new(AtomicU64::new(0)),
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

    /// Record a rate-limit retry.
    pub fn record_http_retry(&self) {
        self.http_retries_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an error status that was resolved instead of failing the call.
    pub fn record_http_recovered(&self) {
        self.http_recovered_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_contact_created(&self) {
        self.contacts_created_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_contact_reused(&self) {
        self.contacts_reused_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_company_created(&self) {
        self.companies_created_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_company_reused(&self) {
        self.companies_reused_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total HTTP requests.
    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP errors.
    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    /// Get total rate-limit retries.
    pub fn http_retries_total(&self) -> u64 {
        self.http_retries_total.load(Ordering::Relaxed)
    }

    /// Get average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms.load(Ordering::Relaxed);
        let count = self.http_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_retries_total: self.http_retries_total(),
            http_recovered_total: self.http_recovered_total.load(Ordering::Relaxed),
            http_duration_total_ms: self.http_duration_total_ms.load(Ordering::Relaxed),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            contacts_created_total: self.contacts_created_total.load(Ordering::Relaxed),
            contacts_reused_total: self.contacts_reused_total.load(Ordering::Relaxed),
            companies_created_total: self.companies_created_total.load(Ordering::Relaxed),
            companies_reused_total: self.companies_reused_total.load(Ordering::Relaxed),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_retries_total: u64,
    pub http_recovered_total: u64,
    pub http_duration_total_ms: u64,
    pub http_duration_avg_ms: f64,
    pub contacts_created_total: u64,
    pub contacts_reused_total: u64,
    pub companies_created_total: u64,
    pub companies_reused_total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        assert_eq!(metrics.http_requests_total(), 0);
        assert_eq!(metrics.http_errors_total(), 0);
        assert_eq!(metrics.http_duration_avg_ms(), 0.0);
    }

    #[test]
    fn test_record_http_request() {
        let metrics = Metrics::new();
        metrics.record_http_request(Duration::from_millis(100));
        metrics.record_http_request(Duration::from_millis(300));
        metrics.record_http_error();
        metrics.record_http_retry();
        metrics.record_http_recovered();

        let summary = metrics.summary();
        assert_eq!(summary.http_requests_total, 2);
        assert_eq!(summary.http_errors_total, 1);
        assert_eq!(summary.http_retries_total, 1);
        assert_eq!(summary.http_recovered_total, 1);
        assert_eq!(summary.http_duration_total_ms, 400);
        assert_eq!(summary.http_duration_avg_ms, 200.0);
    }

    #[test]
    fn test_clones_share_counters() {
        let metrics = Metrics::new();
        let clone = metrics.clone();
        clone.record_contact_created();
        clone.record_company_reused();

        let summary = metrics.summary();
        assert_eq!(summary.contacts_created_total, 1);
        assert_eq!(summary.contacts_reused_total, 0);
        assert_eq!(summary.companies_reused_total, 1);
    }
}
