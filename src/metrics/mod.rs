// Private module declaration
mod server;

use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};

// Re-export for public API
pub use server::start_metrics_server;

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Shipping estimates (by dispatch path)
// - Notifications sent and failed (by event type)
// - Dispatch latency
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

/// Central metrics registry for the notifier
pub struct Metrics {
    registry: Registry,

    pub shipping_estimates: IntCounterVec,

    pub notifications_sent: IntCounterVec,
    pub notifications_failed: IntCounterVec,
    pub dispatch_duration: HistogramVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let shipping_estimates = IntCounterVec::new(
            Opts::new("shipping_estimates_total", "Total shipping estimates computed"),
            &["path"],
        )?;
        registry.register(Box::new(shipping_estimates.clone()))?;

        let notifications_sent = IntCounterVec::new(
            Opts::new("notifications_sent_total", "Total notifications handed to the sender"),
            &["event_type"],
        )?;
        registry.register(Box::new(notifications_sent.clone()))?;

        let notifications_failed = IntCounterVec::new(
            Opts::new("notifications_failed_total", "Total notifications that could not be sent"),
            &["event_type", "reason"],
        )?;
        registry.register(Box::new(notifications_failed.clone()))?;

        let dispatch_duration = HistogramVec::new(
            HistogramOpts::new("notification_dispatch_duration_seconds", "Notification dispatch duration")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["event_type"],
        )?;
        registry.register(Box::new(dispatch_duration.clone()))?;

        Ok(Self {
            registry,
            shipping_estimates,
            notifications_sent,
            notifications_failed,
            dispatch_duration,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_estimate(&self, path: &str) {
        self.shipping_estimates.with_label_values(&[path]).inc();
    }

    /// Helper to record a dispatch attempt and its outcome
    pub fn record_dispatch(&self, event_type: &str, duration_secs: f64, failure: Option<&str>) {
        match failure {
            None => self.notifications_sent.with_label_values(&[event_type]).inc(),
            Some(reason) => self
                .notifications_failed
                .with_label_values(&[event_type, reason])
                .inc(),
        }
        self.dispatch_duration.with_label_values(&[event_type]).observe(duration_secs);
    }
}
