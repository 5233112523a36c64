//! Prometheus metrics for the probe.
//!
//! All metrics follow the naming convention: `wai_<subsystem>_<metric>_<unit>`
//!
//! The registry is private to this crate, so rendering it never picks up
//! metrics registered by dependencies.

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts,
    Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Probe metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // LOCAL DISCOVERY METRICS (Subsystem 1)
    // =========================================================================

    /// Terminal discovery outcomes
    pub static ref DISCOVERY_OUTCOMES: IntCounterVec = IntCounterVec::new(
        Opts::new("wai_discovery_outcomes_total", "Local address discovery sessions by outcome"),
        &["outcome"]  // no_addresses/addresses_found/timed_out/timed_out_empty/unsupported/failed
    ).expect("metric creation failed");

    /// Distinct local addresses reported
    pub static ref ADDRESSES_DISCOVERED: IntCounter = IntCounter::new(
        "wai_discovery_addresses_total",
        "Distinct local addresses reported by discovery sessions"
    ).expect("metric creation failed");

    /// Time from session start to resolution
    pub static ref DISCOVERY_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "wai_discovery_duration_seconds",
            "Time from session start to terminal outcome"
        ).buckets(exponential_buckets(0.005, 2.0, 12).unwrap_or_default())
    ).expect("metric creation failed");

    // =========================================================================
    // VISIT METRICS (Subsystem 2)
    // =========================================================================

    /// Visit recordings by outcome
    pub static ref VISITS_RECORDED: IntCounterVec = IntCounterVec::new(
        Opts::new("wai_visits_total", "Visit recordings by outcome"),
        &["outcome"]  // recorded/cookies_disabled/unreadable
    ).expect("metric creation failed");

    // =========================================================================
    // DEVICE REPORT METRICS (Subsystem 3)
    // =========================================================================

    /// Failed network lookups
    pub static ref LOOKUP_FAILURES: IntCounterVec = IntCounterVec::new(
        Opts::new("wai_report_lookup_failures_total", "Failed network lookups by kind"),
        &["lookup"]  // ip/latency
    ).expect("metric creation failed");

    /// Public IP lookup duration
    pub static ref IP_LOOKUP_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "wai_report_ip_lookup_duration_seconds",
            "Time spent on the public IP lookup"
        ).buckets(exponential_buckets(0.01, 2.0, 10).unwrap_or_default())
    ).expect("metric creation failed");
}

/// Handle for rendering the registry.
#[derive(Clone)]
pub struct MetricsHandle {
    registry: Registry,
}

impl MetricsHandle {
    /// Prometheus text exposition of every probe metric.
    pub fn render(&self) -> Result<String, TelemetryError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
    }
}

/// Register all metrics with the probe registry. Safe to call repeatedly.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Local discovery
        Box::new(DISCOVERY_OUTCOMES.clone()),
        Box::new(ADDRESSES_DISCOVERED.clone()),
        Box::new(DISCOVERY_DURATION.clone()),
        // Visits
        Box::new(VISITS_RECORDED.clone()),
        // Device report
        Box::new(LOOKUP_FAILURES.clone()),
        Box::new(IP_LOOKUP_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        registry: REGISTRY.clone(),
    })
}

/// Record one finished discovery session.
pub fn record_discovery(outcome: &str, addresses: usize, seconds: f64) {
    crate::metric_inc!(DISCOVERY_OUTCOMES, &[outcome]);
    ADDRESSES_DISCOVERED.inc_by(addresses as u64);
    DISCOVERY_DURATION.observe(seconds);
}

/// Record one visit recording.
pub fn record_visit(outcome: &str) {
    crate::metric_inc!(VISITS_RECORDED, &[outcome]);
}

/// Record a failed network lookup.
pub fn record_lookup_failure(lookup: &str) {
    crate::metric_inc!(LOOKUP_FAILURES, &[lookup]);
}

/// Record the public IP lookup duration.
pub fn record_ip_lookup(seconds: f64) {
    IP_LOOKUP_DURATION.observe(seconds);
}
