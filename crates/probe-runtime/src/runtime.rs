//! # Probe Runtime
//!
//! Runs every loader once, in the order the report page does.
//!
//! ## Startup Sequence
//!
//! 1. Start the public IP lookup (runs alongside everything below)
//! 2. Agent, screen, time
//! 3. Visit counter
//! 4. Connection hints
//! 5. Battery, geolocation, latency and local discovery, concurrently
//! 6. Await the IP lookup, then write the performance line

use std::sync::Arc;

use shared_types::{DisplaySurface, FieldId, SubsystemId};
use tokio::time::Instant;
use wai_01_local_discovery::{DiscoveryOutcome, LocalAddressDiscoveryApi, GATHERING_TEXT};
use wai_02_visit_counter::{VisitCounterApi, VisitOutcome};
use wai_03_device_report::{DeviceReportApi, LatencyMeasurement};
use wai_telemetry::{
    log_event, record_discovery, record_ip_lookup, record_lookup_failure, record_visit,
};

/// What one run produced, besides the rows it wrote.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub discovery: DiscoveryOutcome,
    pub visit: VisitOutcome,
    pub latency: LatencyMeasurement,
    /// `None` when the lookup was disabled.
    pub ip_lookup_ms: Option<u64>,
    pub render_ms: u64,
}

/// The three subsystems behind their driving ports.
pub struct ProbeRuntime {
    reporter: Arc<dyn DeviceReportApi>,
    visits: Arc<dyn VisitCounterApi>,
    discovery: Arc<dyn LocalAddressDiscoveryApi>,
    started: Instant,
}

impl ProbeRuntime {
    pub fn new(
        reporter: Arc<dyn DeviceReportApi>,
        visits: Arc<dyn VisitCounterApi>,
        discovery: Arc<dyn LocalAddressDiscoveryApi>,
    ) -> Self {
        Self {
            reporter,
            visits,
            discovery,
            started: Instant::now(),
        }
    }

    /// Count render time from `started` instead of from construction.
    pub fn with_start(mut self, started: Instant) -> Self {
        self.started = started;
        self
    }

    /// Fill every row of `display` once.
    pub async fn run(&self, display: &dyn DisplaySurface) -> RunSummary {
        let render_ms = self.started.elapsed().as_millis() as u64;
        log_event!(info, SubsystemId::Runtime, "report started", render_ms = render_ms);

        let ip_lookup = async {
            let ip_lookup_ms = self.reporter.load_ip(display).await;
            if let Some(ms) = ip_lookup_ms {
                record_ip_lookup(ms as f64 / 1000.0);
            }
            ip_lookup_ms
        };

        let page = async {
            self.reporter.load_agent(display).await;
            self.reporter.load_screen(display);
            self.reporter.load_time(display);

            let visit = self.visits.record_and_report(display);
            record_visit(visit.label());
            log_event!(info, SubsystemId::VisitCounter, "visit recorded", outcome = visit.label());

            self.reporter.load_connection(display);

            let (_, _, latency, discovery) = tokio::join!(
                self.reporter.load_battery(display),
                self.reporter.load_geolocation(display),
                self.measure_latency(display),
                self.discover(display),
            );
            (visit, latency, discovery)
        };

        let (ip_lookup_ms, (visit, latency, discovery)) = tokio::join!(ip_lookup, page);
        self.reporter.report_performance(display, render_ms, ip_lookup_ms);

        log_event!(
            info,
            SubsystemId::Runtime,
            "report finished",
            elapsed_ms = self.started.elapsed().as_millis() as u64
        );

        RunSummary {
            discovery,
            visit,
            latency,
            ip_lookup_ms,
            render_ms,
        }
    }

    async fn measure_latency(&self, display: &dyn DisplaySurface) -> LatencyMeasurement {
        let latency = self.reporter.measure_latency(display).await;
        if !matches!(latency, LatencyMeasurement::PageFetch { .. }) {
            record_lookup_failure("latency");
        }
        latency
    }

    async fn discover(&self, display: &dyn DisplaySurface) -> DiscoveryOutcome {
        if self.discovery.is_supported() {
            display.set_status(FieldId::WebrtcIp, GATHERING_TEXT);
        }

        let start = Instant::now();
        let outcome = self.discovery.discover_and_report(display).await;
        record_discovery(
            outcome.label(),
            outcome.address_count(),
            start.elapsed().as_secs_f64(),
        );
        log_event!(
            info,
            SubsystemId::LocalDiscovery,
            "local discovery finished",
            outcome = outcome.label(),
            addresses = outcome.address_count()
        );
        outcome
    }
}
