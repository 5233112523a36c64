//! # Device Report Service

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use shared_types::{CapabilityError, DisplaySurface, FieldId};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::domain::{
    performance_text, ping_target, report_battery, report_connection, report_geolocation,
    report_ip_failure, report_screen, LatencyMeasurement, GEOLOCATION_TIMEOUT_MS, MEASURING,
};
use crate::ports::{DeviceFacts, DeviceReportApi, IpLookupService, LatencyProbe};

/// Writes the device rows from the injected ports.
pub struct DeviceReporter {
    facts: Arc<dyn DeviceFacts>,
    ip_lookup: Option<Arc<dyn IpLookupService>>,
    latency: Option<Arc<dyn LatencyProbe>>,
    geolocation_timeout: Duration,
}

impl DeviceReporter {
    pub fn new(facts: Arc<dyn DeviceFacts>) -> Self {
        Self {
            facts,
            ip_lookup: None,
            latency: None,
            geolocation_timeout: Duration::from_millis(GEOLOCATION_TIMEOUT_MS),
        }
    }

    pub fn with_ip_lookup(mut self, lookup: Arc<dyn IpLookupService>) -> Self {
        self.ip_lookup = Some(lookup);
        self
    }

    pub fn with_latency_probe(mut self, probe: Arc<dyn LatencyProbe>) -> Self {
        self.latency = Some(probe);
        self
    }

    pub fn with_geolocation_timeout(mut self, timeout: Duration) -> Self {
        self.geolocation_timeout = timeout;
        self
    }

    fn rtt_hint(&self) -> Option<u32> {
        self.facts.connection().and_then(|c| c.rtt_hint())
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

#[async_trait]
impl DeviceReportApi for DeviceReporter {
    async fn load_ip(&self, display: &dyn DisplaySurface) -> Option<u64> {
        let Some(lookup) = &self.ip_lookup else {
            info!("public IP lookup disabled");
            report_ip_failure(display);
            return None;
        };

        let start = Instant::now();
        match lookup.lookup().await {
            Ok(record) => {
                if record.error {
                    warn!(reason = ?record.reason, "IP lookup service refused the request");
                }
                record.report(display);
            }
            Err(e) => {
                warn!(error = %e, "public IP lookup failed");
                report_ip_failure(display);
            }
        }
        Some(elapsed_ms(start))
    }

    async fn load_agent(&self, display: &dyn DisplaySurface) {
        self.facts.agent().await.report(display);
    }

    fn load_screen(&self, display: &dyn DisplaySurface) {
        report_screen(self.facts.screen().as_ref(), display);
    }

    fn load_time(&self, display: &dyn DisplaySurface) {
        self.facts.time().report(display);
    }

    fn load_connection(&self, display: &dyn DisplaySurface) {
        report_connection(self.facts.connection().as_ref(), display);
    }

    async fn load_battery(&self, display: &dyn DisplaySurface) {
        let battery = self.facts.battery().await;
        if let Err(e) = &battery {
            debug!(error = %e, "battery unavailable");
        }
        report_battery(&battery, display);
    }

    async fn load_geolocation(&self, display: &dyn DisplaySurface) {
        let position =
            match tokio::time::timeout(self.geolocation_timeout, self.facts.geolocation()).await {
                Ok(position) => position,
                Err(_) => Err(CapabilityError::Failed("Timeout expired".to_string())),
            };
        report_geolocation(&position, display);
    }

    async fn measure_latency(&self, display: &dyn DisplaySurface) -> LatencyMeasurement {
        display.set_status(FieldId::Latency, MEASURING);

        let measurement = match (&self.latency, self.facts.page_url()) {
            (Some(probe), Some(page_url)) => {
                let target = ping_target(&page_url, chrono::Utc::now().timestamp_millis());
                let start = Instant::now();
                match probe.fetch(&target).await {
                    Ok(()) => LatencyMeasurement::PageFetch {
                        millis: elapsed_ms(start),
                    },
                    Err(e) => {
                        warn!(error = %e, url = %target, "latency probe failed");
                        LatencyMeasurement::from_failure(self.rtt_hint())
                    }
                }
            }
            _ => {
                debug!("no latency target configured");
                LatencyMeasurement::from_failure(self.rtt_hint())
            }
        };

        display.set_status(FieldId::Latency, &measurement.text());
        measurement
    }

    fn report_performance(
        &self,
        display: &dyn DisplaySurface,
        render_ms: u64,
        ip_lookup_ms: Option<u64>,
    ) {
        display.set_status(FieldId::Performance, &performance_text(render_ms, ip_lookup_ms));
    }
}
