//! # Driving Ports (Inbound API)

use async_trait::async_trait;
use shared_types::DisplaySurface;

use crate::domain::LatencyMeasurement;

/// Fills every device row. Each method writes only its own rows.
#[async_trait]
pub trait DeviceReportApi: Send + Sync {
    /// Public IP rows. Returns the lookup duration in ms, or `None` when the
    /// lookup is disabled.
    async fn load_ip(&self, display: &dyn DisplaySurface) -> Option<u64>;

    async fn load_agent(&self, display: &dyn DisplaySurface);

    fn load_screen(&self, display: &dyn DisplaySurface);

    fn load_time(&self, display: &dyn DisplaySurface);

    fn load_connection(&self, display: &dyn DisplaySurface);

    async fn load_battery(&self, display: &dyn DisplaySurface);

    async fn load_geolocation(&self, display: &dyn DisplaySurface);

    /// Writes `Measuring…`, then the measurement.
    async fn measure_latency(&self, display: &dyn DisplaySurface) -> LatencyMeasurement;

    fn report_performance(
        &self,
        display: &dyn DisplaySurface,
        render_ms: u64,
        ip_lookup_ms: Option<u64>,
    );
}
