//! # Driven Ports (Outbound SPI)

use async_trait::async_trait;
use shared_types::CapabilityError;

use crate::domain::{
    AgentInfo, BatteryStatus, ConnectionInfo, GeoPosition, IpLookup, ReportError, ScreenInfo,
    TimeInfo,
};

/// Public IP and location lookup.
#[async_trait]
pub trait IpLookupService: Send + Sync {
    async fn lookup(&self) -> Result<IpLookup, ReportError>;
}

/// Fetches a URL without caching; only completion matters.
#[async_trait]
pub trait LatencyProbe: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<(), ReportError>;
}

/// Facts the host knows about itself.
///
/// Capabilities the host lacks return `None` or `CapabilityError::Absent`.
#[async_trait]
pub trait DeviceFacts: Send + Sync {
    /// Agent details. May consult high-entropy hints.
    async fn agent(&self) -> AgentInfo;

    fn screen(&self) -> Option<ScreenInfo>;

    fn time(&self) -> TimeInfo;

    fn connection(&self) -> Option<ConnectionInfo>;

    async fn battery(&self) -> Result<BatteryStatus, CapabilityError>;

    async fn geolocation(&self) -> Result<GeoPosition, CapabilityError>;

    /// URL of the page being reported on, used as the latency target.
    fn page_url(&self) -> Option<String>;
}
