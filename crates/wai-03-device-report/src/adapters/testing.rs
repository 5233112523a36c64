//! Static doubles for the outbound ports.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::CapabilityError;

use crate::domain::{
    AgentInfo, BatteryStatus, ConnectionInfo, GeoPosition, IpLookup, ReportError, ScreenInfo,
    TimeInfo,
};
use crate::ports::{DeviceFacts, IpLookupService, LatencyProbe};

/// Returns a fixed lookup result after an optional delay.
pub struct StaticIpLookup {
    result: Result<IpLookup, ReportError>,
    delay: Duration,
    calls: Arc<AtomicUsize>,
}

impl StaticIpLookup {
    pub fn ok(record: IpLookup) -> Self {
        Self {
            result: Ok(record),
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(error: ReportError) -> Self {
        Self {
            result: Err(error),
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IpLookupService for StaticIpLookup {
    async fn lookup(&self) -> Result<IpLookup, ReportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.result.clone()
    }
}

/// Completes or fails every fetch after a fixed delay, recording the URLs.
pub struct StaticLatencyProbe {
    result: Result<(), ReportError>,
    delay: Duration,
    urls: Mutex<Vec<String>>,
}

impl StaticLatencyProbe {
    pub fn ok(delay: Duration) -> Self {
        Self {
            result: Ok(()),
            delay,
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ReportError) -> Self {
        Self {
            result: Err(error),
            delay: Duration::ZERO,
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().clone()
    }
}

#[async_trait]
impl LatencyProbe for StaticLatencyProbe {
    async fn fetch(&self, url: &str) -> Result<(), ReportError> {
        self.urls.lock().push(url.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.result.clone()
    }
}

/// Facts fixed at construction. Fields are public for tests to tweak.
#[derive(Debug, Clone)]
pub struct StaticFacts {
    pub agent: AgentInfo,
    pub screen: Option<ScreenInfo>,
    pub time: TimeInfo,
    pub connection: Option<ConnectionInfo>,
    pub battery: Result<BatteryStatus, CapabilityError>,
    pub geolocation: Result<GeoPosition, CapabilityError>,
    /// Delay before the geolocation answer.
    pub geolocation_delay: Duration,
    pub page_url: Option<String>,
}

impl StaticFacts {
    /// A host exposing nothing optional.
    pub fn bare(time: TimeInfo) -> Self {
        Self {
            agent: AgentInfo::default(),
            screen: None,
            time,
            connection: None,
            battery: Err(CapabilityError::Absent("battery")),
            geolocation: Err(CapabilityError::Absent("geolocation")),
            geolocation_delay: Duration::ZERO,
            page_url: None,
        }
    }
}

#[async_trait]
impl DeviceFacts for StaticFacts {
    async fn agent(&self) -> AgentInfo {
        self.agent.clone()
    }

    fn screen(&self) -> Option<ScreenInfo> {
        self.screen.clone()
    }

    fn time(&self) -> TimeInfo {
        self.time.clone()
    }

    fn connection(&self) -> Option<ConnectionInfo> {
        self.connection.clone()
    }

    async fn battery(&self) -> Result<BatteryStatus, CapabilityError> {
        self.battery.clone()
    }

    async fn geolocation(&self) -> Result<GeoPosition, CapabilityError> {
        if !self.geolocation_delay.is_zero() {
            tokio::time::sleep(self.geolocation_delay).await;
        }
        self.geolocation.clone()
    }

    fn page_url(&self) -> Option<String> {
        self.page_url.clone()
    }
}
