//! # Core Entities
//!
//! Identifiers shared by the probe subsystems.
//!
//! ## Clusters
//!
//! - **Subsystems**: `SubsystemId`
//! - **Report rows**: `FieldId`

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// SUBSYSTEMS
// =============================================================================

/// Identifies the subsystem that produced a log line or metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubsystemId {
    /// wai-01: peer-connection local address discovery.
    LocalDiscovery = 1,
    /// wai-02: cookie-based visit counter.
    VisitCounter = 2,
    /// wai-03: host capability report.
    DeviceReport = 3,
    /// The `whoami` runtime itself.
    Runtime = 0,
}

impl SubsystemId {
    /// Short lowercase name used as the `subsystem` log field.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LocalDiscovery => "local-discovery",
            Self::VisitCounter => "visit-counter",
            Self::DeviceReport => "device-report",
            Self::Runtime => "runtime",
        }
    }
}

impl fmt::Display for SubsystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wai-{:02}-{}", *self as u8, self.name())
    }
}

// =============================================================================
// REPORT ROWS
// =============================================================================

/// One row of the rendered report.
///
/// The string form matches the element ids of the page the report mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldId {
    // Network identity
    Ip,
    IpLocation,
    Asn,
    Hostname,
    Latency,
    WebrtcIp,
    // Agent
    UserAgent,
    Platform,
    Languages,
    Dnt,
    Cookies,
    Cores,
    Memory,
    Touch,
    Webdriver,
    // Screen
    Screen,
    Viewport,
    PixelRatio,
    ColorDepth,
    // Time and page
    LocalTime,
    Timezone,
    Referrer,
    PageUrl,
    // Visits
    VisitCount,
    LastVisit,
    // Device hints
    Connection,
    Performance,
    Battery,
    GeoStatus,
    GeoCoords,
    GeoAccuracy,
    GeoAltitude,
}

impl FieldId {
    /// Every row, in page order.
    pub const ALL: [FieldId; 32] = [
        Self::Ip,
        Self::IpLocation,
        Self::Asn,
        Self::Hostname,
        Self::Latency,
        Self::WebrtcIp,
        Self::UserAgent,
        Self::Platform,
        Self::Languages,
        Self::Dnt,
        Self::Cookies,
        Self::Cores,
        Self::Memory,
        Self::Touch,
        Self::Webdriver,
        Self::Screen,
        Self::Viewport,
        Self::PixelRatio,
        Self::ColorDepth,
        Self::LocalTime,
        Self::Timezone,
        Self::Referrer,
        Self::PageUrl,
        Self::VisitCount,
        Self::LastVisit,
        Self::Connection,
        Self::Performance,
        Self::Battery,
        Self::GeoStatus,
        Self::GeoCoords,
        Self::GeoAccuracy,
        Self::GeoAltitude,
    ];

    /// Element id of the row.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ip => "ip",
            Self::IpLocation => "ip-location",
            Self::Asn => "asn",
            Self::Hostname => "hostname",
            Self::Latency => "latency",
            Self::WebrtcIp => "webrtc-ip",
            Self::UserAgent => "user-agent",
            Self::Platform => "platform",
            Self::Languages => "languages",
            Self::Dnt => "dnt",
            Self::Cookies => "cookies",
            Self::Cores => "cores",
            Self::Memory => "memory",
            Self::Touch => "touch",
            Self::Webdriver => "webdriver",
            Self::Screen => "screen",
            Self::Viewport => "viewport",
            Self::PixelRatio => "pixel-ratio",
            Self::ColorDepth => "color-depth",
            Self::LocalTime => "local-time",
            Self::Timezone => "timezone",
            Self::Referrer => "referrer",
            Self::PageUrl => "page-url",
            Self::VisitCount => "visit-count",
            Self::LastVisit => "last-visit",
            Self::Connection => "connection",
            Self::Performance => "performance",
            Self::Battery => "battery",
            Self::GeoStatus => "geo-status",
            Self::GeoCoords => "geo-coords",
            Self::GeoAccuracy => "geo-accuracy",
            Self::GeoAltitude => "geo-altitude",
        }
    }

    /// Human-readable label for console rendering.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ip => "Public IP",
            Self::IpLocation => "IP location",
            Self::Asn => "Network (ASN)",
            Self::Hostname => "Hostname",
            Self::Latency => "Latency",
            Self::WebrtcIp => "WebRTC local IPs",
            Self::UserAgent => "User agent",
            Self::Platform => "Platform",
            Self::Languages => "Languages",
            Self::Dnt => "Do Not Track",
            Self::Cookies => "Cookies enabled",
            Self::Cores => "CPU cores",
            Self::Memory => "Device memory",
            Self::Touch => "Touch support",
            Self::Webdriver => "Automation",
            Self::Screen => "Screen",
            Self::Viewport => "Viewport",
            Self::PixelRatio => "Pixel ratio",
            Self::ColorDepth => "Color depth",
            Self::LocalTime => "Local time",
            Self::Timezone => "Timezone",
            Self::Referrer => "Referrer",
            Self::PageUrl => "Page URL",
            Self::VisitCount => "Visits",
            Self::LastVisit => "Last visit",
            Self::Connection => "Connection",
            Self::Performance => "Performance",
            Self::Battery => "Battery",
            Self::GeoStatus => "Geolocation",
            Self::GeoCoords => "Coordinates",
            Self::GeoAccuracy => "Accuracy",
            Self::GeoAltitude => "Altitude",
        }
    }

    /// Look a row up by its element id.
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.as_str() == id)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
