//! # Device Report Subsystem
//!
//! **Subsystem ID:** 3
//!
//! Everything the report shows besides local addresses and visits: the
//! public IP and its location, agent and platform details, screen geometry,
//! clock and page, network hints, battery, geolocation, latency and the
//! render timing line.
//!
//! Each fact is a typed record with optional fields. Rendering a record never
//! fails; a missing capability becomes the row's fallback text.
//!
//! ## Architecture
//!
//! - **Domain Layer:** records and their renderers
//! - **Ports Layer:** `IpLookupService`, `LatencyProbe`, `DeviceFacts`
//!   (driven), `DeviceReportApi` (driving)
//! - **Service Layer:** `DeviceReporter`
//! - **Adapters Layer:** reqwest clients (`http`), process facts (`native`),
//!   static doubles (`test-utils`)

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::{DeviceFacts, DeviceReportApi, IpLookupService, LatencyProbe};
pub use service::DeviceReporter;

#[cfg(feature = "http")]
pub use adapters::{HttpIpLookup, HttpLatencyProbe, DEFAULT_IP_LOOKUP_URL};

#[cfg(feature = "native")]
pub use adapters::NativeHostFacts;

#[cfg(any(test, feature = "test-utils"))]
pub use adapters::{StaticFacts, StaticIpLookup, StaticLatencyProbe};
