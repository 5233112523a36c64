//! # Ports Layer
//!
//! - **Driving Ports (Inbound):** `DeviceReportApi`
//! - **Driven Ports (Outbound):** `IpLookupService`, `LatencyProbe`,
//!   `DeviceFacts`

pub mod inbound;
pub mod outbound;

pub use inbound::DeviceReportApi;
pub use outbound::{DeviceFacts, IpLookupService, LatencyProbe};
