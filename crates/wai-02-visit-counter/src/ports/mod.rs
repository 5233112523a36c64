//! # Ports Layer
//!
//! - **Driving Ports (Inbound):** `VisitCounterApi`
//! - **Driven Ports (Outbound):** `CookieJar`, `Clock`

pub mod inbound;
pub mod outbound;

pub use inbound::VisitCounterApi;
pub use outbound::{Clock, CookieJar};
