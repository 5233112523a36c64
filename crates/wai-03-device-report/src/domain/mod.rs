//! Domain layer: one module per report section.

pub mod agent;
pub mod battery;
pub mod connection;
pub mod errors;
pub mod geolocation;
pub mod ip;
pub mod latency;
pub mod performance;
pub mod screen;
pub mod time;

pub use agent::*;
pub use battery::*;
pub use connection::*;
pub use errors::*;
pub use geolocation::*;
pub use ip::*;
pub use latency::*;
pub use performance::*;
pub use screen::*;
pub use time::*;

/// Separator between parts of a composite row.
pub const BULLET: &str = " \u{2022} ";
