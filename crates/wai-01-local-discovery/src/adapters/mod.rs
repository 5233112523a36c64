//! # Adapters Layer
//!
//! Concrete `PeerConnectionFactory` implementations.
//!
//! - `host` (feature `host`): enumerates local network interfaces and reports
//!   them as `typ host` candidates
//! - `scripted` (feature `test-utils`): replays a timed list of candidate
//!   events for deterministic tests

#[cfg(feature = "host")]
pub mod host;

#[cfg(any(test, feature = "test-utils"))]
pub mod scripted;

#[cfg(feature = "host")]
pub use host::{HostInterfaceFactory, HostPeerConnection};

#[cfg(any(test, feature = "test-utils"))]
pub use scripted::{ScriptHandle, ScriptedPeerConnectionFactory};
