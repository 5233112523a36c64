//! # Adapters Layer
//!
//! - `http` (feature `http`): reqwest-backed IP lookup and latency probe
//! - `native` (feature `native`): facts about the running process and host
//! - `testing` (feature `test-utils`): static doubles

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "native")]
pub mod native;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

#[cfg(feature = "http")]
pub use http::{HttpIpLookup, HttpLatencyProbe, DEFAULT_IP_LOOKUP_URL};

#[cfg(feature = "native")]
pub use native::NativeHostFacts;

#[cfg(any(test, feature = "test-utils"))]
pub use testing::{StaticFacts, StaticIpLookup, StaticLatencyProbe};
