//! # Local Address Discovery Service
//!
//! Wires the domain `DiscoverySession` to a `PeerConnectionFactory` and races
//! candidate gathering against the timeout.

// Semantic submodules
mod active;
mod api;
mod core;

// Re-export public API
pub use core::LocalAddressDiscovery;
