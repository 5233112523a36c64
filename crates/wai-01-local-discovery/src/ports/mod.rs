//! # Ports Layer - Hexagonal Architecture Boundaries
//!
//! - **Driving Ports (Inbound):** what the runtime calls
//! - **Driven Ports (Outbound):** the peer-connection capability the host
//!   must provide

pub mod inbound;
pub mod outbound;

pub use inbound::LocalAddressDiscoveryApi;
pub use outbound::{
    PeerConnection, PeerConnectionFactory, RtcConfiguration, SdpType, SessionDescription,
};
