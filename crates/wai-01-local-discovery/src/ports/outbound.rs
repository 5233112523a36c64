//! # Driven Ports (Outbound SPI)
//!
//! The peer-connection capability this subsystem requires from the host.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::{CandidateEvent, DiscoveryError};

/// Configuration handed to the connection on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RtcConfiguration {
    /// STUN/TURN server URLs.
    pub ice_servers: Vec<String>,
}

/// Kind of a session description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdpType {
    Offer,
    Answer,
}

/// An offer or answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDescription {
    /// Offer or answer
    pub kind: SdpType,
    /// SDP body
    pub sdp: String,
}

/// Creates peer connections.
///
/// The host must provide a concrete implementation (a browser binding, a
/// native interface enumerator, or a scripted double).
#[async_trait]
pub trait PeerConnectionFactory: Send + Sync {
    /// Whether the host can create peer connections at all.
    ///
    /// When this is `false` the service never calls [`Self::create`].
    fn is_supported(&self) -> bool;

    /// Construct a connection.
    async fn create(
        &self,
        config: &RtcConfiguration,
    ) -> Result<Arc<dyn PeerConnection>, DiscoveryError>;
}

/// One peer connection, used only to trigger candidate gathering.
///
/// # Lifecycle
///
/// 1. `subscribe_candidates` (before negotiation, so no event is missed)
/// 2. `create_data_channel`
/// 3. `create_offer`
/// 4. `set_local_description` starts gathering
/// 5. `close`, exactly once, by whoever resolves the session
#[async_trait]
pub trait PeerConnection: Send + Sync {
    /// Candidate events in arrival order.
    ///
    /// `CandidateEvent::GatheringComplete` plays the role of the null
    /// candidate. Can be called once; a second call returns an error.
    fn subscribe_candidates(&self) -> Result<mpsc::UnboundedReceiver<CandidateEvent>, DiscoveryError>;

    /// Open a logical data channel. No data is ever sent on it.
    async fn create_data_channel(&self, label: &str) -> Result<(), DiscoveryError>;

    /// Create a session offer.
    async fn create_offer(&self) -> Result<SessionDescription, DiscoveryError>;

    /// Commit the offer; gathering starts asynchronously afterwards.
    async fn set_local_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), DiscoveryError>;

    /// Release the connection. Events stop after this returns.
    fn close(&self);
}
