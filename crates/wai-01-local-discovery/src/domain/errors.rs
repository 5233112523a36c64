//! Domain Errors for Local Address Discovery

use std::fmt;

use thiserror::Error;

/// Negotiation step that raised an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationStage {
    /// Constructing the peer connection
    Construction,
    /// Subscribing to candidate events
    Subscription,
    /// Opening the dummy data channel
    DataChannel,
    /// Creating the session offer
    CreateOffer,
    /// Committing the offer as local description
    SetLocalDescription,
}

impl fmt::Display for NegotiationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Construction => write!(f, "construction"),
            Self::Subscription => write!(f, "candidate subscription"),
            Self::DataChannel => write!(f, "data channel"),
            Self::CreateOffer => write!(f, "create offer"),
            Self::SetLocalDescription => write!(f, "set local description"),
        }
    }
}

/// Errors raised while setting up a discovery session.
///
/// None of these reach the caller of `discover`: they are converted to
/// `DiscoveryOutcome::Unsupported` or `DiscoveryOutcome::Failed` at the
/// service boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    /// The host has no peer-connection capability.
    #[error("peer-connection capability not present")]
    CapabilityAbsent,

    /// A construction or negotiation step failed.
    #[error("negotiation failed during {stage}: {reason}")]
    NegotiationFailure {
        stage: NegotiationStage,
        reason: String,
    },

    /// The connection was used after it was closed.
    #[error("peer connection already closed")]
    ConnectionClosed,

    /// Configuration rejected by `DiscoveryConfig::validate`.
    #[error("invalid discovery configuration: {0}")]
    InvalidConfig(String),
}

impl DiscoveryError {
    /// Shorthand for a `NegotiationFailure`.
    pub fn negotiation(stage: NegotiationStage, reason: impl Into<String>) -> Self {
        Self::NegotiationFailure {
            stage,
            reason: reason.into(),
        }
    }
}
