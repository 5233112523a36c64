//! # Local Address Discovery Subsystem
//!
//! **Subsystem ID:** 1
//!
//! Discovers the locally-routable addresses a host's peer-connection
//! negotiation machinery exposes, without contacting any remote peer, and
//! reports them (or their absence) within a bounded time.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture with:
//! - **Domain Layer:** candidate parsing, the one-shot `DiscoverySession`
//!   state machine and its terminal `DiscoveryOutcome`
//! - **Ports Layer:** `PeerConnectionFactory` / `PeerConnection` (driven),
//!   `LocalAddressDiscoveryApi` (driving)
//! - **Service Layer:** `LocalAddressDiscovery`, which races candidate
//!   gathering against the timeout
//! - **Adapters Layer:** native interface enumeration (`host`), scripted
//!   connections for tests (`test-utils`)
//!
//! ## Single Resolution
//!
//! Candidate events and the timer both try to finish the session. Only the
//! first one wins; the other observes the resolved flag and does nothing. The
//! winner closes the connection, cancels the timer and emits the outcome.
//!
//! ## Example
//!
//! ```rust
//! use wai_01_local_discovery::{DiscoverySession, IceCandidate, Termination, DiscoveryOutcome};
//!
//! let mut session = DiscoverySession::new();
//! session.record(&IceCandidate::new("candidate:1 1 udp 2122260223 10.0.0.5 54321 typ host"));
//! session.record(&IceCandidate::new("candidate:2 1 udp 2122260223 10.0.0.5 54322 typ host"));
//!
//! let outcome = session.try_resolve(Termination::GatheringComplete).unwrap();
//! assert_eq!(outcome.status_text(), "Local IPs: 10.0.0.5");
//!
//! // A late timer firing is a no-op.
//! assert!(session.try_resolve(Termination::TimerFired).is_none());
//! ```

// =============================================================================
// CORE MODULES
// =============================================================================

pub mod domain;
pub mod ports;
pub mod service;

// =============================================================================
// FEATURE-GATED MODULES
// =============================================================================

/// Adapters for host environments.
pub mod adapters;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use domain::{
    CandidateEvent, DiscoveryConfig, DiscoveryError, DiscoveryOutcome, DiscoverySession,
    IceCandidate, NegotiationStage, Termination, DEFAULT_CHANNEL_LABEL, DEFAULT_TIMEOUT,
    GATHERING_TEXT,
};

pub use ports::{
    LocalAddressDiscoveryApi, PeerConnection, PeerConnectionFactory, RtcConfiguration,
    SdpType, SessionDescription,
};

pub use service::LocalAddressDiscovery;

#[cfg(feature = "host")]
pub use adapters::{HostInterfaceFactory, HostPeerConnection};

#[cfg(any(test, feature = "test-utils"))]
pub use adapters::{ScriptHandle, ScriptedPeerConnectionFactory};
