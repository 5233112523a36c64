//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// Why a host capability could not be read.
///
/// Every subsystem converts this into a fallback row at its boundary; it is
/// never shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    /// The host does not provide the capability at all.
    #[error("capability not present: {0}")]
    Absent(&'static str),

    /// The capability exists but refused the request (policy, permission).
    #[error("capability blocked: {0}")]
    Blocked(String),

    /// The capability failed while answering.
    #[error("capability failed: {0}")]
    Failed(String),
}

impl CapabilityError {
    /// True when the capability is missing rather than failing.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent(_))
    }
}
