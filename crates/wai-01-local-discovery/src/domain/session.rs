//! # Discovery Session
//!
//! One-shot state machine behind a discovery run.
//!
//! ```text
//!            record(candidate)*
//!   Gathering ───────────────────┐
//!       │                        │
//!       │ try_resolve(..)        │ (ignored once resolved)
//!       ▼                        │
//!   Resolved ◄───────────────────┘
//! ```
//!
//! `try_resolve` is the check-and-set guard: it returns the outcome the first
//! time and `None` on every later call, whatever the trigger.

use std::collections::BTreeSet;

use crate::domain::{DiscoveryOutcome, IceCandidate};

/// What ended (or tried to end) a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// The completion sentinel arrived.
    GatheringComplete,
    /// The bounded wait elapsed.
    TimerFired,
    /// Construction, subscription or negotiation failed.
    NegotiationFailed,
}

/// Addresses gathered so far plus the resolved flag.
#[derive(Debug, Default)]
pub struct DiscoverySession {
    addresses: BTreeSet<String>,
    resolved: bool,
    candidates_seen: usize,
}

impl DiscoverySession {
    /// Fresh session in the gathering state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the address of a candidate.
    ///
    /// Returns `true` if the address was new. Candidates that carry no address,
    /// and anything arriving after resolution, are ignored.
    pub fn record(&mut self, candidate: &IceCandidate) -> bool {
        if self.resolved {
            return false;
        }
        self.candidates_seen += 1;
        match candidate.address() {
            Some(address) => self.addresses.insert(address.to_string()),
            None => false,
        }
    }

    /// Move to the resolved state and produce the outcome for `termination`.
    ///
    /// Only the first call yields `Some`.
    pub fn try_resolve(&mut self, termination: Termination) -> Option<DiscoveryOutcome> {
        if self.resolved {
            return None;
        }
        self.resolved = true;

        let outcome = match termination {
            Termination::GatheringComplete if self.addresses.is_empty() => {
                DiscoveryOutcome::NoAddressesFound
            }
            Termination::GatheringComplete => {
                DiscoveryOutcome::AddressesFound(std::mem::take(&mut self.addresses))
            }
            Termination::TimerFired => {
                DiscoveryOutcome::TimedOut(std::mem::take(&mut self.addresses))
            }
            Termination::NegotiationFailed => DiscoveryOutcome::Failed,
        };
        Some(outcome)
    }

    /// True once an outcome has been produced.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Distinct addresses gathered so far.
    pub fn addresses(&self) -> &BTreeSet<String> {
        &self.addresses
    }

    /// Number of candidate events recorded, duplicates included.
    pub fn candidates_seen(&self) -> usize {
        self.candidates_seen
    }
}
