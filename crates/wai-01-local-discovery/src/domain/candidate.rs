//! ICE candidate descriptors.
//!
//! A candidate line looks like
//! `candidate:842163049 1 udp 1677729535 192.168.1.4 54400 typ host generation 0`.
//! The connection address is the fifth space-delimited token.

/// Token index of the connection address inside a candidate line.
pub const ADDRESS_TOKEN_INDEX: usize = 4;

/// One candidate as delivered by the host's gathering machinery.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IceCandidate {
    /// Raw candidate attribute (without the `a=` prefix).
    pub candidate: String,
    /// Structured address field, when the host exposes one.
    pub address: Option<String>,
    /// Media stream identification tag.
    pub sdp_mid: Option<String>,
}

impl IceCandidate {
    /// Candidate with only the raw line.
    pub fn new(candidate: impl Into<String>) -> Self {
        Self {
            candidate: candidate.into(),
            address: None,
            sdp_mid: None,
        }
    }

    /// Candidate carrying a structured address alongside the raw line.
    pub fn with_address(candidate: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            candidate: candidate.into(),
            address: Some(address.into()),
            sdp_mid: None,
        }
    }

    /// Address of this candidate.
    ///
    /// Prefers the structured field; falls back to the fixed token position of
    /// the raw line. Returns `None` when neither yields a non-empty value.
    pub fn address(&self) -> Option<&str> {
        if let Some(address) = self.address.as_deref().filter(|a| !a.is_empty()) {
            return Some(address);
        }
        self.candidate
            .split(' ')
            .nth(ADDRESS_TOKEN_INDEX)
            .filter(|token| !token.is_empty())
    }

    /// An empty candidate is the end-of-candidates marker some hosts send
    /// instead of a null event.
    pub fn is_end_of_candidates(&self) -> bool {
        self.candidate.trim().is_empty() && self.address.as_deref().map_or(true, str::is_empty)
    }
}

/// What the candidate-event subscription delivers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateEvent {
    /// A gathered candidate.
    Candidate(IceCandidate),
    /// Null candidate: gathering is complete.
    GatheringComplete,
}

impl CandidateEvent {
    /// True for the completion sentinel, including an empty candidate.
    pub fn is_completion(&self) -> bool {
        match self {
            Self::GatheringComplete => true,
            Self::Candidate(candidate) => candidate.is_end_of_candidates(),
        }
    }
}

impl From<Option<IceCandidate>> for CandidateEvent {
    fn from(candidate: Option<IceCandidate>) -> Self {
        match candidate {
            Some(candidate) => Self::Candidate(candidate),
            None => Self::GatheringComplete,
        }
    }
}
