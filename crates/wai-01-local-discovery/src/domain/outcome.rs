//! Terminal outcomes of a discovery session.

use std::collections::BTreeSet;
use std::fmt;

/// Shown on the `webrtc-ip` row while a supported host gathers candidates.
pub const GATHERING_TEXT: &str = "Gathering ICE candidates…";

/// The single final result of one discovery session.
///
/// Address sets are ordered, so the joined list is stable between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryOutcome {
    /// Gathering completed without exposing any address.
    NoAddressesFound,
    /// Gathering completed with one or more distinct addresses.
    AddressesFound(BTreeSet<String>),
    /// The bounded wait elapsed first; carries whatever was gathered.
    TimedOut(BTreeSet<String>),
    /// The host has no peer-connection capability.
    Unsupported,
    /// Construction or negotiation raised an error.
    Failed,
}

impl DiscoveryOutcome {
    /// Addresses carried by the outcome, if any variant carries them.
    pub fn addresses(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::AddressesFound(addresses) | Self::TimedOut(addresses) => Some(addresses),
            _ => None,
        }
    }

    /// Number of addresses carried by the outcome.
    pub fn address_count(&self) -> usize {
        self.addresses().map_or(0, BTreeSet::len)
    }

    /// True for both timeout variants.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut(_))
    }

    /// Stable label for metrics and structured logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoAddressesFound => "no_addresses",
            Self::AddressesFound(_) => "addresses_found",
            Self::TimedOut(addresses) if addresses.is_empty() => "timed_out_empty",
            Self::TimedOut(_) => "timed_out",
            Self::Unsupported => "unsupported",
            Self::Failed => "failed",
        }
    }

    /// Human-readable status line.
    pub fn status_text(&self) -> String {
        match self {
            Self::NoAddressesFound => "No local IPs exposed via WebRTC".to_string(),
            Self::AddressesFound(addresses) => format_addresses(addresses),
            Self::TimedOut(addresses) if addresses.is_empty() => {
                "Timed out without revealing local IPs".to_string()
            }
            Self::TimedOut(addresses) => format_addresses(addresses),
            Self::Unsupported => "WebRTC not supported in this browser".to_string(),
            Self::Failed => "WebRTC test failed or was blocked".to_string(),
        }
    }
}

impl fmt::Display for DiscoveryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.status_text())
    }
}

fn format_addresses(addresses: &BTreeSet<String>) -> String {
    let joined: Vec<&str> = addresses.iter().map(String::as_str).collect();
    format!("Local IPs: {}", joined.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_status_text_for_every_variant() {
        assert_eq!(
            DiscoveryOutcome::NoAddressesFound.status_text(),
            "No local IPs exposed via WebRTC"
        );
        assert_eq!(
            DiscoveryOutcome::AddressesFound(set(&["192.168.1.4", "10.0.0.5"])).status_text(),
            "Local IPs: 10.0.0.5, 192.168.1.4"
        );
        assert_eq!(
            DiscoveryOutcome::TimedOut(set(&[])).status_text(),
            "Timed out without revealing local IPs"
        );
        assert_eq!(
            DiscoveryOutcome::TimedOut(set(&["172.16.0.2"])).status_text(),
            "Local IPs: 172.16.0.2"
        );
        assert_eq!(
            DiscoveryOutcome::Unsupported.status_text(),
            "WebRTC not supported in this browser"
        );
        assert_eq!(
            DiscoveryOutcome::Failed.status_text(),
            "WebRTC test failed or was blocked"
        );
    }

    #[test]
    fn test_labels_distinguish_empty_timeout() {
        assert_eq!(DiscoveryOutcome::TimedOut(set(&[])).label(), "timed_out_empty");
        assert_eq!(DiscoveryOutcome::TimedOut(set(&["10.0.0.1"])).label(), "timed_out");
    }

    #[test]
    fn test_address_accessors() {
        let outcome = DiscoveryOutcome::AddressesFound(set(&["10.0.0.5"]));
        assert_eq!(outcome.address_count(), 1);
        assert!(!outcome.is_timeout());
        assert_eq!(DiscoveryOutcome::Failed.addresses(), None);
        assert_eq!(DiscoveryOutcome::Unsupported.address_count(), 0);
    }
}
