//! Discovery configuration.

use std::time::Duration;

use crate::domain::DiscoveryError;

/// Bounded wait for candidate gathering.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Label of the dummy data channel that forces gathering to start.
pub const DEFAULT_CHANNEL_LABEL: &str = "whoami-local";

/// Discovery configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// How long to wait for the completion sentinel
    pub timeout: Duration,
    /// STUN/TURN servers handed to the connection. Empty keeps gathering to
    /// host-local candidates only.
    pub ice_servers: Vec<String>,
    /// Data channel label
    pub channel_label: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            ice_servers: Vec::new(),
            channel_label: DEFAULT_CHANNEL_LABEL.to_string(),
        }
    }
}

impl DiscoveryConfig {
    /// Config with a custom timeout and the remaining defaults.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }

    /// Reject values the service cannot run with.
    pub fn validate(&self) -> Result<(), DiscoveryError> {
        if self.timeout.is_zero() {
            return Err(DiscoveryError::InvalidConfig(
                "discovery timeout must be greater than zero".into(),
            ));
        }
        if self.channel_label.is_empty() {
            return Err(DiscoveryError::InvalidConfig(
                "data channel label must not be empty".into(),
            ));
        }
        Ok(())
    }
}
