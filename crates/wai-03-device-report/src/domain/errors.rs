//! Report errors.

use thiserror::Error;

/// Errors from the network-facing ports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// The request never got a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The body was not what we expected.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// The URL cannot be probed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The lookup was turned off.
    #[error("disabled by configuration")]
    Disabled,
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for ReportError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            ReportError::Status(status.as_u16())
        } else if e.is_decode() {
            ReportError::Parse(e.to_string())
        } else {
            ReportError::Transport(e.to_string())
        }
    }
}
