//! Visit counter errors.

use thiserror::Error;

/// Errors raised while reading or writing the visit cookie.
#[derive(Debug, Error)]
pub enum VisitError {
    /// The jar refuses cookies.
    #[error("cookies are disabled")]
    CookiesDisabled,

    /// The stored value is not valid percent-encoded UTF-8.
    #[error("cookie value is not valid UTF-8 after decoding: {0}")]
    Decode(String),

    /// The decoded value is not a visit record.
    #[error("malformed visit payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// A `Set-Cookie` line could not be understood.
    #[error("malformed cookie line: {0}")]
    MalformedCookie(String),

    /// The backing store failed.
    #[error("cookie storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl VisitError {
    /// Whether the failure came from the stored data rather than the store.
    pub fn is_unreadable_data(&self) -> bool {
        matches!(self, VisitError::Decode(_) | VisitError::Payload(_))
    }
}
