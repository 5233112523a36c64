//! # Driven Ports (Outbound SPI)

use chrono::{DateTime, Utc};

use crate::domain::VisitError;

/// Cookie storage with `document.cookie` semantics: reads return every live
/// cookie as one `a=1; b=2` header, writes take one `Set-Cookie` line.
pub trait CookieJar: Send + Sync {
    /// Whether cookies can be stored at all.
    fn is_enabled(&self) -> bool;

    /// All live cookies as a header string.
    fn cookie_header(&self) -> Result<String, VisitError>;

    /// Store, replace or delete one cookie.
    fn set_cookie(&self, line: &str) -> Result<(), VisitError>;

    /// Read the header, derive one `Set-Cookie` line from it and store that
    /// line, with no other writer in between.
    ///
    /// The default runs the two steps back to back, which is enough for jars
    /// only this process can see.
    fn update(
        &self,
        derive: &mut dyn FnMut(&str) -> Result<String, VisitError>,
    ) -> Result<(), VisitError> {
        let line = derive(&self.cookie_header()?)?;
        self.set_cookie(&line)
    }
}

/// Wall-clock time source.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
