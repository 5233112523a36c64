//! # Visit Counter Service

use std::sync::Arc;

use shared_types::{DisplaySurface, FieldId};
use tracing::{debug, warn};

use crate::domain::{
    decode_component, find_cookie, SetCookie, VisitError, VisitOutcome, VisitRecord,
    COOKIE_MAX_AGE_SECS, COOKIE_NAME,
};
use crate::ports::{Clock, CookieJar, VisitCounterApi};

/// Reads, increments and rewrites the visit cookie.
pub struct VisitCounter {
    jar: Arc<dyn CookieJar>,
    clock: Arc<dyn Clock>,
    cookie_name: String,
    max_age_secs: i64,
}

impl VisitCounter {
    pub fn new(jar: Arc<dyn CookieJar>, clock: Arc<dyn Clock>) -> Self {
        Self {
            jar,
            clock,
            cookie_name: COOKIE_NAME.to_string(),
            max_age_secs: COOKIE_MAX_AGE_SECS,
        }
    }

    /// Store the record under a different cookie name.
    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    /// Lifetime of the rewritten cookie, in seconds.
    pub fn with_max_age(mut self, max_age_secs: i64) -> Self {
        self.max_age_secs = max_age_secs;
        self
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// The next record and the cookie that stores it, given the jar's header.
    fn next_visit(&self, header: &str) -> Result<(VisitOutcome, SetCookie), VisitError> {
        let raw = find_cookie(header, &self.cookie_name).unwrap_or_default();
        let previous = VisitRecord::from_json(&decode_component(raw)?)?;

        let current = previous.next(self.clock.now());
        let cookie = SetCookie::persistent(&self.cookie_name, &current.to_json(), self.max_age_secs);
        let outcome = VisitOutcome::Recorded {
            current,
            previous_visit: previous.last,
        };
        Ok((outcome, cookie))
    }

    fn read_and_increment(&self) -> Result<VisitOutcome, VisitError> {
        let mut recorded = None;
        self.jar.update(&mut |header: &str| {
            let (outcome, cookie) = self.next_visit(header)?;
            recorded = Some(outcome);
            Ok(cookie.to_line())
        })?;
        recorded.ok_or_else(|| {
            VisitError::Storage(std::io::Error::new(
                std::io::ErrorKind::Other,
                "cookie jar skipped the visit update",
            ))
        })
    }
}

impl VisitCounterApi for VisitCounter {
    fn record_visit(&self) -> VisitOutcome {
        if !self.jar.is_enabled() {
            debug!("cookie jar disabled; visit not recorded");
            return VisitOutcome::CookiesDisabled;
        }

        match self.read_and_increment() {
            Ok(outcome) => {
                debug!(count = outcome.count(), "visit recorded");
                outcome
            }
            Err(VisitError::CookiesDisabled) => VisitOutcome::CookiesDisabled,
            Err(e) => {
                warn!(error = %e, unreadable_data = e.is_unreadable_data(), "visit not recorded");
                VisitOutcome::Unreadable {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn record_and_report(&self, display: &dyn DisplaySurface) -> VisitOutcome {
        let outcome = self.record_visit();
        display.set_status(FieldId::VisitCount, &outcome.count_text());
        display.set_status(FieldId::LastVisit, &outcome.last_visit_text());
        outcome
    }
}
