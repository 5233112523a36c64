//! Test doubles.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use crate::domain::VisitError;
use crate::ports::{Clock, CookieJar};

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock() = to;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// Jar with cookies turned off. Any access is an error.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledCookieJar;

impl CookieJar for DisabledCookieJar {
    fn is_enabled(&self) -> bool {
        false
    }

    fn cookie_header(&self) -> Result<String, VisitError> {
        Err(VisitError::CookiesDisabled)
    }

    fn set_cookie(&self, _line: &str) -> Result<(), VisitError> {
        Err(VisitError::CookiesDisabled)
    }
}
