//! Process-local cookie jar.

use std::sync::Arc;

use parking_lot::Mutex;

use super::store::CookieTable;
use crate::adapters::SystemClock;
use crate::domain::{SetCookie, VisitError};
use crate::ports::{Clock, CookieJar};

/// Cookie jar that lives as long as the process.
pub struct MemoryCookieJar {
    table: Mutex<CookieTable>,
    clock: Arc<dyn Clock>,
}

impl Default for MemoryCookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Jar whose expiry uses `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            table: Mutex::new(CookieTable::default()),
            clock,
        }
    }
}

impl CookieJar for MemoryCookieJar {
    fn is_enabled(&self) -> bool {
        true
    }

    fn cookie_header(&self) -> Result<String, VisitError> {
        Ok(self.table.lock().header(self.clock.now()))
    }

    fn set_cookie(&self, line: &str) -> Result<(), VisitError> {
        let cookie = SetCookie::parse(line)?;
        self.table.lock().apply(cookie, self.clock.now());
        Ok(())
    }

    fn update(
        &self,
        derive: &mut dyn FnMut(&str) -> Result<String, VisitError>,
    ) -> Result<(), VisitError> {
        let mut table = self.table.lock();
        let now = self.clock.now();
        let line = derive(&table.header(now))?;
        table.apply(SetCookie::parse(&line)?, now);
        Ok(())
    }
}
