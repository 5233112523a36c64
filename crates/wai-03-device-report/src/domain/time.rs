//! Clock, timezone and page context.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use shared_types::{set_value, DisplaySurface, FieldId, LOCALE_DATETIME_FORMAT};

use crate::domain::UNKNOWN;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeInfo {
    /// Wall-clock time with the local offset applied.
    pub local_time: DateTime<FixedOffset>,
    /// IANA zone name.
    pub timezone: Option<String>,
    pub referrer: Option<String>,
    pub page_url: Option<String>,
}

impl TimeInfo {
    pub fn local_time_text(&self) -> String {
        self.local_time.format(LOCALE_DATETIME_FORMAT).to_string()
    }

    pub fn timezone_text(&self) -> &str {
        self.timezone
            .as_deref()
            .filter(|tz| !tz.is_empty())
            .unwrap_or(UNKNOWN)
    }

    pub fn referrer_text(&self) -> &str {
        self.referrer
            .as_deref()
            .filter(|r| !r.is_empty())
            .unwrap_or("None")
    }

    /// Write the `local-time`, `timezone`, `referrer` and `page-url` rows.
    pub fn report(&self, display: &dyn DisplaySurface) {
        display.set_status(FieldId::LocalTime, &self.local_time_text());
        display.set_status(FieldId::Timezone, self.timezone_text());
        display.set_status(FieldId::Referrer, self.referrer_text());
        set_value(display, FieldId::PageUrl, self.page_url.as_deref());
    }
}
