//! Result of recording one visit, and its two display lines.

use chrono::{DateTime, Local, TimeZone, Utc};
use shared_types::LOCALE_DATETIME_FORMAT;

use crate::domain::VisitRecord;

pub const COOKIES_DISABLED: &str = "Cookies disabled";
pub const FIRST_VISIT: &str = "This is your first visit";
pub const UNREADABLE_COUNT: &str = "Unable to read visit data";
pub const UNREADABLE_HINT: &str = "Try reloading the page";

/// What happened when a visit was recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitOutcome {
    /// The jar refuses cookies; nothing was read or written.
    CookiesDisabled,
    /// The visit was stored.
    Recorded {
        /// Record now in the jar.
        current: VisitRecord,
        /// Timestamp the previous record carried.
        previous_visit: Option<DateTime<Utc>>,
    },
    /// The stored cookie could not be read.
    Unreadable { reason: String },
}

impl VisitOutcome {
    /// Stable label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            VisitOutcome::CookiesDisabled => "cookies_disabled",
            VisitOutcome::Recorded { .. } => "recorded",
            VisitOutcome::Unreadable { .. } => "unreadable",
        }
    }

    /// Visit count after this visit, if recorded.
    pub fn count(&self) -> Option<u64> {
        match self {
            VisitOutcome::Recorded { current, .. } => Some(current.count),
            _ => None,
        }
    }

    /// Text for the `visit-count` row.
    pub fn count_text(&self) -> String {
        match self {
            VisitOutcome::CookiesDisabled => COOKIES_DISABLED.to_string(),
            VisitOutcome::Recorded { current, .. } => count_text(current.count),
            VisitOutcome::Unreadable { .. } => UNREADABLE_COUNT.to_string(),
        }
    }

    /// Text for the `last-visit` row, in the local time zone.
    pub fn last_visit_text(&self) -> String {
        self.last_visit_text_in(&Local)
    }

    /// Text for the `last-visit` row, in `tz`.
    pub fn last_visit_text_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        match self {
            VisitOutcome::CookiesDisabled => COOKIES_DISABLED.to_string(),
            VisitOutcome::Recorded {
                previous_visit: Some(ts),
                ..
            } => ts.with_timezone(tz).format(LOCALE_DATETIME_FORMAT).to_string(),
            VisitOutcome::Recorded { .. } => FIRST_VISIT.to_string(),
            VisitOutcome::Unreadable { .. } => UNREADABLE_HINT.to_string(),
        }
    }
}

/// `1 time`, `2 times`, ...
pub fn count_text(count: u64) -> String {
    format!("{} time{}", count, if count == 1 { "" } else { "s" })
}
