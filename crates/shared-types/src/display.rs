//! # Display Surface
//!
//! The single write operation subsystems use to publish a row of the report.

use parking_lot::Mutex;

use crate::entities::FieldId;

/// Rendered in place of a value the host did not provide.
pub const MISSING_VALUE: &str = "—";

/// `strftime` pattern for a date and time in the report's locale style,
/// e.g. `5/1/2024, 2:30:00 PM`.
pub const LOCALE_DATETIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Time-only counterpart of [`LOCALE_DATETIME_FORMAT`], e.g. `2:30:00 PM`.
pub const LOCALE_TIME_FORMAT: &str = "%-I:%M:%S %p";

/// Where report rows are written.
///
/// Implementations must be `Send + Sync`: the IP lookup, latency probe and
/// local discovery all finish on their own tasks.
pub trait DisplaySurface: Send + Sync {
    /// Replace the text of one row.
    fn set_status(&self, id: FieldId, text: &str);
}

impl<T: DisplaySurface + ?Sized> DisplaySurface for std::sync::Arc<T> {
    fn set_status(&self, id: FieldId, text: &str) {
        (**self).set_status(id, text)
    }
}

impl<T: DisplaySurface + ?Sized> DisplaySurface for &T {
    fn set_status(&self, id: FieldId, text: &str) {
        (**self).set_status(id, text)
    }
}

/// Write `value`, or [`MISSING_VALUE`] when there is none.
pub fn set_value(display: &dyn DisplaySurface, id: FieldId, value: Option<&str>) {
    display.set_status(id, value.unwrap_or(MISSING_VALUE));
}

/// In-memory display that keeps every write in order.
///
/// Used by tests to assert exactly which rows were written and how often, and
/// by the runtime's `--json` mode to collect the final state.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    writes: Mutex<Vec<(FieldId, String)>>,
}

impl RecordingDisplay {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All writes, oldest first.
    pub fn writes(&self) -> Vec<(FieldId, String)> {
        self.writes.lock().clone()
    }

    /// Writes made to one row, oldest first.
    pub fn writes_for(&self, id: FieldId) -> Vec<String> {
        self.writes
            .lock()
            .iter()
            .filter(|(field, _)| *field == id)
            .map(|(_, text)| text.clone())
            .collect()
    }

    /// Most recent text of a row.
    pub fn latest(&self, id: FieldId) -> Option<String> {
        self.writes
            .lock()
            .iter()
            .rev()
            .find(|(field, _)| *field == id)
            .map(|(_, text)| text.clone())
    }

    /// Final text of every row that was written, in page order.
    pub fn snapshot(&self) -> Vec<(FieldId, String)> {
        FieldId::ALL
            .iter()
            .filter_map(|field| self.latest(*field).map(|text| (*field, text)))
            .collect()
    }

    /// Total number of writes.
    pub fn len(&self) -> usize {
        self.writes.lock().len()
    }

    /// True if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.writes.lock().is_empty()
    }
}

impl DisplaySurface for RecordingDisplay {
    fn set_status(&self, id: FieldId, text: &str) {
        tracing::trace!(field = id.as_str(), text, "display write");
        self.writes.lock().push((id, text.to_string()));
    }
}
