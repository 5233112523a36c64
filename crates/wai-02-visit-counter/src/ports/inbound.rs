//! # Driving Ports (Inbound API)

use shared_types::DisplaySurface;

use crate::domain::VisitOutcome;

/// Primary API for the visit counter.
pub trait VisitCounterApi: Send + Sync {
    /// Read the stored record, increment it and write it back.
    fn record_visit(&self) -> VisitOutcome;

    /// Record a visit and write the `visit-count` and `last-visit` rows.
    fn record_and_report(&self, display: &dyn DisplaySurface) -> VisitOutcome;
}
