//! Structured logging helpers.
//!
//! Every event carries a `subsystem` field so log lines from the three
//! subsystems and the runtime can be told apart in JSON output.

/// Log an event with the `subsystem` field set.
///
/// # Example
///
/// ```rust,ignore
/// use wai_telemetry::log_event;
///
/// log_event!(info, "wai-01-local-discovery", "discovery resolved", outcome = "timed_out");
/// ```
#[macro_export]
macro_rules! log_event {
    (info, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            subsystem = %$subsystem,
            $($($field)*,)?
            $msg
        )
    };

    (warn, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::warn!(
            subsystem = %$subsystem,
            $($($field)*,)?
            $msg
        )
    };

    (error, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::error!(
            subsystem = %$subsystem,
            $($($field)*,)?
            $msg
        )
    };

    (debug, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::debug!(
            subsystem = %$subsystem,
            $($($field)*,)?
            $msg
        )
    };
}
