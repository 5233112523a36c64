//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for logging and metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name stamped on every log line
    pub service_name: String,

    /// Log filter directive (trace, debug, info, warn, error, or a full
    /// `EnvFilter` expression)
    pub log_level: String,

    /// Whether to write logs at all
    pub console_output: bool,

    /// Whether to emit JSON lines instead of the human format
    pub json_logs: bool,

    /// Whether the human format may use colour
    pub ansi: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "whoami".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            ansi: true,
        }
    }
}

fn truthy(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `WAI_SERVICE_NAME`: Service name (default: whoami)
    /// - `WAI_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `WAI_CONSOLE_OUTPUT`: Enable log output (default: true)
    /// - `WAI_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `NO_COLOR`: Disable colour when set to anything
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading variables through `get`.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            service_name: get("WAI_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: get("WAI_LOG_LEVEL")
                .or_else(|| get("RUST_LOG"))
                .filter(|level| !level.is_empty())
                .unwrap_or(defaults.log_level),

            console_output: get("WAI_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.console_output),

            json_logs: get("WAI_JSON_LOGS")
                .map(|v| truthy(&v))
                .unwrap_or(defaults.json_logs),

            ansi: get("NO_COLOR").is_none(),
        }
    }

    /// Raise the filter to `debug` unless a more specific one was given.
    pub fn verbose(mut self) -> Self {
        if self.log_level == "info" || self.log_level == "warn" || self.log_level == "error" {
            self.log_level = "debug".to_string();
        }
        self
    }
}
