//! # Who-Am-I Telemetry
//!
//! Structured logging and Prometheus metrics for the probe.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wai_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let telemetry = init_telemetry(TelemetryConfig::from_env())?;
//!     // ...
//!     eprintln!("{}", telemetry.metrics().render()?);
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `WAI_LOG_LEVEL` | `info` | Log filter (falls back to `RUST_LOG`) |
//! | `WAI_JSON_LOGS` | `false` | JSON log lines |
//! | `WAI_CONSOLE_OUTPUT` | `true` | Write logs at all |
//! | `WAI_SERVICE_NAME` | `whoami` | Service name on log lines |
//! | `NO_COLOR` | unset | Disable colour |

mod config;
mod logging;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    record_discovery, record_ip_lookup, record_lookup_failure, record_visit, register_metrics,
    MetricsHandle, ADDRESSES_DISCOVERED, DISCOVERY_DURATION, DISCOVERY_OUTCOMES,
    IP_LOOKUP_DURATION, LOOKUP_FAILURES, VISITS_RECORDED,
};
pub use tracing_setup::{env_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// The returned handle gives access to the metrics registry.
pub fn init_telemetry(config: TelemetryConfig) -> Result<Telemetry, TelemetryError> {
    // Metrics first: they do not depend on a subscriber.
    let metrics = register_metrics()?;
    init_logging(&config)?;
    Ok(Telemetry { config, metrics })
}

/// Live telemetry.
pub struct Telemetry {
    config: TelemetryConfig,
    metrics: MetricsHandle,
}

impl Telemetry {
    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }

    pub fn metrics(&self) -> &MetricsHandle {
        &self.metrics
    }
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
