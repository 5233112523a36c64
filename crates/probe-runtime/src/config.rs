//! # Runtime Configuration
//!
//! Unified configuration for every subsystem the `whoami` binary wires up.
//!
//! Values are layered: defaults, then `WAI_*` environment variables
//! ([`load_config_from`]), then command-line flags (`cli::Args::apply`).
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `WAI_TIMEOUT_MS` | `5000` | Local discovery timeout |
//! | `WAI_COOKIE_FILE` | `$HOME/.whoami-cookies` | Cookie jar file |
//! | `WAI_COOKIE_NAME` | `whoami_visit` | Visit cookie name |
//! | `WAI_IP_LOOKUP_URL` | `https://ipapi.co/json/` | Public IP service |
//! | `WAI_NO_IP_LOOKUP` | unset | Skip the public IP lookup |
//! | `WAI_LATENCY_URL` | unset | Page fetched to measure latency |
//! | `WAI_INCLUDE_LOOPBACK` | unset | Report loopback interfaces as local addresses |

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};
use wai_01_local_discovery::DiscoveryConfig;
use wai_02_visit_counter::{COOKIE_MAX_AGE_SECS, COOKIE_NAME};
use wai_03_device_report::{DEFAULT_IP_LOOKUP_URL, GEOLOCATION_TIMEOUT_MS};

/// Name of the jar file created under `$HOME` when no path is configured.
pub const DEFAULT_COOKIE_FILE: &str = ".whoami-cookies";

/// Complete runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    /// Local address discovery (wai-01).
    pub discovery: DiscoveryConfig,
    /// Report loopback interfaces alongside the others.
    pub include_loopback: bool,
    /// Visit counter (wai-02).
    pub visit: VisitConfig,
    /// Device report (wai-03).
    pub report: ReportConfig,
    /// How the finished report is printed.
    pub output: OutputConfig,
}

impl RuntimeConfig {
    /// Reject values no subsystem can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.discovery
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.visit.cookie_name.trim().is_empty() {
            return Err(ConfigError::EmptyCookieName);
        }
        if !is_cookie_token(&self.visit.cookie_name) {
            return Err(ConfigError::InvalidCookieName(self.visit.cookie_name.clone()));
        }
        if self.visit.max_age_secs <= 0 {
            return Err(ConfigError::Invalid(
                "cookie max-age must be positive".to_string(),
            ));
        }
        if self.report.ip_lookup_url.as_deref() == Some("") {
            return Err(ConfigError::Invalid(
                "IP lookup URL must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The visit cookie needs a name.
    #[error("visit cookie name must not be empty")]
    EmptyCookieName,

    /// The visit cookie name would not survive a `Set-Cookie` line.
    #[error("visit cookie name {0:?} contains separators or control characters")]
    InvalidCookieName(String),

    /// Any other rejected value.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Visit counter configuration.
#[derive(Debug, Clone)]
pub struct VisitConfig {
    /// Where the cookie jar lives. `None` keeps the jar in memory, so every
    /// run counts as a first visit.
    pub cookie_file: Option<PathBuf>,
    /// Cookie holding the visit record.
    pub cookie_name: String,
    /// Cookie lifetime in seconds.
    pub max_age_secs: i64,
}

impl Default for VisitConfig {
    fn default() -> Self {
        Self {
            cookie_file: None,
            cookie_name: COOKIE_NAME.to_string(),
            max_age_secs: COOKIE_MAX_AGE_SECS,
        }
    }
}

/// Device report configuration.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Public IP service. `None` disables the lookup.
    pub ip_lookup_url: Option<String>,
    /// Page whose fetch time is the latency measurement.
    pub latency_url: Option<String>,
    /// Upper bound on the geolocation request.
    pub geolocation_timeout: Duration,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            ip_lookup_url: Some(DEFAULT_IP_LOOKUP_URL.to_string()),
            latency_url: None,
            geolocation_timeout: Duration::from_millis(GEOLOCATION_TIMEOUT_MS),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Print the rows as a JSON object instead of a table.
    pub json: bool,
    /// Print the Prometheus exposition to stderr after the report.
    pub metrics: bool,
}

/// Load configuration from the process environment.
pub fn load_config() -> RuntimeConfig {
    load_config_from(|key| std::env::var(key).ok())
}

/// Load configuration from an arbitrary variable lookup.
///
/// Unparseable values are logged and ignored.
pub fn load_config_from(get: impl Fn(&str) -> Option<String>) -> RuntimeConfig {
    let mut config = RuntimeConfig::default();

    if let Some(raw) = get("WAI_TIMEOUT_MS") {
        match raw.trim().parse::<u64>() {
            Ok(ms) => config.discovery.timeout = Duration::from_millis(ms),
            Err(_) => warn!(value = %raw, "WAI_TIMEOUT_MS must be a whole number of milliseconds"),
        }
    }

    // Cookie jar: explicit path first, then the home directory
    if let Some(path) = get("WAI_COOKIE_FILE").filter(|p| !p.is_empty()) {
        info!(path = %path, "Loaded cookie jar path from environment");
        config.visit.cookie_file = Some(PathBuf::from(path));
    } else if let Some(home) = get("HOME").filter(|h| !h.is_empty()) {
        config.visit.cookie_file = Some(PathBuf::from(home).join(DEFAULT_COOKIE_FILE));
    }

    if let Some(name) = get("WAI_COOKIE_NAME") {
        config.visit.cookie_name = name;
    }

    if let Some(url) = get("WAI_IP_LOOKUP_URL") {
        config.report.ip_lookup_url = Some(url);
    }
    if is_truthy(get("WAI_NO_IP_LOOKUP")) {
        config.report.ip_lookup_url = None;
    }

    config.include_loopback = is_truthy(get("WAI_INCLUDE_LOOPBACK"));

    if let Some(url) = get("WAI_LATENCY_URL").filter(|u| !u.is_empty()) {
        config.report.latency_url = Some(url);
    }

    config
}

/// Cookie names are HTTP tokens: visible ASCII without separators.
fn is_cookie_token(name: &str) -> bool {
    const SEPARATORS: &str = "()<>@,;:\\\"/[]?={} \t";
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_graphic() && !SEPARATORS.contains(c))
}

fn is_truthy(value: Option<String>) -> bool {
    matches!(
        value.as_deref().map(str::trim),
        Some("1") | Some("true") | Some("yes") | Some("on")
    )
}
