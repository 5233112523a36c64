//! Command-line flags. Applied on top of the environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::RuntimeConfig;

/// whoami: show what this machine reveals about itself
#[derive(Parser, Debug, Default)]
#[command(name = "whoami")]
#[command(about = "Report the public IP, host details, visit count and local addresses")]
pub struct Args {
    /// Local address discovery timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Skip the public IP lookup
    #[arg(long)]
    pub no_ip_lookup: bool,

    /// Report loopback interfaces as local addresses
    #[arg(long)]
    pub loopback: bool,

    /// Page fetched to measure latency
    #[arg(long, value_name = "URL")]
    pub latency_url: Option<String>,

    /// Cookie jar file holding the visit record
    #[arg(long, value_name = "PATH")]
    pub cookie_file: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Print Prometheus metrics to stderr after the report
    #[arg(long)]
    pub metrics: bool,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Overwrite the configured values with the flags that were given.
    pub fn apply(&self, config: &mut RuntimeConfig) {
        if let Some(ms) = self.timeout_ms {
            config.discovery.timeout = Duration::from_millis(ms);
        }
        if self.no_ip_lookup {
            config.report.ip_lookup_url = None;
        }
        if let Some(url) = &self.latency_url {
            config.report.latency_url = Some(url.clone());
        }
        if let Some(path) = &self.cookie_file {
            config.visit.cookie_file = Some(path.clone());
        }
        config.include_loopback |= self.loopback;
        config.output.json |= self.json;
        config.output.metrics |= self.metrics;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from([
            "whoami",
            "--timeout-ms",
            "1200",
            "--no-ip-lookup",
            "--latency-url",
            "https://whoami.example/",
            "--cookie-file",
            "/tmp/jar",
            "--json",
            "--loopback",
        ])
        .unwrap();

        let mut config = RuntimeConfig::default();
        args.apply(&mut config);

        assert_eq!(config.discovery.timeout, Duration::from_millis(1200));
        assert_eq!(config.report.ip_lookup_url, None);
        assert_eq!(
            config.report.latency_url.as_deref(),
            Some("https://whoami.example/")
        );
        assert_eq!(config.visit.cookie_file, Some(PathBuf::from("/tmp/jar")));
        assert!(config.output.json);
        assert!(config.include_loopback);
        assert!(!config.output.metrics);
    }

    #[test]
    fn test_no_flags_leave_config_alone() {
        let args = Args::try_parse_from(["whoami"]).unwrap();
        let mut config = RuntimeConfig::default();
        config.visit.cookie_file = Some(PathBuf::from("/home/probe/.whoami-cookies"));
        args.apply(&mut config);

        assert_eq!(config.discovery.timeout, Duration::from_millis(5000));
        assert!(config.report.ip_lookup_url.is_some());
        assert_eq!(
            config.visit.cookie_file,
            Some(PathBuf::from("/home/probe/.whoami-cookies"))
        );
    }

    #[test]
    fn test_rejects_non_numeric_timeout() {
        assert!(Args::try_parse_from(["whoami", "--timeout-ms", "soon"]).is_err());
    }
}
