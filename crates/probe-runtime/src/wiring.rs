//! Native adapter wiring for the `whoami` binary.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use wai_01_local_discovery::{HostInterfaceFactory, LocalAddressDiscovery};
use wai_02_visit_counter::{
    CookieJar, FileCookieJar, MemoryCookieJar, SystemClock, VisitCounter,
};
use wai_03_device_report::{DeviceReporter, HttpIpLookup, HttpLatencyProbe, NativeHostFacts};

use crate::config::RuntimeConfig;
use crate::runtime::ProbeRuntime;

/// Build a runtime backed by the host: interface enumeration, a cookie jar
/// file, process facts and reqwest clients.
pub fn build_native_runtime(config: &RuntimeConfig) -> Result<ProbeRuntime> {
    config.validate().context("Invalid runtime configuration")?;

    let jar: Arc<dyn CookieJar> = match &config.visit.cookie_file {
        Some(path) => {
            info!(path = %path.display(), "Using file-backed cookie jar");
            Arc::new(FileCookieJar::new(path.clone()))
        }
        None => {
            info!("No cookie jar file; visits are not remembered between runs");
            Arc::new(MemoryCookieJar::new())
        }
    };
    let visits = VisitCounter::new(jar, Arc::new(SystemClock))
        .with_cookie_name(config.visit.cookie_name.clone())
        .with_max_age(config.visit.max_age_secs);

    let facts = NativeHostFacts::new(true, config.report.latency_url.clone());
    let mut reporter = DeviceReporter::new(Arc::new(facts))
        .with_geolocation_timeout(config.report.geolocation_timeout);

    if let Some(url) = &config.report.ip_lookup_url {
        let lookup = HttpIpLookup::with_url(url.clone())
            .context("Failed to build public IP lookup client")?;
        reporter = reporter.with_ip_lookup(Arc::new(lookup));
    }
    if config.report.latency_url.is_some() {
        let probe = HttpLatencyProbe::new().context("Failed to build latency probe client")?;
        reporter = reporter.with_latency_probe(Arc::new(probe));
    }

    let interfaces = HostInterfaceFactory::new().with_loopback(config.include_loopback);
    let discovery = LocalAddressDiscovery::new(
        Arc::new(interfaces),
        config.discovery.clone(),
    );

    Ok(ProbeRuntime::new(
        Arc::new(reporter),
        Arc::new(visits),
        Arc::new(discovery),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = RuntimeConfig::default();
        config.discovery.timeout = Duration::ZERO;
        assert!(build_native_runtime(&config).is_err());
    }

    #[tokio::test]
    async fn test_builds_with_lookups_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = RuntimeConfig::default();
        config.report.ip_lookup_url = None;
        config.visit.cookie_file = Some(dir.path().join("jar"));
        assert!(build_native_runtime(&config).is_ok());
    }
}
