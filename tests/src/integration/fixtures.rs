//! Builders shared by the integration flows.

use std::sync::Arc;
use std::time::Duration;

use chrono::{FixedOffset, TimeZone, Utc};
use probe_runtime::ProbeRuntime;
use wai_01_local_discovery::{
    DiscoveryConfig, LocalAddressDiscovery, ScriptedPeerConnectionFactory,
};
use wai_02_visit_counter::{Clock, CookieJar, FixedClock, MemoryCookieJar, VisitCounter};
use wai_03_device_report::{
    AgentInfo, BatteryStatus, BrandVersion, ConnectionInfo, DeviceReporter, GeoPosition,
    IpLookup, PlatformHints, ScreenInfo, StaticFacts, StaticIpLookup, StaticLatencyProbe,
    TimeInfo,
};

pub const PAGE_URL: &str = "https://whoami.example/";

/// Every piece of a runtime, replaceable before `build`.
pub struct RuntimeFixture {
    pub facts: StaticFacts,
    pub ip_lookup: Option<StaticIpLookup>,
    pub latency: Option<StaticLatencyProbe>,
    pub factory: ScriptedPeerConnectionFactory,
    pub jar: Arc<dyn CookieJar>,
    pub clock: Arc<dyn Clock>,
    pub discovery_timeout: Duration,
}

impl RuntimeFixture {
    /// A host that exposes every capability.
    pub fn full_host() -> Self {
        Self {
            facts: full_facts(),
            ip_lookup: Some(StaticIpLookup::ok(lisbon()).with_delay(Duration::from_millis(250))),
            latency: Some(StaticLatencyProbe::ok(Duration::from_millis(42))),
            factory: ScriptedPeerConnectionFactory::new()
                .address_at(5, "192.168.1.20")
                .address_at(8, "10.0.0.5")
                .address_at(9, "192.168.1.20")
                .complete_at(30),
            jar: Arc::new(MemoryCookieJar::new()),
            clock: Arc::new(FixedClock::new(Utc::now())),
            discovery_timeout: Duration::from_millis(5000),
        }
    }

    /// A host exposing nothing optional, with no lookups configured.
    pub fn bare_host() -> Self {
        let mut facts = StaticFacts::bare(time_info());
        facts.agent.user_agent = "whoami/0.1".to_string();
        facts.agent.cookies_enabled = true;
        Self {
            facts,
            ip_lookup: None,
            latency: None,
            factory: ScriptedPeerConnectionFactory::unsupported(),
            jar: Arc::new(MemoryCookieJar::new()),
            clock: Arc::new(FixedClock::new(Utc::now())),
            discovery_timeout: Duration::from_millis(5000),
        }
    }

    pub fn build(self) -> ProbeRuntime {
        let mut reporter = DeviceReporter::new(Arc::new(self.facts));
        if let Some(lookup) = self.ip_lookup {
            reporter = reporter.with_ip_lookup(Arc::new(lookup));
        }
        if let Some(latency) = self.latency {
            reporter = reporter.with_latency_probe(Arc::new(latency));
        }
        let visits = VisitCounter::new(self.jar, self.clock);
        let discovery = LocalAddressDiscovery::new(
            Arc::new(self.factory),
            DiscoveryConfig::with_timeout(self.discovery_timeout),
        );
        ProbeRuntime::new(Arc::new(reporter), Arc::new(visits), Arc::new(discovery))
    }
}

pub fn time_info() -> TimeInfo {
    let offset = FixedOffset::east_opt(3600).unwrap();
    TimeInfo {
        local_time: offset.with_ymd_and_hms(2024, 5, 1, 14, 30, 0).unwrap(),
        timezone: Some("Europe/Lisbon".to_string()),
        referrer: None,
        page_url: Some(PAGE_URL.to_string()),
    }
}

pub fn lisbon() -> IpLookup {
    IpLookup {
        ip: Some("203.0.113.7".to_string()),
        city: Some("Lisbon".to_string()),
        region: Some("Lisbon".to_string()),
        country_name: Some("Portugal".to_string()),
        postal: Some("1000-001".to_string()),
        org: Some("Example Telecom".to_string()),
        hostname: Some("host.example.net".to_string()),
        ..IpLookup::default()
    }
}

pub fn full_facts() -> StaticFacts {
    let mut facts = StaticFacts::bare(time_info());
    facts.agent = AgentInfo {
        user_agent: "Mozilla/5.0 (X11; Linux x86_64)".to_string(),
        brands: vec![BrandVersion {
            brand: "Chromium".to_string(),
            version: "124".to_string(),
        }],
        platform: Some("Linux x86_64".to_string()),
        hints: Some(PlatformHints {
            platform: Some("Linux".to_string()),
            architecture: Some("x86".to_string()),
            bitness: Some("64".to_string()),
        }),
        languages: vec!["en-US".to_string(), "pt-PT".to_string()],
        do_not_track: Some("1".to_string()),
        cookies_enabled: true,
        logical_cores: Some(8),
        device_memory_gb: Some(8.0),
        max_touch_points: 0,
        webdriver: false,
    };
    facts.screen = Some(ScreenInfo {
        width: 1920,
        height: 1080,
        avail_width: 1920,
        avail_height: 1040,
        viewport_width: 1280,
        viewport_height: 720,
        pixel_ratio: Some(2.0),
        color_depth: 24,
    });
    facts.connection = Some(ConnectionInfo {
        effective_type: Some("4g".to_string()),
        downlink_mbps: Some(10.0),
        rtt_ms: Some(50),
        save_data: false,
    });
    facts.battery = Ok(BatteryStatus {
        level: 0.8,
        charging: true,
        charging_time_secs: Some(1500.0),
        discharging_time_secs: None,
    });
    facts.geolocation = Ok(GeoPosition {
        latitude: 38.722252,
        longitude: -9.139337,
        accuracy: 12.4,
        altitude: None,
        timestamp: Utc::now(),
    });
    facts.page_url = Some(PAGE_URL.to_string());
    facts
}
