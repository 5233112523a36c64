//! # Whole-Report Flow
//!
//! Drives `ProbeRuntime::run` end to end and checks the final text of every
//! row, plus the ordering constraints between rows.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use probe_runtime::ConsoleDisplay;
    use shared_types::{FieldId, RecordingDisplay, MISSING_VALUE};
    use wai_01_local_discovery::{DiscoveryOutcome, ScriptedPeerConnectionFactory, GATHERING_TEXT};
    use wai_03_device_report::{
        LatencyMeasurement, ReportError, StaticIpLookup, StaticLatencyProbe, MEASURING,
    };

    use crate::integration::fixtures::{lisbon, RuntimeFixture, PAGE_URL};

    fn latest(display: &RecordingDisplay, id: FieldId) -> String {
        display.latest(id).unwrap_or_else(|| panic!("row {} never written", id))
    }

    // =========================================================================
    // FULL HOST
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_full_host_fills_every_row() {
        let runtime = RuntimeFixture::full_host().build();
        let display = RecordingDisplay::new();

        runtime.run(&display).await;

        assert_eq!(display.snapshot().len(), FieldId::ALL.len());

        assert_eq!(latest(&display, FieldId::Ip), "203.0.113.7");
        assert_eq!(
            latest(&display, FieldId::IpLocation),
            "Lisbon, Lisbon, Portugal 1000-001"
        );
        assert_eq!(latest(&display, FieldId::Asn), "Example Telecom");
        assert_eq!(latest(&display, FieldId::Hostname), "host.example.net");

        assert_eq!(
            latest(&display, FieldId::UserAgent),
            "Mozilla/5.0 (X11; Linux x86_64)\nBrands: Chromium 124"
        );
        assert_eq!(latest(&display, FieldId::Platform), "Linux x86 64-bit");
        assert_eq!(latest(&display, FieldId::Languages), "en-US, pt-PT");
        assert_eq!(latest(&display, FieldId::Dnt), "Enabled");
        assert_eq!(latest(&display, FieldId::Cookies), "Yes");
        assert_eq!(latest(&display, FieldId::Cores), "8 logical cores");
        assert_eq!(latest(&display, FieldId::Memory), "8 GB (approx)");
        assert_eq!(latest(&display, FieldId::Touch), "0 touch points");
        assert_eq!(latest(&display, FieldId::Webdriver), "No");

        assert_eq!(
            latest(&display, FieldId::Screen),
            "1920 x 1080 (available 1920 x 1040)"
        );
        assert_eq!(latest(&display, FieldId::Viewport), "1280 x 720");
        assert_eq!(latest(&display, FieldId::PixelRatio), "2");
        assert_eq!(latest(&display, FieldId::ColorDepth), "24-bit");

        assert_eq!(latest(&display, FieldId::LocalTime), "5/1/2024, 2:30:00 PM");
        assert_eq!(latest(&display, FieldId::Timezone), "Europe/Lisbon");
        assert_eq!(latest(&display, FieldId::Referrer), "None");
        assert_eq!(latest(&display, FieldId::PageUrl), PAGE_URL);

        assert_eq!(latest(&display, FieldId::VisitCount), "1 time");
        assert_eq!(latest(&display, FieldId::LastVisit), "This is your first visit");

        assert_eq!(
            latest(&display, FieldId::Connection),
            "Type: 4g • Downlink: 10Mb/s • RTT: 50ms"
        );
        assert_eq!(latest(&display, FieldId::Battery), "80% • Charging • Full in 25 min");

        assert!(latest(&display, FieldId::GeoStatus).starts_with("Location shared at "));
        assert_eq!(latest(&display, FieldId::GeoCoords), "38.72225, -9.13934");
        assert_eq!(latest(&display, FieldId::GeoAccuracy), "12 meters");
        assert_eq!(latest(&display, FieldId::GeoAltitude), "Not provided");

        assert_eq!(latest(&display, FieldId::Latency), "42 ms (page fetch)");
        assert_eq!(
            latest(&display, FieldId::WebrtcIp),
            "Local IPs: 10.0.0.5, 192.168.1.20"
        );
        assert_eq!(
            latest(&display, FieldId::Performance),
            "Render ready in 0 ms • IP lookup in 250 ms"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_rows_precede_their_results() {
        let runtime = RuntimeFixture::full_host().build();
        let display = RecordingDisplay::new();

        let summary = runtime.run(&display).await;

        assert_eq!(
            display.writes_for(FieldId::Latency),
            vec![MEASURING.to_string(), "42 ms (page fetch)".to_string()]
        );
        assert_eq!(
            display.writes_for(FieldId::WebrtcIp),
            vec![
                GATHERING_TEXT.to_string(),
                "Local IPs: 10.0.0.5, 192.168.1.20".to_string()
            ]
        );
        assert_eq!(summary.latency, LatencyMeasurement::PageFetch { millis: 42 });
        assert_eq!(summary.discovery.address_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_performance_waits_for_slow_ip_lookup() {
        let mut fixture = RuntimeFixture::full_host();
        fixture.ip_lookup = Some(StaticIpLookup::ok(lisbon()).with_delay(Duration::from_secs(8)));
        let runtime = fixture.build();
        let display = RecordingDisplay::new();

        let summary = runtime.run(&display).await;

        assert_eq!(summary.ip_lookup_ms, Some(8000));
        let writes = display.writes();
        let performance_at = writes
            .iter()
            .position(|(id, _)| *id == FieldId::Performance)
            .unwrap();
        let ip_at = writes.iter().position(|(id, _)| *id == FieldId::Ip).unwrap();
        let discovery_at = writes
            .iter()
            .rposition(|(id, _)| *id == FieldId::WebrtcIp)
            .unwrap();

        assert_eq!(performance_at, writes.len() - 1);
        assert!(discovery_at < ip_at, "discovery finished before the slow lookup");
    }

    // =========================================================================
    // BARE HOST
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_bare_host_renders_fallbacks() {
        let runtime = RuntimeFixture::bare_host().build();
        let display = RecordingDisplay::new();

        let summary = runtime.run(&display).await;

        assert_eq!(latest(&display, FieldId::Ip), "Unavailable");
        assert_eq!(
            latest(&display, FieldId::IpLocation),
            "Unable to fetch IP-based location"
        );
        assert_eq!(latest(&display, FieldId::Screen), MISSING_VALUE);
        assert_eq!(latest(&display, FieldId::Connection), "Not exposed");
        assert_eq!(
            latest(&display, FieldId::Battery),
            "Battery information not exposed"
        );
        assert_eq!(latest(&display, FieldId::GeoStatus), "Geolocation not supported");
        assert_eq!(display.latest(FieldId::GeoCoords), None);
        assert_eq!(
            latest(&display, FieldId::Latency),
            "Unable to measure (blocked by network or CORS)"
        );
        assert_eq!(
            display.writes_for(FieldId::WebrtcIp),
            vec!["WebRTC not supported in this browser".to_string()]
        );
        assert_eq!(latest(&display, FieldId::Performance), "Render ready in 0 ms");

        assert_eq!(summary.discovery, DiscoveryOutcome::Unsupported);
        assert_eq!(summary.ip_lookup_ms, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_falls_back_to_network_rtt() {
        let mut fixture = RuntimeFixture::full_host();
        fixture.latency = Some(StaticLatencyProbe::failing(
            ReportError::Transport("blocked".to_string()),
        ));
        let runtime = fixture.build();
        let display = RecordingDisplay::new();

        let summary = runtime.run(&display).await;

        assert_eq!(summary.latency, LatencyMeasurement::Estimated { rtt_ms: 50 });
        assert_eq!(
            latest(&display, FieldId::Latency),
            "Estimated 50 ms (network API)"
        );
    }

    // =========================================================================
    // LOCAL DISCOVERY INSIDE THE REPORT
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_discovery_timeout_reports_partial_addresses() {
        let mut fixture = RuntimeFixture::full_host();
        fixture.factory = ScriptedPeerConnectionFactory::new().address_at(100, "172.16.0.2");
        let handle = fixture.factory.handle();
        let runtime = fixture.build();
        let display = RecordingDisplay::new();

        let summary = runtime.run(&display).await;

        assert!(summary.discovery.is_timeout());
        assert_eq!(latest(&display, FieldId::WebrtcIp), "Local IPs: 172.16.0.2");
        assert_eq!(handle.close_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_discovery_failure_leaves_other_rows_intact() {
        let mut fixture = RuntimeFixture::full_host();
        fixture.factory = ScriptedPeerConnectionFactory::new()
            .fail_at(wai_01_local_discovery::NegotiationStage::CreateOffer);
        let runtime = fixture.build();
        let display = RecordingDisplay::new();

        let summary = runtime.run(&display).await;

        assert_eq!(summary.discovery, DiscoveryOutcome::Failed);
        assert_eq!(
            latest(&display, FieldId::WebrtcIp),
            "WebRTC test failed or was blocked"
        );
        assert_eq!(latest(&display, FieldId::Ip), "203.0.113.7");
        assert_eq!(latest(&display, FieldId::VisitCount), "1 time");
    }

    // =========================================================================
    // CONSOLE RENDERING
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_console_display_prints_final_rows_in_page_order() {
        let runtime = RuntimeFixture::full_host().build();
        let display = ConsoleDisplay::new();

        runtime.run(&display).await;

        let mut out = Vec::new();
        display.render_table(&mut out).unwrap();
        let table = String::from_utf8(out).unwrap();

        assert!(!table.contains(GATHERING_TEXT));
        assert!(!table.contains(MEASURING));
        let ip = table.find("Public IP").unwrap();
        let webrtc = table.find("WebRTC local IPs").unwrap();
        let performance = table.find("Performance").unwrap();
        assert!(ip < webrtc && webrtc < performance);

        let json: serde_json::Value = display.to_json();
        let rows = json.as_object().unwrap();
        assert!(rows.values().all(serde_json::Value::is_string));
        assert!(rows.contains_key("performance"));
        assert_eq!(json["webrtc-ip"], "Local IPs: 10.0.0.5, 192.168.1.20");
        assert_eq!(json["visit-count"], "1 time");
    }
}
