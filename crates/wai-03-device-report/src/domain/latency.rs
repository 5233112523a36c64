//! Latency measurement.

use serde::{Deserialize, Serialize};

pub const MEASURING: &str = "Measuring\u{2026}";
pub const LATENCY_UNMEASURABLE: &str = "Unable to measure (blocked by network or CORS)";

/// Cache-busting probe URL for `page_url`: fragment dropped, `ping=<nonce>`
/// appended with `?` or `&` as appropriate.
pub fn ping_target(page_url: &str, nonce: i64) -> String {
    let base = page_url.split('#').next().unwrap_or_default();
    let joiner = if base.contains('?') { '&' } else { '?' };
    format!("{}{}ping={}", base, joiner, nonce)
}

/// How the latency row was filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum LatencyMeasurement {
    /// A fetch of the page completed.
    PageFetch { millis: u64 },
    /// The fetch failed; the network hint supplied an RTT.
    Estimated { rtt_ms: u32 },
    /// Nothing to report.
    Unmeasurable,
}

impl LatencyMeasurement {
    /// Fallback used when the probe fails.
    pub fn from_failure(rtt_hint: Option<u32>) -> Self {
        match rtt_hint {
            Some(rtt_ms) => LatencyMeasurement::Estimated { rtt_ms },
            None => LatencyMeasurement::Unmeasurable,
        }
    }

    pub fn text(&self) -> String {
        match self {
            LatencyMeasurement::PageFetch { millis } => format!("{} ms (page fetch)", millis),
            LatencyMeasurement::Estimated { rtt_ms } => {
                format!("Estimated {} ms (network API)", rtt_ms)
            }
            LatencyMeasurement::Unmeasurable => LATENCY_UNMEASURABLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_target() {
        assert_eq!(
            ping_target("https://whoami.example/", 1700),
            "https://whoami.example/?ping=1700"
        );
        assert_eq!(
            ping_target("https://whoami.example/?lang=pt#top", 5),
            "https://whoami.example/?lang=pt&ping=5"
        );
        assert_eq!(
            ping_target("https://whoami.example/#a?b", 9),
            "https://whoami.example/?ping=9"
        );
    }

    #[test]
    fn test_texts() {
        assert_eq!(
            LatencyMeasurement::PageFetch { millis: 42 }.text(),
            "42 ms (page fetch)"
        );
        assert_eq!(
            LatencyMeasurement::from_failure(Some(150)).text(),
            "Estimated 150 ms (network API)"
        );
        assert_eq!(
            LatencyMeasurement::from_failure(None).text(),
            LATENCY_UNMEASURABLE
        );
    }
}
