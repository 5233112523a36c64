//! Network information hints.

use serde::{Deserialize, Serialize};
use shared_types::{DisplaySurface, FieldId};

use crate::domain::BULLET;

pub const CONNECTION_NOT_EXPOSED: &str = "Not exposed";

/// Network information as exposed by the host. Zero values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    pub effective_type: Option<String>,
    pub downlink_mbps: Option<f64>,
    pub rtt_ms: Option<u32>,
    pub save_data: bool,
}

impl ConnectionInfo {
    /// `Type: 4g • Downlink: 10Mb/s • RTT: 50ms • Data saver: On`, each part
    /// only when present.
    pub fn text(&self) -> String {
        let mut parts = Vec::new();
        if let Some(kind) = self.effective_type.as_deref().filter(|k| !k.is_empty()) {
            parts.push(format!("Type: {}", kind));
        }
        if let Some(downlink) = self.downlink_mbps.filter(|d| *d > 0.0) {
            parts.push(format!("Downlink: {}Mb/s", downlink));
        }
        if let Some(rtt) = self.rtt_ms.filter(|r| *r > 0) {
            parts.push(format!("RTT: {}ms", rtt));
        }
        if self.save_data {
            parts.push("Data saver: On".to_string());
        }
        parts.join(BULLET)
    }

    /// Round-trip estimate usable when a latency probe fails.
    pub fn rtt_hint(&self) -> Option<u32> {
        self.rtt_ms.filter(|r| *r > 0)
    }
}

/// Write the `connection` row.
pub fn report_connection(connection: Option<&ConnectionInfo>, display: &dyn DisplaySurface) {
    match connection {
        Some(info) => display.set_status(FieldId::Connection, &info.text()),
        None => display.set_status(FieldId::Connection, CONNECTION_NOT_EXPOSED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::RecordingDisplay;

    #[test]
    fn test_all_parts() {
        let info = ConnectionInfo {
            effective_type: Some("4g".into()),
            downlink_mbps: Some(10.0),
            rtt_ms: Some(50),
            save_data: true,
        };
        assert_eq!(
            info.text(),
            "Type: 4g \u{2022} Downlink: 10Mb/s \u{2022} RTT: 50ms \u{2022} Data saver: On"
        );
    }

    #[test]
    fn test_zero_values_are_dropped() {
        let info = ConnectionInfo {
            effective_type: Some("3g".into()),
            downlink_mbps: Some(0.0),
            rtt_ms: Some(0),
            save_data: false,
        };
        assert_eq!(info.text(), "Type: 3g");
        assert_eq!(info.rtt_hint(), None);
    }

    #[test]
    fn test_not_exposed() {
        let display = RecordingDisplay::new();
        report_connection(None, &display);
        assert_eq!(display.latest(FieldId::Connection).as_deref(), Some("Not exposed"));
    }
}
