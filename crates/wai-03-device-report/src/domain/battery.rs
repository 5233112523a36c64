//! Battery status.

use serde::{Deserialize, Serialize};
use shared_types::{CapabilityError, DisplaySurface, FieldId};

use crate::domain::BULLET;

pub const BATTERY_NOT_EXPOSED: &str = "Battery information not exposed";
pub const BATTERY_BLOCKED: &str = "Battery information blocked";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryStatus {
    /// Charge in `0.0..=1.0`.
    pub level: f64,
    pub charging: bool,
    /// Seconds until full; `None` or infinite when unknown.
    pub charging_time_secs: Option<f64>,
    /// Seconds until empty; `None` or infinite when unknown.
    pub discharging_time_secs: Option<f64>,
}

fn known_minutes(secs: Option<f64>) -> Option<i64> {
    secs.filter(|s| s.is_finite() && *s != 0.0)
        .map(|s| (s / 60.0).round() as i64)
}

impl BatteryStatus {
    /// `80% • Charging • Full in 25 min`.
    pub fn text(&self) -> String {
        let mut parts = vec![
            format!("{}%", (self.level * 100.0).round() as i64),
            if self.charging {
                "Charging".to_string()
            } else {
                "Not charging".to_string()
            },
        ];
        if let Some(minutes) = known_minutes(self.charging_time_secs) {
            parts.push(format!("Full in {} min", minutes));
        }
        if let Some(minutes) = known_minutes(self.discharging_time_secs) {
            parts.push(format!("Estimated {} min remaining", minutes));
        }
        parts.join(BULLET)
    }
}

/// Write the `battery` row.
pub fn report_battery(
    battery: &Result<BatteryStatus, CapabilityError>,
    display: &dyn DisplaySurface,
) {
    let text = match battery {
        Ok(status) => status.text(),
        Err(e) if e.is_absent() => BATTERY_NOT_EXPOSED.to_string(),
        Err(_) => BATTERY_BLOCKED.to_string(),
    };
    display.set_status(FieldId::Battery, &text);
}
