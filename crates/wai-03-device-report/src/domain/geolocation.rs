//! Geolocation fix.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{CapabilityError, DisplaySurface, FieldId, LOCALE_TIME_FORMAT};

pub const GEOLOCATION_UNSUPPORTED: &str = "Geolocation not supported";
pub const ALTITUDE_NOT_PROVIDED: &str = "Not provided";

/// How long a position request may take before it counts as failed.
pub const GEOLOCATION_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
    /// Meters.
    pub accuracy: f64,
    /// Meters above the ellipsoid.
    pub altitude: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl GeoPosition {
    pub fn coords_text(&self) -> String {
        format!("{:.5}, {:.5}", self.latitude, self.longitude)
    }

    pub fn accuracy_text(&self) -> String {
        format!("{} meters", self.accuracy.round() as i64)
    }

    pub fn altitude_text(&self) -> String {
        match self.altitude {
            Some(altitude) => format!("{:.2} meters", altitude),
            None => ALTITUDE_NOT_PROVIDED.to_string(),
        }
    }
}

/// Write the geolocation rows in the local zone.
pub fn report_geolocation(
    position: &Result<GeoPosition, CapabilityError>,
    display: &dyn DisplaySurface,
) {
    report_geolocation_in(position, display, &Local)
}

/// Write the geolocation rows, rendering the fix time in `tz`.
///
/// Only `geo-status` is written when there is no fix.
pub fn report_geolocation_in<Tz>(
    position: &Result<GeoPosition, CapabilityError>,
    display: &dyn DisplaySurface,
    tz: &Tz,
) where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match position {
        Ok(fix) => {
            let shared_at = fix.timestamp.with_timezone(tz).format(LOCALE_TIME_FORMAT);
            display.set_status(FieldId::GeoStatus, &format!("Location shared at {}", shared_at));
            display.set_status(FieldId::GeoCoords, &fix.coords_text());
            display.set_status(FieldId::GeoAccuracy, &fix.accuracy_text());
            display.set_status(FieldId::GeoAltitude, &fix.altitude_text());
        }
        Err(CapabilityError::Absent(_)) => {
            display.set_status(FieldId::GeoStatus, GEOLOCATION_UNSUPPORTED);
        }
        Err(CapabilityError::Blocked(message)) | Err(CapabilityError::Failed(message)) => {
            display.set_status(
                FieldId::GeoStatus,
                &format!("Denied or unavailable ({})", message),
            );
        }
    }
}
