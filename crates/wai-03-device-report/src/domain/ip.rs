//! Public IP lookup record.

use serde::{Deserialize, Deserializer};
use shared_types::{DisplaySurface, FieldId};

pub const UNAVAILABLE: &str = "Unavailable";
pub const LOCATION_LOOKUP_FAILED: &str = "Unable to fetch IP-based location";

/// Response body of an ipapi.co style JSON lookup. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IpLookup {
    #[serde(default, deserialize_with = "lenient_string")]
    pub ip: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub country_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub postal: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub org: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub asn: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub hostname: Option<String>,
    /// Set by the service when it refuses the request (rate limits).
    #[serde(default)]
    pub error: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub reason: Option<String>,
}

/// Accept strings, numbers and null; treat empty strings as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

impl IpLookup {
    /// `city, region, country` from whichever parts exist, or `Unavailable`.
    pub fn location(&self) -> String {
        let parts: Vec<&str> = [
            self.city.as_deref(),
            self.region.as_deref(),
            self.country_name.as_deref().or(self.country.as_deref()),
        ]
        .into_iter()
        .flatten()
        .collect();

        if parts.is_empty() {
            UNAVAILABLE.to_string()
        } else {
            parts.join(", ")
        }
    }

    /// Location with the postal code appended when known.
    pub fn location_with_postal(&self) -> String {
        match &self.postal {
            Some(postal) => format!("{} {}", self.location(), postal),
            None => self.location(),
        }
    }

    /// Organisation name, falling back to the AS number.
    pub fn network(&self) -> &str {
        self.org
            .as_deref()
            .or(self.asn.as_deref())
            .unwrap_or(UNAVAILABLE)
    }

    /// Write the `ip`, `ip-location`, `asn` and `hostname` rows.
    pub fn report(&self, display: &dyn DisplaySurface) {
        display.set_status(FieldId::Ip, self.ip.as_deref().unwrap_or(UNAVAILABLE));
        display.set_status(FieldId::IpLocation, &self.location_with_postal());
        display.set_status(FieldId::Asn, self.network());
        display.set_status(
            FieldId::Hostname,
            self.hostname.as_deref().unwrap_or(UNAVAILABLE),
        );
    }
}

/// Rows written when the lookup fails.
pub fn report_ip_failure(display: &dyn DisplaySurface) {
    display.set_status(FieldId::Ip, UNAVAILABLE);
    display.set_status(FieldId::IpLocation, LOCATION_LOOKUP_FAILED);
    display.set_status(FieldId::Asn, UNAVAILABLE);
    display.set_status(FieldId::Hostname, UNAVAILABLE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::RecordingDisplay;

    fn parse(json: &str) -> IpLookup {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_full_record() {
        let lookup = parse(
            r#"{"ip":"203.0.113.7","city":"Lisbon","region":"Lisbon","country_name":"Portugal",
                "country":"PT","postal":"1000-001","org":"Example Telecom","asn":"AS64500",
                "hostname":"host.example.net"}"#,
        );
        let display = RecordingDisplay::new();
        lookup.report(&display);

        assert_eq!(display.latest(FieldId::Ip).as_deref(), Some("203.0.113.7"));
        assert_eq!(
            display.latest(FieldId::IpLocation).as_deref(),
            Some("Lisbon, Lisbon, Portugal 1000-001")
        );
        assert_eq!(display.latest(FieldId::Asn).as_deref(), Some("Example Telecom"));
        assert_eq!(
            display.latest(FieldId::Hostname).as_deref(),
            Some("host.example.net")
        );
    }

    #[test]
    fn test_partial_location_and_fallbacks() {
        let lookup = parse(r#"{"ip":"198.51.100.1","country":"DE","asn":"AS64501","postal":null}"#);
        assert_eq!(lookup.location_with_postal(), "DE");
        assert_eq!(lookup.network(), "AS64501");
    }

    #[test]
    fn test_empty_location_keeps_postal() {
        let lookup = parse(r#"{"city":"","postal":12345}"#);
        assert_eq!(lookup.location(), "Unavailable");
        assert_eq!(lookup.location_with_postal(), "Unavailable 12345");
    }

    #[test]
    fn test_rate_limited_body_renders_as_unavailable() {
        let lookup = parse(r#"{"error":true,"reason":"RateLimited"}"#);
        assert!(lookup.error);
        let display = RecordingDisplay::new();
        lookup.report(&display);
        assert_eq!(display.latest(FieldId::Ip).as_deref(), Some("Unavailable"));
        assert_eq!(display.latest(FieldId::IpLocation).as_deref(), Some("Unavailable"));
    }

    #[test]
    fn test_failure_rows() {
        let display = RecordingDisplay::new();
        report_ip_failure(&display);
        assert_eq!(display.len(), 4);
        assert_eq!(
            display.latest(FieldId::IpLocation).as_deref(),
            Some("Unable to fetch IP-based location")
        );
    }
}
