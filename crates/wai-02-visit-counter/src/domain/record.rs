//! The persisted visit record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payload stored in the cookie: `{"count": n, "last": "<iso8601>"|null}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    /// Visits so far, this one included once written.
    pub count: u64,
    /// When the previous visit was recorded.
    #[serde(default)]
    pub last: Option<DateTime<Utc>>,
}

impl VisitRecord {
    /// Decode a JSON payload. An empty payload is a fresh record.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        if payload.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(payload)
    }

    /// Encode as compact JSON with millisecond timestamps.
    pub fn to_json(&self) -> String {
        let last = match self.last {
            Some(ts) => serde_json::Value::String(
                ts.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            ),
            None => serde_json::Value::Null,
        };
        serde_json::json!({ "count": self.count, "last": last }).to_string()
    }

    /// The record to store for a visit happening at `now`.
    pub fn next(&self, now: DateTime<Utc>) -> Self {
        Self {
            count: self.count.saturating_add(1),
            last: Some(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_empty_payload_is_fresh() {
        assert_eq!(VisitRecord::from_json("").unwrap(), VisitRecord::default());
    }

    #[test]
    fn test_reads_browser_payload() {
        let record =
            VisitRecord::from_json(r#"{"count":3,"last":"2024-05-01T12:30:00.000Z"}"#).unwrap();
        assert_eq!(record.count, 3);
        assert_eq!(
            record.last,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_null_last() {
        let record = VisitRecord::from_json(r#"{"count":0,"last":null}"#).unwrap();
        assert_eq!(record.last, None);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(VisitRecord::from_json("{not json").is_err());
        assert!(VisitRecord::from_json(r#"{"last":null}"#).is_err());
        assert!(VisitRecord::from_json(r#"{"count":"two"}"#).is_err());
    }

    #[test]
    fn test_next_increments_and_stamps() {
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let next = VisitRecord::default().next(now);
        assert_eq!(next.count, 1);
        assert_eq!(next.to_json(), r#"{"count":1,"last":"2025-01-02T03:04:05.000Z"}"#);
    }
}
