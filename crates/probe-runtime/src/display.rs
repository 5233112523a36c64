//! Console rendering of the report.
//!
//! Rows arrive out of order from concurrent loaders, so the display keeps the
//! latest text per row and prints the table once, in page order.

use std::collections::BTreeMap;
use std::io::{self, Write};

use parking_lot::Mutex;
use shared_types::{DisplaySurface, FieldId};

/// Latest text of every row written so far.
#[derive(Debug, Default)]
pub struct ConsoleDisplay {
    rows: Mutex<BTreeMap<FieldId, String>>,
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text of one row.
    pub fn get(&self, id: FieldId) -> Option<String> {
        self.rows.lock().get(&id).cloned()
    }

    /// Write the rows as an aligned `label  value` table.
    ///
    /// Multi-line values are indented under their first line.
    pub fn render_table(&self, out: &mut impl Write) -> io::Result<()> {
        let rows = self.rows.lock();
        let width = rows.keys().map(|id| id.label().len()).max().unwrap_or(0);

        for (id, text) in rows.iter() {
            let mut lines = text.lines();
            let first = lines.next().unwrap_or_default();
            writeln!(out, "{:<width$}  {}", id.label(), first, width = width)?;
            for line in lines {
                writeln!(out, "{:<width$}  {}", "", line, width = width)?;
            }
        }
        Ok(())
    }

    /// Rows as a JSON object keyed by element id.
    pub fn to_json(&self) -> serde_json::Value {
        let rows = self.rows.lock();
        let map: serde_json::Map<String, serde_json::Value> = rows
            .iter()
            .map(|(id, text)| (id.as_str().to_string(), serde_json::Value::from(text.as_str())))
            .collect();
        serde_json::Value::Object(map)
    }
}

impl DisplaySurface for ConsoleDisplay {
    fn set_status(&self, id: FieldId, text: &str) {
        tracing::trace!(field = id.as_str(), text, "row updated");
        self.rows.lock().insert(id, text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(display: &ConsoleDisplay) -> String {
        let mut out = Vec::new();
        display.render_table(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_table_is_in_page_order_with_latest_text() {
        let display = ConsoleDisplay::new();
        display.set_status(FieldId::WebrtcIp, "Gathering ICE candidates…");
        display.set_status(FieldId::Ip, "203.0.113.7");
        display.set_status(FieldId::WebrtcIp, "Local IPs: 10.0.0.5");

        let table = rendered(&display);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Public IP"));
        assert!(lines[0].ends_with("203.0.113.7"));
        assert!(lines[1].starts_with("WebRTC local IPs"));
        assert!(lines[1].ends_with("Local IPs: 10.0.0.5"));
    }

    #[test]
    fn test_multi_line_values_are_indented() {
        let display = ConsoleDisplay::new();
        display.set_status(FieldId::UserAgent, "probe/1.0\nBrands: probe 1");

        let table = rendered(&display);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "User agent  probe/1.0");
        assert_eq!(lines[1], "            Brands: probe 1");
    }

    #[test]
    fn test_json_is_keyed_by_element_id() {
        let display = ConsoleDisplay::new();
        display.set_status(FieldId::VisitCount, "3 times");
        display.set_status(FieldId::Dnt, "Enabled");

        let json = display.to_json();
        assert_eq!(json["visit-count"], "3 times");
        assert_eq!(json["dnt"], "Enabled");
        assert_eq!(json.as_object().map(|o| o.len()), Some(2));
    }

    #[test]
    fn test_empty_display_renders_nothing() {
        assert_eq!(rendered(&ConsoleDisplay::new()), "");
    }
}
