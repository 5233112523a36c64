//! Screen and viewport geometry.

use serde::{Deserialize, Serialize};
use shared_types::{set_value, DisplaySurface, FieldId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenInfo {
    pub width: u32,
    pub height: u32,
    pub avail_width: u32,
    pub avail_height: u32,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Missing or zero means 1.
    pub pixel_ratio: Option<f64>,
    pub color_depth: u32,
}

impl ScreenInfo {
    pub fn screen_text(&self) -> String {
        format!(
            "{} x {} (available {} x {})",
            self.width, self.height, self.avail_width, self.avail_height
        )
    }

    pub fn viewport_text(&self) -> String {
        format!("{} x {}", self.viewport_width, self.viewport_height)
    }

    pub fn pixel_ratio_text(&self) -> String {
        match self.pixel_ratio {
            Some(ratio) if ratio > 0.0 => ratio.to_string(),
            _ => "1".to_string(),
        }
    }

    pub fn color_depth_text(&self) -> String {
        format!("{}-bit", self.color_depth)
    }
}

/// Write the geometry rows. Without a screen every row shows the missing
/// marker.
pub fn report_screen(screen: Option<&ScreenInfo>, display: &dyn DisplaySurface) {
    let rows = [
        (FieldId::Screen, screen.map(ScreenInfo::screen_text)),
        (FieldId::Viewport, screen.map(ScreenInfo::viewport_text)),
        (FieldId::PixelRatio, screen.map(ScreenInfo::pixel_ratio_text)),
        (FieldId::ColorDepth, screen.map(ScreenInfo::color_depth_text)),
    ];
    for (id, text) in rows {
        set_value(display, id, text.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{RecordingDisplay, MISSING_VALUE};

    fn laptop(pixel_ratio: Option<f64>) -> ScreenInfo {
        ScreenInfo {
            width: 1920,
            height: 1080,
            avail_width: 1920,
            avail_height: 1040,
            viewport_width: 1280,
            viewport_height: 720,
            pixel_ratio,
            color_depth: 24,
        }
    }

    #[test]
    fn test_geometry_rows() {
        let display = RecordingDisplay::new();
        report_screen(Some(&laptop(Some(1.5))), &display);

        assert_eq!(
            display.latest(FieldId::Screen).as_deref(),
            Some("1920 x 1080 (available 1920 x 1040)")
        );
        assert_eq!(display.latest(FieldId::Viewport).as_deref(), Some("1280 x 720"));
        assert_eq!(display.latest(FieldId::PixelRatio).as_deref(), Some("1.5"));
        assert_eq!(display.latest(FieldId::ColorDepth).as_deref(), Some("24-bit"));
    }

    #[test]
    fn test_pixel_ratio_defaults_to_one() {
        assert_eq!(laptop(None).pixel_ratio_text(), "1");
        assert_eq!(laptop(Some(0.0)).pixel_ratio_text(), "1");
        assert_eq!(laptop(Some(2.0)).pixel_ratio_text(), "2");
    }

    #[test]
    fn test_missing_screen() {
        let display = RecordingDisplay::new();
        report_screen(None, &display);
        assert_eq!(display.len(), 4);
        assert!(display.writes().iter().all(|(_, text)| text == MISSING_VALUE));
    }
}
