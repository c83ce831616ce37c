//! Canvas-relative coordinate conversion.
//!
//! Every element stores absolute pixel geometry plus a redundant fractional
//! copy relative to the stage, so a layout can be replayed on another stage
//! size.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Default stage edge length in pixels.
pub const DEFAULT_STAGE_SIZE: f64 = 1080.0;

/// Convert an absolute value into a fraction of `total`.
///
/// No clamping is performed; callers guarantee `total > 0`.
pub fn to_percent(value: f64, total: f64) -> f64 {
    value / total
}

/// Convert a fraction of `total` back into an absolute value.
pub fn from_percent(fraction: f64, total: f64) -> f64 {
    fraction * total
}

/// Express a font size relative to the mean stage dimension.
pub fn to_percent_font_size(px: f64, stage_width: f64, stage_height: f64) -> f64 {
    px / ((stage_width + stage_height) / 2.0)
}

/// Inverse of [`to_percent_font_size`].
pub fn from_percent_font_size(fraction: f64, stage_width: f64, stage_height: f64) -> f64 {
    fraction * ((stage_width + stage_height) / 2.0)
}

/// Nominal stage aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    /// Square 1080×1080 stage.
    #[default]
    #[serde(rename = "1:1")]
    Square,
    /// Portrait 1080×1920 stage.
    #[serde(rename = "9:16")]
    Portrait,
}

impl AspectRatio {
    /// Stage size conventionally paired with this ratio.
    pub fn stage(self) -> Stage {
        match self {
            AspectRatio::Square => Stage::new(DEFAULT_STAGE_SIZE, DEFAULT_STAGE_SIZE),
            AspectRatio::Portrait => Stage::new(DEFAULT_STAGE_SIZE, 1920.0),
        }
    }

    /// Tag used in the serialized scene format.
    pub fn tag(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "9:16",
        }
    }
}

/// Fixed-size canvas dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub width: f64,
    pub height: f64,
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(DEFAULT_STAGE_SIZE, DEFAULT_STAGE_SIZE)
    }
}

impl Stage {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Fractional copy of an element's box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PercentLayout {
    #[serde(rename = "x_percent", default)]
    pub x: f64,
    #[serde(rename = "y_percent", default)]
    pub y: f64,
    #[serde(rename = "width_percent", default)]
    pub width: f64,
    #[serde(rename = "height_percent", default)]
    pub height: f64,
}

impl PercentLayout {
    /// Compute the fractional layout of `rect` (origin + size) on `stage`.
    pub fn from_rect(rect: Rect, stage: Stage) -> Self {
        Self {
            x: to_percent(rect.x0, stage.width),
            y: to_percent(rect.y0, stage.height),
            width: to_percent(rect.width(), stage.width),
            height: to_percent(rect.height(), stage.height),
        }
    }

    /// Reconstruct absolute geometry on `stage`.
    pub fn to_rect(&self, stage: Stage) -> Rect {
        Rect::from_origin_size(
            Point::new(from_percent(self.x, stage.width), from_percent(self.y, stage.height)),
            Size::new(
                from_percent(self.width, stage.width),
                from_percent(self.height, stage.height),
            ),
        )
    }
}

/// Check two floats for equality within a pixel-scale tolerance.
pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_percent() {
        assert!((to_percent(540.0, 1080.0) - 0.5).abs() < f64::EPSILON);
        assert!((to_percent(0.0, 1080.0)).abs() < f64::EPSILON);
        // No clamping
        assert!((to_percent(2160.0, 1080.0) - 2.0).abs() < f64::EPSILON);
        assert!((to_percent(-108.0, 1080.0) + 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_percent_layout_round_trip() {
        let stage = Stage::new(1080.0, 1920.0);
        let rect = Rect::from_origin_size(Point::new(123.5, 77.25), Size::new(150.0, 100.0));
        let layout = PercentLayout::from_rect(rect, stage);
        let back = layout.to_rect(stage);
        assert!((back.x0 - rect.x0).abs() < 1e-9);
        assert!((back.y0 - rect.y0).abs() < 1e-9);
        assert!((back.width() - rect.width()).abs() < 1e-9);
        assert!((back.height() - rect.height()).abs() < 1e-9);
    }

    #[test]
    fn test_replay_on_larger_stage() {
        let small = Stage::new(540.0, 540.0);
        let large = Stage::new(1080.0, 1080.0);
        let rect = Rect::new(54.0, 108.0, 108.0, 216.0);
        let replayed = PercentLayout::from_rect(rect, small).to_rect(large);
        assert!((replayed.x0 - 108.0).abs() < 1e-9);
        assert!((replayed.y1 - 432.0).abs() < 1e-9);
    }

    #[test]
    fn test_font_size_percent() {
        let fraction = to_percent_font_size(20.0, 1080.0, 1080.0);
        assert!((fraction - 20.0 / 1080.0).abs() < 1e-12);
        assert!((from_percent_font_size(fraction, 1080.0, 1080.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_aspect_ratio_serde() {
        let json = serde_json::to_string(&AspectRatio::Portrait).unwrap();
        assert_eq!(json, "\"9:16\"");
        let parsed: AspectRatio = serde_json::from_str("\"1:1\"").unwrap();
        assert_eq!(parsed, AspectRatio::Square);
        assert_eq!(AspectRatio::Portrait.stage(), Stage::new(1080.0, 1920.0));
    }
}
