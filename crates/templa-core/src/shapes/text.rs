//! Text elements.

use super::{CornerRadii, Element, ElementKind, ElementUpdate, GeometryStrategy};
use crate::branding::{BrandingMode, lenient_branding_mode};
use crate::config::EditorConfig;
use crate::interaction::TransformInput;
use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Text-specific attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextProps {
    pub text: String,
    pub font_size: f64,
    #[serde(rename = "fontSize_percent")]
    pub font_size_percent: f64,
    /// Font family literal or branding key.
    pub font_family: String,
    pub font_variant: String,
    pub font_weight: String,
    pub font_style: String,
    #[serde(
        deserialize_with = "lenient_branding_mode",
        skip_serializing_if = "Option::is_none"
    )]
    pub font_branding_type: Option<BrandingMode>,
    /// Background box color; `None` draws no box.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    pub padding: f64,
    pub background_stroke: String,
    pub background_stroke_width: f64,
    pub align: TextAlign,
    pub border_radius: CornerRadii,
    /// Free-form template labels.
    #[serde(alias = "toi_labels")]
    pub labels: String,
}

impl TextProps {
    pub const DEFAULT_TEXT: &'static str = "Edit Me Now...";
    pub const DEFAULT_COLOR: &'static str = "#524C4C";
    pub const DEFAULT_FONT: &'static str = "Arial";
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            text: Self::DEFAULT_TEXT.to_string(),
            font_size: 20.0,
            font_size_percent: 0.0,
            font_family: Self::DEFAULT_FONT.to_string(),
            font_variant: "regular".to_string(),
            font_weight: "normal".to_string(),
            font_style: "normal".to_string(),
            font_branding_type: Some(BrandingMode::Fixed),
            background: Some("#fff".to_string()),
            padding: 8.0,
            background_stroke: "#A3A3A3".to_string(),
            background_stroke_width: 0.0,
            align: TextAlign::Left,
            border_radius: CornerRadii::uniform(4.0),
            labels: String::new(),
        }
    }
}

/// Text is anchored at its glyph box origin; the background box extends
/// `padding` beyond it on every side.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextGeometry;

fn padding(element: &Element) -> f64 {
    match &element.kind {
        ElementKind::Text(text) if text.background.is_some() => text.padding,
        _ => 0.0,
    }
}

impl GeometryStrategy for TextGeometry {
    fn bounds(&self, element: &Element) -> Rect {
        element.layout_rect().inflate(padding(element), padding(element))
    }

    fn anchor_offset(&self, element: &Element) -> Vec2 {
        let pad = padding(element);
        Vec2::new(pad, pad)
    }

    /// Only the wrap width follows the gesture; height is re-measured by the
    /// adapter and the box never shrinks below the configured minimum.
    fn resize(
        &self,
        element: &Element,
        input: &TransformInput,
        config: &EditorConfig,
    ) -> ElementUpdate {
        let width = (element.width * input.scale_x).abs().max(config.min_text_width);
        let mut update = ElementUpdate::default().position(input.anchor.x, input.anchor.y);
        update.width = Some(width);
        update
    }
}
