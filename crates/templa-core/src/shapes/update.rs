//! Partial element updates.

use super::{CornerRadii, Element, ElementId, ElementKind, FitMode, TextAlign};
use crate::branding::BrandingMode;
use serde::{Deserialize, Deserializer, Serialize};

/// Shallow-merge patch for an [`Element`].
///
/// Every field is optional; `None` leaves the element untouched. Fields that
/// do not apply to the element's kind are ignored. Derived fractional layout
/// is not patchable: the scene recomputes it after every merge.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// `Some(None)` makes the literal plain again.
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub fill_branding_type: Option<Option<BrandingMode>>,
    /// `Some(None)` makes the literal plain again.
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub stroke_branding_type: Option<Option<BrandingMode>>,

    // Radial geometry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outer_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sides: Option<u32>,

    // Path geometry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer_width: Option<f64>,

    // Box decoration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<CornerRadii>,

    // Text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_variant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub font_branding_type: Option<Option<BrandingMode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<String>,

    // Frame / image / icon
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit_mode: Option<FitMode>,
    /// `Some(None)` clears the binding.
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub frame_id: Option<Option<ElementId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Distinguish an explicit `null` from a missing field.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

impl ElementUpdate {
    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn rotation(mut self, rotation: f64) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    /// Bind (or with `None`, unbind) the fill color to the registry.
    pub fn fill_branding(mut self, mode: Option<BrandingMode>) -> Self {
        self.fill_branding_type = Some(mode);
        self
    }

    pub fn stroke_branding(mut self, mode: Option<BrandingMode>) -> Self {
        self.stroke_branding_type = Some(mode);
        self
    }

    pub fn frame_id(mut self, frame_id: Option<ElementId>) -> Self {
        self.frame_id = Some(frame_id);
        self
    }

    /// Merge this patch onto `element`.
    pub fn apply_to(&self, element: &mut Element) {
        set(&mut element.x, self.x);
        set(&mut element.y, self.y);
        set(&mut element.width, self.width);
        set(&mut element.height, self.height);
        set(&mut element.rotation, self.rotation);
        set(&mut element.visible, self.visible);
        set(&mut element.opacity, self.opacity);
        set_clone(&mut element.fill, &self.fill);
        if let Some(stroke) = &self.stroke {
            element.stroke = Some(stroke.clone());
        }
        set(&mut element.stroke_width, self.stroke_width);
        set(&mut element.fill_branding_type, self.fill_branding_type);
        set(&mut element.stroke_branding_type, self.stroke_branding_type);

        match &mut element.kind {
            ElementKind::Text(text) => {
                set_clone(&mut text.text, &self.text);
                set(&mut text.font_size, self.font_size);
                set_clone(&mut text.font_family, &self.font_family);
                set_clone(&mut text.font_variant, &self.font_variant);
                set_clone(&mut text.font_weight, &self.font_weight);
                set_clone(&mut text.font_style, &self.font_style);
                set(&mut text.font_branding_type, self.font_branding_type);
                if let Some(background) = &self.background {
                    text.background = Some(background.clone());
                }
                set(&mut text.padding, self.padding);
                set_clone(&mut text.background_stroke, &self.background_stroke);
                set(&mut text.background_stroke_width, self.background_stroke_width);
                set(&mut text.align, self.align);
                set(&mut text.border_radius, self.border_radius);
                set_clone(&mut text.labels, &self.labels);
            }
            ElementKind::Frame(frame) => {
                set(&mut frame.corner_radius, self.corner_radius);
                set_clone(&mut frame.dash, &self.dash);
                set_clone(&mut frame.tags, &self.tags);
                set_clone(&mut frame.label, &self.label);
                set(&mut frame.fit_mode, self.fit_mode);
            }
            ElementKind::Image(image) => {
                set(&mut image.fit_mode, self.fit_mode);
                set_clone(&mut image.src, &self.src);
                set_clone(&mut image.frame_id, &self.frame_id);
            }
            ElementKind::Icon { icon_name, color } => {
                set_clone(icon_name, &self.icon_name);
                set_clone(color, &self.color);
            }
            ElementKind::Circle { radius } => set(radius, self.radius),
            ElementKind::Rectangle { corner_radius, border_radius } => {
                set(corner_radius, self.corner_radius);
                if let Some(radii) = self.border_radius {
                    *border_radius = Some(radii);
                }
            }
            ElementKind::Ellipse { radius_x, radius_y } => {
                set(radius_x, self.radius_x);
                set(radius_y, self.radius_y);
            }
            ElementKind::Line { points } | ElementKind::Custom { points } => {
                set_clone(points, &self.points)
            }
            ElementKind::Arrow { points, pointer_length, pointer_width } => {
                set_clone(points, &self.points);
                set(pointer_length, self.pointer_length);
                set(pointer_width, self.pointer_width);
            }
            ElementKind::Star { inner_radius, outer_radius, num_points } => {
                set(inner_radius, self.inner_radius);
                set(outer_radius, self.outer_radius);
                set(num_points, self.num_points);
            }
            ElementKind::Wedge { radius, angle } => {
                set(radius, self.radius);
                set(angle, self.angle);
            }
            ElementKind::Ring { inner_radius, outer_radius } => {
                set(inner_radius, self.inner_radius);
                set(outer_radius, self.outer_radius);
            }
            ElementKind::RegularPolygon { sides, radius } => {
                set(sides, self.sides);
                set(radius, self.radius);
            }
            ElementKind::Arc { inner_radius, outer_radius, angle } => {
                set(inner_radius, self.inner_radius);
                set(outer_radius, self.outer_radius);
                set(angle, self.angle);
            }
            ElementKind::Triangle => {}
        }
    }
}

fn set<T: Copy>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn set_clone<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}
