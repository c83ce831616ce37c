//! Backend-neutral drawing instructions.

use kurbo::{Affine, BezPath, Line, Point, Rect};
use peniko::{Color, Fill};
use templa_core::branding::ResolvedFont;
use templa_core::shapes::{ElementId, ElementType, TextAlign};

/// Stroke paint for an outline.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    /// Dash pattern; empty for a solid line.
    pub dash: Vec<f64>,
}

/// Clip region in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub path: BezPath,
    pub transform: Affine,
}

/// Laid-out text payload. Glyph shaping is left to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub font: ResolvedFont,
    pub font_size: f64,
    pub font_weight: String,
    pub font_style: String,
    pub align: TextAlign,
    pub color: Color,
    /// Wrap width in canvas pixels.
    pub width: f64,
}

/// What is painted inside the outline, besides fill and stroke.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Shape,
    Text(TextRun),
    /// Raster image stretched over the outline's bounding box.
    Image { src: String },
    Icon { name: String, tint: Color },
}

/// Everything needed to paint one element.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderInstruction {
    pub id: ElementId,
    pub kind: ElementType,
    /// Local to canvas: translate to the anchor, then rotate.
    pub transform: Affine,
    /// Outline in local coordinates.
    pub path: BezPath,
    pub fill: Option<Color>,
    pub fill_rule: Fill,
    pub stroke: Option<StrokeStyle>,
    pub opacity: f64,
    pub clip: Option<Clip>,
    pub content: Content,
}

impl RenderInstruction {
    /// Axis-aligned bounds in canvas coordinates.
    pub fn canvas_bounds(&self) -> Rect {
        self.transform.transform_rect_bbox(kurbo::Shape::bounding_box(&self.path))
    }
}

/// A guide line overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideInstruction {
    pub line: Line,
    pub color: Color,
    pub dash: Vec<f64>,
    pub label: String,
    pub label_anchor: Point,
}

/// One entry of a recorded display list.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayItem {
    Background { rect: Rect, color: Color },
    Element(RenderInstruction),
    Guide(GuideInstruction),
}
