//! Element definitions for the scene.
//!
//! An [`Element`] is one placed primitive. Attributes shared by every kind
//! live on the element itself; kind-specific geometry lives in
//! [`ElementKind`]. Per-kind geometry behavior (bounding box, drag anchor,
//! resize semantics) is supplied by a [`GeometryStrategy`].

mod frame;
mod image;
mod path;
mod radial;
mod rectangle;
mod text;
mod update;

pub use frame::FrameProps;
pub use image::{FitMode, ImageProps};
pub use path::PathGeometry;
pub use radial::{
    CircleGeometry, EllipseGeometry, PolygonGeometry, RingGeometry, StarGeometry,
    TriangleGeometry, WedgeGeometry,
};
pub use rectangle::BoxGeometry;
pub use text::{TextAlign, TextGeometry, TextProps};
pub use update::ElementUpdate;

use crate::branding::{BrandingMode, lenient_branding_mode};
use crate::config::EditorConfig;
use crate::error::{SceneError, SceneResult};
use crate::geometry::{PercentLayout, Stage, to_percent_font_size};
use crate::interaction::TransformInput;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Default fill for newly created elements.
pub const DEFAULT_FILL: &str = "#00A8E8";
/// Default stroke for newly created shapes.
pub const DEFAULT_STROKE: &str = "#000000";

/// Unique identifier for elements.
///
/// New elements always receive a UUID v4; imported scenes may carry any
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Generate a fresh globally unique identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The closed set of element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementType {
    Text,
    Frame,
    Image,
    Icon,
    Circle,
    Rectangle,
    Ellipse,
    Line,
    Triangle,
    Star,
    Wedge,
    Ring,
    RegularPolygon,
    Arc,
    Arrow,
    Custom,
}

impl ElementType {
    /// Tag used in the serialized scene format.
    pub fn name(self) -> &'static str {
        match self {
            ElementType::Text => "text",
            ElementType::Frame => "frame",
            ElementType::Image => "image",
            ElementType::Icon => "icon",
            ElementType::Circle => "circle",
            ElementType::Rectangle => "rectangle",
            ElementType::Ellipse => "ellipse",
            ElementType::Line => "line",
            ElementType::Triangle => "triangle",
            ElementType::Star => "star",
            ElementType::Wedge => "wedge",
            ElementType::Ring => "ring",
            ElementType::RegularPolygon => "regularPolygon",
            ElementType::Arc => "arc",
            ElementType::Arrow => "arrow",
            ElementType::Custom => "custom",
        }
    }

    /// All element kinds.
    pub fn all() -> &'static [ElementType] {
        &[
            ElementType::Text,
            ElementType::Frame,
            ElementType::Image,
            ElementType::Icon,
            ElementType::Circle,
            ElementType::Rectangle,
            ElementType::Ellipse,
            ElementType::Line,
            ElementType::Triangle,
            ElementType::Star,
            ElementType::Wedge,
            ElementType::Ring,
            ElementType::RegularPolygon,
            ElementType::Arc,
            ElementType::Arrow,
            ElementType::Custom,
        ]
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementType {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementType::all()
            .iter()
            .copied()
            .find(|t| t.name() == s)
            .ok_or_else(|| SceneError::UnsupportedKind(s.to_string()))
    }
}

/// Per-corner radii.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CornerRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

impl CornerRadii {
    pub fn uniform(radius: f64) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    /// Radii in paint order (top-left, top-right, bottom-right, bottom-left).
    pub fn as_array(&self) -> [f64; 4] {
        [self.top_left, self.top_right, self.bottom_right, self.bottom_left]
    }
}

/// Kind tag plus kind-specific geometry.
///
/// Radial kinds store radii; path kinds store a flat `[x0, y0, x1, y1, ...]`
/// point list relative to the element origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ElementKind {
    Text(TextProps),
    Frame(FrameProps),
    Image(ImageProps),
    Icon {
        #[serde(default)]
        icon_name: String,
        #[serde(default = "default_icon_color")]
        color: String,
    },
    Circle {
        #[serde(default)]
        radius: f64,
    },
    Rectangle {
        #[serde(default)]
        corner_radius: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        border_radius: Option<CornerRadii>,
    },
    Ellipse {
        #[serde(default)]
        radius_x: f64,
        #[serde(default)]
        radius_y: f64,
    },
    Line {
        #[serde(default)]
        points: Vec<f64>,
    },
    /// Drawn from the box size alone.
    Triangle,
    Star {
        #[serde(default)]
        inner_radius: f64,
        #[serde(default)]
        outer_radius: f64,
        #[serde(default = "default_star_points")]
        num_points: u32,
    },
    Wedge {
        #[serde(default)]
        radius: f64,
        #[serde(default)]
        angle: f64,
    },
    Ring {
        #[serde(default)]
        inner_radius: f64,
        #[serde(default)]
        outer_radius: f64,
    },
    RegularPolygon {
        #[serde(default = "default_polygon_sides")]
        sides: u32,
        #[serde(default)]
        radius: f64,
    },
    Arc {
        #[serde(default)]
        inner_radius: f64,
        #[serde(default)]
        outer_radius: f64,
        #[serde(default)]
        angle: f64,
    },
    Arrow {
        #[serde(default)]
        points: Vec<f64>,
        #[serde(default = "default_pointer")]
        pointer_length: f64,
        #[serde(default = "default_pointer")]
        pointer_width: f64,
    },
    Custom {
        #[serde(default)]
        points: Vec<f64>,
    },
}

fn default_icon_color() -> String {
    DEFAULT_STROKE.to_string()
}

fn default_star_points() -> u32 {
    5
}

fn default_polygon_sides() -> u32 {
    6
}

fn default_pointer() -> f64 {
    10.0
}

fn default_true() -> bool {
    true
}

fn default_opacity() -> f64 {
    1.0
}

impl ElementKind {
    pub fn element_type(&self) -> ElementType {
        match self {
            ElementKind::Text(_) => ElementType::Text,
            ElementKind::Frame(_) => ElementType::Frame,
            ElementKind::Image(_) => ElementType::Image,
            ElementKind::Icon { .. } => ElementType::Icon,
            ElementKind::Circle { .. } => ElementType::Circle,
            ElementKind::Rectangle { .. } => ElementType::Rectangle,
            ElementKind::Ellipse { .. } => ElementType::Ellipse,
            ElementKind::Line { .. } => ElementType::Line,
            ElementKind::Triangle => ElementType::Triangle,
            ElementKind::Star { .. } => ElementType::Star,
            ElementKind::Wedge { .. } => ElementType::Wedge,
            ElementKind::Ring { .. } => ElementType::Ring,
            ElementKind::RegularPolygon { .. } => ElementType::RegularPolygon,
            ElementKind::Arc { .. } => ElementType::Arc,
            ElementKind::Arrow { .. } => ElementType::Arrow,
            ElementKind::Custom { .. } => ElementType::Custom,
        }
    }

    /// Flat point list for path-like kinds.
    pub fn points(&self) -> Option<&[f64]> {
        match self {
            ElementKind::Line { points }
            | ElementKind::Arrow { points, .. }
            | ElementKind::Custom { points } => Some(points),
            _ => None,
        }
    }

    pub fn points_mut(&mut self) -> Option<&mut Vec<f64>> {
        match self {
            ElementKind::Line { points }
            | ElementKind::Arrow { points, .. }
            | ElementKind::Custom { points } => Some(points),
            _ => None,
        }
    }
}

/// Request for a new element, filled with per-kind defaults by the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementSpec {
    /// Any kind that needs no extra input.
    Kind(ElementType),
    /// Text element with initial content.
    Text { text: String, labels: Option<String> },
    /// Icon element referencing an icon catalog name.
    Icon { icon_name: String },
    /// Image element with a resolved source and natural size.
    Image { src: String, width: f64, height: f64 },
}

impl ElementSpec {
    /// Parse a kind name into a spec.
    pub fn parse(kind: &str) -> SceneResult<Self> {
        Ok(ElementSpec::Kind(kind.parse()?))
    }
}

/// One placed primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// Kind tag plus kind-specific attributes.
    #[serde(flatten)]
    pub kind: ElementKind,
    /// Origin x in canvas pixels.
    #[serde(default)]
    pub x: f64,
    /// Origin y in canvas pixels.
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    /// Derived fractional layout, recomputed on every geometric mutation.
    #[serde(flatten)]
    pub layout: PercentLayout,
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub selected: bool,
    /// Fill color literal or branding key.
    #[serde(default)]
    pub fill: String,
    /// Stroke color literal or branding key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default)]
    pub stroke_width: f64,
    #[serde(
        default,
        deserialize_with = "lenient_branding_mode",
        skip_serializing_if = "Option::is_none"
    )]
    pub fill_branding_type: Option<BrandingMode>,
    #[serde(
        default,
        deserialize_with = "lenient_branding_mode",
        skip_serializing_if = "Option::is_none"
    )]
    pub stroke_branding_type: Option<BrandingMode>,
}

impl Element {
    /// Base element with the attributes shared by every kind.
    fn base(kind: ElementKind) -> Self {
        Self {
            id: ElementId::generate(),
            kind,
            x: 100.0,
            y: 100.0,
            width: 150.0,
            height: 100.0,
            layout: PercentLayout::default(),
            rotation: 0.0,
            visible: true,
            opacity: 1.0,
            selected: false,
            fill: DEFAULT_FILL.to_string(),
            stroke: None,
            stroke_width: 0.0,
            fill_branding_type: Some(BrandingMode::Fixed),
            stroke_branding_type: Some(BrandingMode::Fixed),
        }
    }

    /// Base element carrying the default black 2px stroke.
    fn stroked(kind: ElementKind) -> Self {
        let mut element = Self::base(kind);
        element.stroke = Some(DEFAULT_STROKE.to_string());
        element.stroke_width = 2.0;
        element
    }

    /// Build a new element with per-kind defaults, normalized on `stage`.
    pub fn from_spec(spec: ElementSpec, stage: Stage) -> SceneResult<Self> {
        let mut element = match spec {
            ElementSpec::Text { text, labels } => Self::text(text, labels),
            ElementSpec::Icon { icon_name } => Self::icon(icon_name),
            ElementSpec::Image { src, width, height } => Self::image(src, width, height),
            ElementSpec::Kind(kind) => Self::with_defaults(kind)?,
        };
        element.normalize(stage);
        Ok(element)
    }

    fn with_defaults(kind: ElementType) -> SceneResult<Self> {
        let base_w = 150.0_f64;
        let base_h = 100.0_f64;
        let element = match kind {
            ElementType::Text => Self::text(TextProps::DEFAULT_TEXT.to_string(), None),
            ElementType::Frame => {
                let mut el = Self::base(ElementKind::Frame(FrameProps::default()));
                el.width = 250.0;
                el.height = 200.0;
                el.stroke = Some(FrameProps::DEFAULT_STROKE.to_string());
                el.stroke_width = 1.0;
                el.fill = "transparent".to_string();
                el
            }
            ElementType::Circle => Self::stroked(ElementKind::Circle {
                radius: base_w.min(base_h) / 2.0,
            }),
            ElementType::Rectangle => Self::stroked(ElementKind::Rectangle {
                corner_radius: 0.0,
                border_radius: Some(CornerRadii::default()),
            }),
            ElementType::Ellipse => Self::stroked(ElementKind::Ellipse {
                radius_x: base_w / 2.0,
                radius_y: base_h / 2.0,
            }),
            ElementType::Line => Self::stroked(ElementKind::Line {
                points: vec![0.0, 0.0, base_w, base_h],
            }),
            ElementType::Triangle => Self::stroked(ElementKind::Triangle),
            ElementType::Star => Self::stroked(ElementKind::Star {
                inner_radius: 20.0,
                outer_radius: 50.0,
                num_points: 5,
            }),
            ElementType::RegularPolygon => Self::stroked(ElementKind::RegularPolygon {
                sides: 6,
                radius: base_w.min(base_h) / 2.0,
            }),
            ElementType::Arc => Self::stroked(ElementKind::Arc {
                inner_radius: 20.0,
                outer_radius: 50.0,
                angle: 60.0,
            }),
            ElementType::Wedge => Self::stroked(ElementKind::Wedge {
                radius: base_w.min(base_h) / 2.0,
                angle: 60.0,
            }),
            ElementType::Ring => Self::stroked(ElementKind::Ring {
                inner_radius: 20.0,
                outer_radius: 50.0,
            }),
            ElementType::Arrow => Self::stroked(ElementKind::Arrow {
                points: vec![0.0, 0.0, base_w, base_h],
                pointer_length: 10.0,
                pointer_width: 10.0,
            }),
            ElementType::Custom => Self::stroked(ElementKind::Custom {
                points: vec![0.0, 0.0, base_w / 2.0, base_h, base_w, 0.0],
            }),
            ElementType::Image | ElementType::Icon => {
                return Err(SceneError::UnsupportedKind(format!(
                    "{kind} elements require a source"
                )));
            }
        };
        Ok(element)
    }

    fn text(text: String, labels: Option<String>) -> Self {
        let mut el = Self::base(ElementKind::Text(TextProps {
            text,
            labels: labels.unwrap_or_default(),
            ..TextProps::default()
        }));
        el.fill = TextProps::DEFAULT_COLOR.to_string();
        el
    }

    fn icon(icon_name: String) -> Self {
        let mut el = Self::base(ElementKind::Icon {
            icon_name,
            color: DEFAULT_STROKE.to_string(),
        });
        el.width = 50.0;
        el.height = 50.0;
        el
    }

    fn image(src: String, width: f64, height: f64) -> Self {
        let mut el = Self::base(ElementKind::Image(ImageProps {
            src,
            original_width: width,
            original_height: height,
            fit_mode: FitMode::default(),
            frame_id: None,
        }));
        el.x = 150.0;
        el.y = 150.0;
        el.width = width;
        el.height = height;
        el.fill = String::new();
        el.fill_branding_type = None;
        el.stroke_branding_type = None;
        el
    }

    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    /// Geometry strategy for this element's kind.
    pub fn strategy(&self) -> &'static dyn GeometryStrategy {
        strategy_for(self.element_type())
    }

    /// Rendered bounding box in canvas pixels (unrotated).
    pub fn bounds(&self) -> Rect {
        self.strategy().bounds(self)
    }

    /// Node position the rendering adapter drags.
    pub fn anchor(&self) -> Point {
        self.strategy().anchor(self)
    }

    /// Center of the rendered bounding box.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Stored origin and size as a rectangle.
    pub fn layout_rect(&self) -> Rect {
        Rect::from_origin_size(Point::new(self.x, self.y), Size::new(self.width, self.height))
    }

    pub fn is_frame(&self) -> bool {
        matches!(self.kind, ElementKind::Frame(_))
    }

    pub fn is_image(&self) -> bool {
        matches!(self.kind, ElementKind::Image(_))
    }

    pub fn as_text(&self) -> Option<&TextProps> {
        match &self.kind {
            ElementKind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_frame(&self) -> Option<&FrameProps> {
        match &self.kind {
            ElementKind::Frame(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageProps> {
        match &self.kind {
            ElementKind::Image(i) => Some(i),
            _ => None,
        }
    }

    /// Frame this image is bound to, if any.
    pub fn frame_id(&self) -> Option<&ElementId> {
        self.as_image().and_then(|img| img.frame_id.as_ref())
    }

    /// Re-derive the redundant fields: size for radial and path kinds,
    /// fractional layout for every kind.
    pub fn normalize(&mut self, stage: Stage) {
        if let Some(size) = self.strategy().intrinsic_size(self) {
            self.width = size.width;
            self.height = size.height;
        }
        self.layout = PercentLayout::from_rect(self.layout_rect(), stage);
        if let ElementKind::Text(text) = &mut self.kind {
            text.font_size_percent =
                to_percent_font_size(text.font_size, stage.width, stage.height);
        }
    }

    /// Restore absolute geometry from the fractional layout on `stage`.
    ///
    /// Radial and path geometry is scaled by the same factor as the box.
    pub fn apply_layout(&mut self, stage: Stage) {
        let target = self.layout.to_rect(stage);
        let sx = if self.width > 0.0 { target.width() / self.width } else { 1.0 };
        let sy = if self.height > 0.0 { target.height() / self.height } else { 1.0 };
        self.x = target.x0;
        self.y = target.y0;
        self.width = target.width();
        self.height = target.height();
        scale_kind(&mut self.kind, sx, sy);
        if let ElementKind::Text(text) = &mut self.kind {
            if text.font_size_percent > 0.0 {
                text.font_size = crate::geometry::from_percent_font_size(
                    text.font_size_percent,
                    stage.width,
                    stage.height,
                );
            }
        }
    }
}

/// Scale kind-specific geometry in place.
fn scale_kind(kind: &mut ElementKind, sx: f64, sy: f64) {
    let avg = (sx + sy) / 2.0;
    match kind {
        ElementKind::Circle { radius }
        | ElementKind::Wedge { radius, .. }
        | ElementKind::RegularPolygon { radius, .. } => *radius *= avg,
        ElementKind::Ellipse { radius_x, radius_y } => {
            *radius_x *= sx;
            *radius_y *= sy;
        }
        ElementKind::Star { inner_radius, outer_radius, .. }
        | ElementKind::Ring { inner_radius, outer_radius }
        | ElementKind::Arc { inner_radius, outer_radius, .. } => {
            *inner_radius *= avg;
            *outer_radius *= avg;
        }
        _ => {
            if let Some(points) = kind.points_mut() {
                for (i, p) in points.iter_mut().enumerate() {
                    *p *= if i % 2 == 0 { sx } else { sy };
                }
            }
        }
    }
}

/// Per-kind geometry behavior.
///
/// The rendering adapter drags an *anchor* (top-left for box kinds, center
/// for radial kinds, point-cloud center for path kinds) while the store keeps
/// the top-left origin. Strategies convert between the two and describe how a
/// transform gesture resizes the kind.
pub trait GeometryStrategy: Send + Sync {
    /// Rendered bounding box (unrotated).
    fn bounds(&self, element: &Element) -> Rect;

    /// Offset from the bounding box origin to the drag anchor.
    fn anchor_offset(&self, element: &Element) -> Vec2;

    /// Drag anchor for the element's current geometry.
    fn anchor(&self, element: &Element) -> Point {
        self.bounds(element).origin() + self.anchor_offset(element)
    }

    /// Update placing the element's anchor at `anchor`.
    fn place(&self, element: &Element, anchor: Point) -> ElementUpdate {
        let origin = anchor - self.anchor_offset(element);
        let bounds = self.bounds(element);
        let shift = origin - bounds.origin();
        ElementUpdate::default().position(element.x + shift.x, element.y + shift.y)
    }

    /// Update applying a transform gesture with the kind's resize semantics.
    fn resize(
        &self,
        element: &Element,
        input: &TransformInput,
        config: &EditorConfig,
    ) -> ElementUpdate;

    /// Size implied by kind-specific geometry, if the kind derives it.
    fn intrinsic_size(&self, _element: &Element) -> Option<Size> {
        None
    }
}

/// Strategy singleton for an element kind.
pub fn strategy_for(kind: ElementType) -> &'static dyn GeometryStrategy {
    match kind {
        ElementType::Rectangle | ElementType::Frame | ElementType::Image | ElementType::Icon => {
            &BoxGeometry
        }
        ElementType::Text => &TextGeometry,
        ElementType::Circle => &CircleGeometry,
        ElementType::Ellipse => &EllipseGeometry,
        ElementType::Star => &StarGeometry,
        ElementType::Wedge => &WedgeGeometry,
        ElementType::Ring | ElementType::Arc => &RingGeometry,
        ElementType::RegularPolygon => &PolygonGeometry,
        ElementType::Triangle => &TriangleGeometry,
        ElementType::Line | ElementType::Arrow | ElementType::Custom => &PathGeometry,
    }
}
