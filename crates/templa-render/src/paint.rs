//! Elements to render instructions.
//!
//! Everything here is a pure function of the element, its siblings, the stage
//! and the branding registry. Outlines are built around the element's drag
//! anchor so that `transform` carries position and rotation, as the adapter
//! node does.

use crate::color::slot_color;
use crate::instruction::{Clip, Content, GuideInstruction, RenderInstruction, StrokeStyle, TextRun};
use kurbo::{Affine, BezPath, Circle, CircleSegment, Ellipse, Point, Rect, RoundedRect, Shape, Vec2};
use peniko::{Color, Fill};
use std::f64::consts::PI;
use templa_core::binding;
use templa_core::branding::{BrandingRegistry, ColorSlot};
use templa_core::canvas::Scene;
use templa_core::geometry::Stage;
use templa_core::shapes::{Element, ElementKind, TriangleGeometry};
use templa_core::snap::Guide;

/// Flattening tolerance for curved outlines.
const TOLERANCE: f64 = 0.1;

/// Node transform: translate to the anchor, then rotate about it.
fn node_transform(element: &Element) -> Affine {
    Affine::translate(element.anchor().to_vec2()) * Affine::rotate(element.rotation.to_radians())
}

/// Closed polygon through `points`.
fn polygon(points: impl IntoIterator<Item = Point>) -> BezPath {
    let mut path = BezPath::new();
    for (i, p) in points.into_iter().enumerate() {
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    if !path.elements().is_empty() {
        path.close_path();
    }
    path
}

/// Regular polygon with its first vertex straight up.
fn regular_polygon(sides: u32, radius: f64) -> BezPath {
    let sides = sides.max(3);
    polygon((0..sides).map(|n| {
        let angle = n as f64 * 2.0 * PI / sides as f64;
        Point::new(radius * angle.sin(), -radius * angle.cos())
    }))
}

fn star(points: u32, inner: f64, outer: f64) -> BezPath {
    let points = points.max(2);
    polygon((0..points * 2).map(|n| {
        let radius = if n % 2 == 0 { outer } else { inner };
        let angle = n as f64 * PI / points as f64;
        Point::new(radius * angle.sin(), -radius * angle.cos())
    }))
}

/// Points of a path kind relative to the anchor.
fn local_points(element: &Element, points: &[f64]) -> Vec<Point> {
    let shift = Vec2::new(element.x, element.y) - element.anchor().to_vec2();
    points
        .chunks_exact(2)
        .map(|p| Point::new(p[0], p[1]) + shift)
        .collect()
}

fn polyline(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
    }
    path
}

/// Arrow head at the end of the last segment.
fn arrow_head(points: &[Point], length: f64, width: f64) -> Option<BezPath> {
    let [.., from, tip] = points else {
        return None;
    };
    let dir = *tip - *from;
    if dir.hypot() == 0.0 {
        return None;
    }
    let dir = dir.normalize();
    let normal = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    let base = *tip - dir * length;
    Some(polygon([*tip, base + normal, base - normal]))
}

fn corner_radii(radii: [f64; 4]) -> kurbo::RoundedRectRadii {
    kurbo::RoundedRectRadii::new(radii[0], radii[1], radii[2], radii[3])
}

/// Outline in anchor-local coordinates plus its fill rule.
fn outline(element: &Element) -> (BezPath, Fill) {
    let local = element.bounds() - element.anchor().to_vec2();
    let path = match &element.kind {
        ElementKind::Rectangle { corner_radius, border_radius } => {
            let radii = border_radius
                .filter(|r| r.as_array().iter().any(|&v| v > 0.0))
                .map(|r| r.as_array())
                .unwrap_or([*corner_radius; 4]);
            RoundedRect::from_rect(local, corner_radii(radii)).to_path(TOLERANCE)
        }
        ElementKind::Frame(frame) => {
            RoundedRect::from_rect(local, frame.corner_radius).to_path(TOLERANCE)
        }
        ElementKind::Image(_) | ElementKind::Icon { .. } => local.to_path(TOLERANCE),
        ElementKind::Text(text) => match text.background {
            Some(_) => RoundedRect::from_rect(local, corner_radii(text.border_radius.as_array()))
                .to_path(TOLERANCE),
            None => BezPath::new(),
        },
        ElementKind::Circle { radius } => Circle::new(Point::ORIGIN, *radius).to_path(TOLERANCE),
        ElementKind::Ellipse { radius_x, radius_y } => {
            Ellipse::new(Point::ORIGIN, (*radius_x, *radius_y), 0.0).to_path(TOLERANCE)
        }
        ElementKind::Star { inner_radius, outer_radius, num_points } => {
            star(*num_points, *inner_radius, *outer_radius)
        }
        ElementKind::Wedge { radius, angle } => {
            CircleSegment::new(Point::ORIGIN, *radius, 0.0, 0.0, angle.to_radians())
                .to_path(TOLERANCE)
        }
        ElementKind::Ring { inner_radius, outer_radius } => {
            let mut path = Circle::new(Point::ORIGIN, *outer_radius).to_path(TOLERANCE);
            path.extend(Circle::new(Point::ORIGIN, *inner_radius).path_elements(TOLERANCE));
            return (path, Fill::EvenOdd);
        }
        ElementKind::Arc { inner_radius, outer_radius, angle } => {
            CircleSegment::new(Point::ORIGIN, *outer_radius, *inner_radius, 0.0, angle.to_radians())
                .to_path(TOLERANCE)
        }
        ElementKind::RegularPolygon { sides, radius } => regular_polygon(*sides, *radius),
        ElementKind::Triangle => regular_polygon(3, TriangleGeometry::radius(element)),
        ElementKind::Line { points } => polyline(&local_points(element, points)),
        ElementKind::Arrow { points, pointer_length, pointer_width } => {
            let points = local_points(element, points);
            let mut path = polyline(&points);
            if let Some(head) = arrow_head(&points, *pointer_length, *pointer_width) {
                path.extend(head.elements().iter().copied());
            }
            path
        }
        ElementKind::Custom { points } => polygon(local_points(element, points)),
    };
    (path, Fill::NonZero)
}

fn stroke_style(element: &Element, branding: &BrandingRegistry) -> Option<StrokeStyle> {
    if let ElementKind::Text(text) = &element.kind {
        if text.background.is_none() || text.background_stroke_width <= 0.0 {
            return None;
        }
        let color = crate::color::parse_color(&text.background_stroke)?;
        return Some(StrokeStyle { color, width: text.background_stroke_width, dash: Vec::new() });
    }
    if element.stroke_width <= 0.0 || element.color_literal(ColorSlot::Stroke).is_none() {
        return None;
    }
    let dash = element.as_frame().map(|f| f.dash.clone()).unwrap_or_default();
    Some(StrokeStyle {
        color: slot_color(element, ColorSlot::Stroke, branding),
        width: element.stroke_width,
        dash,
    })
}

fn fill_color(element: &Element, branding: &BrandingRegistry) -> Option<Color> {
    match &element.kind {
        ElementKind::Text(text) => text
            .background
            .as_ref()
            .map(|_| slot_color(element, ColorSlot::TextBackground, branding)),
        ElementKind::Image(_) | ElementKind::Icon { .. } => None,
        ElementKind::Line { .. } => None,
        _ => element
            .color_literal(ColorSlot::Fill)
            .map(|_| slot_color(element, ColorSlot::Fill, branding)),
    }
}

fn content(element: &Element, branding: &BrandingRegistry) -> Content {
    match &element.kind {
        ElementKind::Text(text) => {
            let font = branding
                .resolve_element_font(element)
                .unwrap_or_else(|| branding.resolve_font(&text.font_family, None));
            Content::Text(TextRun {
                text: text.text.clone(),
                font,
                font_size: text.font_size,
                font_weight: text.font_weight.clone(),
                font_style: text.font_style.clone(),
                align: text.align,
                color: slot_color(element, ColorSlot::TextColor, branding),
                width: element.width,
            })
        }
        ElementKind::Image(image) => Content::Image { src: image.src.clone() },
        ElementKind::Icon { icon_name, .. } => Content::Icon {
            name: icon_name.clone(),
            tint: slot_color(element, ColorSlot::IconTint, branding),
        },
        _ => Content::Shape,
    }
}

/// Clip of a frame-bound image: the frame's rounded rectangle.
fn frame_clip(element: &Element, elements: &[Element]) -> Option<Clip> {
    let frame = element
        .frame_id()
        .and_then(|frame_id| binding::find_frame(elements, frame_id))?;
    let (path, _) = outline(frame);
    Some(Clip { path, transform: node_transform(frame) })
}

/// Render instruction for one element, or `None` when it paints nothing:
/// hidden, or entirely outside the stage.
pub fn render_element(
    element: &Element,
    elements: &[Element],
    stage: Stage,
    branding: &BrandingRegistry,
) -> Option<RenderInstruction> {
    if !element.visible {
        return None;
    }
    let (path, fill_rule) = outline(element);
    let transform = node_transform(element);
    let clip = frame_clip(element, elements);
    let instruction = RenderInstruction {
        id: element.id.clone(),
        kind: element.element_type(),
        transform,
        path,
        fill: fill_color(element, branding),
        fill_rule,
        stroke: stroke_style(element, branding),
        opacity: element.opacity.clamp(0.0, 1.0),
        clip,
        content: content(element, branding),
    };

    let visible_area = match &instruction.clip {
        Some(clip) => clip.transform.transform_rect_bbox(clip.path.bounding_box()),
        None => transform.transform_rect_bbox(element.bounds() - element.anchor().to_vec2()),
    };
    if !overlaps(visible_area, stage.rect()) {
        log::debug!("Culling off-stage element {}", element.id);
        return None;
    }
    Some(instruction)
}

fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Instructions for the whole scene in paint order.
///
/// Frames hosting an image are not painted; the image carries the frame's
/// clip instead.
pub fn render_scene(scene: &Scene, branding: &BrandingRegistry) -> Vec<RenderInstruction> {
    let elements = scene.elements();
    elements
        .iter()
        .filter(|el| !(el.is_frame() && binding::bound_image(elements, &el.id).is_some()))
        .filter_map(|el| render_element(el, elements, scene.stage(), branding))
        .collect()
}

/// Overlay instructions for alignment guides.
pub fn guide_instructions(guides: &[Guide], color: Color) -> Vec<GuideInstruction> {
    guides
        .iter()
        .map(|guide| GuideInstruction {
            line: guide.line,
            color,
            dash: vec![4.0, 6.0],
            label: guide.label.clone(),
            label_anchor: guide.label_anchor,
        })
        .collect()
}
