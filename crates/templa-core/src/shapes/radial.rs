//! Radial kinds: circle, ellipse, star, wedge, ring, arc, regular polygon
//! and triangle.
//!
//! These are stored by the top-left corner of their bounding box but drawn and
//! dragged around their center, which sits one radius in from the origin.

use super::{Element, ElementKind, ElementUpdate, GeometryStrategy};
use crate::config::EditorConfig;
use crate::interaction::TransformInput;
use kurbo::{Point, Rect, Size, Vec2};

/// Shared behavior of center-anchored kinds.
trait Radial {
    /// Half extents of the bounding box.
    fn extent(&self, element: &Element) -> Vec2;

    /// Kind-specific geometry after a scale gesture, plus the new half
    /// extents.
    fn scaled(&self, element: &Element, scale_x: f64, scale_y: f64) -> (ElementUpdate, Vec2);
}

/// Implement [`GeometryStrategy`] for strategies that are [`Radial`].
macro_rules! radial_strategy {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl GeometryStrategy for $ty {
                fn bounds(&self, element: &Element) -> Rect {
                    let extent = self.extent(element);
                    Rect::from_origin_size(
                        Point::new(element.x, element.y),
                        Size::new(extent.x * 2.0, extent.y * 2.0),
                    )
                }

                fn anchor_offset(&self, element: &Element) -> Vec2 {
                    self.extent(element)
                }

                fn resize(
                    &self,
                    element: &Element,
                    input: &TransformInput,
                    _config: &EditorConfig,
                ) -> ElementUpdate {
                    let (update, extent) = self.scaled(element, input.scale_x, input.scale_y);
                    update
                        .position(input.anchor.x - extent.x, input.anchor.y - extent.y)
                        .size(extent.x * 2.0, extent.y * 2.0)
                        .rotation(input.rotation)
                }

                fn intrinsic_size(&self, element: &Element) -> Option<Size> {
                    let extent = self.extent(element);
                    Some(Size::new(extent.x * 2.0, extent.y * 2.0))
                }
            }
        )+
    };
}

radial_strategy!(
    CircleGeometry,
    EllipseGeometry,
    StarGeometry,
    WedgeGeometry,
    RingGeometry,
    PolygonGeometry,
    TriangleGeometry,
);

fn average(scale_x: f64, scale_y: f64) -> f64 {
    ((scale_x + scale_y) / 2.0).abs()
}

/// Circle scaled by the mean of both axes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircleGeometry;

impl Radial for CircleGeometry {
    fn extent(&self, element: &Element) -> Vec2 {
        match element.kind {
            ElementKind::Circle { radius } => Vec2::new(radius, radius),
            _ => Vec2::ZERO,
        }
    }

    fn scaled(&self, element: &Element, scale_x: f64, scale_y: f64) -> (ElementUpdate, Vec2) {
        let radius = self.extent(element).x * average(scale_x, scale_y);
        let update = ElementUpdate {
            radius: Some(radius),
            ..Default::default()
        };
        (update, Vec2::new(radius, radius))
    }
}

/// Ellipse scaled independently per axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct EllipseGeometry;

impl Radial for EllipseGeometry {
    fn extent(&self, element: &Element) -> Vec2 {
        match element.kind {
            ElementKind::Ellipse { radius_x, radius_y } => Vec2::new(radius_x, radius_y),
            _ => Vec2::ZERO,
        }
    }

    fn scaled(&self, element: &Element, scale_x: f64, scale_y: f64) -> (ElementUpdate, Vec2) {
        let extent = self.extent(element);
        let radius_x = extent.x * scale_x.abs();
        let radius_y = extent.y * scale_y.abs();
        let update = ElementUpdate {
            radius_x: Some(radius_x),
            radius_y: Some(radius_y),
            ..Default::default()
        };
        (update, Vec2::new(radius_x, radius_y))
    }
}

/// Star: the inner radius follows the smaller scale, the outer radius the
/// larger one.
#[derive(Debug, Clone, Copy, Default)]
pub struct StarGeometry;

impl Radial for StarGeometry {
    fn extent(&self, element: &Element) -> Vec2 {
        match element.kind {
            ElementKind::Star { outer_radius, .. } => Vec2::new(outer_radius, outer_radius),
            _ => Vec2::ZERO,
        }
    }

    fn scaled(&self, element: &Element, scale_x: f64, scale_y: f64) -> (ElementUpdate, Vec2) {
        let (inner, outer) = match element.kind {
            ElementKind::Star { inner_radius, outer_radius, .. } => (inner_radius, outer_radius),
            _ => (0.0, 0.0),
        };
        let (sx, sy) = (scale_x.abs(), scale_y.abs());
        let inner_radius = inner * sx.min(sy);
        let outer_radius = outer * sx.max(sy);
        let update = ElementUpdate {
            inner_radius: Some(inner_radius),
            outer_radius: Some(outer_radius),
            ..Default::default()
        };
        (update, Vec2::new(outer_radius, outer_radius))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WedgeGeometry;

impl Radial for WedgeGeometry {
    fn extent(&self, element: &Element) -> Vec2 {
        match element.kind {
            ElementKind::Wedge { radius, .. } => Vec2::new(radius, radius),
            _ => Vec2::ZERO,
        }
    }

    fn scaled(&self, element: &Element, scale_x: f64, scale_y: f64) -> (ElementUpdate, Vec2) {
        let radius = self.extent(element).x * average(scale_x, scale_y);
        let update = ElementUpdate {
            radius: Some(radius),
            ..Default::default()
        };
        (update, Vec2::new(radius, radius))
    }
}

/// Ring and arc; both radii follow the mean scale.
#[derive(Debug, Clone, Copy, Default)]
pub struct RingGeometry;

impl RingGeometry {
    fn radii(element: &Element) -> (f64, f64) {
        match element.kind {
            ElementKind::Ring { inner_radius, outer_radius }
            | ElementKind::Arc { inner_radius, outer_radius, .. } => (inner_radius, outer_radius),
            _ => (0.0, 0.0),
        }
    }
}

impl Radial for RingGeometry {
    fn extent(&self, element: &Element) -> Vec2 {
        let (_, outer) = Self::radii(element);
        Vec2::new(outer, outer)
    }

    fn scaled(&self, element: &Element, scale_x: f64, scale_y: f64) -> (ElementUpdate, Vec2) {
        let (inner, outer) = Self::radii(element);
        let scale = average(scale_x, scale_y);
        let update = ElementUpdate {
            inner_radius: Some(inner * scale),
            outer_radius: Some(outer * scale),
            ..Default::default()
        };
        (update, Vec2::new(outer * scale, outer * scale))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PolygonGeometry;

impl Radial for PolygonGeometry {
    fn extent(&self, element: &Element) -> Vec2 {
        match element.kind {
            ElementKind::RegularPolygon { radius, .. } => Vec2::new(radius, radius),
            _ => Vec2::ZERO,
        }
    }

    fn scaled(&self, element: &Element, scale_x: f64, scale_y: f64) -> (ElementUpdate, Vec2) {
        let radius = self.extent(element).x * average(scale_x, scale_y);
        let update = ElementUpdate {
            radius: Some(radius),
            ..Default::default()
        };
        (update, Vec2::new(radius, radius))
    }
}

/// Triangle drawn as a three-sided regular polygon whose radius is half the
/// larger box side. A transform scales it by the larger of the two factors.
#[derive(Debug, Clone, Copy, Default)]
pub struct TriangleGeometry;

impl TriangleGeometry {
    pub fn radius(element: &Element) -> f64 {
        element.width.max(element.height) / 2.0
    }
}

impl Radial for TriangleGeometry {
    fn extent(&self, element: &Element) -> Vec2 {
        let radius = Self::radius(element);
        Vec2::new(radius, radius)
    }

    fn scaled(&self, element: &Element, scale_x: f64, scale_y: f64) -> (ElementUpdate, Vec2) {
        let radius = Self::radius(element) * scale_x.abs().max(scale_y.abs());
        (ElementUpdate::default(), Vec2::new(radius, radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Stage;
    use crate::shapes::{ElementSpec, ElementType};

    fn element(kind: ElementType) -> Element {
        Element::from_spec(ElementSpec::Kind(kind), Stage::default()).unwrap()
    }

    fn transform(anchor: Point, scale_x: f64, scale_y: f64) -> TransformInput {
        TransformInput { anchor, scale_x, scale_y, rotation: 0.0 }
    }

    #[test]
    fn test_circle_anchor_is_center() {
        let el = element(ElementType::Circle);
        assert_eq!(el.anchor(), Point::new(150.0, 150.0));
        assert_eq!(el.bounds(), Rect::new(100.0, 100.0, 200.0, 200.0));
    }

    #[test]
    fn test_place_round_trips_without_drift() {
        for kind in [
            ElementType::Circle,
            ElementType::Ellipse,
            ElementType::Star,
            ElementType::Wedge,
            ElementType::Ring,
            ElementType::Arc,
            ElementType::RegularPolygon,
            ElementType::Triangle,
        ] {
            let el = element(kind);
            let mut moved = el.clone();
            el.strategy().place(&el, el.anchor()).apply_to(&mut moved);
            assert!((moved.x - el.x).abs() < 1e-9, "{kind} drifted");
            assert!((moved.y - el.y).abs() < 1e-9, "{kind} drifted");
        }
    }

    #[test]
    fn test_circle_average_scale() {
        let el = element(ElementType::Circle);
        let update = el
            .strategy()
            .resize(&el, &transform(Point::new(150.0, 150.0), 2.0, 1.0), &EditorConfig::default());
        assert_eq!(update.radius, Some(75.0));
        assert_eq!(update.x, Some(75.0));
        assert_eq!(update.width, Some(150.0));
    }

    #[test]
    fn test_ellipse_per_axis() {
        let el = element(ElementType::Ellipse);
        let update = el
            .strategy()
            .resize(&el, &transform(Point::new(175.0, 150.0), 2.0, 0.5), &EditorConfig::default());
        assert_eq!(update.radius_x, Some(150.0));
        assert_eq!(update.radius_y, Some(25.0));
        assert_eq!(update.x, Some(25.0));
        assert_eq!(update.y, Some(125.0));
    }

    #[test]
    fn test_star_min_max() {
        let el = element(ElementType::Star);
        let update = el
            .strategy()
            .resize(&el, &transform(Point::new(150.0, 150.0), 2.0, 0.5), &EditorConfig::default());
        assert_eq!(update.inner_radius, Some(10.0));
        assert_eq!(update.outer_radius, Some(100.0));
    }

    #[test]
    fn test_triangle_uses_max_side() {
        let el = element(ElementType::Triangle);
        assert_eq!(el.width, 150.0);
        assert_eq!(el.height, 150.0);
        let update = el
            .strategy()
            .resize(&el, &transform(Point::new(175.0, 175.0), 1.0, 2.0), &EditorConfig::default());
        assert_eq!(update.width, Some(300.0));
        assert_eq!(update.x, Some(25.0));
    }
}
