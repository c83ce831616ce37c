//! Path kinds: line, arrow and custom polyline.

use super::{Element, ElementUpdate, GeometryStrategy};
use crate::config::EditorConfig;
use crate::interaction::TransformInput;
use kurbo::{Point, Rect, Size, Vec2};

/// Geometry for point-list kinds.
///
/// Points are relative to the element origin; the drag anchor is the center
/// of the point cloud's bounding box.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathGeometry;

/// Bounding box of a flat `[x0, y0, x1, y1, ...]` list.
pub(crate) fn points_bounds(points: &[f64]) -> Rect {
    let mut pairs = points.chunks_exact(2).map(|p| Point::new(p[0], p[1]));
    let Some(first) = pairs.next() else {
        return Rect::ZERO;
    };
    pairs.fold(Rect::from_points(first, first), |rect, p| rect.union_pt(p))
}

fn local_bounds(element: &Element) -> Rect {
    element.kind.points().map(points_bounds).unwrap_or(Rect::ZERO)
}

impl GeometryStrategy for PathGeometry {
    fn bounds(&self, element: &Element) -> Rect {
        local_bounds(element) + Vec2::new(element.x, element.y)
    }

    fn anchor_offset(&self, element: &Element) -> Vec2 {
        let local = local_bounds(element);
        Vec2::new(local.width() / 2.0, local.height() / 2.0)
    }

    /// Points are scaled about their center; the center stays put relative to
    /// the origin, so only the anchor moves the origin.
    fn resize(
        &self,
        element: &Element,
        input: &TransformInput,
        _config: &EditorConfig,
    ) -> ElementUpdate {
        let center = local_bounds(element).center();
        let points: Vec<f64> = element
            .kind
            .points()
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                if i % 2 == 0 {
                    center.x + (p - center.x) * input.scale_x
                } else {
                    center.y + (p - center.y) * input.scale_y
                }
            })
            .collect();
        let size = points_bounds(&points).size();
        let mut update = ElementUpdate::default()
            .position(input.anchor.x - center.x, input.anchor.y - center.y)
            .size(size.width, size.height)
            .rotation(input.rotation);
        update.points = Some(points);
        update
    }

    fn intrinsic_size(&self, element: &Element) -> Option<Size> {
        Some(local_bounds(element).size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Stage;
    use crate::shapes::{ElementSpec, ElementType};

    #[test]
    fn test_points_bounds() {
        assert_eq!(points_bounds(&[]), Rect::ZERO);
        assert_eq!(
            points_bounds(&[0.0, 100.0, 75.0, 0.0, 150.0, 100.0]),
            Rect::new(0.0, 0.0, 150.0, 100.0)
        );
    }

    #[test]
    fn test_line_anchor_is_points_center() {
        let el = Element::from_spec(ElementSpec::Kind(ElementType::Line), Stage::default()).unwrap();
        assert_eq!(el.anchor(), Point::new(175.0, 150.0));
        assert_eq!(el.bounds(), Rect::new(100.0, 100.0, 250.0, 200.0));
    }

    #[test]
    fn test_resize_scales_about_center() {
        let el = Element::from_spec(ElementSpec::Kind(ElementType::Line), Stage::default()).unwrap();
        let input = TransformInput {
            anchor: Point::new(175.0, 150.0),
            scale_x: 2.0,
            scale_y: 1.0,
            rotation: 0.0,
        };
        let update = PathGeometry.resize(&el, &input, &EditorConfig::default());
        assert_eq!(update.points, Some(vec![-75.0, 0.0, 225.0, 100.0]));
        assert_eq!(update.x, Some(100.0));
        assert_eq!(update.width, Some(300.0));

        let mut resized = el.clone();
        update.apply_to(&mut resized);
        assert_eq!(resized.anchor(), Point::new(175.0, 150.0));
    }
}
