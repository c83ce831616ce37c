//! Box-shaped kinds: rectangle, frame, image and icon.

use super::{Element, ElementUpdate, GeometryStrategy};
use crate::config::EditorConfig;
use crate::interaction::TransformInput;
use kurbo::{Rect, Vec2};

/// Geometry for kinds positioned by their top-left corner.
///
/// The anchor coincides with the stored origin, so a drag writes the anchor
/// straight through and a transform multiplies width and height by the
/// gesture scale.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxGeometry;

impl GeometryStrategy for BoxGeometry {
    fn bounds(&self, element: &Element) -> Rect {
        element.layout_rect()
    }

    fn anchor_offset(&self, _element: &Element) -> Vec2 {
        Vec2::ZERO
    }

    fn resize(
        &self,
        element: &Element,
        input: &TransformInput,
        _config: &EditorConfig,
    ) -> ElementUpdate {
        ElementUpdate::default()
            .position(input.anchor.x, input.anchor.y)
            .size(
                (element.width * input.scale_x).abs(),
                (element.height * input.scale_y).abs(),
            )
            .rotation(input.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Stage;
    use crate::shapes::{ElementSpec, ElementType};
    use kurbo::Point;

    #[test]
    fn test_anchor_is_top_left() {
        let el = Element::from_spec(ElementSpec::Kind(ElementType::Frame), Stage::default()).unwrap();
        assert_eq!(el.anchor(), Point::new(100.0, 100.0));
        assert_eq!(el.bounds(), Rect::new(100.0, 100.0, 350.0, 300.0));
    }

    #[test]
    fn test_resize_scales_box() {
        let el =
            Element::from_spec(ElementSpec::Kind(ElementType::Rectangle), Stage::default()).unwrap();
        let input = TransformInput {
            anchor: Point::new(90.0, 80.0),
            scale_x: 2.0,
            scale_y: 0.5,
            rotation: 15.0,
        };
        let mut resized = el.clone();
        BoxGeometry.resize(&el, &input, &EditorConfig::default()).apply_to(&mut resized);
        assert_eq!(resized.x, 90.0);
        assert_eq!(resized.width, 300.0);
        assert_eq!(resized.height, 50.0);
        assert_eq!(resized.rotation, 15.0);
    }
}
