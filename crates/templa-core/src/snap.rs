//! Magnetic snapping and alignment guides.
//!
//! Both algorithms compare the moving element's rendered rectangle against
//! every other visible element. Snapping is selective: per axis only the
//! closest reference line under the threshold is applied. Guide emission is
//! exhaustive: every near-alignment produces a guide so several cues can be
//! shown at once. Guides never mutate elements.

use crate::geometry::Stage;
use crate::shapes::{Element, ElementId};
use kurbo::{Line, Point, Rect, Vec2};

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The (possibly) corrected anchor.
    pub point: Point,
    /// Whether the X coordinate was snapped.
    pub snapped_x: bool,
    /// Whether the Y coordinate was snapped.
    pub snapped_y: bool,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            snapped_x: false,
            snapped_y: false,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Elements that take part in alignment: visible and not excluded.
fn siblings<'a>(
    elements: &'a [Element],
    exclude: &'a [&'a ElementId],
) -> impl Iterator<Item = &'a Element> + 'a {
    elements
        .iter()
        .filter(move |el| el.visible && !exclude.contains(&&el.id))
}

/// The three reference lines of a rectangle on one axis.
fn lines_x(rect: Rect) -> [f64; 3] {
    [rect.x0, rect.center().x, rect.x1]
}

fn lines_y(rect: Rect) -> [f64; 3] {
    [rect.y0, rect.center().y, rect.y1]
}

/// Snap a dragged element against its siblings.
///
/// `node_rect` is the element's rendered rectangle at the proposed `anchor`;
/// `offset` is the anchor's offset from that rectangle's origin. `exclude`
/// lists the moving element and anything that moves along with it. For each
/// axis the closest line pair under `threshold` wins, and the anchor on that
/// axis becomes `matched - (line - origin) + offset`.
pub fn calculate_snapping_position(
    node_rect: Rect,
    anchor: Point,
    elements: &[Element],
    exclude: &[&ElementId],
    threshold: f64,
    offset: Vec2,
) -> SnapResult {
    let mut result = SnapResult::none(anchor);
    let mut best_x = threshold;
    let mut best_y = threshold;

    for other in siblings(elements, exclude) {
        let other_rect = other.bounds();

        for current in lines_y(node_rect) {
            for matched in lines_y(other_rect) {
                let distance = (current - matched).abs();
                if distance < best_y {
                    best_y = distance;
                    result.point.y = matched - (current - node_rect.y0) + offset.y;
                    result.snapped_y = true;
                }
            }
        }

        for current in lines_x(node_rect) {
            for matched in lines_x(other_rect) {
                let distance = (current - matched).abs();
                if distance < best_x {
                    best_x = distance;
                    result.point.x = matched - (current - node_rect.x0) + offset.x;
                    result.snapped_x = true;
                }
            }
        }
    }

    result
}

/// Which alignment a guide reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuideKind {
    Left,
    Right,
    Top,
    Bottom,
    TopToBottom,
    BottomToTop,
    LeftToRight,
    RightToLeft,
    CenterX,
    CenterY,
    CenterXToLeft,
    CenterXToRight,
    CenterYToTop,
    CenterYToBottom,
    /// Moving element's top edge against a sibling's center line.
    TopToCenterY,
    /// Moving element's bottom edge against a sibling's center line.
    BottomToCenterY,
    CanvasCenterX,
    CanvasCenterY,
}

impl GuideKind {
    /// Vertical guides are drawn at a constant x.
    pub fn is_vertical(self) -> bool {
        matches!(
            self,
            GuideKind::Left
                | GuideKind::Right
                | GuideKind::LeftToRight
                | GuideKind::RightToLeft
                | GuideKind::CenterX
                | GuideKind::CenterXToLeft
                | GuideKind::CenterXToRight
                | GuideKind::CanvasCenterX
        )
    }
}

/// A visual alignment cue spanning the whole stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Guide {
    pub kind: GuideKind,
    pub line: Line,
    /// Distance in pixels between the compared lines.
    pub delta: f64,
    pub label: String,
    pub label_anchor: Point,
}

#[derive(Clone, Copy)]
enum Metric {
    Min,
    Center,
    Max,
}

impl Metric {
    fn of(self, lines: [f64; 3]) -> f64 {
        match self {
            Metric::Min => lines[0],
            Metric::Center => lines[1],
            Metric::Max => lines[2],
        }
    }
}

#[derive(Clone, Copy)]
enum LabelPlacement {
    /// Pinned to the stage edge.
    Edge,
    /// Next to the moving element.
    Node,
}

struct GuideRule {
    kind: GuideKind,
    node: Metric,
    other: Metric,
    /// Draw the guide through the moving element's line instead of the
    /// sibling's.
    through_node: bool,
    label: LabelPlacement,
}

const fn rule(
    kind: GuideKind,
    node: Metric,
    other: Metric,
    through_node: bool,
    label: LabelPlacement,
) -> GuideRule {
    GuideRule { kind, node, other, through_node, label }
}

const SIBLING_RULES: [GuideRule; 16] = {
    use GuideKind as K;
    use LabelPlacement::{Edge, Node};
    use Metric::{Center, Max, Min};
    [
        rule(K::Left, Min, Min, false, Edge),
        rule(K::Right, Max, Max, false, Edge),
        rule(K::Top, Min, Min, false, Edge),
        rule(K::Bottom, Max, Max, false, Edge),
        rule(K::TopToBottom, Min, Max, false, Edge),
        rule(K::BottomToTop, Max, Min, false, Edge),
        rule(K::LeftToRight, Min, Max, false, Node),
        rule(K::RightToLeft, Max, Min, false, Node),
        rule(K::CenterX, Center, Center, false, Node),
        rule(K::CenterY, Center, Center, false, Node),
        rule(K::CenterXToLeft, Center, Min, false, Node),
        rule(K::CenterXToRight, Center, Max, false, Node),
        rule(K::CenterYToTop, Center, Min, false, Node),
        rule(K::CenterYToBottom, Center, Max, false, Node),
        rule(K::TopToCenterY, Min, Center, true, Node),
        rule(K::BottomToCenterY, Max, Center, true, Node),
    ]
};

fn label(delta: f64) -> String {
    format!("{delta:.0}px")
}

fn vertical_guide(kind: GuideKind, x: f64, stage: Stage, delta: f64, label_anchor: Point) -> Guide {
    Guide {
        kind,
        line: Line::new((x, 0.0), (x, stage.height)),
        delta,
        label: label(delta),
        label_anchor,
    }
}

fn horizontal_guide(
    kind: GuideKind,
    y: f64,
    stage: Stage,
    delta: f64,
    label_anchor: Point,
) -> Guide {
    Guide {
        kind,
        line: Line::new((0.0, y), (stage.width, y)),
        delta,
        label: label(delta),
        label_anchor,
    }
}

/// Compute every guide for a moving element's rendered rectangle.
///
/// Each sibling is checked against sixteen edge/center pairings, then the
/// element's center is checked against the stage center on both axes.
pub fn draw_guidelines(
    node_rect: Rect,
    elements: &[Element],
    exclude: &[&ElementId],
    stage: Stage,
    threshold: f64,
) -> Vec<Guide> {
    let mut guides = Vec::new();
    let node_center = node_rect.center();

    for other in siblings(elements, exclude) {
        let other_rect = other.bounds();
        for rule in &SIBLING_RULES {
            let vertical = rule.kind.is_vertical();
            let (node_lines, other_lines) = if vertical {
                (lines_x(node_rect), lines_x(other_rect))
            } else {
                (lines_y(node_rect), lines_y(other_rect))
            };
            let node_value = rule.node.of(node_lines);
            let other_value = rule.other.of(other_lines);
            let delta = (node_value - other_value).abs();
            if delta >= threshold {
                continue;
            }
            let at = if rule.through_node { node_value } else { other_value };
            let guide = if vertical {
                let anchor = match rule.label {
                    LabelPlacement::Edge => Point::new(at + 5.0, 10.0),
                    LabelPlacement::Node => Point::new(at + 5.0, node_rect.y0 + 10.0),
                };
                vertical_guide(rule.kind, at, stage, delta, anchor)
            } else {
                let anchor = match rule.label {
                    LabelPlacement::Edge => Point::new(10.0, at + 5.0),
                    LabelPlacement::Node => Point::new(node_rect.x0 + 10.0, at + 5.0),
                };
                horizontal_guide(rule.kind, at, stage, delta, anchor)
            };
            guides.push(guide);
        }
    }

    let canvas_center = stage.center();
    let delta_x = (node_center.x - canvas_center.x).abs();
    if delta_x < threshold {
        guides.push(vertical_guide(
            GuideKind::CanvasCenterX,
            canvas_center.x,
            stage,
            delta_x,
            Point::new(canvas_center.x + 10.0, node_center.y - 30.0),
        ));
    }
    let delta_y = (node_center.y - canvas_center.y).abs();
    if delta_y < threshold {
        guides.push(horizontal_guide(
            GuideKind::CanvasCenterY,
            canvas_center.y,
            stage,
            delta_y,
            Point::new(node_center.x + 10.0, canvas_center.y + 20.0),
        ));
    }

    guides
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{ElementSpec, ElementType, ElementUpdate};

    fn rect_at(x: f64, y: f64, w: f64, h: f64) -> Element {
        let mut el =
            Element::from_spec(ElementSpec::Kind(ElementType::Rectangle), Stage::default()).unwrap();
        ElementUpdate::default().position(x, y).size(w, h).apply_to(&mut el);
        el
    }

    #[test]
    fn test_snap_picks_closest_not_first() {
        let moving = rect_at(0.0, 0.0, 50.0, 50.0);
        // Left edges at 103 and 101; the dragged node's left edge is at 100.
        let far = rect_at(103.0, 500.0, 50.0, 50.0);
        let near = rect_at(101.0, 800.0, 70.0, 70.0);
        let elements = vec![moving.clone(), far, near];
        let node = Rect::new(100.0, 300.0, 150.0, 350.0);
        let result = calculate_snapping_position(
            node,
            node.origin(),
            &elements,
            &[&moving.id],
            5.0,
            Vec2::ZERO,
        );
        assert!(result.snapped_x);
        assert!(!result.snapped_y);
        assert!((result.point.x - 101.0).abs() < f64::EPSILON);
        assert!((result.point.y - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snap_applies_offset() {
        let moving = rect_at(0.0, 0.0, 20.0, 20.0);
        let target = rect_at(200.0, 200.0, 100.0, 100.0);
        let elements = vec![moving.clone(), target];
        // Node centers line up within 1px of the target's center (250, 250).
        let node = Rect::new(241.0, 241.0, 261.0, 261.0);
        let result = calculate_snapping_position(
            node,
            node.center(),
            &elements,
            &[&moving.id],
            2.0,
            Vec2::new(10.0, 10.0),
        );
        assert_eq!(result.point, Point::new(250.0, 250.0));
    }

    #[test]
    fn test_snap_ignores_invisible_and_self() {
        let moving = rect_at(100.0, 100.0, 50.0, 50.0);
        let mut hidden = rect_at(101.0, 101.0, 50.0, 50.0);
        hidden.visible = false;
        let elements = vec![moving.clone(), hidden];
        let node = Rect::new(100.5, 100.5, 150.5, 150.5);
        let result = calculate_snapping_position(
            node,
            node.origin(),
            &elements,
            &[&moving.id],
            2.0,
            Vec2::ZERO,
        );
        assert!(!result.is_snapped());
    }

    #[test]
    fn test_guides_for_left_alignment() {
        let moving = rect_at(0.0, 0.0, 10.0, 10.0);
        let other = rect_at(300.0, 600.0, 40.0, 40.0);
        let elements = vec![moving.clone(), other];
        let node = Rect::new(301.0, 100.0, 311.0, 110.0);
        let guides = draw_guidelines(node, &elements, &[&moving.id], Stage::default(), 4.0);
        let left = guides.iter().find(|g| g.kind == GuideKind::Left).unwrap();
        assert_eq!(left.line, Line::new((300.0, 0.0), (300.0, 1080.0)));
        assert_eq!(left.label, "1px");
        assert_eq!(left.label_anchor, Point::new(305.0, 10.0));
        assert!(guides.iter().all(|g| g.kind != GuideKind::Top));
    }

    #[test]
    fn test_guides_canvas_center() {
        let moving = rect_at(0.0, 0.0, 100.0, 100.0);
        let elements = vec![moving.clone()];
        let node = Rect::new(491.0, 488.0, 591.0, 588.0);
        let guides = draw_guidelines(node, &elements, &[&moving.id], Stage::default(), 4.0);
        assert_eq!(guides.len(), 2);
        let vertical = &guides[0];
        assert_eq!(vertical.kind, GuideKind::CanvasCenterX);
        assert_eq!(vertical.label, "1px");
        assert_eq!(vertical.label_anchor, Point::new(550.0, 508.0));
        let horizontal = &guides[1];
        assert_eq!(horizontal.kind, GuideKind::CanvasCenterY);
        assert_eq!(horizontal.label_anchor, Point::new(551.0, 560.0));
    }

    #[test]
    fn test_guides_accumulate_across_siblings() {
        let moving = rect_at(0.0, 0.0, 10.0, 10.0);
        let a = rect_at(200.0, 10.0, 20.0, 20.0);
        let b = rect_at(200.0, 800.0, 30.0, 30.0);
        let elements = vec![moving.clone(), a, b];
        let node = Rect::new(200.0, 400.0, 210.0, 410.0);
        let guides = draw_guidelines(node, &elements, &[&moving.id], Stage::default(), 4.0);
        assert_eq!(guides.iter().filter(|g| g.kind == GuideKind::Left).count(), 2);
    }

    #[test]
    fn test_top_to_center_line_runs_through_node() {
        let moving = rect_at(0.0, 0.0, 10.0, 10.0);
        let other = rect_at(700.0, 100.0, 100.0, 100.0);
        let elements = vec![moving.clone(), other];
        let node = Rect::new(10.0, 151.0, 20.0, 161.0);
        let guides = draw_guidelines(node, &elements, &[&moving.id], Stage::default(), 4.0);
        let guide = guides.iter().find(|g| g.kind == GuideKind::TopToCenterY).unwrap();
        assert_eq!(guide.line, Line::new((0.0, 151.0), (1080.0, 151.0)));
        assert_eq!(guide.label_anchor, Point::new(20.0, 156.0));
    }
}
