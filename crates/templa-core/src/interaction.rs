//! Gesture handling.
//!
//! The rendering adapter reports absolute proposed node state for every
//! pointer tick. Each handler recomputes the result from the current scene,
//! so repeated calls with the same input are idempotent.

use crate::binding::{self, BindingState};
use crate::canvas::Scene;
use crate::shapes::{Element, ElementId, ElementUpdate};
use crate::snap::{Guide, calculate_snapping_position, draw_guidelines};
use kurbo::{Point, Rect, Vec2};

/// Proposed node position during a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragInput {
    /// Where the adapter would place the node's anchor.
    pub anchor: Point,
}

impl DragInput {
    pub fn new(x: f64, y: f64) -> Self {
        Self { anchor: Point::new(x, y) }
    }
}

/// Proposed node state during a transform gesture.
///
/// Scale factors are relative to the element as currently stored; the
/// adapter resets its node scale to 1 after every call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformInput {
    pub anchor: Point,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Rotation in degrees.
    pub rotation: f64,
}

impl Default for TransformInput {
    fn default() -> Self {
        Self {
            anchor: Point::ZERO,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
        }
    }
}

impl Scene {
    /// Guides of the gesture in progress.
    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    pub fn is_pan_enabled(&self, image_id: &ElementId) -> bool {
        self.pan_enabled.contains(image_id)
    }

    /// Toggle panning of a bound image inside its frame.
    ///
    /// Returns the new toggle state. Unbound images cannot pan.
    pub fn toggle_image_pan(&mut self, image_id: &ElementId) -> bool {
        if !self.binding_state(image_id).is_bound() {
            self.pan_enabled.remove(image_id);
            return false;
        }
        if self.pan_enabled.remove(image_id) {
            false
        } else {
            self.pan_enabled.insert(image_id.clone());
            true
        }
    }

    pub fn on_select(&mut self, id: &ElementId) {
        self.select(Some(id));
    }

    /// Element dragged along with `element`: a frame's image, or a bound
    /// image's frame.
    fn drag_partner(&self, element: &Element) -> Option<ElementId> {
        if element.is_frame() {
            return self.bound_image(&element.id).map(|img| img.id.clone());
        }
        match BindingState::of(element, &self.elements) {
            BindingState::Bound(frame_id) => Some(frame_id),
            BindingState::Unbound => None,
        }
    }

    /// Handle one drag tick. Returns the corrected anchor the adapter should
    /// place the node at, or `None` for an unknown element.
    pub fn on_drag_move(&mut self, id: &ElementId, input: DragInput) -> Option<Point> {
        let element = self.get(id)?.clone();

        if self.is_pan_enabled(id) {
            if let Some(anchor) = self.pan_image(&element, input.anchor) {
                return Some(anchor);
            }
        }

        // An image bound by this very drag moves on its own; its frame only
        // follows in later gestures.
        let partner = if self.drag_bound.contains(id) {
            None
        } else {
            self.drag_partner(&element)
        };
        let strategy = element.strategy();
        let node_rect = element.bounds() + (input.anchor - element.anchor());
        let mut exclude = vec![&element.id];
        exclude.extend(partner.as_ref());

        let snap = calculate_snapping_position(
            node_rect,
            input.anchor,
            &self.elements,
            &exclude,
            self.config.snap_threshold,
            strategy.anchor_offset(&element),
        );
        let snapped_rect = node_rect + (snap.point - input.anchor);
        self.guides = draw_guidelines(
            snapped_rect,
            &self.elements,
            &exclude,
            self.stage,
            self.config.guide_threshold,
        );

        let mut update = strategy.place(&element, snap.point);
        let shift = Vec2::new(
            update.x.unwrap_or(element.x) - element.x,
            update.y.unwrap_or(element.y) - element.y,
        );
        let mut newly_bound = false;
        if element.is_image() && partner.is_none() {
            let mut proposed = element.clone();
            update.apply_to(&mut proposed);
            proposed.normalize(self.stage);
            if let Some((fitted, binds)) = self.settle_over_frame(&proposed) {
                update = fitted;
                newly_bound = binds;
            }
        }

        let mut updates = vec![(id.clone(), update)];
        if let Some(partner) = partner.as_ref().and_then(|p| self.get(p)) {
            let moved = ElementUpdate::default().position(partner.x + shift.x, partner.y + shift.y);
            updates.push((partner.id.clone(), moved));
        }
        self.update_many(updates);

        if newly_bound && self.binding_state(id).is_bound() {
            self.drag_bound.insert(id.clone());
        }
        self.get(id).map(Element::anchor)
    }

    /// Placement of a freely dragged image whose center is over a frame:
    /// fitted into its own frame, or bound and fitted into a free one. The
    /// flag tells whether the update creates a new binding.
    fn settle_over_frame(&self, proposed: &Element) -> Option<(ElementUpdate, bool)> {
        let center = proposed.layout_rect().center();
        let own_frame = proposed
            .frame_id()
            .and_then(|frame_id| binding::find_frame(&self.elements, frame_id))
            .filter(|frame| contains(frame.layout_rect(), center));
        if let Some(frame) = own_frame {
            let mode = proposed.as_image().map(|img| img.fit_mode).unwrap_or_default();
            return Some((binding::refit_update(proposed, frame, mode), false));
        }
        let frame = binding::frame_at(&self.elements, center, &proposed.id)?;
        log::debug!("Binding image {} to frame {}", proposed.id, frame.id);
        Some((binding::bind_update(proposed, frame), true))
    }

    /// Pan a bound image inside its frame, clamped so the image keeps
    /// covering the same span relative to the frame.
    fn pan_image(&mut self, image: &Element, anchor: Point) -> Option<Point> {
        let frame = image
            .frame_id()
            .and_then(|frame_id| binding::find_frame(&self.elements, frame_id))?;
        let proposed = image.layout_rect() + (anchor - image.anchor());
        let size = proposed.size();
        let center = binding::clamp_pan(frame.layout_rect(), size, proposed.center());
        let origin = Rect::from_center_size(center, size).origin();
        self.guides.clear();
        self.update_element(&image.id, ElementUpdate::default().position(origin.x, origin.y));
        Some(origin)
    }

    /// Bind an image to the free frame under its center, fitting it.
    fn bind_at_center(&mut self, image_id: &ElementId) -> bool {
        let Some(image) = self.get(image_id) else {
            return false;
        };
        let center = image.layout_rect().center();
        let Some(frame) = binding::frame_at(&self.elements, center, image_id) else {
            return false;
        };
        if image.frame_id() == Some(&frame.id) {
            return false;
        }
        let update = binding::bind_update(image, frame);
        log::debug!("Binding image {} to frame {}", image_id, frame.id);
        self.update_element(image_id, update)
    }

    /// Finish a drag: clear guides and settle the binding of a dropped image.
    ///
    /// An image whose center is still over its own frame stays bound; over
    /// another free frame it is re-bound and fitted; anywhere else it is
    /// released.
    pub fn on_drag_end(&mut self, id: &ElementId) {
        self.guides.clear();
        self.drag_bound.remove(id);
        let Some(image) = self.get(id).filter(|el| el.is_image()) else {
            return;
        };
        let center = image.layout_rect().center();
        let own_frame = image
            .frame_id()
            .and_then(|frame_id| binding::find_frame(&self.elements, frame_id));
        if own_frame.is_some_and(|frame| contains(frame.layout_rect(), center)) {
            return;
        }
        let was_bound = image.frame_id().is_some();
        if self.bind_at_center(id) {
            return;
        }
        if was_bound {
            log::debug!("Releasing image {id} from its frame");
            self.pan_enabled.remove(id);
            self.update_element(id, ElementUpdate::default().frame_id(None));
        }
    }

    /// Handle one transform tick.
    ///
    /// A bound image drags its frame along (scaled by the image's scale
    /// delta and recentered); a frame re-fits its hosted image.
    pub fn on_transform(&mut self, id: &ElementId, input: TransformInput) -> bool {
        let Some(element) = self.get(id).cloned() else {
            return false;
        };
        let update = element.strategy().resize(&element, &input, &self.config);
        let mut resized = element.clone();
        update.apply_to(&mut resized);
        resized.normalize(self.stage);

        let mut updates = vec![(id.clone(), update)];
        if let Some(partner_id) = self.drag_partner(&element) {
            if let Some(partner) = self.get(&partner_id) {
                let follow = if element.is_frame() {
                    let mode = partner.as_image().map(|img| img.fit_mode).unwrap_or_default();
                    binding::refit_update(partner, &resized, mode)
                } else {
                    let rect = binding::frame_after_image_transform(
                        partner.layout_rect(),
                        element.layout_rect(),
                        resized.layout_rect(),
                    );
                    ElementUpdate::default()
                        .position(rect.x0, rect.y0)
                        .size(rect.width(), rect.height())
                        .rotation(input.rotation)
                };
                updates.push((partner_id, follow));
            }
        }

        let exclude: Vec<&ElementId> = updates.iter().map(|(id, _)| id).collect();
        let guides = draw_guidelines(
            resized.bounds(),
            &self.elements,
            &exclude,
            self.stage,
            self.config.guide_threshold,
        );
        self.guides = guides;
        self.update_many(updates)
    }

    /// Final transform tick; clears the guides.
    pub fn on_transform_end(&mut self, id: &ElementId, input: TransformInput) -> bool {
        let changed = self.on_transform(id, input);
        self.guides.clear();
        changed
    }
}

fn contains(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}
