//! Frame/image binding.
//!
//! An image may be bound to at most one frame through its `frameId`
//! back-reference, and a frame hosts at most one image. The frame never owns
//! the image; the hosted image is found by scanning the element list.

use crate::shapes::{Element, ElementId, ElementUpdate, FitMode};
use kurbo::{Point, Rect, Size, Vec2};
use std::collections::HashSet;

/// Binding state of an image element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingState {
    Unbound,
    Bound(ElementId),
}

impl BindingState {
    /// Derive the state of `image`. A dangling `frameId` counts as unbound.
    pub fn of(image: &Element, elements: &[Element]) -> Self {
        match image.frame_id() {
            Some(frame_id) if find_frame(elements, frame_id).is_some() => {
                BindingState::Bound(frame_id.clone())
            }
            _ => BindingState::Unbound,
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, BindingState::Bound(_))
    }
}

/// Rectangle an image of `image` size occupies when fitted into `frame`.
///
/// The result is centered on the frame; for [`FitMode::Fill`] it may extend
/// past the frame, which clips it at paint time.
pub fn fit_rect(frame: Rect, image: Size, mode: FitMode) -> Rect {
    let (fw, fh) = (frame.width(), frame.height());
    let size = if mode == FitMode::Stretch || image.width <= 0.0 || image.height <= 0.0 {
        Size::new(fw, fh)
    } else {
        let image_aspect = image.width / image.height;
        let frame_aspect = fw / fh;
        let fit_width = match mode {
            FitMode::Fit => image_aspect > frame_aspect,
            _ => image_aspect < frame_aspect,
        };
        if fit_width {
            Size::new(fw, fw / image_aspect)
        } else {
            Size::new(fh * image_aspect, fh)
        }
    };
    let origin = Point::new(
        frame.x0 + (fw - size.width) / 2.0,
        frame.y0 + (fh - size.height) / 2.0,
    );
    Rect::from_origin_size(origin, size)
}

/// Inclusive point-in-rectangle test.
fn contains(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

pub fn find_frame<'a>(elements: &'a [Element], frame_id: &ElementId) -> Option<&'a Element> {
    elements.iter().find(|el| el.is_frame() && &el.id == frame_id)
}

/// Visible frames containing `point`, topmost first.
pub fn frames_at(elements: &[Element], point: Point) -> impl Iterator<Item = &Element> {
    elements
        .iter()
        .rev()
        .filter(move |el| el.is_frame() && el.visible && contains(el.layout_rect(), point))
}

/// Frame `image_id` may bind to at `point`.
///
/// Only the topmost frame under the point is a candidate; when another image
/// already occupies it, binding is refused.
pub fn frame_at<'a>(
    elements: &'a [Element],
    point: Point,
    image_id: &ElementId,
) -> Option<&'a Element> {
    let frame = frames_at(elements, point).next()?;
    if is_frame_occupied(elements, &frame.id, image_id) {
        log::debug!("Frame {} already hosts an image, refusing {}", frame.id, image_id);
        return None;
    }
    Some(frame)
}

/// The image hosted by `frame_id`, if any.
pub fn bound_image<'a>(elements: &'a [Element], frame_id: &ElementId) -> Option<&'a Element> {
    elements.iter().find(|el| el.frame_id() == Some(frame_id))
}

/// True when an image other than `except` is bound to `frame_id`.
pub fn is_frame_occupied(elements: &[Element], frame_id: &ElementId, except: &ElementId) -> bool {
    elements
        .iter()
        .any(|el| &el.id != except && el.frame_id() == Some(frame_id))
}

/// Clear every `frameId` that names a missing frame or a frame already
/// claimed by an earlier image. Returns how many bindings were released.
pub fn release_invalid_bindings(elements: &mut [Element]) -> usize {
    let frames: HashSet<ElementId> = elements
        .iter()
        .filter(|el| el.is_frame())
        .map(|el| el.id.clone())
        .collect();
    let mut claimed = HashSet::new();
    let mut released = 0;
    for element in elements.iter_mut() {
        let Some(frame_id) = element.frame_id().cloned() else {
            continue;
        };
        if !frames.contains(&frame_id) || !claimed.insert(frame_id.clone()) {
            log::warn!("Dropping invalid frame binding {} -> {}", element.id, frame_id);
            ElementUpdate::default().frame_id(None).apply_to(element);
            released += 1;
        }
    }
    released
}

/// Aspect source for fitting: the image's current size, or its natural size
/// when the current one is degenerate.
fn fit_source(image: &Element) -> Size {
    if image.width > 0.0 && image.height > 0.0 {
        return Size::new(image.width, image.height);
    }
    image
        .as_image()
        .map(|props| props.natural_size())
        .unwrap_or(Size::ZERO)
}

/// Update binding `image` to `frame` and fitting it with its fit mode.
pub fn bind_update(image: &Element, frame: &Element) -> ElementUpdate {
    let mode = image.as_image().map(|props| props.fit_mode).unwrap_or_default();
    let rect = fit_rect(frame.layout_rect(), fit_source(image), mode);
    ElementUpdate::default()
        .position(rect.x0, rect.y0)
        .size(rect.width(), rect.height())
        .frame_id(Some(frame.id.clone()))
}

/// Update re-fitting an already bound image after its frame or mode changed.
pub fn refit_update(image: &Element, frame: &Element, mode: FitMode) -> ElementUpdate {
    let rect = fit_rect(frame.layout_rect(), fit_source(image), mode);
    ElementUpdate::default()
        .position(rect.x0, rect.y0)
        .size(rect.width(), rect.height())
}

/// Clamp a proposed image center while panning inside `frame`.
///
/// The offset from the frame center is limited to `±|image - frame| / 2`
/// per axis.
pub fn clamp_pan(frame: Rect, image: Size, proposed_center: Point) -> Point {
    let center = frame.center();
    let limit_x = (image.width - frame.width()).abs() / 2.0;
    let limit_y = (image.height - frame.height()).abs() / 2.0;
    let offset = proposed_center - center;
    center + Vec2::new(offset.x.clamp(-limit_x, limit_x), offset.y.clamp(-limit_y, limit_y))
}

/// Frame rectangle after its bound image was transformed from `old_image` to
/// `new_image`: scaled by the image's scale delta and centered on the new
/// image center.
pub fn frame_after_image_transform(frame: Rect, old_image: Rect, new_image: Rect) -> Rect {
    let scale_x = if old_image.width() > 0.0 { new_image.width() / old_image.width() } else { 1.0 };
    let scale_y = if old_image.height() > 0.0 {
        new_image.height() / old_image.height()
    } else {
        1.0
    };
    let size = Size::new(frame.width() * scale_x, frame.height() * scale_y);
    Rect::from_center_size(new_image.center(), size)
}
