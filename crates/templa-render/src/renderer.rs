//! Renderer trait abstraction.

use crate::instruction::{DisplayItem, GuideInstruction, RenderInstruction};
use crate::paint::{guide_instructions, render_scene};
use kurbo::{Affine, Rect, Size, Vec2};
use peniko::Color;
use templa_core::branding::BrandingRegistry;
use templa_core::canvas::Scene;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The scene to render.
    pub scene: &'a Scene,
    /// Registry colors and fonts are resolved against.
    pub branding: &'a BrandingRegistry,
    /// Viewport size in logical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Background color.
    pub background_color: Color,
    /// Color of alignment guides.
    pub guide_color: Color,
    /// Whether the gesture guides are painted.
    pub show_guides: bool,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context using the scene's own branding.
    pub fn new(scene: &'a Scene, viewport_size: Size) -> Self {
        Self {
            scene,
            branding: scene.branding(),
            viewport_size,
            scale_factor: 1.0,
            background_color: Color::from_rgba8(255, 255, 255, 255),
            guide_color: Color::from_rgba8(255, 0, 0, 255),
            show_guides: true,
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Resolve against another registry (e.g. a preview of brand edits).
    pub fn with_branding(mut self, branding: &'a BrandingRegistry) -> Self {
        self.branding = branding;
        self
    }

    pub fn with_guides(mut self, show: bool) -> Self {
        self.show_guides = show;
        self
    }

    /// Stage rectangle in canvas pixels.
    pub fn stage_rect(&self) -> Rect {
        self.scene.stage().rect()
    }

    /// Canvas to device pixels: the stage is fitted into the viewport,
    /// centered, then scaled by the device pixel ratio. An empty viewport
    /// applies the pixel ratio alone.
    pub fn view_transform(&self) -> Affine {
        let stage = self.stage_rect();
        let viewport = self.viewport_size;
        if stage.area() <= 0.0 || viewport.width <= 0.0 || viewport.height <= 0.0 {
            return Affine::scale(self.scale_factor);
        }
        let zoom = (viewport.width / stage.width()).min(viewport.height / stage.height());
        let offset = Vec2::new(
            (viewport.width - stage.width() * zoom) / 2.0,
            (viewport.height - stage.height() * zoom) / 2.0,
        );
        Affine::scale(self.scale_factor) * Affine::translate(offset) * Affine::scale(zoom)
    }
}

/// Trait for rendering backends.
///
/// Implementations translate render instructions into their own drawing
/// commands.
pub trait Renderer: Send + Sync {
    /// Build the scene/command buffer for a frame.
    ///
    /// This method is called once per frame and should prepare all drawing commands.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

/// Renderer that records a flat display list.
///
/// Useful for headless export and for adapters that forward instructions
/// across a boundary. Items are in canvas coordinates; the recorded view
/// transform maps them to device pixels.
#[derive(Debug)]
pub struct DisplayListRenderer {
    items: Vec<DisplayItem>,
    view: Affine,
}

impl Default for DisplayListRenderer {
    fn default() -> Self {
        Self { items: Vec::new(), view: Affine::IDENTITY }
    }
}

impl DisplayListRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// View transform of the last built frame.
    pub fn view_transform(&self) -> Affine {
        self.view
    }

    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    /// Take the recorded list, leaving the renderer empty.
    pub fn take_items(&mut self) -> Vec<DisplayItem> {
        std::mem::take(&mut self.items)
    }

    pub fn elements(&self) -> impl Iterator<Item = &RenderInstruction> {
        self.items.iter().filter_map(|item| match item {
            DisplayItem::Element(instruction) => Some(instruction),
            _ => None,
        })
    }

    pub fn guides(&self) -> impl Iterator<Item = &GuideInstruction> {
        self.items.iter().filter_map(|item| match item {
            DisplayItem::Guide(guide) => Some(guide),
            _ => None,
        })
    }
}

impl Renderer for DisplayListRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.items.clear();
        self.view = ctx.view_transform();
        self.items.push(DisplayItem::Background {
            rect: ctx.stage_rect(),
            color: self.background_color(ctx),
        });
        self.items.extend(
            render_scene(ctx.scene, ctx.branding)
                .into_iter()
                .map(DisplayItem::Element),
        );
        if ctx.show_guides {
            self.items.extend(
                guide_instructions(ctx.scene.guides(), ctx.guide_color)
                    .into_iter()
                    .map(DisplayItem::Guide),
            );
        }
        log::debug!("Built display list with {} items", self.items.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use templa_core::interaction::DragInput;
    use templa_core::shapes::{ElementSpec, ElementType, ElementUpdate};

    #[test]
    fn test_build_empty_scene() {
        let scene = Scene::new();
        let mut renderer = DisplayListRenderer::new();
        renderer.build_scene(&RenderContext::new(&scene, Size::new(800.0, 600.0)));
        assert_eq!(renderer.items().len(), 1);
        assert!(matches!(
            renderer.items()[0],
            DisplayItem::Background { rect, .. } if rect == Rect::new(0.0, 0.0, 1080.0, 1080.0)
        ));
    }

    #[test]
    fn test_view_transform_fits_stage() {
        let scene = Scene::new();
        let ctx = RenderContext::new(&scene, Size::new(540.0, 300.0)).with_scale_factor(2.0);
        let view = ctx.view_transform();
        let top_left = view * kurbo::Point::ZERO;
        let bottom_right = view * kurbo::Point::new(1080.0, 1080.0);
        assert!((top_left - kurbo::Point::new(240.0, 0.0)).hypot() < 1e-9);
        assert!((bottom_right - kurbo::Point::new(840.0, 600.0)).hypot() < 1e-9);

        let mut renderer = DisplayListRenderer::new();
        assert_eq!(renderer.view_transform(), Affine::IDENTITY);
        renderer.build_scene(&ctx);
        assert_eq!(renderer.view_transform(), view);
    }

    #[test]
    fn test_view_transform_degenerate_viewport() {
        let scene = Scene::new();
        let ctx = RenderContext::new(&scene, Size::ZERO);
        assert_eq!(ctx.view_transform() * kurbo::Point::new(10.0, 20.0), kurbo::Point::new(10.0, 20.0));
    }

    #[test]
    fn test_build_scene_in_paint_order() {
        let mut scene = Scene::new();
        let a = scene.add_element(ElementSpec::Kind(ElementType::Rectangle)).unwrap();
        let b = scene.add_element(ElementSpec::Kind(ElementType::Circle)).unwrap();
        let hidden = scene.add_element(ElementSpec::Kind(ElementType::Star)).unwrap();
        scene.toggle_visibility(&hidden);

        let mut renderer = DisplayListRenderer::new();
        renderer.build_scene(&RenderContext::new(&scene, Size::new(800.0, 600.0)));
        let ids: Vec<_> = renderer.elements().map(|i| i.id.clone()).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn test_guides_follow_toggle() {
        let mut scene = Scene::new();
        scene.add_element(ElementSpec::Kind(ElementType::Rectangle)).unwrap();
        let moving = scene.add_element(ElementSpec::Kind(ElementType::Rectangle)).unwrap();
        scene.update_element(&moving, ElementUpdate::default().position(500.0, 500.0));
        scene.on_drag_move(&moving, DragInput::new(101.0, 400.0));
        assert!(!scene.guides().is_empty());

        let mut renderer = DisplayListRenderer::new();
        renderer.build_scene(&RenderContext::new(&scene, Size::new(800.0, 600.0)));
        assert_eq!(renderer.guides().count(), scene.guides().len());

        renderer.build_scene(&RenderContext::new(&scene, Size::new(800.0, 600.0)).with_guides(false));
        assert_eq!(renderer.guides().count(), 0);
        assert_eq!(renderer.take_items().len(), 3);
        assert!(renderer.items().is_empty());
    }
}
