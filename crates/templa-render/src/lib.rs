//! Templa Render Library
//!
//! Rendering adapter contract for the Templa editor: pure conversion of scene
//! elements into backend-neutral drawing instructions, plus the [`Renderer`]
//! trait backends implement.

mod color;
mod instruction;
mod paint;
mod renderer;

pub use color::{parse_color, slot_color, try_parse_color};
pub use instruction::{
    Clip, Content, DisplayItem, GuideInstruction, RenderInstruction, StrokeStyle, TextRun,
};
pub use paint::{guide_instructions, render_element, render_scene};
pub use renderer::{DisplayListRenderer, RenderContext, RenderResult, Renderer, RendererError};
