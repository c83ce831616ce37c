//! Templa Core Library
//!
//! Scene model, alignment engine, frame/image binding and undo history for
//! the Templa template editor. Platform-agnostic: painting happens in an
//! adapter (see `templa-render`) that feeds gestures back through
//! [`Scene`]'s interaction handlers.

pub mod binding;
pub mod branding;
pub mod canvas;
pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod history;
pub mod interaction;
pub mod shapes;
pub mod snap;

pub use binding::{BindingState, fit_rect};
pub use branding::{BrandingMode, BrandingRegistry, ColorSlot, FontEntry, ResolvedFont};
pub use canvas::{ReorderDirection, Scene};
pub use config::{ConfigError, EditorConfig};
pub use document::{SceneDocument, StageInfo};
pub use error::{SceneError, SceneResult};
pub use geometry::{AspectRatio, PercentLayout, Stage};
pub use history::History;
pub use interaction::{DragInput, TransformInput};
pub use shapes::{
    Element, ElementId, ElementKind, ElementSpec, ElementType, ElementUpdate, FitMode,
    GeometryStrategy,
};
pub use snap::{Guide, GuideKind, SnapResult, calculate_snapping_position, draw_guidelines};
