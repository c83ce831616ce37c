//! Frame placeholders.

use super::FitMode;
use serde::{Deserialize, Serialize};

/// Frame-specific attributes. The bound image is not stored here; it is
/// found by scanning for an image whose `frameId` names this frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrameProps {
    #[serde(alias = "borderRadiusSpecial")]
    pub corner_radius: f64,
    pub dash: Vec<f64>,
    pub tags: Vec<String>,
    pub label: String,
    /// Fit mode applied to images dropped into this frame.
    pub fit_mode: FitMode,
}

impl FrameProps {
    pub const DEFAULT_STROKE: &'static str = "#B5B0B0";
}

impl Default for FrameProps {
    fn default() -> Self {
        Self {
            corner_radius: 0.0,
            dash: vec![5.0, 5.0],
            tags: Vec::new(),
            label: String::new(),
            fit_mode: FitMode::Fill,
        }
    }
}
