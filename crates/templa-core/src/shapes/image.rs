//! Image elements.

use super::ElementId;
use kurbo::Size;
use serde::{Deserialize, Deserializer, Serialize};

/// Scaling policy applied when an image is bound to a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Contain: whole image visible, may leave margins.
    Fit,
    /// Cover: fills the frame, overflow is clipped.
    #[default]
    Fill,
    /// Exact frame size, aspect ratio ignored.
    Stretch,
}

impl FitMode {
    /// Parse a mode tag; anything unrecognized is treated as [`FitMode::Fill`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "fit" | "contain" => FitMode::Fit,
            "stretch" => FitMode::Stretch,
            _ => FitMode::Fill,
        }
    }
}

impl<'de> Deserialize<'de> for FitMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = Option::<String>::deserialize(deserializer)?;
        Ok(tag.as_deref().map(FitMode::from_tag).unwrap_or_default())
    }
}

/// Image-specific attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProps {
    /// Already-resolved source URL or data URI.
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub original_width: f64,
    #[serde(default)]
    pub original_height: f64,
    #[serde(default)]
    pub fit_mode: FitMode,
    /// Frame hosting this image.
    #[serde(default)]
    pub frame_id: Option<ElementId>,
}

impl ImageProps {
    /// Natural image size.
    pub fn natural_size(&self) -> Size {
        Size::new(self.original_width, self.original_height)
    }
}
