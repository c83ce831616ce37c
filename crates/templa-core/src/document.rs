//! Serialized scene format.
//!
//! The core never touches the filesystem; an import/export collaborator hands
//! JSON strings in and out.

use crate::branding::BrandingRegistry;
use crate::error::{SceneError, SceneResult};
use crate::geometry::{AspectRatio, DEFAULT_STAGE_SIZE, Stage};
use crate::shapes::Element;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Stage block of a scene document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageInfo {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
}

impl Default for StageInfo {
    fn default() -> Self {
        Self {
            width: DEFAULT_STAGE_SIZE,
            height: DEFAULT_STAGE_SIZE,
            aspect_ratio: AspectRatio::default(),
        }
    }
}

impl StageInfo {
    pub fn stage(&self) -> Stage {
        Stage::new(self.width, self.height)
    }
}

/// A complete scene: elements in paint order, stage and optional branding.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneDocument {
    pub elements: Vec<Element>,
    #[serde(default)]
    pub stage: StageInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branding: Option<BrandingRegistry>,
}

impl SceneDocument {
    /// Serialize the document to JSON.
    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize and validate a document.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        let document: Self = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    /// Reject documents whose geometry cannot be normalized or whose ids
    /// collide.
    pub fn validate(&self) -> SceneResult<()> {
        if self.stage.width <= 0.0 || self.stage.height <= 0.0 {
            return Err(SceneError::InvalidDocument(format!(
                "stage size must be positive, got {}x{}",
                self.stage.width, self.stage.height
            )));
        }
        let mut seen = HashSet::new();
        for element in &self.elements {
            if !seen.insert(&element.id) {
                return Err(SceneError::InvalidDocument(format!(
                    "duplicate element id {}",
                    element.id
                )));
            }
        }
        Ok(())
    }
}
