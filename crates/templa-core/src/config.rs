//! Editor configuration.

use crate::geometry::{DEFAULT_STAGE_SIZE, Stage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration value: {0}")]
    Invalid(String),
}

/// Tunables for the scene editor. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Distance in pixels under which magnetic snap applies.
    pub snap_threshold: f64,
    /// Distance in pixels under which a guide is emitted.
    pub guide_threshold: f64,
    /// Maximum number of undo snapshots kept.
    pub history_depth: usize,
    pub stage_width: f64,
    pub stage_height: f64,
    /// Text boxes never shrink below this width.
    pub min_text_width: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_threshold: 2.0,
            guide_threshold: 4.0,
            history_depth: 100,
            stage_width: DEFAULT_STAGE_SIZE,
            stage_height: DEFAULT_STAGE_SIZE,
            min_text_width: 30.0,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stage_width <= 0.0 || self.stage_height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "stage size must be positive, got {}x{}",
                self.stage_width, self.stage_height
            )));
        }
        if self.snap_threshold < 0.0 || self.guide_threshold < 0.0 {
            return Err(ConfigError::Invalid("thresholds must not be negative".into()));
        }
        Ok(())
    }

    pub fn stage(&self) -> Stage {
        Stage::new(self.stage_width, self.stage_height)
    }
}
