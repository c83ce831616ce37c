//! Error types for scene operations.

use thiserror::Error;

/// Errors surfaced by the scene store.
///
/// Most failure modes degrade silently (missing ids, unresolved branding
/// keys, occupied frames); only the cases below are reported.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Unsupported element kind: {0}")]
    UnsupportedKind(String),
    #[error("Invalid scene document: {0}")]
    InvalidDocument(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
