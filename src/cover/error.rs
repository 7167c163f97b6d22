//! Error types for session cover selection

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building, loading or covering a session index
#[derive(Error, Debug)]
pub enum CoverError {
    /// The structure pass has not finished for this index
    #[error("Structure pass incomplete: the session index has not been sealed")]
    StructurePassIncomplete,

    /// The index artifact the selector depends on does not exist
    #[error("Missing session index artifact: {0}")]
    MissingArtifact(PathBuf),

    /// A sealed index cannot accept new sessions
    #[error("Session index is sealed; cannot add session {0}")]
    IndexSealed(String),

    /// Unsupported artifact extension
    #[error("Unsupported artifact format: {0}")]
    UnsupportedFormat(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
