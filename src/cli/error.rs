//! Error type for CLI commands

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::cover::CoverError;
use crate::inference::ExtractionError;
use crate::ingest::IngestError;

/// Errors surfaced by the `shape-survey` commands
#[derive(Error, Debug)]
pub enum CliError {
    /// No input files matched
    #[error("No input files found for: {0}")]
    NoInputFiles(String),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Discovery or reading failed
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Field extraction failed
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// Index loading or cover selection failed
    #[error(transparent)]
    Cover(#[from] CoverError),

    /// Output serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Copying a selected session failed
    #[error("Failed to copy {path}: {error}")]
    Copy { path: PathBuf, error: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(e: serde_yaml::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
