//! Error types for record ingestion

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering or reading record files
#[derive(Error, Debug)]
pub enum IngestError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Pattern matching error
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
