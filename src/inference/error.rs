//! Error types for schema extraction

use thiserror::Error;

/// Errors that can occur during schema extraction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// No records to extract from
    #[error("No records provided for extraction")]
    NoRecords,
}
