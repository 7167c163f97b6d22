//! CLI command handlers

pub mod classes;
pub mod cover;
pub mod fields;
pub mod index;

use std::path::Path;

use super::error::CliError;
use crate::config::SurveyConfig;
use crate::ingest::{DiscoveredFile, discover_inputs};

/// Load the configuration file if one was given, otherwise defaults
pub fn load_config(path: Option<&Path>) -> Result<SurveyConfig, CliError> {
    match path {
        Some(path) => {
            let config = SurveyConfig::load(path)?;
            eprintln!("Loaded configuration from {}", path.display());
            Ok(config)
        }
        None => Ok(SurveyConfig::default()),
    }
}

/// Resolve inputs to files, failing when nothing matches
pub fn discover(inputs: &[String]) -> Result<Vec<DiscoveredFile>, CliError> {
    let files = discover_inputs(inputs)?;
    if files.is_empty() {
        return Err(CliError::NoInputFiles(inputs.join(", ")));
    }
    eprintln!("Found {} input file(s)", files.len());
    Ok(files)
}
