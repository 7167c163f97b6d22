//! Aggregate configuration loaded from TOML, YAML or JSON files

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cover::CoverConfig;
use crate::inference::ExtractionConfig;
use crate::structure::StructureConfig;

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    /// Unsupported file extension
    #[error("Unsupported configuration format: {0} (expected .toml, .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for all three analyses
///
/// Every section is optional; missing keys fall back to their defaults.
///
/// ```toml
/// [extraction]
/// maxDepth = 12
/// enumMinOccurrences = 3
///
/// [structure]
/// maxExamples = 2
///
/// [cover]
/// maxSessions = 500
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SurveyConfig {
    pub extraction: ExtractionConfig,
    pub structure: StructureConfig,
    pub cover: CoverConfig,
}

impl SurveyConfig {
    /// Load configuration, choosing the parser by file extension
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        let config: SurveyConfig = match extension.as_deref() {
            Some("toml") => toml::from_str(&content)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values the builders would have clamped
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extraction.max_array_elements == 0 {
            return Err(ConfigError::Invalid(
                "extraction.maxArrayElements must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.extraction.enum_max_ratio) {
            return Err(ConfigError::Invalid(format!(
                "extraction.enumMaxRatio must be between 0.0 and 1.0, got {}",
                self.extraction.enum_max_ratio
            )));
        }
        if self.structure.array_sample == 0 {
            return Err(ConfigError::Invalid(
                "structure.arraySample must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("survey.toml");
        fs::write(
            &path,
            "[extraction]\nmaxDepth = 12\ntruncationSuffix = \"~\"\n\n[cover]\nmaxSessions = 3\n",
        )
        .unwrap();

        let config = SurveyConfig::load(&path).unwrap();
        assert_eq!(config.extraction.max_depth, 12);
        assert_eq!(config.extraction.truncation_suffix, "~");
        assert_eq!(config.extraction.max_examples, 10);
        assert_eq!(config.cover.max_sessions, 3);
        assert_eq!(config.structure, StructureConfig::default());
    }

    #[test]
    fn test_load_yaml_with_prefixes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("survey.yaml");
        fs::write(
            &path,
            "extraction:\n  idPrefixes:\n    - prefix: evt_\n      tag: EVENT_ID\nstructure:\n  maxExamples: 1\n",
        )
        .unwrap();

        let config = SurveyConfig::load(&path).unwrap();
        assert_eq!(config.extraction.id_prefixes.len(), 1);
        assert_eq!(config.extraction.id_prefixes[0].tag, "EVENT_ID");
        assert_eq!(config.structure.max_examples, 1);
    }

    #[test]
    fn test_load_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("survey.json");
        fs::write(&path, r#"{"extraction": {"enumMinOccurrences": 2}}"#).unwrap();

        let config = SurveyConfig::load(&path).unwrap();
        assert_eq!(config.extraction.enum_min_occurrences, 2);
    }

    #[test]
    fn test_invalid_ratio_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("survey.json");
        fs::write(&path, r#"{"extraction": {"enumMaxRatio": 2.0}}"#).unwrap();

        assert!(matches!(
            SurveyConfig::load(&path),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_unsupported_and_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("survey.ini");
        fs::write(&path, "").unwrap();

        assert!(matches!(
            SurveyConfig::load(&path),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            SurveyConfig::load(&dir.path().join("absent.toml")),
            Err(ConfigError::NotFound(_))
        ));
    }
}
