//! Configuration for field-path extraction

use serde::{Deserialize, Serialize};

use super::patterns::{IdPrefix, default_id_prefixes};

/// Configuration for field-path extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractionConfig {
    /// Maximum recursion depth; deeper positions are silently ignored
    pub max_depth: usize,

    /// Number of leading array elements inspected for typing and descent
    pub max_array_elements: usize,

    /// Maximum number of examples kept per path
    pub max_examples: usize,

    /// Maximum number of distinct scalar values tracked per path
    pub max_unique_values: usize,

    /// Examples longer than this many characters are truncated
    pub max_value_length: usize,

    /// Appended to truncated examples
    pub truncation_suffix: String,

    /// String prefixes that mark identifiers
    pub id_prefixes: Vec<IdPrefix>,

    /// Minimum non-null occurrences before a path can be an enum
    pub enum_min_occurrences: usize,

    /// Maximum ratio of distinct values to non-null occurrences for enums (0.0 - 1.0)
    pub enum_max_ratio: f64,

    /// Maximum number of records read per file (0 = all)
    pub max_records_per_file: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_depth: 20,
            max_array_elements: 10,
            max_examples: 10,
            max_unique_values: 50,
            max_value_length: 100,
            truncation_suffix: "...".to_string(),
            id_prefixes: default_id_prefixes(),
            enum_min_occurrences: 5,
            enum_max_ratio: 0.8,
            max_records_per_file: 0,
        }
    }
}

impl ExtractionConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder::default()
    }
}

/// Builder for ExtractionConfig
#[derive(Debug, Default)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Set the array sample size (at least 1)
    pub fn max_array_elements(mut self, count: usize) -> Self {
        self.config.max_array_elements = count.max(1);
        self
    }

    pub fn max_examples(mut self, max: usize) -> Self {
        self.config.max_examples = max;
        self
    }

    pub fn max_unique_values(mut self, max: usize) -> Self {
        self.config.max_unique_values = max;
        self
    }

    pub fn max_value_length(mut self, len: usize) -> Self {
        self.config.max_value_length = len;
        self
    }

    pub fn truncation_suffix(mut self, suffix: &str) -> Self {
        self.config.truncation_suffix = suffix.to_string();
        self
    }

    /// Replace the identifier prefixes
    pub fn id_prefixes(mut self, prefixes: Vec<IdPrefix>) -> Self {
        self.config.id_prefixes = prefixes;
        self
    }

    pub fn enum_min_occurrences(mut self, min: usize) -> Self {
        self.config.enum_min_occurrences = min;
        self
    }

    /// Set the enum distinct-value ratio
    pub fn enum_max_ratio(mut self, ratio: f64) -> Self {
        self.config.enum_max_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    pub fn max_records_per_file(mut self, max: usize) -> Self {
        self.config.max_records_per_file = max;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ExtractionConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExtractionConfig::default();
        assert_eq!(config.max_depth, 20);
        assert_eq!(config.max_array_elements, 10);
        assert_eq!(config.max_unique_values, 50);
        assert_eq!(config.truncation_suffix, "...");
        assert_eq!(config.id_prefixes.len(), 3);
    }

    #[test]
    fn test_builder() {
        let config = ExtractionConfig::builder()
            .max_depth(5)
            .max_examples(3)
            .max_value_length(20)
            .truncation_suffix("…")
            .build();

        assert_eq!(config.max_depth, 5);
        assert_eq!(config.max_examples, 3);
        assert_eq!(config.max_value_length, 20);
        assert_eq!(config.truncation_suffix, "…");
    }

    #[test]
    fn test_clamping() {
        let config = ExtractionConfig::builder()
            .enum_max_ratio(1.5)
            .max_array_elements(0)
            .build();

        assert_eq!(config.enum_max_ratio, 1.0);
        assert_eq!(config.max_array_elements, 1);
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: ExtractionConfig = serde_json::from_str(r#"{"maxDepth": 4}"#).unwrap();
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.max_examples, 10);
    }
}
