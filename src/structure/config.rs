//! Configuration for structure classification

use serde::{Deserialize, Serialize};

/// Configuration for the structure catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructureConfig {
    /// Maximum depth of the object walk inside a record
    pub max_depth: usize,

    /// Number of leading array elements signed
    pub array_sample: usize,

    /// Maximum examples kept per class
    pub max_examples: usize,

    /// Strings inside examples longer than this are truncated
    pub max_string_length: usize,

    /// Number of classes listed in the summary
    pub top_classes: usize,

    /// Signatures longer than this are truncated in the summary
    pub max_signature_display: usize,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            max_depth: 20,
            array_sample: 10,
            max_examples: 5,
            max_string_length: 100,
            top_classes: 20,
            max_signature_display: 200,
        }
    }
}

impl StructureConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> StructureConfigBuilder {
        StructureConfigBuilder::default()
    }
}

/// Builder for StructureConfig
#[derive(Debug, Default)]
pub struct StructureConfigBuilder {
    config: StructureConfig,
}

impl StructureConfigBuilder {
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Set the array sample size (at least 1)
    pub fn array_sample(mut self, count: usize) -> Self {
        self.config.array_sample = count.max(1);
        self
    }

    pub fn max_examples(mut self, max: usize) -> Self {
        self.config.max_examples = max;
        self
    }

    pub fn max_string_length(mut self, len: usize) -> Self {
        self.config.max_string_length = len;
        self
    }

    pub fn top_classes(mut self, count: usize) -> Self {
        self.config.top_classes = count;
        self
    }

    pub fn max_signature_display(mut self, len: usize) -> Self {
        self.config.max_signature_display = len;
        self
    }

    pub fn build(self) -> StructureConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StructureConfig::default();
        assert_eq!(config.max_depth, 20);
        assert_eq!(config.array_sample, 10);
        assert_eq!(config.max_examples, 5);
        assert_eq!(config.top_classes, 20);
    }

    #[test]
    fn test_builder_clamps_sample() {
        let config = StructureConfig::builder().array_sample(0).max_examples(1).build();
        assert_eq!(config.array_sample, 1);
        assert_eq!(config.max_examples, 1);
    }
}
