//! Recursive field-path extraction

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use super::array_merge::merge_array_paths;
use super::artifact::SchemaArtifact;
use super::config::ExtractionConfig;
use super::error::ExtractionError;
use super::field::FieldRecorder;
use super::registry::PathRegistry;
use super::value::ValueNode;

/// Statistics from field extraction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionStats {
    /// Files whose records were added
    pub files_processed: usize,
    /// Files that could not be read
    pub files_skipped: usize,
    /// Records walked
    pub records_processed: usize,
    /// Records skipped (invalid JSON)
    pub records_skipped: usize,
    /// Distinct paths discovered so far
    pub paths_discovered: usize,
}

/// Extract every reachable field path of a single record into a fresh registry
pub fn extract_paths(value: &Value, config: &ExtractionConfig) -> PathRegistry {
    let mut registry = PathRegistry::new();
    let recorder = FieldRecorder::new(config);
    walk(&recorder, &mut registry, value, "", config.max_depth);
    registry
}

fn child_key(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

// Each child is recorded once by its parent, then containers are descended.
fn walk(
    recorder: &FieldRecorder<'_>,
    registry: &mut PathRegistry,
    value: &Value,
    path: &str,
    depth: usize,
) {
    if depth == 0 {
        return;
    }

    match ValueNode::decode(value) {
        ValueNode::Object(map) => {
            for (key, child) in map {
                let child_path = child_key(path, key);
                registry.record(&child_path, child, recorder);
                if ValueNode::decode(child).is_container() {
                    walk(recorder, registry, child, &child_path, depth - 1);
                }
            }
        }
        ValueNode::Array(items) => {
            let sample = recorder.config().max_array_elements.max(1);
            for (index, item) in items.iter().take(sample).enumerate() {
                if ValueNode::decode(item).is_container() {
                    let item_path = format!("{}[{}]", path, index);
                    registry.record(&item_path, item, recorder);
                    walk(recorder, registry, item, &item_path, depth - 1);
                } else {
                    registry.record(&format!("{}[*]", path), item, recorder);
                }
            }
        }
        _ => {}
    }
}

/// Stateful extractor accumulating records into one registry
///
/// Partial extractors (for example one per file) are combined with
/// [`SchemaExtractor::absorb`] and turned into an artifact with
/// [`SchemaExtractor::finish`].
#[derive(Debug, Clone)]
pub struct SchemaExtractor {
    config: ExtractionConfig,
    registry: PathRegistry,
    stats: ExtractionStats,
}

impl Default for SchemaExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaExtractor {
    /// Create an extractor with default configuration
    pub fn new() -> Self {
        Self::with_config(ExtractionConfig::default())
    }

    /// Create an extractor with custom configuration
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self {
            config,
            registry: PathRegistry::new(),
            stats: ExtractionStats::default(),
        }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn registry(&self) -> &PathRegistry {
        &self.registry
    }

    /// Add a single JSON string.
    ///
    /// Malformed input is counted in `records_skipped`; returns whether the
    /// record was accepted.
    pub fn add_json(&mut self, json: &str) -> bool {
        match serde_json::from_str::<Value>(json) {
            Ok(value) => {
                self.add_value(&value);
                true
            }
            Err(e) => {
                trace!(error = %e, "Skipping malformed record");
                self.stats.records_skipped += 1;
                false
            }
        }
    }

    /// Add a parsed record
    pub fn add_value(&mut self, value: &Value) {
        let recorder = FieldRecorder::new(&self.config);
        walk(&recorder, &mut self.registry, value, "", self.config.max_depth);
        self.stats.records_processed += 1;
    }

    /// Add a batch of parsed records
    pub fn add_records<'v, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'v Value>,
    {
        for record in records {
            self.add_value(record);
        }
    }

    /// Count records that were rejected before reaching the extractor
    pub fn note_skipped_records(&mut self, count: usize) {
        self.stats.records_skipped += count;
    }

    pub fn note_file_processed(&mut self) {
        self.stats.files_processed += 1;
    }

    pub fn note_file_skipped(&mut self) {
        self.stats.files_skipped += 1;
    }

    /// Fold another partial extractor into this one
    pub fn absorb(&mut self, other: SchemaExtractor) {
        self.registry.merge(other.registry, &self.config);
        self.stats.files_processed += other.stats.files_processed;
        self.stats.files_skipped += other.stats.files_skipped;
        self.stats.records_processed += other.stats.records_processed;
        self.stats.records_skipped += other.stats.records_skipped;
    }

    /// Get extraction statistics
    pub fn stats(&self) -> ExtractionStats {
        ExtractionStats {
            paths_discovered: self.registry.len(),
            ..self.stats.clone()
        }
    }

    /// Decide enums, generalize array paths and build the schema artifact
    pub fn finish(self) -> Result<SchemaArtifact, ExtractionError> {
        if self.stats.records_processed == 0 {
            return Err(ExtractionError::NoRecords);
        }

        let stats = self.stats();
        let mut registry = self.registry;
        let enum_paths = registry.decide_enums(&self.config);
        let merge = merge_array_paths(registry, &self.config);

        debug!(
            paths = stats.paths_discovered,
            enum_paths,
            folded = merge.folded_paths,
            "Finished field extraction"
        );

        Ok(SchemaArtifact::new(stats, merge.registry, merge.folded_paths))
    }
}
