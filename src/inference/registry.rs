//! Path registry: the associative store of field statistics

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::config::ExtractionConfig;
use super::field::{FieldInfo, FieldRecorder};
use super::value::ValueNode;

/// Ordered map from field path to its statistics.
///
/// Each path has exactly one entry. Partial registries built from different
/// records or files are combined with [`PathRegistry::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathRegistry {
    fields: BTreeMap<String, FieldInfo>,
}

impl PathRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&FieldInfo> {
        self.fields.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.fields.contains_key(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldInfo)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldInfo> {
        self.fields.values()
    }

    /// Insert a field under its own path, replacing any existing entry
    pub fn insert(&mut self, field: FieldInfo) -> Option<FieldInfo> {
        self.fields.insert(field.path.clone(), field)
    }

    pub fn into_fields(self) -> impl Iterator<Item = FieldInfo> {
        self.fields.into_values()
    }

    /// Record one occurrence of `value` at `path`
    pub fn record(&mut self, path: &str, value: &Value, recorder: &FieldRecorder<'_>) {
        let field = match self.fields.entry(path.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let label = recorder.classify(ValueNode::decode(value));
                entry.insert(FieldInfo::new(path, label))
            }
        };
        recorder.observe(field, value);
    }

    /// Fold another partial registry into this one.
    ///
    /// The reduce is associative: counts are summed, types merged through the
    /// lattice and bounded collections unioned up to their caps.
    pub fn merge(&mut self, other: PathRegistry, config: &ExtractionConfig) {
        for (path, field) in other.fields {
            match self.fields.entry(path) {
                Entry::Occupied(mut entry) => entry.get_mut().absorb(field, config),
                Entry::Vacant(entry) => {
                    entry.insert(field);
                }
            }
        }
    }

    /// Run the enum decision over every field; returns the number of enum paths
    pub fn decide_enums(&mut self, config: &ExtractionConfig) -> usize {
        self.fields
            .values_mut()
            .map(|field| field.decide_enum(config))
            .filter(|is_enum| *is_enum)
            .count()
    }

    /// Number of fields currently marked as enums
    pub fn enum_count(&self) -> usize {
        self.fields.values().filter(|f| f.is_enum).count()
    }

    /// Number of fields per rendered type label
    pub fn type_histogram(&self) -> BTreeMap<String, usize> {
        let mut histogram = BTreeMap::new();
        for field in self.fields.values() {
            *histogram.entry(field.data_type.to_string()).or_insert(0) += 1;
        }
        histogram
    }
}

impl FromIterator<FieldInfo> for PathRegistry {
    fn from_iter<I: IntoIterator<Item = FieldInfo>>(iter: I) -> Self {
        let mut registry = PathRegistry::new();
        for field in iter {
            registry.insert(field);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::lattice::TypeLabel;
    use serde_json::json;

    #[test]
    fn test_record_creates_and_updates() {
        let config = ExtractionConfig::default();
        let recorder = FieldRecorder::new(&config);
        let mut registry = PathRegistry::new();

        registry.record("a", &json!(1), &recorder);
        registry.record("a", &json!(2), &recorder);
        registry.record("b", &json!(null), &recorder);

        assert_eq!(registry.len(), 2);
        let a = registry.get("a").unwrap();
        assert_eq!(a.occurrence_count, 2);
        assert_eq!(a.data_type, TypeLabel::Integer);

        let b = registry.get("b").unwrap();
        assert_eq!(b.null_count, 1);
        assert_eq!(b.data_type, TypeLabel::Null);
    }

    #[test]
    fn test_merge_matches_sequential_recording() {
        let config = ExtractionConfig::default();
        let recorder = FieldRecorder::new(&config);
        let values = [json!(1), json!("x"), json!(null), json!(2.5)];

        let mut sequential = PathRegistry::new();
        for v in &values {
            sequential.record("p", v, &recorder);
        }

        let mut left = PathRegistry::new();
        let mut right = PathRegistry::new();
        for v in &values[..2] {
            left.record("p", v, &recorder);
        }
        for v in &values[2..] {
            right.record("p", v, &recorder);
        }
        left.merge(right, &config);

        let merged = left.get("p").unwrap();
        let expected = sequential.get("p").unwrap();
        assert_eq!(merged.occurrence_count, expected.occurrence_count);
        assert_eq!(merged.null_count, expected.null_count);
        assert_eq!(merged.data_type, expected.data_type);
        assert_eq!(merged.data_type, TypeLabel::Mixed);
    }

    #[test]
    fn test_decide_enums_counts() {
        let config = ExtractionConfig::default();
        let recorder = FieldRecorder::new(&config);
        let mut registry = PathRegistry::new();
        for role in ["user", "assistant", "user", "user", "assistant", "user"] {
            registry.record("role", &json!(role), &recorder);
        }
        for i in 0..6 {
            registry.record("id", &json!(format!("id-{}", i)), &recorder);
        }

        assert_eq!(registry.decide_enums(&config), 1);
        assert!(registry.get("role").unwrap().is_enum);
        assert!(!registry.get("id").unwrap().is_enum);
        assert_eq!(registry.enum_count(), 1);
    }

    #[test]
    fn test_type_histogram() {
        let config = ExtractionConfig::default();
        let recorder = FieldRecorder::new(&config);
        let mut registry = PathRegistry::new();
        registry.record("a", &json!("x"), &recorder);
        registry.record("b", &json!("y"), &recorder);
        registry.record("c", &json!([1]), &recorder);

        let histogram = registry.type_histogram();
        assert_eq!(histogram.get("string"), Some(&2));
        assert_eq!(histogram.get("array[integer]"), Some(&1));
    }
}
