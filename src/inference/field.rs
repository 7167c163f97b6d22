//! Aggregated statistics for a single field path

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::config::ExtractionConfig;
use super::lattice::{TypeClassifier, TypeLabel};
use super::patterns::pattern_tag;
use super::value::{ScalarValue, ValueNode, printed_form};

/// Statistics for one distinct field path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    /// Dot/bracket path, e.g. `message.content[*].type`
    pub path: String,
    /// Merged type of every non-null occurrence
    pub data_type: TypeLabel,
    /// Number of occurrences (including nulls)
    pub occurrence_count: usize,
    /// Number of null occurrences
    pub null_count: usize,
    /// Truncated example values, unique by printed form
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub value_examples: Vec<Value>,
    /// Distinct scalar values, capped
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub unique_values: BTreeSet<ScalarValue>,
    /// Whether the observed values suggest a closed domain
    #[serde(default)]
    pub is_enum: bool,
    /// Sorted enum domain (only when `is_enum`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<ScalarValue>,
    /// Recognized string pattern tags
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub value_patterns: BTreeSet<String>,
}

impl FieldInfo {
    /// Create an empty field with an initial type
    pub fn new(path: impl Into<String>, data_type: TypeLabel) -> Self {
        Self {
            path: path.into(),
            data_type,
            occurrence_count: 0,
            null_count: 0,
            value_examples: Vec::new(),
            unique_values: BTreeSet::new(),
            is_enum: false,
            enum_values: Vec::new(),
            value_patterns: BTreeSet::new(),
        }
    }

    /// Occurrences that were not null
    pub fn non_null_count(&self) -> usize {
        self.occurrence_count.saturating_sub(self.null_count)
    }

    /// Fraction of occurrences that were null
    pub fn null_rate(&self) -> f64 {
        if self.occurrence_count == 0 {
            0.0
        } else {
            self.null_count as f64 / self.occurrence_count as f64
        }
    }

    /// Add an example unless one with the same printed form exists or the cap is reached
    pub fn add_example(&mut self, example: Value, max_examples: usize) -> bool {
        if self.value_examples.len() >= max_examples {
            return false;
        }
        let printed = printed_form(&example);
        if self
            .value_examples
            .iter()
            .any(|existing| printed_form(existing) == printed)
        {
            return false;
        }
        self.value_examples.push(example);
        true
    }

    /// Insert a scalar into the capped unique set
    pub fn add_unique(&mut self, value: ScalarValue, max_unique: usize) {
        if self.unique_values.len() < max_unique {
            self.unique_values.insert(value);
        }
    }

    /// Fold another partial observation of the same path into this one.
    ///
    /// Counts are summed and types merged through the lattice, so the result
    /// does not depend on the order partial registries are combined in (apart
    /// from which examples survive the cap).
    pub fn absorb(&mut self, other: FieldInfo, config: &ExtractionConfig) {
        self.occurrence_count += other.occurrence_count;
        self.null_count += other.null_count;
        self.data_type = self.data_type.merge(&other.data_type);

        for example in other.value_examples {
            self.add_example(example, config.max_examples);
        }
        for value in other.unique_values {
            self.add_unique(value, config.max_unique_values);
        }
        self.value_patterns.extend(other.value_patterns);

        if other.is_enum {
            self.is_enum = true;
            let mut values: BTreeSet<ScalarValue> = std::mem::take(&mut self.enum_values)
                .into_iter()
                .collect();
            values.extend(other.enum_values);
            self.enum_values = values.into_iter().collect();
        }
    }

    /// Decide whether this field is an enum and populate `enum_values`
    pub fn decide_enum(&mut self, config: &ExtractionConfig) -> bool {
        let non_null = self.non_null_count();
        let distinct = self.unique_values.len();
        let ratio_limit = config.enum_max_ratio * non_null as f64;

        let qualifies = non_null >= config.enum_min_occurrences
            && distinct <= config.max_unique_values
            && (distinct as f64) <= ratio_limit
            && self.data_type.is_enum_candidate();

        self.is_enum = qualifies;
        self.enum_values = if qualifies {
            self.unique_values.iter().cloned().collect()
        } else {
            Vec::new()
        };
        qualifies
    }
}

/// Records single occurrences of values into [`FieldInfo`]s
#[derive(Debug, Clone)]
pub struct FieldRecorder<'c> {
    config: &'c ExtractionConfig,
    classifier: TypeClassifier<'c>,
}

impl<'c> FieldRecorder<'c> {
    pub fn new(config: &'c ExtractionConfig) -> Self {
        Self {
            config,
            classifier: TypeClassifier::new(&config.id_prefixes, config.max_array_elements),
        }
    }

    pub fn config(&self) -> &'c ExtractionConfig {
        self.config
    }

    pub fn classify(&self, node: ValueNode<'_>) -> TypeLabel {
        self.classifier.classify(node)
    }

    /// Record one occurrence of `value` into `field`
    pub fn observe(&self, field: &mut FieldInfo, value: &Value) {
        let node = ValueNode::decode(value);
        field.occurrence_count += 1;

        if node.is_null() {
            field.null_count += 1;
            return;
        }

        let label = self.classify(node);
        field.data_type = field.data_type.merge(&label);

        if field.value_examples.len() < self.config.max_examples {
            let example = truncate_example(
                value,
                self.config.max_value_length,
                &self.config.truncation_suffix,
            );
            field.add_example(example, self.config.max_examples);
        }

        if let Some(scalar) = node.scalar() {
            field.add_unique(scalar, self.config.max_unique_values);
        }

        if let ValueNode::String(s) = node
            && let Some(tag) = pattern_tag(s, &self.config.id_prefixes)
            && !field.value_patterns.contains(tag)
        {
            field.value_patterns.insert(tag.to_string());
        }
    }
}

/// Shorten a string to `max_chars` characters plus `suffix` if it is longer
pub fn truncate_str(value: &str, max_chars: usize, suffix: &str) -> Option<String> {
    let mut indices = value.char_indices();
    let (cut, _) = indices.nth(max_chars)?;
    let mut truncated = String::with_capacity(cut + suffix.len());
    truncated.push_str(&value[..cut]);
    truncated.push_str(suffix);
    Some(truncated)
}

/// Example form of a value: long strings are truncated, containers are
/// printed as compact JSON and truncated the same way.
pub fn truncate_example(value: &Value, max_chars: usize, suffix: &str) -> Value {
    match value {
        Value::String(s) => match truncate_str(s, max_chars, suffix) {
            Some(short) => Value::String(short),
            None => value.clone(),
        },
        Value::Array(_) | Value::Object(_) => {
            let printed = value.to_string();
            let short = truncate_str(&printed, max_chars, suffix).unwrap_or(printed);
            Value::String(short)
        }
        _ => value.clone(),
    }
}
