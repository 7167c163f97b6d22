//! Serializable schema output

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::extractor::ExtractionStats;
use super::lattice::TypeLabel;
use super::registry::PathRegistry;
use super::value::ScalarValue;

/// The schema discovered over a corpus of records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaArtifact {
    pub generated_at: DateTime<Utc>,
    pub total_files: usize,
    #[serde(default)]
    pub files_skipped: usize,
    pub total_records: usize,
    pub records_skipped: usize,
    pub total_paths: usize,
    pub enum_paths: usize,
    /// Paths containing a generalized `[*]` segment
    pub merged_paths: usize,
    /// Indexed paths folded by the array merge
    #[serde(default)]
    pub folded_paths: usize,
    pub type_histogram: BTreeMap<String, usize>,
    pub fields: PathRegistry,
}

impl SchemaArtifact {
    pub fn new(stats: ExtractionStats, fields: PathRegistry, folded_paths: usize) -> Self {
        Self {
            generated_at: Utc::now(),
            total_files: stats.files_processed,
            files_skipped: stats.files_skipped,
            total_records: stats.records_processed,
            records_skipped: stats.records_skipped,
            total_paths: fields.len(),
            enum_paths: fields.enum_count(),
            merged_paths: fields.paths().filter(|p| p.contains("[*]")).count(),
            folded_paths,
            type_histogram: fields.type_histogram(),
            fields,
        }
    }

    /// Path to first example, or a default value for the path's type
    pub fn field_listing(&self) -> BTreeMap<String, Value> {
        self.fields
            .iter()
            .map(|(path, field)| {
                let value = field
                    .value_examples
                    .first()
                    .cloned()
                    .unwrap_or_else(|| default_for(&field.data_type));
                (path.to_string(), value)
            })
            .collect()
    }

    /// Path to enum domain, for enum paths only
    pub fn enum_fields(&self) -> BTreeMap<String, Vec<ScalarValue>> {
        self.fields
            .iter()
            .filter(|(_, field)| field.is_enum)
            .map(|(path, field)| (path.to_string(), field.enum_values.clone()))
            .collect()
    }
}

fn default_for(label: &TypeLabel) -> Value {
    match label {
        TypeLabel::Null => Value::Null,
        TypeLabel::Boolean => Value::Bool(false),
        TypeLabel::Integer => Value::from(0),
        TypeLabel::Number => Value::from(0.0),
        TypeLabel::Array(_) => Value::Array(Vec::new()),
        TypeLabel::Object => Value::Object(Map::new()),
        _ => Value::String(String::new()),
    }
}
