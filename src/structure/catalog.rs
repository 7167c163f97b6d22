//! Catalog of object structure classes

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::config::StructureConfig;
use super::signature::{complexity, signature_with_sample};
use crate::inference::{ValueNode, truncate_str};

const TRUNCATION_SUFFIX: &str = "...";

/// All objects sharing one structure signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectTypeClass {
    pub signature: String,
    pub count: usize,
    /// Bounded examples with long strings truncated
    #[serde(default)]
    pub examples: Vec<Value>,
}

impl ObjectTypeClass {
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            count: 0,
            examples: Vec::new(),
        }
    }

    pub fn complexity(&self) -> usize {
        complexity(&self.signature)
    }
}

/// Counters shared by every catalog report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_files: usize,
    pub total_records: usize,
    pub total_objects: usize,
    pub total_classes: usize,
}

/// One class in a detail or compact report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEntry {
    pub type_id: String,
    pub signature: String,
    pub complexity: usize,
    pub count: usize,
    /// Share of all objects, in percent
    pub share: f64,
    pub examples: Vec<Value>,
}

/// Ranked listing of every class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogReport {
    pub generated_at: DateTime<Utc>,
    pub stats: CatalogStats,
    pub classes: Vec<ClassEntry>,
}

/// One of the most frequent classes in a summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopClass {
    pub rank: usize,
    pub signature: String,
    pub complexity: usize,
    pub count: usize,
    pub share: f64,
}

/// Distributions over the catalog plus the most frequent classes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub generated_at: DateTime<Utc>,
    pub stats: CatalogStats,
    /// complexity -> number of classes
    pub complexity_distribution: BTreeMap<usize, usize>,
    /// occurrence bucket -> number of classes
    pub occurrence_distribution: BTreeMap<String, usize>,
    pub top_classes: Vec<TopClass>,
}

/// Occurrence bucket label for a class count
pub fn occurrence_bucket(count: usize) -> &'static str {
    match count {
        0 | 1 => "1",
        2..=5 => "2-5",
        6..=10 => "6-10",
        11..=50 => "11-50",
        _ => "50+",
    }
}

/// Registry of [`ObjectTypeClass`]es over every object reachable in the records
#[derive(Debug, Clone, Default)]
pub struct StructureCatalog {
    config: StructureConfig,
    classes: BTreeMap<String, ObjectTypeClass>,
    total_files: usize,
    total_records: usize,
    total_objects: usize,
}

impl StructureCatalog {
    pub fn new() -> Self {
        Self::with_config(StructureConfig::default())
    }

    pub fn with_config(config: StructureConfig) -> Self {
        Self {
            config,
            classes: BTreeMap::new(),
            total_files: 0,
            total_records: 0,
            total_objects: 0,
        }
    }

    pub fn config(&self) -> &StructureConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn get(&self, signature: &str) -> Option<&ObjectTypeClass> {
        self.classes.get(signature)
    }

    pub fn total_objects(&self) -> usize {
        self.total_objects
    }

    pub fn note_file_processed(&mut self) {
        self.total_files += 1;
    }

    /// Classify every object reachable in a record
    pub fn add_record(&mut self, record: &Value) {
        self.total_records += 1;
        self.walk(record, self.config.max_depth);
    }

    pub fn add_records<'v, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'v Value>,
    {
        for record in records {
            self.add_record(record);
        }
    }

    fn walk(&mut self, value: &Value, depth: usize) {
        if depth == 0 {
            return;
        }
        match ValueNode::decode(value) {
            ValueNode::Object(map) => {
                self.add_object(value);
                for child in map.values() {
                    self.walk(child, depth - 1);
                }
            }
            ValueNode::Array(items) => {
                for item in items {
                    self.walk(item, depth - 1);
                }
            }
            _ => {}
        }
    }

    fn add_object(&mut self, object: &Value) {
        self.total_objects += 1;
        let signature = signature_with_sample(object, self.config.array_sample);
        let class = self
            .classes
            .entry(signature)
            .or_insert_with_key(|sig| ObjectTypeClass::new(sig.clone()));
        class.count += 1;
        if class.examples.len() < self.config.max_examples {
            class
                .examples
                .push(truncate_strings(object, self.config.max_string_length));
        }
    }

    /// Fold another catalog into this one
    pub fn absorb(&mut self, other: StructureCatalog) {
        self.total_files += other.total_files;
        self.total_records += other.total_records;
        self.total_objects += other.total_objects;
        for (signature, class) in other.classes {
            let existing = self
                .classes
                .entry(signature)
                .or_insert_with_key(|sig| ObjectTypeClass::new(sig.clone()));
            existing.count += class.count;
            let room = self.config.max_examples.saturating_sub(existing.examples.len());
            existing.examples.extend(class.examples.into_iter().take(room));
        }
    }

    /// The set of signatures seen so far
    pub fn signatures(&self) -> BTreeSet<String> {
        self.classes.keys().cloned().collect()
    }

    /// Classes by count descending, ties by signature
    pub fn ranked(&self) -> Vec<&ObjectTypeClass> {
        let mut ranked: Vec<&ObjectTypeClass> = self.classes.values().collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.signature.cmp(&b.signature)));
        ranked
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            total_files: self.total_files,
            total_records: self.total_records,
            total_objects: self.total_objects,
            total_classes: self.classes.len(),
        }
    }

    fn share(&self, count: usize) -> f64 {
        if self.total_objects == 0 {
            return 0.0;
        }
        let percent = count as f64 / self.total_objects as f64 * 100.0;
        (percent * 100.0).round() / 100.0
    }

    fn report(&self, max_examples: usize) -> CatalogReport {
        let classes = self
            .ranked()
            .into_iter()
            .enumerate()
            .map(|(i, class)| ClassEntry {
                type_id: format!("type_{:03}", i + 1),
                signature: class.signature.clone(),
                complexity: class.complexity(),
                count: class.count,
                share: self.share(class.count),
                examples: class.examples.iter().take(max_examples).cloned().collect(),
            })
            .collect();

        CatalogReport {
            generated_at: Utc::now(),
            stats: self.stats(),
            classes,
        }
    }

    /// Every class with all of its examples
    pub fn detail(&self) -> CatalogReport {
        self.report(usize::MAX)
    }

    /// Every class with at most one example
    pub fn compact(&self) -> CatalogReport {
        self.report(1)
    }

    /// Complexity and occurrence distributions plus the top classes
    pub fn summary(&self) -> CatalogSummary {
        let mut complexity_distribution = BTreeMap::new();
        let mut occurrence_distribution = BTreeMap::new();
        for class in self.classes.values() {
            *complexity_distribution.entry(class.complexity()).or_insert(0) += 1;
            *occurrence_distribution
                .entry(occurrence_bucket(class.count).to_string())
                .or_insert(0) += 1;
        }

        let top_classes = self
            .ranked()
            .into_iter()
            .take(self.config.top_classes)
            .enumerate()
            .map(|(i, class)| TopClass {
                rank: i + 1,
                signature: truncate_str(
                    &class.signature,
                    self.config.max_signature_display,
                    TRUNCATION_SUFFIX,
                )
                .unwrap_or_else(|| class.signature.clone()),
                complexity: class.complexity(),
                count: class.count,
                share: self.share(class.count),
            })
            .collect();

        CatalogSummary {
            generated_at: Utc::now(),
            stats: self.stats(),
            complexity_distribution,
            occurrence_distribution,
            top_classes,
        }
    }
}

/// Truncate long strings at any depth, keeping the structure intact
pub fn truncate_strings(value: &Value, max_chars: usize) -> Value {
    match value {
        Value::String(s) => match truncate_str(s, max_chars, TRUNCATION_SUFFIX) {
            Some(short) => Value::String(short),
            None => value.clone(),
        },
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| truncate_strings(item, max_chars))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), truncate_strings(v, max_chars)))
                .collect(),
        ),
        _ => value.clone(),
    }
}
