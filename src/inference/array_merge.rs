//! Array-index path generalization
//!
//! Paths that differ only in concrete array indices (`content[0].type`,
//! `content[3].type`) are folded into one generalized path
//! (`content[*].type`) whose statistics combine every member.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use regex::Regex;

use super::config::ExtractionConfig;
use super::field::FieldInfo;
use super::lattice::TypeLabel;
use super::registry::PathRegistry;
use super::value::ScalarValue;

static ARRAY_INDEX_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\d+\]").unwrap());

/// Result of an array-path merge pass
#[derive(Debug, Clone)]
pub struct ArrayMerge {
    pub registry: PathRegistry,
    /// Number of input paths folded into a generalized path
    pub folded_paths: usize,
    /// Number of generalized paths produced from two or more members
    pub groups_merged: usize,
}

/// Replace every concrete `[<digits>]` index with `[*]`
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    ARRAY_INDEX_REGEX.replace_all(path, "[*]")
}

/// Fold array-indexed paths into their generalized form.
///
/// Paths are grouped by normalized form (already-generalized paths included).
/// Single-member groups pass through unchanged, so the pass is idempotent.
pub fn merge_array_paths(registry: PathRegistry, config: &ExtractionConfig) -> ArrayMerge {
    let mut groups: BTreeMap<String, Vec<FieldInfo>> = BTreeMap::new();
    for field in registry.into_fields() {
        let key = normalize_path(&field.path).into_owned();
        groups.entry(key).or_default().push(field);
    }

    let mut merged = PathRegistry::new();
    let mut folded_paths = 0;
    let mut groups_merged = 0;

    for (normalized, mut members) in groups {
        if members.len() == 1 {
            if let Some(field) = members.pop() {
                merged.insert(field);
            }
            continue;
        }

        folded_paths += members.len();
        groups_merged += 1;
        merged.insert(combine_group(normalized, members, config));
    }

    ArrayMerge {
        registry: merged,
        folded_paths,
        groups_merged,
    }
}

fn combine_group(path: String, members: Vec<FieldInfo>, config: &ExtractionConfig) -> FieldInfo {
    let shared_type = members[0].data_type.clone();
    let data_type = if members.iter().all(|m| m.data_type == shared_type) {
        shared_type
    } else {
        TypeLabel::Mixed
    };

    let mut combined = FieldInfo::new(path, data_type);
    let mut enum_values: BTreeSet<ScalarValue> = BTreeSet::new();

    for member in members {
        combined.occurrence_count += member.occurrence_count;
        combined.null_count += member.null_count;

        for example in member.value_examples {
            combined.add_example(example, config.max_examples);
        }
        for value in member.unique_values {
            combined.add_unique(value, config.max_unique_values);
        }
        combined.value_patterns.extend(member.value_patterns);

        if member.is_enum {
            combined.is_enum = true;
            enum_values.extend(member.enum_values);
        }
    }

    combined.enum_values = enum_values.into_iter().collect();
    combined
}
