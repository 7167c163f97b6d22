//! Field-path schema inference for loosely structured JSON records
//!
//! Every reachable position of every record is recorded under a dot/bracket
//! path together with its merged type, null counts, examples, distinct values
//! and recognized string patterns.
//!
//! ## Features
//!
//! - **Type lattice** - Classify values and merge labels to their least common generalization
//! - **String patterns** - Recognize UUIDs, ISO timestamps, URLs and prefixed identifiers
//! - **Enum detection** - Flag paths whose values come from a small closed domain
//! - **Array generalization** - Fold `items[0].x`, `items[1].x` into `items[*].x`
//! - **Associative reduce** - Partial registries combine in any grouping
//!
//! ## Example
//!
//! ```rust,ignore
//! use shape_survey::inference::SchemaExtractor;
//!
//! let mut extractor = SchemaExtractor::new();
//! extractor.add_json(r#"{"type": "user", "message": {"content": "hi"}}"#);
//! extractor.add_json(r#"{"type": "assistant", "message": {"content": [{"type": "text"}]}}"#);
//!
//! let artifact = extractor.finish()?;
//! println!("{}", serde_json::to_string_pretty(&artifact)?);
//! ```

mod array_merge;
mod artifact;
mod config;
mod error;
mod extractor;
mod field;
mod lattice;
mod patterns;
mod registry;
mod value;

pub use array_merge::{ArrayMerge, merge_array_paths, normalize_path};
pub use artifact::SchemaArtifact;
pub use config::{ExtractionConfig, ExtractionConfigBuilder};
pub use error::ExtractionError;
pub use extractor::{ExtractionStats, SchemaExtractor, extract_paths};
pub use field::{FieldInfo, FieldRecorder, truncate_example, truncate_str};
pub use lattice::{ArrayItems, TypeClassifier, TypeLabel};
pub use patterns::{IdPrefix, StringKind, classify_string, default_id_prefixes, pattern_tag};
pub use registry::PathRegistry;
pub use value::{ScalarValue, ValueNode, printed_form};
