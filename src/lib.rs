//! JSON Shape Survey - schema discovery and representative sampling for JSON corpora
//!
//! Provides:
//! - Field-path schema inference with a merging type lattice
//! - Whole-object structure signatures and class catalogs
//! - Greedy minimum set cover selecting sessions that exhibit every structure
//! - Record ingestion for JSONL and JSON files
//! - Layered configuration from TOML, YAML or JSON

pub mod config;
pub mod cover;
pub mod inference;
pub mod ingest;
pub mod structure;
pub mod survey;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use config::{ConfigError, SurveyConfig};
pub use cover::{
    CoverConfig, CoverError, CoverSelection, CoverSelector, CoverageReport, SessionClassIndex,
    select_minimal_cover,
};
pub use inference::{
    ExtractionConfig, ExtractionError, FieldInfo, PathRegistry, SchemaArtifact, SchemaExtractor,
    TypeLabel, extract_paths, merge_array_paths,
};
pub use ingest::{DiscoveredFile, IngestError, discover_inputs, read_records};
pub use structure::{ObjectTypeClass, StructureCatalog, StructureConfig, signature};
pub use survey::{catalog_files, extract_files, index_sessions};
