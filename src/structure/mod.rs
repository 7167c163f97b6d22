//! Whole-object structure classification
//!
//! Every object reachable in a record is reduced to a canonical signature
//! (`object{content:array[object{text:string,type:string}],role:string}`)
//! and counted in the [`ObjectTypeClass`] for that signature. The set of
//! signatures seen in a session is what the cover selector works on.

mod catalog;
mod config;
mod signature;

pub use catalog::{
    CatalogReport, CatalogStats, CatalogSummary, ClassEntry, ObjectTypeClass, StructureCatalog,
    TopClass, occurrence_bucket, truncate_strings,
};
pub use config::{StructureConfig, StructureConfigBuilder};
pub use signature::{DEFAULT_ARRAY_SAMPLE, complexity, signature, signature_with_sample};
