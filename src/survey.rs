//! Corpus-level runs over record files
//!
//! Each file is processed independently (in parallel with the `parallel`
//! feature) into its own partial result; partial results are then reduced in
//! input order, so output does not depend on scheduling.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, info, info_span, warn};

use crate::cover::{CoverError, SessionClassIndex, SessionInfo};
use crate::inference::{ExtractionConfig, SchemaExtractor};
use crate::ingest::{DiscoveredFile, FileRecords, read_records};
use crate::structure::{StructureCatalog, StructureConfig};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

fn read_or_warn(path: &Path, max_records: usize) -> Option<FileRecords> {
    match read_records(path, max_records) {
        Ok(records) => {
            debug!(
                file = %path.display(),
                records = records.len(),
                skipped = records.skipped,
                "Read record file"
            );
            Some(records)
        }
        Err(e) => {
            warn!(file = %path.display(), error = %e, "Skipping unreadable file");
            None
        }
    }
}

fn map_files<T, F>(files: &[DiscoveredFile], f: F) -> Vec<T>
where
    T: Send,
    F: Fn(&DiscoveredFile) -> T + Sync + Send,
{
    #[cfg(feature = "parallel")]
    let results = files.par_iter().map(f).collect();
    #[cfg(not(feature = "parallel"))]
    let results = files.iter().map(f).collect();
    results
}

/// Extract field paths from every file and reduce them into one extractor
pub fn extract_files(files: &[DiscoveredFile], config: &ExtractionConfig) -> SchemaExtractor {
    let _span = info_span!("extract_files", files = files.len()).entered();

    let partials = map_files(files, |file| {
        let mut extractor = SchemaExtractor::with_config(config.clone());
        match read_or_warn(&file.path, config.max_records_per_file) {
            Some(file_records) => {
                extractor.add_records(&file_records.records);
                extractor.note_skipped_records(file_records.skipped);
                extractor.note_file_processed();
            }
            None => extractor.note_file_skipped(),
        }
        extractor
    });

    let mut combined = SchemaExtractor::with_config(config.clone());
    for partial in partials {
        combined.absorb(partial);
    }

    let stats = combined.stats();
    info!(
        files = stats.files_processed,
        files_skipped = stats.files_skipped,
        records = stats.records_processed,
        records_skipped = stats.records_skipped,
        paths = stats.paths_discovered,
        "Field extraction complete"
    );
    combined
}

/// Classify every object in every file into one catalog
pub fn catalog_files(
    files: &[DiscoveredFile],
    config: &StructureConfig,
    max_records: usize,
) -> StructureCatalog {
    let _span = info_span!("catalog_files", files = files.len()).entered();

    let partials = map_files(files, |file| {
        let mut catalog = StructureCatalog::with_config(config.clone());
        if let Some(file_records) = read_or_warn(&file.path, max_records) {
            catalog.add_records(&file_records.records);
            catalog.note_file_processed();
        }
        catalog
    });

    let mut combined = StructureCatalog::with_config(config.clone());
    for partial in partials {
        combined.absorb(partial);
    }

    let stats = combined.stats();
    info!(
        files = stats.total_files,
        objects = stats.total_objects,
        classes = stats.total_classes,
        "Structure classification complete"
    );
    combined
}

/// Build the sealed per-session class index, one session per file
pub fn index_sessions(
    files: &[DiscoveredFile],
    config: &StructureConfig,
    max_records: usize,
) -> Result<SessionClassIndex, CoverError> {
    let _span = info_span!("index_sessions", files = files.len()).entered();

    let partials = map_files(files, |file| {
        let file_records = read_or_warn(&file.path, max_records)?;
        let mut catalog = StructureCatalog::with_config(config.clone());
        catalog.add_records(&file_records.records);
        let info = SessionInfo {
            path: Some(file.path.clone()),
            records: file_records.len(),
            size_bytes: file_records.size_bytes,
        };
        Some((file.session_id(), catalog.signatures(), info))
    });

    let mut index = SessionClassIndex::new();
    let mut claimed = BTreeSet::new();
    for (session, classes, info) in partials.into_iter().flatten() {
        if !claimed.insert(session.clone()) {
            warn!(session = %session, "Duplicate session id; keeping the first file");
            continue;
        }
        index.insert_with_info(session, classes, Some(info))?;
    }
    index.seal();

    info!(
        sessions = index.len(),
        classes = index.all_classes().len(),
        "Session index complete"
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_corpus(dir: &TempDir) -> Vec<DiscoveredFile> {
        let a = dir.path().join("a.jsonl");
        let b = dir.path().join("b.jsonl");
        fs::write(&a, "{\"type\": \"user\", \"n\": 1}\nnot json\n").unwrap();
        fs::write(&b, "{\"type\": \"assistant\", \"n\": 2.5}\n").unwrap();
        vec![
            DiscoveredFile::new(a, 0),
            DiscoveredFile::new(b, 0),
            DiscoveredFile::new(dir.path().join("missing.jsonl"), 0),
        ]
    }

    #[test]
    fn test_extract_files_counts() {
        let dir = TempDir::new().unwrap();
        let files = write_corpus(&dir);
        let extractor = extract_files(&files, &ExtractionConfig::default());

        let stats = extractor.stats();
        assert_eq!(stats.files_processed, 2);
        assert_eq!(stats.files_skipped, 1);
        assert_eq!(stats.records_processed, 2);
        assert_eq!(stats.records_skipped, 1);
        assert_eq!(
            extractor.registry().get("n").unwrap().data_type.to_string(),
            "number"
        );
    }

    #[test]
    fn test_index_sessions_is_sealed() {
        let dir = TempDir::new().unwrap();
        let files = write_corpus(&dir);
        let index = index_sessions(&files, &StructureConfig::default(), 0).unwrap();

        assert!(index.is_sealed());
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.classes_of("b").unwrap().iter().next().map(String::as_str),
            Some("object{n:number,type:string}")
        );
        assert_eq!(index.info("a").unwrap().records, 1);
    }

    #[test]
    fn test_duplicate_stem_keeps_first_file_even_without_objects() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();
        let first = dir.path().join("a/dup.jsonl");
        let second = dir.path().join("b/dup.jsonl");
        fs::write(&first, "1\n\"scalar\"\n").unwrap();
        fs::write(&second, "{\"type\": \"user\"}\n").unwrap();
        let files = vec![DiscoveredFile::new(first, 0), DiscoveredFile::new(second, 0)];

        let index = index_sessions(&files, &StructureConfig::default(), 0).unwrap();
        assert!(index.classes_of("dup").is_none());
        assert!(index.is_empty());
    }

    #[test]
    fn test_catalog_files() {
        let dir = TempDir::new().unwrap();
        let files = write_corpus(&dir);
        let catalog = catalog_files(&files, &StructureConfig::default(), 0);
        assert_eq!(catalog.stats().total_files, 2);
        assert_eq!(catalog.len(), 2);
    }
}
