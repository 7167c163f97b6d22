//! Record file discovery from paths, directories and glob patterns

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::error::IngestError;

/// Extensions picked up when a directory is given
pub const RECORD_EXTENSIONS: [&str; 3] = ["jsonl", "ndjson", "json"];

/// A discovered file to read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Path to the file
    pub path: PathBuf,
    /// File size in bytes (0 when the file could not be inspected)
    pub size: u64,
}

impl DiscoveredFile {
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }

    /// Session identifier: the file stem
    pub fn session_id(&self) -> String {
        session_id(&self.path)
    }
}

/// Session identifier for a record file: its stem
pub fn session_id(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn is_glob(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

/// Whether a path carries one of [`RECORD_EXTENSIONS`] (case-insensitive)
pub fn is_record_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| RECORD_EXTENSIONS.iter().any(|r| e.eq_ignore_ascii_case(r)))
}

fn glob_entries<F>(pattern: &str, keep: F) -> Result<Vec<DiscoveredFile>, IngestError>
where
    F: Fn(&Path) -> bool,
{
    let entries = glob::glob(pattern)
        .map_err(|e| IngestError::InvalidPattern(format!("{}: {}", pattern, e)))?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() && keep(path.as_path()) => {
                let size = fs::metadata(&path)?.len();
                files.push(DiscoveredFile::new(path, size));
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "Unreadable path while globbing"),
        }
    }
    Ok(files)
}

/// Every record file below `dir`, at any depth
pub fn discover_directory(dir: &Path) -> Result<Vec<DiscoveredFile>, IngestError> {
    let base = glob::Pattern::escape(&dir.to_string_lossy());
    glob_entries(&format!("{}/**/*", base), is_record_file)
}

/// Files matched by a glob pattern, whatever their extension
pub fn glob_files(pattern: &str) -> Result<Vec<DiscoveredFile>, IngestError> {
    glob_entries(pattern, |_| true)
}

/// Resolve command-line inputs into a sorted, deduplicated list of files.
///
/// Each input may be a file, a directory (searched recursively for record
/// extensions) or a glob pattern. Plain paths that do not exist are kept so
/// that the reader can report them as skipped.
pub fn discover_inputs<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<DiscoveredFile>, IngestError> {
    let mut seen = BTreeSet::new();
    let mut files = Vec::new();

    let mut push = |file: DiscoveredFile, files: &mut Vec<DiscoveredFile>| {
        if seen.insert(file.path.clone()) {
            files.push(file);
        }
    };

    for input in inputs {
        let input = input.as_ref();
        let path = Path::new(input);

        if path.is_dir() {
            for file in discover_directory(path)? {
                push(file, &mut files);
            }
        } else if is_glob(input) {
            for file in glob_files(input)? {
                push(file, &mut files);
            }
        } else {
            let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
            push(DiscoveredFile::new(path.to_path_buf(), size), &mut files);
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}
