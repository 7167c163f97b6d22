//! Record readers for JSONL and single-document JSON files

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::IngestError;

/// Layout of a record file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    /// One JSON value per line
    JsonLines,
    /// The whole file is one JSON value
    Json,
}

impl std::str::FromStr for RecordFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" | "ndjson" | "jsonlines" => Ok(RecordFormat::JsonLines),
            "json" => Ok(RecordFormat::Json),
            _ => Err(format!("Unknown record format: {}", s)),
        }
    }
}

/// Records read from one file
#[derive(Debug, Clone, Default)]
pub struct FileRecords {
    pub path: PathBuf,
    pub records: Vec<Value>,
    /// Lines (or documents) that were not valid JSON
    pub skipped: usize,
    pub size_bytes: u64,
}

impl FileRecords {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parse JSON lines from a reader.
///
/// Blank lines are ignored and malformed lines are counted and skipped.
/// Reading stops after `max_records` parsed records (0 = no limit).
pub fn parse_json_lines<R: BufRead>(
    reader: R,
    max_records: usize,
) -> Result<(Vec<Value>, usize), IngestError> {
    let mut records = Vec::new();
    let mut skipped = 0;

    for line in reader.split(b'\n') {
        let line = line?;
        let trimmed = line.trim_ascii();
        if trimmed.is_empty() {
            continue;
        }

        match serde_json::from_slice::<Value>(trimmed) {
            Ok(value) => {
                records.push(value);
                if max_records > 0 && records.len() >= max_records {
                    break;
                }
            }
            Err(_) => skipped += 1,
        }
    }

    Ok((records, skipped))
}

/// Read a JSONL file
pub fn read_jsonl_file(path: &Path, max_records: usize) -> Result<FileRecords, IngestError> {
    let file = open(path)?;
    let size_bytes = file.metadata()?.len();
    let (records, skipped) = parse_json_lines(BufReader::new(file), max_records)?;

    Ok(FileRecords {
        path: path.to_path_buf(),
        records,
        skipped,
        size_bytes,
    })
}

/// Read a file holding a single JSON document; an unparseable document is one skipped record
pub fn read_json_file(path: &Path) -> Result<FileRecords, IngestError> {
    let content = read_bytes(path)?;
    Ok(single_document(path, &content))
}

fn single_document(path: &Path, content: &[u8]) -> FileRecords {
    let (records, skipped) = match serde_json::from_slice::<Value>(content) {
        Ok(value) => (vec![value], 0),
        Err(_) => (Vec::new(), 1),
    };
    FileRecords {
        path: path.to_path_buf(),
        records,
        skipped,
        size_bytes: content.len() as u64,
    }
}

/// Format implied by the file extension, if it is a known one
pub fn format_from_extension(path: &Path) -> Option<RecordFormat> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(|e| e.parse().ok())
}

/// Read a record file, choosing the format by extension or by content.
///
/// Files with an unknown extension are read as a single document when the
/// whole content parses, otherwise as JSON lines.
pub fn read_records(path: &Path, max_records: usize) -> Result<FileRecords, IngestError> {
    match format_from_extension(path) {
        Some(RecordFormat::JsonLines) => read_jsonl_file(path, max_records),
        Some(RecordFormat::Json) => read_json_file(path),
        None => {
            let content = read_bytes(path)?;
            if serde_json::from_slice::<Value>(&content).is_ok() {
                Ok(single_document(path, &content))
            } else {
                let (records, skipped) = parse_json_lines(content.as_slice(), max_records)?;
                Ok(FileRecords {
                    path: path.to_path_buf(),
                    records,
                    skipped,
                    size_bytes: content.len() as u64,
                })
            }
        }
    }
}

fn open(path: &Path) -> Result<File, IngestError> {
    if !path.exists() {
        return Err(IngestError::FileNotFound(path.to_path_buf()));
    }
    Ok(File::open(path)?)
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, IngestError> {
    if !path.exists() {
        return Err(IngestError::FileNotFound(path.to_path_buf()));
    }
    Ok(fs::read(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_parse_json_lines_skips_malformed() {
        let input = b"{\"a\": 1}\n\n{broken\n  {\"a\": 2}  \n[1, 2]\n";
        let (records, skipped) = parse_json_lines(&input[..], 0).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_parse_json_lines_cap() {
        let input = b"{\"a\": 1}\n{\"a\": 2}\n{\"a\": 3}\n";
        let (records, _) = parse_json_lines(&input[..], 2).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let input: &[u8] = b"{\"a\": \"\xff\"}\n{\"a\": 1}\n";
        let (records, skipped) = parse_json_lines(input, 0).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_read_jsonl_file() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("session.jsonl");

        let mut file = File::create(&file_path).unwrap();
        writeln!(file, r#"{{"type": "user"}}"#).unwrap();
        writeln!(file, r#"{{"type": "assistant"}}"#).unwrap();

        let result = read_records(&file_path, 0).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.skipped, 0);
        assert!(result.size_bytes > 0);
    }

    #[test]
    fn test_read_json_document() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("doc.json");
        fs::write(&file_path, "{\n  \"name\": \"test\",\n  \"value\": 42\n}\n").unwrap();

        let result = read_records(&file_path, 0).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.records[0]["value"], 42);
    }

    #[test]
    fn test_malformed_json_document_counts_as_skipped() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("bad.json");
        fs::write(&file_path, "{ not json").unwrap();

        let result = read_records(&file_path, 0).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.skipped, 1);
    }

    #[test]
    fn test_unknown_extension_is_sniffed() {
        let dir = TempDir::new().unwrap();
        let lines = dir.path().join("records.log");
        fs::write(&lines, "{\"a\": 1}\n{\"a\": 2}\n").unwrap();
        let doc = dir.path().join("record.txt");
        fs::write(&doc, "{\"a\": [1,\n 2]}").unwrap();

        assert_eq!(read_records(&lines, 0).unwrap().len(), 2);
        assert_eq!(read_records(&doc, 0).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let result = read_records(Path::new("/nonexistent/file.jsonl"), 0);
        assert!(matches!(result, Err(IngestError::FileNotFound(_))));
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("NDJSON".parse::<RecordFormat>().unwrap(), RecordFormat::JsonLines);
        assert_eq!("json".parse::<RecordFormat>().unwrap(), RecordFormat::Json);
        assert!("csv".parse::<RecordFormat>().is_err());
    }
}
