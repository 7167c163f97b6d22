//! Record ingestion
//!
//! Finds record files and reads them into JSON values. Malformed records are
//! counted and skipped; a file that cannot be read is an error for that file
//! only, and callers decide whether to skip it.

mod discover;
mod error;
mod reader;

pub use discover::{
    DiscoveredFile, RECORD_EXTENSIONS, discover_directory, discover_inputs, glob_files,
    is_record_file, session_id,
};
pub use error::IngestError;
pub use reader::{
    FileRecords, RecordFormat, format_from_extension, parse_json_lines, read_json_file,
    read_jsonl_file, read_records,
};
