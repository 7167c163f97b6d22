//! `fields`: field-path schema inference

use std::path::PathBuf;

use super::{discover, load_config};
use crate::cli::error::CliError;
use crate::cli::output::{OutputFormat, format_schema_summary, render, write_output};
use crate::survey::extract_files;

/// Arguments for the `fields` command
pub struct FieldsArgs {
    /// Files, directories or glob patterns
    pub inputs: Vec<String>,
    /// Optional configuration file
    pub config: Option<PathBuf>,
    /// Override the maximum walk depth
    pub max_depth: Option<usize>,
    /// Override the per-file record cap (0 = all)
    pub max_records: Option<usize>,
    /// Output format
    pub format: OutputFormat,
    /// Output file path (stdout if not provided)
    pub output: Option<PathBuf>,
    /// Also write the path-to-example listing here
    pub listing: Option<PathBuf>,
}

/// Handle the `fields` command
pub fn handle_fields(args: &FieldsArgs) -> Result<(), CliError> {
    let mut config = load_config(args.config.as_deref())?.extraction;
    if let Some(depth) = args.max_depth {
        config.max_depth = depth;
    }
    if let Some(max) = args.max_records {
        config.max_records_per_file = max;
    }

    let files = discover(&args.inputs)?;
    eprintln!("Extracting field paths...");
    eprintln!("  Max depth: {}", config.max_depth);
    eprintln!("  Array sample: {}", config.max_array_elements);

    let artifact = extract_files(&files, &config).finish()?;

    eprintln!();
    eprint!("{}", format_schema_summary(&artifact));

    let format = args.format.for_path(args.output.as_deref());
    write_output(&render(&artifact, format)?, args.output.as_deref())?;

    if let Some(ref listing_path) = args.listing {
        let listing = artifact.field_listing();
        let format = args.format.for_path(Some(listing_path));
        write_output(&render(&listing, format)?, Some(listing_path))?;
    }

    Ok(())
}
