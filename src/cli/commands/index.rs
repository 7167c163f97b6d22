//! `index`: per-session class sets for cover selection

use std::path::PathBuf;

use super::{discover, load_config};
use crate::cli::error::CliError;
use crate::survey::index_sessions;

/// Arguments for the `index` command
pub struct IndexArgs {
    pub inputs: Vec<String>,
    pub config: Option<PathBuf>,
    pub max_records: usize,
    /// Where to write the sealed index (`.json`, `.yaml` or `.yml`)
    pub output: PathBuf,
}

/// Handle the `index` command
pub fn handle_index(args: &IndexArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?.structure;
    let files = discover(&args.inputs)?;

    eprintln!("Indexing session structure classes...");
    let index = index_sessions(&files, &config, args.max_records)?;

    let total: usize = index.sessions().values().map(|c| c.len()).sum();
    let average = if index.is_empty() {
        0.0
    } else {
        total as f64 / index.len() as f64
    };
    eprintln!();
    eprintln!("Index complete:");
    eprintln!("  Sessions with classes: {}", index.len());
    eprintln!("  Distinct classes: {}", index.all_classes().len());
    eprintln!("  Average classes per session: {:.1}", average);

    if let Some(parent) = args.output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    index.save(&args.output)?;
    eprintln!("Index written to: {}", args.output.display());
    Ok(())
}
