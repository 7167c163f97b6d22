//! `classes`: whole-object structure classification

use std::path::PathBuf;

use clap::ValueEnum;

use super::{discover, load_config};
use crate::cli::error::CliError;
use crate::cli::output::{OutputFormat, format_catalog_summary, render, write_output};
use crate::survey::catalog_files;

/// Which catalog report to write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ClassReport {
    /// Every class with all examples
    #[default]
    Detail,
    /// Every class with one example
    Compact,
    /// Distributions and the most frequent classes
    Summary,
}

/// Arguments for the `classes` command
pub struct ClassesArgs {
    pub inputs: Vec<String>,
    pub config: Option<PathBuf>,
    pub max_records: usize,
    pub report: ClassReport,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

/// Handle the `classes` command
pub fn handle_classes(args: &ClassesArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?.structure;
    let files = discover(&args.inputs)?;

    eprintln!("Classifying object structures...");
    let catalog = catalog_files(&files, &config, args.max_records);
    let summary = catalog.summary();

    eprintln!();
    eprint!("{}", format_catalog_summary(&summary, 10));

    let format = args.format.for_path(args.output.as_deref());
    let rendered = match args.report {
        ClassReport::Detail => render(&catalog.detail(), format)?,
        ClassReport::Compact => render(&catalog.compact(), format)?,
        ClassReport::Summary => render(&summary, format)?,
    };
    write_output(&rendered, args.output.as_deref())
}
