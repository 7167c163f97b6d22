//! `cover`: minimal session cover over a sealed index

use std::path::{Path, PathBuf};

use super::load_config;
use crate::cli::error::CliError;
use crate::cli::output::{OutputFormat, format_coverage_summary, render, write_output};
use crate::cover::{CoverSelector, CoverageReport, SessionClassIndex};

/// Arguments for the `cover` command
pub struct CoverArgs {
    /// Index written by `index`
    pub index: PathBuf,
    pub config: Option<PathBuf>,
    /// Override the number of sessions considered (0 = all)
    pub max_sessions: Option<usize>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    /// Copy the selected session files into this directory
    pub extract_to: Option<PathBuf>,
}

/// Handle the `cover` command
pub fn handle_cover(args: &CoverArgs) -> Result<(), CliError> {
    let mut config = load_config(args.config.as_deref())?.cover;
    if let Some(max) = args.max_sessions {
        config.max_sessions = max;
    }

    let index = SessionClassIndex::load(&args.index)?;
    eprintln!(
        "Loaded index with {} sessions from {}",
        index.len(),
        args.index.display()
    );

    let report = CoverSelector::with_config(config).select(&index)?;

    eprintln!();
    eprint!("{}", format_coverage_summary(&report));

    let format = args.format.for_path(args.output.as_deref());
    write_output(&render(&report, format)?, args.output.as_deref())?;

    if let Some(ref dir) = args.extract_to {
        let copied = extract_selected(&report, &index, dir)?;
        eprintln!("Copied {} session file(s) to {}", copied.len(), dir.display());
    }

    Ok(())
}

/// Copy each selected session's file to `dir` as `session_NN_<id>.<ext>`
pub fn extract_selected(
    report: &CoverageReport,
    index: &SessionClassIndex,
    dir: &Path,
) -> Result<Vec<PathBuf>, CliError> {
    std::fs::create_dir_all(dir)?;
    let mut copied = Vec::new();

    for step in &report.steps {
        let Some(source) = index.info(&step.session_id).and_then(|i| i.path.as_ref()) else {
            tracing::warn!(session = %step.session_id, "No source path recorded; not copied");
            continue;
        };
        let extension = source
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("jsonl");
        let target = dir.join(format!(
            "session_{:02}_{}.{}",
            step.rank, step.session_id, extension
        ));
        std::fs::copy(source, &target).map_err(|e| CliError::Copy {
            path: source.clone(),
            error: e.to_string(),
        })?;
        copied.push(target);
    }

    Ok(copied)
}
