//! Output formatting for CLI

use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

use super::error::CliError;
use crate::cover::CoverageReport;
use crate::inference::SchemaArtifact;
use crate::structure::CatalogSummary;

/// Serialization format for artifacts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    /// Format implied by an output path's extension, falling back to `self`
    pub fn for_path(self, path: Option<&Path>) -> Self {
        match path
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => OutputFormat::Yaml,
            Some("json") => OutputFormat::Json,
            _ => self,
        }
    }
}

/// Serialize a value in the requested format
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, CliError> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    Ok(rendered)
}

/// Write to a file, or to stdout when no path is given
pub fn write_output(content: &str, output: Option<&Path>) -> Result<(), CliError> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
            eprintln!("Written to: {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Human-readable summary of a schema artifact
pub fn format_schema_summary(artifact: &SchemaArtifact) -> String {
    let mut output = String::new();
    output.push_str("Field extraction complete:\n");
    output.push_str(&format!(
        "  Files: {} ({} skipped)\n",
        artifact.total_files, artifact.files_skipped
    ));
    output.push_str(&format!(
        "  Records: {} ({} skipped)\n",
        artifact.total_records, artifact.records_skipped
    ));
    output.push_str(&format!("  Paths: {}\n", artifact.total_paths));
    output.push_str(&format!("  Enum paths: {}\n", artifact.enum_paths));
    output.push_str(&format!(
        "  Generalized array paths: {} (from {} indexed paths)\n",
        artifact.merged_paths, artifact.folded_paths
    ));

    let mut types: Vec<(&String, &usize)> = artifact.type_histogram.iter().collect();
    types.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    output.push_str("  Types:\n");
    for (label, count) in types.into_iter().take(10) {
        output.push_str(&format!("    {:<24} {:>6}\n", label, count));
    }
    output
}

/// Human-readable summary of a structure catalog
pub fn format_catalog_summary(summary: &CatalogSummary, limit: usize) -> String {
    let mut output = String::new();
    output.push_str("Structure classification complete:\n");
    output.push_str(&format!("  Files: {}\n", summary.stats.total_files));
    output.push_str(&format!("  Objects: {}\n", summary.stats.total_objects));
    output.push_str(&format!("  Classes: {}\n", summary.stats.total_classes));

    if !summary.top_classes.is_empty() {
        output.push_str("  Most frequent:\n");
    }
    for class in summary.top_classes.iter().take(limit) {
        let preview: String = class.signature.chars().take(80).collect();
        output.push_str(&format!(
            "    {:>2}. {:>8} ({:>6.2}%) complexity {:>2}  {}\n",
            class.rank, class.count, class.share, class.complexity, preview
        ));
    }
    output
}

/// Human-readable summary of a coverage report
pub fn format_coverage_summary(report: &CoverageReport) -> String {
    let mut output = String::new();
    output.push_str("Cover selection complete:\n");
    output.push_str(&format!(
        "  Selected {} of {} sessions (ratio {:.3})\n",
        report.selected_sessions, report.total_sessions_available, report.reduction_ratio
    ));
    output.push_str(&format!(
        "  Covered {} of {} classes ({:.2}%)\n",
        report.covered_classes, report.total_classes, report.coverage_percentage
    ));
    for step in &report.steps {
        output.push_str(&format!(
            "    {:>3}. {} +{} -> {} ({:.1}%)\n",
            step.rank,
            step.session_id,
            step.new_classes_contributed,
            step.cumulative_coverage,
            step.coverage_percentage
        ));
    }
    if !report.uncovered_classes.is_empty() {
        output.push_str(&format!(
            "  Uncovered classes: {}\n",
            report.uncovered_classes.len()
        ));
    }
    output
}
