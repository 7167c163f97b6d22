//! shape-survey: schema inference, structure classification and cover
//! selection over JSON record corpora

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use shape_survey::cli::commands::classes::{ClassReport, ClassesArgs, handle_classes};
use shape_survey::cli::commands::cover::{CoverArgs, handle_cover};
use shape_survey::cli::commands::fields::{FieldsArgs, handle_fields};
use shape_survey::cli::commands::index::{IndexArgs, handle_index};
use shape_survey::cli::logging;
use shape_survey::cli::output::OutputFormat;

#[derive(Parser)]
#[command(name = "shape-survey")]
#[command(about = "Discover the shape of loosely structured JSON corpora", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (.toml, .yaml, .yml or .json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format when the output path does not imply one
    #[arg(long, value_enum, global = true, default_value = "json")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Infer a field-path schema with types, nullability and enums
    Fields {
        /// Files, directories or glob patterns
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Maximum nesting depth walked
        #[arg(long)]
        max_depth: Option<usize>,

        /// Records read per file (0 = all)
        #[arg(long)]
        max_records: Option<usize>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write a path-to-example listing
        #[arg(long)]
        listing: Option<PathBuf>,
    },

    /// Catalog whole-object structure classes
    Classes {
        /// Files, directories or glob patterns
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Records read per file (0 = all)
        #[arg(long, default_value_t = 0)]
        max_records: usize,

        /// Report to write
        #[arg(long, value_enum, default_value = "detail")]
        report: ClassReport,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the per-session class index used by `cover`
    Index {
        /// Files, directories or glob patterns; each file is one session
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Records read per file (0 = all)
        #[arg(long, default_value_t = 0)]
        max_records: usize,

        /// Index file to write
        #[arg(short, long, default_value = "session_classes.json")]
        output: PathBuf,
    },

    /// Select a minimal set of sessions covering every class
    Cover {
        /// Index written by `index`
        #[arg(long, default_value = "session_classes.json")]
        index: PathBuf,

        /// Consider only the first N sessions (0 = all)
        #[arg(long)]
        max_sessions: Option<usize>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Copy the selected session files into this directory
        #[arg(long)]
        extract_to: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Command::Fields {
            inputs,
            max_depth,
            max_records,
            output,
            listing,
        } => handle_fields(&FieldsArgs {
            inputs,
            config: cli.config,
            max_depth,
            max_records,
            format: cli.format,
            output,
            listing,
        })?,
        Command::Classes {
            inputs,
            max_records,
            report,
            output,
        } => handle_classes(&ClassesArgs {
            inputs,
            config: cli.config,
            max_records,
            report,
            format: cli.format,
            output,
        })?,
        Command::Index {
            inputs,
            max_records,
            output,
        } => handle_index(&IndexArgs {
            inputs,
            config: cli.config,
            max_records,
            output,
        })?,
        Command::Cover {
            index,
            max_sessions,
            output,
            extract_to,
        } => handle_cover(&CoverArgs {
            index,
            config: cli.config,
            max_sessions,
            format: cli.format,
            output,
            extract_to,
        })?,
    }

    Ok(())
}
