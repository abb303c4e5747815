//! CLI argument definitions for the results importer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "results-importer",
    version,
    about = "Course results importer - stage, review and commit score sheets",
    long_about = "Import an untrusted results spreadsheet, reconcile it against the\n\
                  course roster and previously committed results, stage accepted rows\n\
                  for review, and commit them in one bulk call."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import a results spreadsheet and stage accepted rows for review.
    Import(ImportArgs),

    /// Show the merged roster / committed / staged view.
    Preview(CommonArgs),

    /// Export the merged view as an audit table (.csv or .xlsx).
    Export(ExportArgs),

    /// Submit the staged batch to the results service in one bulk call.
    Submit(SubmitArgs),

    /// Edit one staged row before submission.
    Edit(EditArgs),

    /// Remove one staged row.
    Remove(RemoveArgs),

    /// Discard the whole staged batch.
    Clear(CommonArgs),
}

#[derive(Parser)]
pub struct CommonArgs {
    /// Base URL of the results service.
    #[arg(long = "api-url", value_name = "URL", env = "RESULTS_API_URL")]
    pub api_url: Option<String>,

    /// Course whose roster and results apply.
    #[arg(long = "course-id", value_name = "ID", env = "RESULTS_COURSE_ID")]
    pub course_id: Option<String>,

    /// Config file (default: ./results.toml when present).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Where the staged batch is kept between commands.
    #[arg(long = "staging-file", value_name = "PATH")]
    pub staging_file: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Spreadsheet to import (.csv, .xlsx or .xls).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Output path; the extension picks the format.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Parser)]
pub struct SubmitArgs {
    /// List what would be committed without calling the service.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Parser)]
pub struct EditArgs {
    /// Matric number of the staged row.
    #[arg(value_name = "MATRIC_NO")]
    pub matric_no: String,

    /// New score (re-validated; out-of-range blocks submission).
    #[arg(long)]
    pub score: Option<f64>,

    /// New remark.
    #[arg(long)]
    pub remark: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Parser)]
pub struct RemoveArgs {
    /// Matric number of the staged row.
    #[arg(value_name = "MATRIC_NO")]
    pub matric_no: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
