//! CLI argument definitions for conformance review.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use tracing::level_filters::LevelFilter;

use conform_core::{SortBy, StatusFilter};
use conform_model::{
    Category, Decision, DocumentId, ItemId, ReportId, ValidationId, ValidationStatus, VersionId,
};

use crate::logging::LogFormat;

#[derive(Parser)]
#[command(
    name = "conform",
    version,
    about = "Conformance review of construction submittals",
    long_about = "Review AI-scored conformance results for submitted construction documents.\n\n\
                  Lists validation results and material discrepancies, records reviewer\n\
                  decisions and comments, and exports review reports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

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
    /// Show confidence summaries per category (and per report).
    Summary(SummaryArgs),

    /// List documents of a version with their validation results.
    List(ListArgs),

    /// List material discrepancy items of a report.
    Discrepancies(DiscrepancyArgs),

    /// Record a reviewer decision on one or more documents.
    Decide(DecideArgs),

    /// Overwrite the status of one or more material items.
    SetStatus(SetStatusArgs),

    /// Add a comment to, or list comments of, a validation result or item.
    Comment(CommentArgs),

    /// Load a material matrix CSV into a discrepancy report.
    ImportMatrix(ImportMatrixArgs),

    /// Write a JSON review report for a version.
    Export(ExportArgs),
}

/// Where the review state is read from.
#[derive(Args)]
pub struct SourceArgs {
    /// Workspace snapshot (JSON).
    #[arg(long = "snapshot", short = 's', value_name = "PATH")]
    pub snapshot: PathBuf,

    /// Classification thresholds (JSON). Defaults apply when omitted.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Where a mutated review state is written.
#[derive(Args)]
pub struct OutputArgs {
    /// Write the updated snapshot here. Without it changes are discarded.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Submission version to summarize.
    #[arg(long = "version-id", value_name = "VERSION")]
    pub version_id: VersionId,

    /// Also summarize this discrepancy report.
    #[arg(long = "report", value_name = "REPORT")]
    pub report: Option<ReportId>,
}

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long = "version-id", value_name = "VERSION")]
    pub version_id: VersionId,

    /// Case-insensitive search over file name and spec section.
    #[arg(long = "search")]
    pub search: Option<String>,

    /// Status to keep, or "all".
    #[arg(long = "status", default_value = "all")]
    pub status: StatusFilter,

    /// Evaluation category (overall, project_assets, performance_index).
    #[arg(long = "category", default_value = "overall")]
    pub category: Category,

    /// Sort order (last_updated, name). Upload order when omitted.
    #[arg(long = "sort")]
    pub sort: Option<SortBy>,
}

#[derive(Args)]
pub struct DiscrepancyArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long = "report", value_name = "REPORT")]
    pub report: ReportId,

    /// Case-insensitive search over name, description and spec section.
    #[arg(long = "search")]
    pub search: Option<String>,

    #[arg(long = "status", default_value = "all")]
    pub status: StatusFilter,

    #[arg(long = "sort")]
    pub sort: Option<SortBy>,
}

#[derive(Args)]
pub struct DecideArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Document to decide; repeat for a batch.
    #[arg(long = "document", value_name = "DOCUMENT", required = true)]
    pub documents: Vec<DocumentId>,

    /// Category to decide; repeat for several. Defaults to overall.
    #[arg(long = "category")]
    pub categories: Vec<Category>,

    /// pending, approved, approved_with_notes, revision_requested or rejected.
    #[arg(long = "decision")]
    pub decision: Decision,

    /// Acting reviewer.
    #[arg(long = "actor", value_name = "USER")]
    pub actor: String,

    #[arg(long = "notes")]
    pub notes: Option<String>,

    /// Reject the decision if the result has moved past this revision.
    ///
    /// Only valid for a single document and category.
    #[arg(long = "expect-revision", value_name = "N")]
    pub expect_revision: Option<u64>,
}

#[derive(Args)]
pub struct SetStatusArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Item to update; repeat for a batch.
    #[arg(long = "item", value_name = "ITEM", required = true)]
    pub items: Vec<ItemId>,

    /// pre_approved, review_required or action_mandatory.
    #[arg(long = "status")]
    pub status: ValidationStatus,

    /// Reject the change if the item has moved past this revision.
    ///
    /// Only valid for a single item.
    #[arg(long = "expect-revision", value_name = "N")]
    pub expect_revision: Option<u64>,
}

#[derive(Args)]
pub struct CommentArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Validation result to comment on.
    #[arg(
        long = "validation",
        value_name = "ID",
        conflicts_with = "item",
        required_unless_present = "item"
    )]
    pub validation: Option<ValidationId>,

    /// Material item to comment on.
    #[arg(long = "item", value_name = "ID", required_unless_present = "validation")]
    pub item: Option<ItemId>,

    /// Comment author. Required with --text.
    #[arg(long = "author", value_name = "USER", requires = "text")]
    pub author: Option<String>,

    /// Comment text. Lists the thread when omitted.
    #[arg(long = "text", requires = "author")]
    pub text: Option<String>,
}

#[derive(Args)]
pub struct ImportMatrixArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Report to load items into; registered when new.
    #[arg(long = "report", value_name = "REPORT")]
    pub report: ReportId,

    /// Title for a newly registered report.
    #[arg(long = "title")]
    pub title: Option<String>,

    /// Material matrix CSV.
    #[arg(value_name = "CSV")]
    pub matrix: PathBuf,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long = "version-id", value_name = "VERSION")]
    pub version_id: VersionId,

    /// Destination JSON file.
    #[arg(long = "out", value_name = "PATH")]
    pub out: PathBuf,
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

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn batch_decide_collects_repeated_flags() {
        let cli = Cli::try_parse_from([
            "conform",
            "decide",
            "-s",
            "review.json",
            "--document",
            "doc-1",
            "--document",
            "doc-2",
            "--category",
            "pa",
            "--decision",
            "approved",
            "--actor",
            "reviewer-1",
        ])
        .unwrap();
        let Command::Decide(args) = cli.command else {
            panic!("expected decide");
        };
        assert_eq!(args.documents.len(), 2);
        assert_eq!(args.categories, vec![Category::ProjectAssets]);
        assert_eq!(args.decision, Decision::Approved);
    }

    #[test]
    fn comment_needs_exactly_one_target() {
        let result = Cli::try_parse_from([
            "conform",
            "comment",
            "-s",
            "review.json",
            "--validation",
            "val-1",
            "--item",
            "item-1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn blank_ids_are_rejected_at_parse_time() {
        let result = Cli::try_parse_from([
            "conform",
            "set-status",
            "-s",
            "review.json",
            "--item",
            " ",
            "--status",
            "pre_approved",
        ]);
        assert!(result.is_err());
    }
}
