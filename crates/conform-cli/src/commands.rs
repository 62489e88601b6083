//! Command implementations.
//!
//! Each command loads the snapshot into a fresh [`ReviewWorkspace`], runs
//! against it, and returns the process exit code.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use tracing::{info, info_span, warn};

use conform_core::{
    BatchReport, DecisionRequest, FilterCriteria, ReviewWorkspace, filter, sort_items,
    summarize_rows,
};
use conform_ingest::{
    IngestError, fingerprint_file, load_material_matrix, load_workspace, save_snapshot,
};
use conform_model::{Category, CommentTarget, DiscrepancyReport, MaterialItem};
use conform_validate::{ClassificationConfig, Classifier};

use crate::cli::{
    CommentArgs, DecideArgs, DiscrepancyArgs, ExportArgs, ImportMatrixArgs, ListArgs,
    OutputArgs, SetStatusArgs, SourceArgs, SummaryArgs,
};
use crate::summary::{
    batch_table, comments_table, items_table, print_breakdown, rows_table, summary_line,
};
use crate::types::{ReportSummary, ReviewReport, SourceFingerprint};

/// Read classification thresholds, falling back to the defaults.
pub fn load_classifier(path: Option<&Path>) -> Result<Classifier> {
    let Some(path) = path else {
        return Ok(Classifier::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let config: ClassificationConfig = serde_json::from_str(&text)
        .with_context(|| format!("parse config: {}", path.display()))?;
    Classifier::new(config).with_context(|| format!("invalid thresholds in {}", path.display()))
}

pub fn open_workspace(source: &SourceArgs) -> Result<ReviewWorkspace> {
    let classifier = load_classifier(source.config.as_deref())?;
    load_workspace(&source.snapshot, classifier).map_err(ingest_error)
}

/// Lead with the user-facing message and keep the source chain for `{:#}`.
fn ingest_error(error: IngestError) -> anyhow::Error {
    let message = match error.suggestion() {
        Some(hint) => format!("{} {hint}", error.user_message()),
        None => error.user_message(),
    };
    anyhow::Error::new(error).context(message)
}

fn persist(workspace: &ReviewWorkspace, output: &OutputArgs) -> Result<()> {
    match &output.output {
        Some(path) => {
            save_snapshot(path, &workspace.snapshot())
                .with_context(|| format!("write snapshot: {}", path.display()))?;
            println!("Saved: {}", path.display());
        }
        None => warn!("changes were not saved; pass --output to keep them"),
    }
    Ok(())
}

pub fn run_summary(args: &SummaryArgs) -> Result<i32> {
    let workspace = open_workspace(&args.source)?;
    let breakdown = workspace.category_breakdown(&args.version_id);
    print_breakdown(&args.version_id, &breakdown);
    if let Some(report_id) = &args.report {
        let report = workspace.registry().report(report_id)?;
        let summary = workspace.registry().summary_for_report(report_id)?;
        println!("{}", summary_line(&report.title, &summary));
    }
    Ok(0)
}

pub fn run_list(args: &ListArgs) -> Result<i32> {
    let workspace = open_workspace(&args.source)?;
    let mut criteria = FilterCriteria::new()
        .with_status(args.status.clone())
        .with_category(args.category);
    criteria.search_text = args.search.clone();
    let rows = workspace.list_rows(&args.version_id, &criteria, args.sort);
    println!("{}", rows_table(&rows, workspace.classifier()));
    let summary = summarize_rows(&rows);
    println!("{}", summary_line(args.category.label(), &summary));
    Ok(0)
}

pub fn run_discrepancies(args: &DiscrepancyArgs) -> Result<i32> {
    let workspace = open_workspace(&args.source)?;
    let items = workspace.registry().list_by_report(&args.report)?;
    let mut criteria = FilterCriteria::new().with_status(args.status.clone());
    criteria.search_text = args.search.clone();
    let mut visible: Vec<MaterialItem> = filter(&items, &criteria).into_iter().cloned().collect();
    if let Some(sort) = args.sort {
        sort_items(&mut visible, sort);
    }
    println!("{}", items_table(&visible, workspace.classifier()));
    let summary = workspace.registry().summary_for_report(&args.report)?;
    println!("{}", summary_line(args.report.as_str(), &summary));
    Ok(0)
}

pub fn run_decide(args: &DecideArgs) -> Result<i32> {
    let workspace = open_workspace(&args.source)?;
    let mut request = DecisionRequest::new(args.decision, args.actor.as_str())?;
    if let Some(notes) = &args.notes {
        request = request.with_notes(notes.as_str());
    }
    let span = info_span!("decide", decision = %args.decision, actor = %request.actor);
    let _guard = span.enter();

    let single = args.documents.len() == 1 && args.categories.len() <= 1;
    if let Some(revision) = args.expect_revision {
        if !single {
            bail!("--expect-revision applies to a single document and category");
        }
        request = request.expecting_revision(revision);
    }

    if single && let Some(document_id) = args.documents.first() {
        let category = args.categories.first().copied().unwrap_or(Category::Overall);
        let result = workspace.decisions().decide(document_id, category, &request)?;
        println!(
            "{document_id}/{category}: {} (revision {})",
            result.decision.label(),
            result.revision
        );
    } else {
        let report = workspace.decisions().batch_decide(
            args.documents.iter().cloned(),
            &args.categories,
            &request,
        );
        if !finish_batch(&report) {
            return Ok(1);
        }
    }
    persist(&workspace, &args.output)?;
    Ok(0)
}

pub fn run_set_status(args: &SetStatusArgs) -> Result<i32> {
    let workspace = open_workspace(&args.source)?;
    let registry = workspace.registry();
    match (args.items.as_slice(), args.expect_revision) {
        ([item_id], Some(revision)) => {
            let item = registry.set_status_at_revision(item_id, args.status, revision)?;
            println!("{}: {} (revision {})", item.id, item.status.label(), item.revision);
        }
        ([item_id], None) => {
            let item = registry.set_status(item_id, args.status)?;
            println!("{}: {} (revision {})", item.id, item.status.label(), item.revision);
        }
        (_, Some(_)) => bail!("--expect-revision applies to a single item"),
        (items, None) => {
            let report = registry.batch_set_status(items.iter().cloned(), args.status);
            if !finish_batch(&report) {
                return Ok(1);
            }
        }
    }
    persist(&workspace, &args.output)?;
    Ok(0)
}

fn finish_batch<K: std::fmt::Display>(report: &BatchReport<K>) -> bool {
    println!("{}", batch_table(report));
    if report.committed {
        info!(targets = report.len(), "batch committed");
    } else {
        eprintln!("error: batch rolled back; no target was changed");
    }
    report.committed
}

pub fn run_comment(args: &CommentArgs) -> Result<i32> {
    let workspace = open_workspace(&args.source)?;
    let target = match (&args.validation, &args.item) {
        (Some(id), None) => CommentTarget::Validation(id.clone()),
        (None, Some(id)) => CommentTarget::Item(id.clone()),
        _ => bail!("pass exactly one of --validation or --item"),
    };
    match (&args.author, &args.text) {
        (Some(author), Some(text)) => {
            let comment = workspace.append_comment(&target, author, text)?;
            println!("Added comment {}", comment.id);
            persist(&workspace, &args.output)?;
        }
        _ => {
            let comments = workspace.comments_for(&target)?;
            println!("{}", comments_table(&comments));
        }
    }
    Ok(0)
}

pub fn run_import_matrix(args: &ImportMatrixArgs) -> Result<i32> {
    let workspace = open_workspace(&args.source)?;
    let registry = workspace.registry();
    if registry.report(&args.report).is_err() {
        registry.register_report(DiscrepancyReport {
            id: args.report.clone(),
            title: args
                .title
                .clone()
                .unwrap_or_else(|| args.report.to_string()),
            version_id: None,
            created_at: Utc::now(),
        })?;
    }
    let items = load_material_matrix(&args.matrix, &args.report, workspace.classifier())
        .map_err(ingest_error)?;
    let count = items.len();
    for item in items {
        registry.ingest_item(item)?;
    }
    println!("Imported {count} items into {}", args.report);
    persist(&workspace, &args.output)?;
    Ok(0)
}

pub fn run_export(args: &ExportArgs) -> Result<i32> {
    let workspace = open_workspace(&args.source)?;
    let sha256 = fingerprint_file(&args.source.snapshot)
        .with_context(|| format!("fingerprint: {}", args.source.snapshot.display()))?;
    let discrepancies = workspace
        .registry()
        .reports()
        .into_iter()
        .map(|report| {
            let summary = workspace.registry().summary_for_report(&report.id)?;
            Ok(ReportSummary { report, summary })
        })
        .collect::<Result<Vec<_>>>()?;
    let report = ReviewReport {
        generated_at: Utc::now(),
        version_id: args.version_id.clone(),
        source: SourceFingerprint {
            path: args.source.snapshot.clone(),
            sha256,
        },
        categories: workspace.category_breakdown(&args.version_id),
        validations: workspace
            .store()
            .results()
            .into_iter()
            .filter(|result| result.version_id == args.version_id)
            .collect(),
        discrepancies,
    };
    write_report(&args.out, &report)?;
    println!("Report: {}", args.out.display());
    Ok(0)
}

pub fn write_report(path: &Path, report: &ReviewReport) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "review report written");
    Ok(())
}
