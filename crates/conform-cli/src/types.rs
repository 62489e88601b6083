//! Records produced by CLI commands.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use conform_core::CategorySummary;
use conform_model::{ConfidenceSummary, DiscrepancyReport, ValidationResult, VersionId};

/// JSON review report written by `conform export`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReport {
    pub generated_at: DateTime<Utc>,
    pub version_id: VersionId,
    pub source: SourceFingerprint,
    pub categories: Vec<CategorySummary>,
    pub validations: Vec<ValidationResult>,
    pub discrepancies: Vec<ReportSummary>,
}

/// Snapshot file a report was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFingerprint {
    pub path: PathBuf,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub report: DiscrepancyReport,
    pub summary: ConfidenceSummary,
}
