//! Discrepancy reports and their three-way comparison rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::comment::Comment;
use crate::enums::ValidationStatus;
use crate::ids::{ItemId, ReportId, VersionId};
use crate::score::ConfidenceScore;

/// Container for material items produced by one comparison run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscrepancyReport {
    pub id: ReportId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_id: Option<VersionId>,
    pub created_at: DateTime<Utc>,
}

/// Comparison of one line item across material matrix, project spec and
/// project index.
///
/// The three source values are snapshots taken at ingestion. Unlike a
/// [`crate::ValidationResult`], `status` is set directly by reviewers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialItem {
    pub id: ItemId,
    pub report_id: ReportId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub spec_section: String,
    pub material_matrix_value: String,
    pub project_spec_value: String,
    pub project_index_value: String,
    pub status: ValidationStatus,
    pub confidence_score: ConfidenceScore,
    #[serde(default)]
    pub ai_reason: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub revision: u64,
}
