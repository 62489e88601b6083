//! Validation result records produced by the ingestion pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{Category, Decision, Relevance, ValidationStatus};
use crate::ids::{ActorId, DocumentId, ValidationId, VersionId};
use crate::score::ConfidenceScore;

/// One scored, categorized verdict for a document.
///
/// `status` is derived from `confidence_score` when the record is ingested;
/// a supplied value is overwritten. The decision fields are the only ones
/// mutated after ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub id: ValidationId,
    pub document_id: DocumentId,
    pub version_id: VersionId,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub status: ValidationStatus,
    pub confidence_score: ConfidenceScore,
    #[serde(default)]
    pub decision: Decision,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_by: Option<ActorId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_notes: Option<String>,
    #[serde(default)]
    pub evidence_items: Vec<EvidenceItem>,
    pub ai_reasoning: AiReasoning,
    pub spec_reference: SpecReference,
    /// Bumped on every decision write.
    #[serde(default)]
    pub revision: u64,
}

impl ValidationResult {
    /// Key under which the store holds this record.
    pub fn key(&self) -> (DocumentId, Category) {
        (self.document_id.clone(), self.category)
    }

    pub fn supporting_evidence(&self) -> impl Iterator<Item = &EvidenceItem> {
        self.evidence_items
            .iter()
            .filter(|item| item.relevance == Relevance::Supports)
    }

    pub fn contradicting_evidence(&self) -> impl Iterator<Item = &EvidenceItem> {
        self.evidence_items
            .iter()
            .filter(|item| item.relevance == Relevance::Contradicts)
    }
}

/// Excerpt from a source document backing (or undermining) a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceItem {
    pub source_document_id: DocumentId,
    pub excerpt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    pub relevance: Relevance,
    pub confidence: ConfidenceScore,
}

/// Free-text rationale. Displayed, never reprocessed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiReasoning {
    pub summary: String,
    #[serde(default)]
    pub key_findings: Vec<String>,
    pub compliance_assessment: String,
    pub recommendation: String,
}

/// Specification section the document was evaluated against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecReference {
    pub section_number: String,
    pub section_title: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub source_document: String,
}
