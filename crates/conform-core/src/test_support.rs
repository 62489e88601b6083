//! Record builders shared by unit tests.

use chrono::{TimeZone, Utc};

use conform_model::{
    AiReasoning, Category, ConfidenceScore, Decision, DiscrepancyReport, Document, DocumentId,
    ItemId, MaterialItem, ReportId, SpecReference, ValidationId, ValidationResult,
    ValidationStatus, VersionId,
};

pub(crate) fn document(id: &str, version: &str) -> Document {
    Document {
        id: DocumentId::new(id).unwrap(),
        version_id: VersionId::new(version).unwrap(),
        file_name: format!("{id}.pdf"),
        file_type: "application/pdf".to_string(),
        file_size: 1024,
        spec_section_code: "23 05 00".to_string(),
        spec_section_title: "Common Work Results for HVAC".to_string(),
        uploaded_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
    }
}

pub(crate) fn validation(
    id: &str,
    document_id: &str,
    version: &str,
    category: Category,
    score: i64,
) -> ValidationResult {
    ValidationResult {
        id: ValidationId::new(id).unwrap(),
        document_id: DocumentId::new(document_id).unwrap(),
        version_id: VersionId::new(version).unwrap(),
        category,
        status: ValidationStatus::default(),
        confidence_score: ConfidenceScore::new(score).unwrap(),
        decision: Decision::Pending,
        decision_by: None,
        decision_at: None,
        decision_notes: None,
        evidence_items: Vec::new(),
        ai_reasoning: AiReasoning::default(),
        spec_reference: SpecReference::default(),
        revision: 0,
    }
}

pub(crate) fn report(id: &str) -> DiscrepancyReport {
    DiscrepancyReport {
        id: ReportId::new(id).unwrap(),
        title: format!("Report {id}"),
        version_id: None,
        created_at: Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap(),
    }
}

pub(crate) fn material_item(
    id: &str,
    report_id: &str,
    name: &str,
    status: ValidationStatus,
    score: i64,
) -> MaterialItem {
    MaterialItem {
        id: ItemId::new(id).unwrap(),
        report_id: ReportId::new(report_id).unwrap(),
        name: name.to_string(),
        description: String::new(),
        spec_section: "03 30 00".to_string(),
        material_matrix_value: "3.8%".to_string(),
        project_spec_value: "4-7% required".to_string(),
        project_index_value: "5%".to_string(),
        status,
        confidence_score: ConfidenceScore::new(score).unwrap(),
        ai_reason: String::new(),
        comments: Vec::new(),
        updated_at: None,
        revision: 0,
    }
}
