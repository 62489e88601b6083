//! Wire-shape tests for the conformance data model.

use conform_model::{
    Category, CommentTarget, Decision, ItemId, MaterialItem, Relevance, ValidationResult,
    ValidationStatus,
};

fn validation_json(extra: &str) -> String {
    format!(
        r#"{{
            "id": "val-1",
            "documentId": "doc-1",
            "versionId": "v1",
            "confidenceScore": 87,
            "evidenceItems": [
                {{
                    "sourceDocumentId": "spec-23",
                    "excerpt": "Units shall be rated for 400 CFM.",
                    "pageNumber": 12,
                    "relevance": "supports",
                    "confidence": 91
                }}
            ],
            "aiReasoning": {{
                "summary": "Matches the schedule.",
                "keyFindings": ["Capacity within tolerance"],
                "complianceAssessment": "Compliant",
                "recommendation": "Approve"
            }},
            "specReference": {{
                "sectionNumber": "23 05 00",
                "sectionTitle": "Common Work Results for HVAC",
                "requirements": ["Rated capacity"],
                "sourceDocument": "Project Manual"
            }}
            {extra}
        }}"#
    )
}

#[test]
fn missing_category_defaults_to_overall() {
    let result: ValidationResult =
        serde_json::from_str(&validation_json("")).expect("parse validation");
    assert_eq!(result.category, Category::Overall);
    assert_eq!(result.decision, Decision::Pending);
    assert!(result.decision_at.is_none());
    assert_eq!(result.confidence_score.value(), 87);
    assert_eq!(result.evidence_items[0].relevance, Relevance::Supports);
    assert_eq!(result.supporting_evidence().count(), 1);
    assert_eq!(result.contradicting_evidence().count(), 0);
}

#[test]
fn explicit_category_is_parsed() {
    let result: ValidationResult =
        serde_json::from_str(&validation_json(r#", "category": "performance_index""#))
            .expect("parse validation");
    assert_eq!(result.category, Category::PerformanceIndex);
}

#[test]
fn out_of_range_score_is_rejected_on_parse() {
    let json = validation_json("").replace("\"confidenceScore\": 87", "\"confidenceScore\": 140");
    let error = serde_json::from_str::<ValidationResult>(&json).unwrap_err();
    assert!(error.to_string().contains("outside 0..=100"));
}

#[test]
fn unknown_category_is_rejected_on_parse() {
    let result =
        serde_json::from_str::<ValidationResult>(&validation_json(r#", "category": "budget""#));
    assert!(result.is_err());
}

#[test]
fn blank_document_id_is_rejected_on_parse() {
    let json = validation_json("").replace("\"documentId\": \"doc-1\"", "\"documentId\": \"  \"");
    assert!(serde_json::from_str::<ValidationResult>(&json).is_err());
}

#[test]
fn material_item_parses_with_defaults() {
    let json = r#"{
        "id": "item-1",
        "reportId": "rep-1",
        "name": "Fly ash content",
        "materialMatrixValue": "3.8%",
        "projectSpecValue": "4-7% required",
        "projectIndexValue": "5%",
        "status": "review_required",
        "confidenceScore": 64
    }"#;
    let item: MaterialItem = serde_json::from_str(json).expect("parse item");
    assert_eq!(item.status, ValidationStatus::ReviewRequired);
    assert!(item.comments.is_empty());
    assert_eq!(item.revision, 0);
    assert!(item.description.is_empty());
}

#[test]
fn comment_target_is_tagged() {
    let target = CommentTarget::Item(ItemId::new("item-1").unwrap());
    let json = serde_json::to_string(&target).expect("serialize target");
    assert_eq!(json, r#"{"kind":"item","id":"item-1"}"#);
    let back: CommentTarget = serde_json::from_str(&json).expect("parse target");
    assert_eq!(back, target);
}
