//! Data model for conformance review of construction submittals.

pub mod comment;
pub mod document;
pub mod enums;
pub mod error;
pub mod ids;
pub mod material;
pub mod score;
pub mod summary;
pub mod validation;

pub use comment::{Comment, CommentTarget};
pub use document::Document;
pub use enums::{Category, ConfidenceTier, Decision, Relevance, ValidationStatus};
pub use error::{ConformError, EntityKind, Result, ValidationError};
pub use ids::{ActorId, CommentId, DocumentId, ItemId, ReportId, ValidationId, VersionId};
pub use material::{DiscrepancyReport, MaterialItem};
pub use score::ConfidenceScore;
pub use summary::ConfidenceSummary;
pub use validation::{AiReasoning, EvidenceItem, SpecReference, ValidationResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_by_status() {
        let summary = ConfidenceSummary {
            pre_approved: 2,
            review_required: 1,
            action_mandatory: 0,
            total: 3,
            overall_confidence: 88,
        };
        assert!(summary.has_data());
        assert_eq!(summary.count(ValidationStatus::PreApproved), 2);
        assert_eq!(summary.count(ValidationStatus::ActionMandatory), 0);
    }

    #[test]
    fn empty_summary_has_no_data() {
        let summary = ConfidenceSummary::empty();
        assert!(!summary.has_data());
        assert_eq!(summary.overall_confidence, 0);
    }
}
