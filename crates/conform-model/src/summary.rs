use serde::{Deserialize, Serialize};

use crate::enums::ValidationStatus;

/// Counts by status plus mean confidence over a collection.
///
/// Always derived on read. An `overall_confidence` of zero with a zero
/// `total` means "no data", not a real zero score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceSummary {
    pub pre_approved: usize,
    pub review_required: usize,
    pub action_mandatory: usize,
    pub total: usize,
    pub overall_confidence: u8,
}

impl ConfidenceSummary {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_data(&self) -> bool {
        self.total > 0
    }

    pub fn count(&self, status: ValidationStatus) -> usize {
        match status {
            ValidationStatus::PreApproved => self.pre_approved,
            ValidationStatus::ReviewRequired => self.review_required,
            ValidationStatus::ActionMandatory => self.action_mandatory,
        }
    }
}
