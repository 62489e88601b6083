//! Aggregation of statuses into a [`ConfidenceSummary`].

use conform_model::{
    ConfidenceScore, ConfidenceSummary, MaterialItem, ValidationResult, ValidationStatus,
};

/// Anything carrying a status and a confidence score.
pub trait Scored {
    fn status(&self) -> ValidationStatus;
    fn confidence_score(&self) -> ConfidenceScore;
}

impl Scored for ValidationResult {
    fn status(&self) -> ValidationStatus {
        self.status
    }

    fn confidence_score(&self) -> ConfidenceScore {
        self.confidence_score
    }
}

impl Scored for MaterialItem {
    fn status(&self) -> ValidationStatus {
        self.status
    }

    fn confidence_score(&self) -> ConfidenceScore {
        self.confidence_score
    }
}

impl Scored for (ValidationStatus, ConfidenceScore) {
    fn status(&self) -> ValidationStatus {
        self.0
    }

    fn confidence_score(&self) -> ConfidenceScore {
        self.1
    }
}

impl<T: Scored + ?Sized> Scored for &T {
    fn status(&self) -> ValidationStatus {
        (**self).status()
    }

    fn confidence_score(&self) -> ConfidenceScore {
        (**self).confidence_score()
    }
}

/// Count items by status and average their confidence.
///
/// The mean is rounded half up using integer arithmetic, so the result does
/// not depend on input order. An empty input yields an all-zero summary.
pub fn summarize<I>(items: I) -> ConfidenceSummary
where
    I: IntoIterator,
    I::Item: Scored,
{
    let mut summary = ConfidenceSummary::empty();
    let mut score_sum: u64 = 0;
    for item in items {
        match item.status() {
            ValidationStatus::PreApproved => summary.pre_approved += 1,
            ValidationStatus::ReviewRequired => summary.review_required += 1,
            ValidationStatus::ActionMandatory => summary.action_mandatory += 1,
        }
        summary.total += 1;
        score_sum += u64::from(item.confidence_score().value());
    }
    summary.overall_confidence = rounded_mean(score_sum, summary.total);
    tracing::trace!(
        total = summary.total,
        overall_confidence = summary.overall_confidence,
        "summary computed"
    );
    summary
}

fn rounded_mean(sum: u64, count: usize) -> u8 {
    if count == 0 {
        return 0;
    }
    let count = count as u64;
    let mean = (2 * sum + count) / (2 * count);
    // Every score is at most 100, so the mean is too.
    u8::try_from(mean).unwrap_or(ConfidenceScore::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(status: ValidationStatus, score: i64) -> (ValidationStatus, ConfidenceScore) {
        (status, ConfidenceScore::new(score).unwrap())
    }

    #[test]
    fn empty_input_is_all_zero() {
        let empty: Vec<(ValidationStatus, ConfidenceScore)> = Vec::new();
        assert_eq!(summarize(empty), ConfidenceSummary::empty());
    }

    #[test]
    fn counts_and_mean() {
        let items = vec![
            item(ValidationStatus::PreApproved, 96),
            item(ValidationStatus::PreApproved, 92),
            item(ValidationStatus::ReviewRequired, 71),
            item(ValidationStatus::ActionMandatory, 40),
        ];
        let summary = summarize(&items);
        assert_eq!(summary.pre_approved, 2);
        assert_eq!(summary.review_required, 1);
        assert_eq!(summary.action_mandatory, 1);
        assert_eq!(summary.total, 4);
        // (96 + 92 + 71 + 40) / 4 = 74.75
        assert_eq!(summary.overall_confidence, 75);
    }

    #[test]
    fn half_rounds_up() {
        let items = vec![
            item(ValidationStatus::PreApproved, 81),
            item(ValidationStatus::PreApproved, 82),
        ];
        assert_eq!(summarize(&items).overall_confidence, 82);
    }
}
