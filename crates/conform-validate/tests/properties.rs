//! Property tests for classification and aggregation.

use proptest::prelude::*;

use conform_model::{ConfidenceScore, ConfidenceSummary, ValidationStatus};
use conform_validate::{Classifier, classify, summarize};

fn scored_item() -> impl Strategy<Value = (ValidationStatus, ConfidenceScore)> {
    (0i64..=100).prop_map(|score| {
        let status = classify(score).unwrap();
        (status, ConfidenceScore::new(score).unwrap())
    })
}

proptest! {
    #[test]
    fn classify_is_total_on_valid_scores(score in 0i64..=100) {
        let status = classify(score).unwrap();
        prop_assert!(ValidationStatus::all().contains(&status));
    }

    #[test]
    fn classify_rejects_everything_else(score in prop_oneof![i64::MIN..0i64, 101i64..i64::MAX]) {
        prop_assert!(classify(score).unwrap_err().is_validation());
    }

    #[test]
    fn classify_is_monotonic(a in 0i64..=100, b in 0i64..=100) {
        let (high, low) = if a >= b { (a, b) } else { (b, a) };
        prop_assert!(classify(high).unwrap().rank() >= classify(low).unwrap().rank());
    }

    #[test]
    fn tiers_are_monotonic(a in 0i64..=100, b in 0i64..=100) {
        let classifier = Classifier::default();
        let (high, low) = if a >= b { (a, b) } else { (b, a) };
        let rank = |score: i64| match classifier.tier(ConfidenceScore::new(score).unwrap()) {
            conform_model::ConfidenceTier::High => 2,
            conform_model::ConfidenceTier::Medium => 1,
            conform_model::ConfidenceTier::Low => 0,
        };
        prop_assert!(rank(high) >= rank(low));
    }

    #[test]
    fn summarize_is_order_independent(
        items in proptest::collection::vec(scored_item(), 0..40),
        seed in any::<u64>(),
    ) {
        let mut shuffled = items.clone();
        // Deterministic rotation plus reversal covers reorderings without an RNG.
        if !shuffled.is_empty() {
            let len = shuffled.len();
            shuffled.rotate_left((seed as usize) % len);
        }
        shuffled.reverse();
        prop_assert_eq!(summarize(&items), summarize(&shuffled));
    }

    #[test]
    fn summarize_counts_add_up(items in proptest::collection::vec(scored_item(), 0..40)) {
        let summary = summarize(&items);
        prop_assert_eq!(
            summary.pre_approved + summary.review_required + summary.action_mandatory,
            summary.total
        );
        prop_assert_eq!(summary.total, items.len());
        prop_assert!(summary.overall_confidence <= 100);
    }
}

#[test]
fn summarize_empty_is_zero() {
    let items: Vec<(ValidationStatus, ConfidenceScore)> = Vec::new();
    assert_eq!(
        summarize(&items),
        ConfidenceSummary {
            pre_approved: 0,
            review_required: 0,
            action_mandatory: 0,
            total: 0,
            overall_confidence: 0,
        }
    );
}
