//! Score to status classification.

use conform_model::{ConfidenceScore, ConfidenceTier, ConformError, Result, ValidationStatus};

use crate::config::ClassificationConfig;

/// Stateless classifier over a validated [`ClassificationConfig`].
///
/// `Copy` and free of interior state, so it can be shared across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classifier {
    config: ClassificationConfig,
}

impl Classifier {
    /// Build a classifier, rejecting inconsistent thresholds.
    pub fn new(config: ClassificationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ClassificationConfig {
        &self.config
    }

    /// Classify a raw score, failing when it is outside `0..=100`.
    pub fn classify(&self, score: i64) -> Result<ValidationStatus> {
        let score = ConfidenceScore::new(score).map_err(ConformError::from)?;
        Ok(self.status_for(score))
    }

    /// Classify an already validated score.
    pub fn status_for(&self, score: ConfidenceScore) -> ValidationStatus {
        let thresholds = &self.config.status;
        let value = score.value();
        if value >= thresholds.pre_approved {
            ValidationStatus::PreApproved
        } else if value >= thresholds.review_required {
            ValidationStatus::ReviewRequired
        } else {
            ValidationStatus::ActionMandatory
        }
    }

    /// Visual confidence tier. Never feeds back into status.
    pub fn tier(&self, score: ConfidenceScore) -> ConfidenceTier {
        let tiers = &self.config.confidence_tiers;
        let value = score.value();
        if value >= tiers.high {
            ConfidenceTier::High
        } else if value >= tiers.medium {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    /// Whether a score clears the status pass bar.
    pub fn passes(&self, score: ConfidenceScore) -> bool {
        self.status_for(score) == ValidationStatus::PreApproved
    }
}

/// Classify a raw score with the default thresholds.
pub fn classify(score: i64) -> Result<ValidationStatus> {
    Classifier::default().classify(score)
}
