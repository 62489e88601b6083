//! Classification thresholds.
//!
//! Two threshold sets are published: the status bar that decides
//! [`ValidationStatus`](conform_model::ValidationStatus), and the finer tiers
//! used only for visual confidence display. Both live here so no call site
//! branches on raw numbers.

use serde::{Deserialize, Serialize};

use conform_model::ValidationError;

/// Default minimum score for `pre_approved`.
pub const DEFAULT_PRE_APPROVED_MIN: u8 = 80;
/// Default minimum score for `review_required`.
pub const DEFAULT_REVIEW_REQUIRED_MIN: u8 = 60;
/// Default minimum score for the high confidence tier.
pub const DEFAULT_HIGH_TIER_MIN: u8 = 90;
/// Default minimum score for the medium confidence tier.
pub const DEFAULT_MEDIUM_TIER_MIN: u8 = 70;

/// Score floors for status classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusThresholds {
    pub pre_approved: u8,
    pub review_required: u8,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            pre_approved: DEFAULT_PRE_APPROVED_MIN,
            review_required: DEFAULT_REVIEW_REQUIRED_MIN,
        }
    }
}

/// Score floors for the presentation-only confidence tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceTierThresholds {
    pub high: u8,
    pub medium: u8,
}

impl Default for ConfidenceTierThresholds {
    fn default() -> Self {
        Self {
            high: DEFAULT_HIGH_TIER_MIN,
            medium: DEFAULT_MEDIUM_TIER_MIN,
        }
    }
}

/// Complete classification configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassificationConfig {
    pub status: StatusThresholds,
    pub confidence_tiers: ConfidenceTierThresholds,
}

impl ClassificationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_status_thresholds(mut self, pre_approved: u8, review_required: u8) -> Self {
        self.status = StatusThresholds {
            pre_approved,
            review_required,
        };
        self
    }

    #[must_use]
    pub fn with_tier_thresholds(mut self, high: u8, medium: u8) -> Self {
        self.confidence_tiers = ConfidenceTierThresholds { high, medium };
        self
    }

    /// Check that both threshold pairs are in range and strictly descending.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_pair(
            "status",
            self.status.pre_approved,
            self.status.review_required,
        )?;
        check_pair(
            "confidence tier",
            self.confidence_tiers.high,
            self.confidence_tiers.medium,
        )
    }
}

fn check_pair(name: &str, upper: u8, lower: u8) -> Result<(), ValidationError> {
    if upper > 100 || lower > 100 {
        return Err(ValidationError::InvalidThresholds(format!(
            "{name} thresholds must be within 0..=100 (got {upper}/{lower})"
        )));
    }
    if upper <= lower {
        return Err(ValidationError::InvalidThresholds(format!(
            "{name} thresholds must be strictly descending (got {upper}/{lower})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_published_thresholds() {
        let config = ClassificationConfig::default();
        assert_eq!(config.status.pre_approved, 80);
        assert_eq!(config.status.review_required, 60);
        assert_eq!(config.confidence_tiers.high, 90);
        assert_eq!(config.confidence_tiers.medium, 70);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let config = ClassificationConfig::new().with_status_thresholds(50, 60);
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidThresholds(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_thresholds() {
        let config = ClassificationConfig::new().with_tier_thresholds(120, 70);
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: ClassificationConfig =
            serde_json::from_str(r#"{"status": {"preApproved": 85, "reviewRequired": 65}}"#)
                .expect("parse config");
        assert_eq!(config.status.pre_approved, 85);
        assert_eq!(config.confidence_tiers.high, 90);
    }
}
