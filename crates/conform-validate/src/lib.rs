//! Classification engine for conformance review.
//!
//! Pure functions only: [`Classifier`] maps a confidence score to a
//! [`ValidationStatus`](conform_model::ValidationStatus) and a visual
//! [`ConfidenceTier`](conform_model::ConfidenceTier); [`summarize`] folds a
//! collection into a [`ConfidenceSummary`](conform_model::ConfidenceSummary).

mod classify;
mod config;
mod summary;

pub use classify::{Classifier, classify};
pub use config::{
    ClassificationConfig, ConfidenceTierThresholds, DEFAULT_HIGH_TIER_MIN,
    DEFAULT_MEDIUM_TIER_MIN, DEFAULT_PRE_APPROVED_MIN, DEFAULT_REVIEW_REQUIRED_MIN,
    StatusThresholds,
};
pub use summary::{Scored, summarize};
