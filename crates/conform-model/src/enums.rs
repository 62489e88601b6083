//! Type-safe enumerations for conformance review.
//!
//! Each enum parses from the snake_case wire value (case-insensitive, with
//! spaces or hyphens accepted in place of underscores) and renders back to it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace([' ', '-'], "_")
}

/// Evaluation lens applied to a document.
///
/// A document carries at most one validation result per category. A record
/// without a category is an `Overall` result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Overall,
    ProjectAssets,
    PerformanceIndex,
}

impl Category {
    pub const fn all() -> &'static [Self] {
        &[Self::Overall, Self::ProjectAssets, Self::PerformanceIndex]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overall => "overall",
            Self::ProjectAssets => "project_assets",
            Self::PerformanceIndex => "performance_index",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Overall => "Overall",
            Self::ProjectAssets => "Project Assets",
            Self::PerformanceIndex => "Performance Index",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "overall" => Ok(Self::Overall),
            "project_assets" | "pa" => Ok(Self::ProjectAssets),
            "performance_index" | "pi" => Ok(Self::PerformanceIndex),
            _ => Err(ValidationError::UnknownCategory(s.to_string())),
        }
    }
}

/// Classification of a validation result or material item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    PreApproved,
    #[default]
    ReviewRequired,
    ActionMandatory,
}

impl ValidationStatus {
    pub const fn all() -> &'static [Self] {
        &[Self::PreApproved, Self::ReviewRequired, Self::ActionMandatory]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreApproved => "pre_approved",
            Self::ReviewRequired => "review_required",
            Self::ActionMandatory => "action_mandatory",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PreApproved => "Pre-Approved",
            Self::ReviewRequired => "Review Required",
            Self::ActionMandatory => "Action Mandatory",
        }
    }

    /// Rank where a higher value is a better outcome.
    pub fn rank(&self) -> u8 {
        match self {
            Self::PreApproved => 2,
            Self::ReviewRequired => 1,
            Self::ActionMandatory => 0,
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "pre_approved" => Ok(Self::PreApproved),
            "review_required" => Ok(Self::ReviewRequired),
            "action_mandatory" => Ok(Self::ActionMandatory),
            _ => Err(ValidationError::UnknownStatus(s.to_string())),
        }
    }
}

/// Reviewer disposition on a validation result.
///
/// Any value may follow any other, including a return to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    #[default]
    Pending,
    Approved,
    ApprovedWithNotes,
    RevisionRequested,
    Rejected,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::ApprovedWithNotes => "approved_with_notes",
            Self::RevisionRequested => "revision_requested",
            Self::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::ApprovedWithNotes => "Approved with Notes",
            Self::RevisionRequested => "Revision Requested",
            Self::Rejected => "Rejected",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Decision {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "approved_with_notes" => Ok(Self::ApprovedWithNotes),
            "revision_requested" => Ok(Self::RevisionRequested),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ValidationError::UnknownDecision(s.to_string())),
        }
    }
}

/// How an evidence excerpt bears on the requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relevance {
    Supports,
    Contradicts,
    Neutral,
}

impl Relevance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Supports => "supports",
            Self::Contradicts => "contradicts",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Relevance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relevance {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "supports" => Ok(Self::Supports),
            "contradicts" => Ok(Self::Contradicts),
            "neutral" => Ok(Self::Neutral),
            _ => Err(ValidationError::UnknownRelevance(s.to_string())),
        }
    }
}

/// Presentation-only tier of a confidence score. Never affects status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str() {
        assert_eq!("overall".parse::<Category>().unwrap(), Category::Overall);
        assert_eq!(
            "Project Assets".parse::<Category>().unwrap(),
            Category::ProjectAssets
        );
        assert_eq!(
            "performance-index".parse::<Category>().unwrap(),
            Category::PerformanceIndex
        );
        assert!("budget".parse::<Category>().is_err());
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in ValidationStatus::all() {
            assert_eq!(status.as_str().parse::<ValidationStatus>().unwrap(), *status);
        }
    }

    #[test]
    fn test_decision_from_str() {
        assert_eq!(
            "APPROVED_WITH_NOTES".parse::<Decision>().unwrap(),
            Decision::ApprovedWithNotes
        );
        assert_eq!(
            "maybe".parse::<Decision>(),
            Err(ValidationError::UnknownDecision("maybe".into()))
        );
    }

    #[test]
    fn test_status_rank_orders_outcomes() {
        assert!(ValidationStatus::PreApproved.rank() > ValidationStatus::ReviewRequired.rank());
        assert!(ValidationStatus::ReviewRequired.rank() > ValidationStatus::ActionMandatory.rank());
    }
}
