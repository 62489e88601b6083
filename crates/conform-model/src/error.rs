//! Error taxonomy shared by every conformance crate.
//!
//! Lookups fail with [`ConformError::NotFound`], malformed mutator input with
//! [`ConformError::Validation`], and revision-checked writes with
//! [`ConformError::Conflict`]. Nothing is coerced silently.

use std::fmt;

use thiserror::Error;

/// Kind of entity an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Document,
    ValidationResult,
    MaterialItem,
    Report,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::ValidationResult => "validation result",
            Self::MaterialItem => "material item",
            Self::Report => "discrepancy report",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Malformed input handed to a mutator or parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("confidence score {0} is outside 0..=100")]
    InvalidScore(i64),

    #[error("confidence score '{0}' is not a number")]
    UnparsableScore(String),

    #[error("comment content must not be empty")]
    EmptyComment,

    #[error("acting user must not be empty")]
    MissingActor,

    #[error("identifier must not be empty")]
    EmptyIdentifier,

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unknown status: {0}")]
    UnknownStatus(String),

    #[error("unknown decision: {0}")]
    UnknownDecision(String),

    #[error("unknown evidence relevance: {0}")]
    UnknownRelevance(String),

    #[error("invalid thresholds: {0}")]
    InvalidThresholds(String),

    #[error("validation result references unregistered document {0}")]
    UnknownDocument(String),

    #[error("document {document_id} belongs to version {expected}, not {found}")]
    VersionMismatch {
        document_id: String,
        expected: String,
        found: String,
    },

    #[error("material item references unregistered report {0}")]
    UnknownReport(String),

    #[error("comment {0} is attached to a different kind of record")]
    MisroutedComment(String),
}

/// Error returned by conformance operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConformError {
    /// Lookup by id with no matching record.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// Malformed input, surfaced to the caller for correction.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A revision-checked write observed a newer revision.
    #[error("{kind} {id} was modified: expected revision {expected}, found {actual}")]
    Conflict {
        kind: EntityKind,
        id: String,
        expected: u64,
        actual: u64,
    },

    /// Ingestion of a record whose key already exists.
    #[error("{kind} already exists: {id}")]
    Duplicate { kind: EntityKind, id: String },
}

impl ConformError {
    pub fn not_found(kind: EntityKind, id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { kind, id } => format!("No {kind} with id '{id}' exists."),
            Self::Validation(error) => format!("The request was rejected: {error}."),
            Self::Conflict { kind, id, .. } => {
                format!("The {kind} '{id}' was changed by someone else.")
            }
            Self::Duplicate { kind, id } => format!("A {kind} with id '{id}' already exists."),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::NotFound { .. } => None,
            Self::Validation(ValidationError::EmptyComment) => {
                Some("Enter some text before posting the comment.".into())
            }
            Self::Validation(ValidationError::MissingActor) => {
                Some("Sign in again so the action can be attributed.".into())
            }
            Self::Validation(_) => Some("Correct the input and try again.".into()),
            Self::Conflict { .. } => Some("Reload the record and reapply your change.".into()),
            Self::Duplicate { .. } => {
                Some("Re-run ingestion with a fresh identifier or drop the duplicate.".into())
            }
        }
    }
}

/// Result type alias for conformance operations.
pub type Result<T> = std::result::Result<T, ConformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_convert_into_conform_error() {
        let error: ConformError = ValidationError::EmptyComment.into();
        assert!(error.is_validation());
        assert!(!error.is_not_found());
        assert_eq!(error.to_string(), "comment content must not be empty");
    }

    #[test]
    fn not_found_message_names_kind_and_id() {
        let error = ConformError::not_found(EntityKind::MaterialItem, "item-9");
        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "material item not found: item-9");
        assert!(error.suggestion().is_none());
    }
}
