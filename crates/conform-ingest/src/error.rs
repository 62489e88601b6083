//! Ingest error types.
//!
//! Every loader returns a structured error with a user-facing message and,
//! where one exists, a remediation hint.

use std::path::PathBuf;

use thiserror::Error;

use conform_model::ConformError;

/// Ingest operation error.
#[derive(Debug, Error)]
pub enum IngestError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot JSON could not be parsed or written.
    #[error("Invalid snapshot JSON: {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Snapshot written by a newer schema.
    #[error("Snapshot version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion {
        found: u32,
        max_supported: u32,
        path: PathBuf,
    },

    /// Material matrix CSV could not be read.
    #[error("Failed to read CSV: {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from the CSV header.
    #[error("Missing column '{column}' in {path}")]
    MissingColumn { column: &'static str, path: PathBuf },

    /// A cell holds a value that cannot be parsed.
    #[error("Row {row} of {path}: {source}")]
    Row {
        row: usize,
        path: PathBuf,
        #[source]
        source: ConformError,
    },

    /// A loaded record was rejected by the workspace.
    #[error(transparent)]
    Rejected(#[from] ConformError),

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    pub(crate) fn io(
        operation: &'static str,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io {
            operation,
            path,
            source,
        }
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => format!("Could not {} the file at {}", operation, path.display()),
            Self::Json { path, .. } => {
                format!("The file at {} is not a valid review snapshot.", path.display())
            }
            Self::UnsupportedVersion {
                found,
                max_supported,
                ..
            } => format!(
                "This snapshot was written by a newer version \
                (snapshot version {found}, this build supports up to {max_supported})."
            ),
            Self::Csv { path, .. } => {
                format!("The material matrix at {} could not be parsed.", path.display())
            }
            Self::MissingColumn { column, path } => format!(
                "The material matrix at {} has no '{}' column.",
                path.display(),
                column
            ),
            Self::Row { row, source, .. } => format!("Row {row}: {}", source.user_message()),
            Self::Rejected(error) => error.user_message(),
            Self::AtomicWriteFailed { target_path, .. } => format!(
                "Could not save the file to {}. Please check disk space and permissions.",
                target_path.display()
            ),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" || *operation == "open" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::Json { .. } => Some("Re-export the snapshot from the review tool.".into()),
            Self::UnsupportedVersion { .. } => Some("Update to the latest release.".into()),
            Self::Csv { .. } => Some("Save the sheet as UTF-8 CSV and try again.".into()),
            Self::MissingColumn { .. } => Some(
                "Expected columns: Item, Description, Spec Section, Material Matrix, \
                Project Spec, Project Index, Status, Confidence, AI Reason."
                    .into(),
            ),
            Self::Row { source, .. } => source.suggestion(),
            Self::Rejected(error) => error.suggestion(),
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or try saving to a different location.".into())
            }
        }
    }
}

/// Result type alias for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;
