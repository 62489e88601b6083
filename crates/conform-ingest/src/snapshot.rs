//! Workspace snapshot files (JSON).

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tracing::info;

use conform_core::{ReviewWorkspace, SNAPSHOT_SCHEMA_VERSION, WorkspaceSnapshot};
use conform_validate::Classifier;

use crate::error::{IngestError, Result};

/// Read a snapshot file.
pub fn load_snapshot(path: &Path) -> Result<WorkspaceSnapshot> {
    let file = File::open(path).map_err(IngestError::io("read", path))?;
    let snapshot: WorkspaceSnapshot =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| IngestError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    if snapshot.schema_version > SNAPSHOT_SCHEMA_VERSION {
        return Err(IngestError::UnsupportedVersion {
            found: snapshot.schema_version,
            max_supported: SNAPSHOT_SCHEMA_VERSION,
            path: path.to_path_buf(),
        });
    }
    info!(
        path = %path.display(),
        documents = snapshot.documents.len(),
        validations = snapshot.validations.len(),
        materials = snapshot.materials.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

/// Read a snapshot file and rebuild the workspace it describes.
pub fn load_workspace(path: &Path, classifier: Classifier) -> Result<ReviewWorkspace> {
    let snapshot = load_snapshot(path)?;
    Ok(ReviewWorkspace::from_snapshot(snapshot, classifier)?)
}

/// Write a snapshot as pretty JSON.
///
/// Writes to a sibling temp file first and renames it over `path`.
pub fn save_snapshot(path: &Path, snapshot: &WorkspaceSnapshot) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(IngestError::io("create directory", parent))?;
    }

    let temp_path = path.with_extension("json.tmp");
    let file = File::create(&temp_path).map_err(IngestError::io("create", &temp_path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, snapshot).map_err(|source| IngestError::Json {
        path: temp_path.clone(),
        source,
    })?;
    writer
        .write_all(b"\n")
        .map_err(IngestError::io("write", &temp_path))?;
    let file = writer
        .into_inner()
        .map_err(|error| IngestError::io("write", &temp_path)(error.into_error()))?;
    file.sync_all().map_err(IngestError::io("sync", &temp_path))?;

    fs::rename(&temp_path, path).map_err(|source| IngestError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "snapshot saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_then_load_keeps_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("review.json");
        let snapshot = WorkspaceSnapshot::default();
        save_snapshot(&path, &snapshot).unwrap();
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(load_snapshot(&path).unwrap(), snapshot);
    }

    #[test]
    fn newer_schema_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("future.json");
        fs::write(&path, r#"{"schemaVersion": 99}"#).unwrap();
        let error = load_snapshot(&path).unwrap_err();
        assert!(matches!(
            error,
            IngestError::UnsupportedVersion { found: 99, .. }
        ));
    }

    #[test]
    fn missing_file_reports_read_failure() {
        let dir = tempdir().unwrap();
        let error = load_snapshot(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(error, IngestError::Io { operation: "read", .. }));
        assert!(error.suggestion().is_some());
    }
}
