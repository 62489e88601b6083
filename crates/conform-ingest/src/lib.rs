//! Loading and saving conformance review data.
//!
//! Snapshots are JSON images of a [`ReviewWorkspace`](conform_core::ReviewWorkspace);
//! material matrices arrive as CSV exports. Source files can be fingerprinted
//! so a report records exactly what it was built from.

pub mod error;
mod hash;
mod matrix;
mod snapshot;

pub use error::{IngestError, Result};
pub use hash::{fingerprint_file, fingerprint_matches};
pub use matrix::{
    COLUMN_AI_REASON, COLUMN_CONFIDENCE, COLUMN_DESCRIPTION, COLUMN_ITEM,
    COLUMN_MATERIAL_MATRIX, COLUMN_PROJECT_INDEX, COLUMN_PROJECT_SPEC, COLUMN_SPEC_SECTION,
    COLUMN_STATUS, load_material_matrix,
};
pub use snapshot::{load_snapshot, load_workspace, save_snapshot};
