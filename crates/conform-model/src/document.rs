use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{DocumentId, VersionId};

/// An uploaded file under review.
///
/// Documents are immutable once ingested and live as long as their version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub version_id: VersionId,
    pub file_name: String,
    pub file_type: String,
    /// Size in bytes.
    pub file_size: u64,
    /// Specification section code (e.g., "23 05 00").
    pub spec_section_code: String,
    pub spec_section_title: String,
    pub uploaded_at: DateTime<Utc>,
}
