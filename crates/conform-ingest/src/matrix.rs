//! Material matrix CSV loading.
//!
//! One row per line item comparing the material matrix, project
//! specification and project index values. Headers are matched after
//! whitespace normalization and case folding.

use std::collections::HashMap;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use conform_model::{
    ConfidenceScore, ConformError, ItemId, MaterialItem, ReportId, ValidationError,
    ValidationStatus,
};
use conform_validate::Classifier;

use crate::error::{IngestError, Result};

pub const COLUMN_ITEM: &str = "Item";
pub const COLUMN_DESCRIPTION: &str = "Description";
pub const COLUMN_SPEC_SECTION: &str = "Spec Section";
pub const COLUMN_MATERIAL_MATRIX: &str = "Material Matrix";
pub const COLUMN_PROJECT_SPEC: &str = "Project Spec";
pub const COLUMN_PROJECT_INDEX: &str = "Project Index";
pub const COLUMN_STATUS: &str = "Status";
pub const COLUMN_CONFIDENCE: &str = "Confidence";
pub const COLUMN_AI_REASON: &str = "AI Reason";

fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    fn new(headers: &StringRecord) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| (normalize_header(header), idx))
            .collect();
        Self { index }
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.index.get(&normalize_header(column)).copied()
    }

    fn require(&self, column: &'static str, path: &Path) -> Result<usize> {
        self.position(column).ok_or_else(|| IngestError::MissingColumn {
            column,
            path: path.to_path_buf(),
        })
    }
}

fn cell(record: &StringRecord, index: Option<usize>) -> String {
    index
        .and_then(|idx| record.get(idx))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Parse "87", "87%" or "87.4" into a score.
fn parse_confidence(raw: &str) -> std::result::Result<ConfidenceScore, ConformError> {
    let trimmed = raw.trim().trim_end_matches('%').trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::UnparsableScore(raw.trim().to_string()))?;
    if !value.is_finite() {
        return Err(ValidationError::UnparsableScore(raw.trim().to_string()).into());
    }
    // Bounds are checked by the score constructor.
    Ok(ConfidenceScore::new(value.round() as i64)?)
}

/// Load a material matrix CSV into items of `report_id`.
///
/// Item ids are `<report>-<n>` with `n` the 1-based data row. A blank
/// `Status` cell takes the status the classifier gives the row's confidence.
pub fn load_material_matrix(
    path: &Path,
    report_id: &ReportId,
    classifier: &Classifier,
) -> Result<Vec<MaterialItem>> {
    let csv_error = |source: csv::Error| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_error)?;
    let headers = reader.headers().map_err(csv_error)?.clone();
    let columns = Columns::new(&headers);

    let item = columns.require(COLUMN_ITEM, path)?;
    let matrix = columns.require(COLUMN_MATERIAL_MATRIX, path)?;
    let spec = columns.require(COLUMN_PROJECT_SPEC, path)?;
    let index = columns.require(COLUMN_PROJECT_INDEX, path)?;
    let confidence = columns.require(COLUMN_CONFIDENCE, path)?;
    let description = columns.position(COLUMN_DESCRIPTION);
    let spec_section = columns.position(COLUMN_SPEC_SECTION);
    let status = columns.position(COLUMN_STATUS);
    let ai_reason = columns.position(COLUMN_AI_REASON);

    let mut items = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let row = items.len() + 1;
        let row_error = |source: ConformError| IngestError::Row {
            row,
            path: path.to_path_buf(),
            source,
        };

        let name = cell(&record, Some(item));
        if name.is_empty() {
            return Err(row_error(ValidationError::EmptyIdentifier.into()));
        }
        let confidence_score =
            parse_confidence(&cell(&record, Some(confidence))).map_err(row_error)?;
        let status_cell = cell(&record, status);
        let status = if status_cell.is_empty() {
            classifier.status_for(confidence_score)
        } else {
            status_cell
                .parse::<ValidationStatus>()
                .map_err(|error: ValidationError| row_error(error.into()))?
        };
        let id = ItemId::new(format!("{report_id}-{row}"))
            .map_err(|error| row_error(error.into()))?;

        debug!(item_id = %id, status = %status, "material row parsed");
        items.push(MaterialItem {
            id,
            report_id: report_id.clone(),
            name,
            description: cell(&record, description),
            spec_section: cell(&record, spec_section),
            material_matrix_value: cell(&record, Some(matrix)),
            project_spec_value: cell(&record, Some(spec)),
            project_index_value: cell(&record, Some(index)),
            status,
            confidence_score,
            ai_reason: cell(&record, ai_reason),
            comments: Vec::new(),
            updated_at: None,
            revision: 0,
        });
    }

    info!(
        path = %path.display(),
        report_id = %report_id,
        count = items.len(),
        "material matrix loaded"
    );
    Ok(items)
}
