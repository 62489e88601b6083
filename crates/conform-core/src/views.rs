//! Review rows and aggregations over the validation store.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use conform_model::{Category, ConfidenceSummary, Document, ValidationResult, VersionId};
use conform_validate::summarize;

use crate::filter::Filterable;
use crate::store::ValidationStore;

/// Status key of a row whose document has no result for the category yet.
pub const UNVALIDATED: &str = "unvalidated";

/// One document joined with its result for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRow {
    pub document: Document,
    pub category: Category,
    pub validation: Option<ValidationResult>,
}

impl Filterable for ReviewRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            &self.document.file_name,
            &self.document.spec_section_code,
            &self.document.spec_section_title,
        ]
    }

    fn status_key(&self) -> &str {
        self.validation
            .as_ref()
            .map_or(UNVALIDATED, |validation| validation.status.as_str())
    }

    fn category(&self) -> Option<Category> {
        Some(self.category)
    }

    fn sort_name(&self) -> &str {
        &self.document.file_name
    }

    fn last_updated(&self) -> Option<DateTime<Utc>> {
        let decided = self
            .validation
            .as_ref()
            .and_then(|validation| validation.decision_at);
        decided.max(Some(self.document.uploaded_at))
    }
}

/// Rows for every document of a version, in upload order.
pub fn review_rows(
    store: &ValidationStore,
    version_id: &VersionId,
    category: Category,
) -> Vec<ReviewRow> {
    let rows: Vec<ReviewRow> = store
        .documents_by_version(version_id)
        .into_iter()
        .map(|document| {
            let validation = store
                .get_by_document_and_category(&document.id, category)
                .ok();
            ReviewRow {
                document,
                category,
                validation,
            }
        })
        .collect();
    debug!(version_id = %version_id, category = %category, count = rows.len(), "review rows built");
    rows
}

/// Summary over the rows that have a result. Unvalidated rows are skipped.
pub fn summarize_rows<'a, I>(rows: I) -> ConfidenceSummary
where
    I: IntoIterator<Item = &'a ReviewRow>,
{
    summarize(rows.into_iter().filter_map(|row| row.validation.as_ref()))
}

/// Summary for one category of a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: Category,
    pub summary: ConfidenceSummary,
}

/// One summary per category, in [`Category::all`] order.
pub fn category_breakdown(store: &ValidationStore, version_id: &VersionId) -> Vec<CategorySummary> {
    Category::all()
        .iter()
        .map(|&category| CategorySummary {
            category,
            summary: summarize(&store.list_by_version_and_category(version_id, category)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterCriteria, StatusFilter, filter};
    use crate::test_support::{document, validation};
    use conform_model::ValidationStatus;

    fn store() -> ValidationStore {
        let store = ValidationStore::default();
        store.register_document(document("doc-1", "v1")).unwrap();
        store.register_document(document("doc-2", "v1")).unwrap();
        store
            .ingest(validation("val-1", "doc-1", "v1", Category::Overall, 91))
            .unwrap();
        store
            .ingest(validation("val-1-pa", "doc-1", "v1", Category::ProjectAssets, 55))
            .unwrap();
        store
    }

    fn v1() -> VersionId {
        VersionId::new("v1").unwrap()
    }

    #[test]
    fn rows_include_unvalidated_documents() {
        let rows = review_rows(&store(), &v1(), Category::Overall);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].validation.is_some());
        assert_eq!(rows[1].status_key(), UNVALIDATED);

        let summary = summarize_rows(&rows);
        assert_eq!(summary.total, 1);
        assert_eq!(summary.pre_approved, 1);
        assert_eq!(summary.overall_confidence, 91);
    }

    #[test]
    fn rows_filter_by_status() {
        let rows = review_rows(&store(), &v1(), Category::Overall);
        let criteria =
            FilterCriteria::new().with_status(StatusFilter::from(ValidationStatus::PreApproved));
        let found = filter(&rows, &criteria);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].document.id.as_str(), "doc-1");
    }

    #[test]
    fn breakdown_covers_every_category() {
        let breakdown = category_breakdown(&store(), &v1());
        let categories: Vec<Category> = breakdown.iter().map(|entry| entry.category).collect();
        assert_eq!(categories, Category::all().to_vec());
        assert_eq!(breakdown[1].summary.action_mandatory, 1);
        assert!(!breakdown[2].summary.has_data());
    }
}
