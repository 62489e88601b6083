//! Validation store.
//!
//! Authoritative holder of [`Document`] and [`ValidationResult`] records. The
//! store is a cheap-to-clone handle around shared state; every query returns
//! owned copies, so callers never observe a record mid-write.
//!
//! Status, score and evidence are write-once at ingestion. Decision fields
//! are only written through [`DecisionManager`](crate::DecisionManager).

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use conform_model::{
    Category, ConformError, Document, DocumentId, EntityKind, Result, ValidationError,
    ValidationId, ValidationResult, VersionId,
};
use conform_validate::Classifier;

use crate::lock;

#[derive(Debug, Default)]
pub(crate) struct StoreState {
    documents: Vec<Document>,
    document_index: HashMap<DocumentId, usize>,
    results: Vec<ValidationResult>,
    key_index: HashMap<(DocumentId, Category), usize>,
    id_index: HashMap<ValidationId, usize>,
}

impl StoreState {
    fn has_document(&self, id: &DocumentId) -> bool {
        self.document_index.contains_key(id)
    }

    pub(crate) fn result_index(&self, document_id: &DocumentId, category: Category) -> Result<usize> {
        if let Some(index) = self.key_index.get(&(document_id.clone(), category)) {
            return Ok(*index);
        }
        if !self.has_document(document_id) {
            return Err(ConformError::not_found(EntityKind::Document, document_id));
        }
        Err(ConformError::not_found(
            EntityKind::ValidationResult,
            format!("{document_id}/{category}"),
        ))
    }

    pub(crate) fn result_mut(&mut self, index: usize) -> &mut ValidationResult {
        &mut self.results[index]
    }

    fn result_by_key(&self, document_id: &DocumentId, category: Category) -> Result<&ValidationResult> {
        self.result_index(document_id, category)
            .map(|index| &self.results[index])
    }
}

/// Thread-safe store of documents and their validation results.
#[derive(Debug, Clone, Default)]
pub struct ValidationStore {
    state: Arc<RwLock<StoreState>>,
    classifier: Classifier,
}

impl ValidationStore {
    /// Create an empty store that derives status with `classifier`.
    pub fn new(classifier: Classifier) -> Self {
        Self {
            state: Arc::default(),
            classifier,
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Register an uploaded document.
    pub fn register_document(&self, document: Document) -> Result<()> {
        let mut state = lock::write(&self.state);
        if state.has_document(&document.id) {
            return Err(ConformError::Duplicate {
                kind: EntityKind::Document,
                id: document.id.to_string(),
            });
        }
        debug!(document_id = %document.id, version_id = %document.version_id, "document registered");
        let index = state.documents.len();
        state.document_index.insert(document.id.clone(), index);
        state.documents.push(document);
        Ok(())
    }

    /// Ingest a fully formed validation result.
    ///
    /// The result's document must already be registered under the same
    /// version, and no result may exist yet for its (document, category).
    /// `status` is recomputed from the confidence score.
    pub fn ingest(&self, mut result: ValidationResult) -> Result<ValidationResult> {
        let mut state = lock::write(&self.state);
        let Some(&doc_index) = state.document_index.get(&result.document_id) else {
            return Err(ValidationError::UnknownDocument(result.document_id.to_string()).into());
        };
        let document = &state.documents[doc_index];
        if document.version_id != result.version_id {
            return Err(ValidationError::VersionMismatch {
                document_id: result.document_id.to_string(),
                expected: document.version_id.to_string(),
                found: result.version_id.to_string(),
            }
            .into());
        }
        let key = result.key();
        if state.key_index.contains_key(&key) {
            return Err(ConformError::Duplicate {
                kind: EntityKind::ValidationResult,
                id: format!("{}/{}", key.0, key.1),
            });
        }
        if state.id_index.contains_key(&result.id) {
            return Err(ConformError::Duplicate {
                kind: EntityKind::ValidationResult,
                id: result.id.to_string(),
            });
        }

        result.status = self.classifier.status_for(result.confidence_score);
        info!(
            validation_id = %result.id,
            document_id = %result.document_id,
            category = %result.category,
            score = result.confidence_score.value(),
            status = %result.status,
            "validation result ingested"
        );
        let index = state.results.len();
        state.key_index.insert(key, index);
        state.id_index.insert(result.id.clone(), index);
        state.results.push(result.clone());
        Ok(result)
    }

    pub fn document(&self, id: &DocumentId) -> Result<Document> {
        let state = lock::read(&self.state);
        state
            .document_index
            .get(id)
            .map(|&index| state.documents[index].clone())
            .ok_or_else(|| ConformError::not_found(EntityKind::Document, id))
    }

    /// Documents of a version in upload order.
    pub fn documents_by_version(&self, version_id: &VersionId) -> Vec<Document> {
        let state = lock::read(&self.state);
        state
            .documents
            .iter()
            .filter(|document| &document.version_id == version_id)
            .cloned()
            .collect()
    }

    /// The overall-category result for a document.
    pub fn get_by_document(&self, document_id: &DocumentId) -> Result<ValidationResult> {
        self.get_by_document_and_category(document_id, Category::Overall)
    }

    pub fn get_by_document_and_category(
        &self,
        document_id: &DocumentId,
        category: Category,
    ) -> Result<ValidationResult> {
        let state = lock::read(&self.state);
        state.result_by_key(document_id, category).cloned()
    }

    pub fn get(&self, id: &ValidationId) -> Result<ValidationResult> {
        let state = lock::read(&self.state);
        state
            .id_index
            .get(id)
            .map(|&index| state.results[index].clone())
            .ok_or_else(|| ConformError::not_found(EntityKind::ValidationResult, id))
    }

    pub fn contains(&self, id: &ValidationId) -> bool {
        lock::read(&self.state).id_index.contains_key(id)
    }

    /// Overall-category results of a version, in ingestion order.
    pub fn list_by_version(&self, version_id: &VersionId) -> Vec<ValidationResult> {
        self.list_by_version_and_category(version_id, Category::Overall)
    }

    pub fn list_by_version_and_category(
        &self,
        version_id: &VersionId,
        category: Category,
    ) -> Vec<ValidationResult> {
        let state = lock::read(&self.state);
        state
            .results
            .iter()
            .filter(|result| &result.version_id == version_id && result.category == category)
            .cloned()
            .collect()
    }

    /// Every category's result for one document, in [`Category::all`] order.
    pub fn results_for_document(&self, document_id: &DocumentId) -> Vec<ValidationResult> {
        let state = lock::read(&self.state);
        Category::all()
            .iter()
            .filter_map(|category| state.result_by_key(document_id, *category).ok())
            .cloned()
            .collect()
    }

    pub fn documents(&self) -> Vec<Document> {
        lock::read(&self.state).documents.clone()
    }

    pub fn results(&self) -> Vec<ValidationResult> {
        lock::read(&self.state).results.clone()
    }

    pub fn len(&self) -> usize {
        lock::read(&self.state).results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn state(&self) -> &RwLock<StoreState> {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{document, validation};

    fn store_with(doc: &str, version: &str) -> ValidationStore {
        let store = ValidationStore::default();
        store.register_document(document(doc, version)).unwrap();
        store
    }

    #[test]
    fn ingest_derives_status_from_score() {
        let store = store_with("doc-1", "v1");
        let mut result = validation("val-1", "doc-1", "v1", Category::Overall, 65);
        result.status = conform_model::ValidationStatus::PreApproved;
        let stored = store.ingest(result).unwrap();
        assert_eq!(stored.status, conform_model::ValidationStatus::ReviewRequired);
    }

    #[test]
    fn one_result_per_document_and_category() {
        let store = store_with("doc-1", "v1");
        store
            .ingest(validation("val-1", "doc-1", "v1", Category::Overall, 90))
            .unwrap();
        let error = store
            .ingest(validation("val-2", "doc-1", "v1", Category::Overall, 70))
            .unwrap_err();
        assert!(matches!(error, ConformError::Duplicate { .. }));
        store
            .ingest(validation("val-3", "doc-1", "v1", Category::ProjectAssets, 70))
            .unwrap();
        assert_eq!(store.results_for_document(&DocumentId::new("doc-1").unwrap()).len(), 2);
    }

    #[test]
    fn ingest_requires_registered_document_and_matching_version() {
        let store = store_with("doc-1", "v1");
        let error = store
            .ingest(validation("val-1", "doc-2", "v1", Category::Overall, 90))
            .unwrap_err();
        assert_eq!(
            error,
            ConformError::Validation(ValidationError::UnknownDocument("doc-2".into()))
        );
        let error = store
            .ingest(validation("val-1", "doc-1", "v2", Category::Overall, 90))
            .unwrap_err();
        assert!(error.is_validation());
    }

    #[test]
    fn missing_lookups_are_not_found() {
        let store = store_with("doc-1", "v1");
        let doc = DocumentId::new("doc-1").unwrap();
        let error = store.get_by_document(&doc).unwrap_err();
        assert_eq!(
            error,
            ConformError::not_found(EntityKind::ValidationResult, "doc-1/overall")
        );
        let unknown = DocumentId::new("nope").unwrap();
        assert_eq!(
            store.get_by_document(&unknown).unwrap_err(),
            ConformError::not_found(EntityKind::Document, "nope")
        );
    }

    #[test]
    fn list_by_version_returns_overall_in_ingestion_order() {
        let store = ValidationStore::default();
        for doc in ["doc-b", "doc-a", "doc-c"] {
            store.register_document(document(doc, "v1")).unwrap();
        }
        store.register_document(document("doc-x", "v2")).unwrap();
        store
            .ingest(validation("val-b", "doc-b", "v1", Category::Overall, 90))
            .unwrap();
        store
            .ingest(validation("val-a", "doc-a", "v1", Category::Overall, 50))
            .unwrap();
        store
            .ingest(validation("val-a-pa", "doc-a", "v1", Category::ProjectAssets, 50))
            .unwrap();
        store
            .ingest(validation("val-x", "doc-x", "v2", Category::Overall, 50))
            .unwrap();

        let listed = store.list_by_version(&VersionId::new("v1").unwrap());
        let ids: Vec<&str> = listed.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["val-b", "val-a"]);
    }
}
