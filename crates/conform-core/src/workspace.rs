//! Review workspace: one explicitly constructed set of store, decision
//! manager, material registry and comment thread.

use serde::{Deserialize, Serialize};
use tracing::info;

use conform_model::{
    Category, Comment, CommentTarget, ConfidenceSummary, DiscrepancyReport, Document,
    MaterialItem, Result, ValidationResult, VersionId,
};
use conform_validate::Classifier;

use crate::comments::{CommentIdAllocator, CommentThread};
use crate::decision::DecisionManager;
use crate::filter::{FilterCriteria, SortBy, filter, sort_items};
use crate::registry::MaterialRegistry;
use crate::store::ValidationStore;
use crate::views::{self, CategorySummary, ReviewRow};

/// Current snapshot schema version.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Serializable image of a workspace.
///
/// Item comments travel inside their [`MaterialItem`]; `comments` holds the
/// validation-scoped threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSnapshot {
    pub schema_version: u32,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub validations: Vec<ValidationResult>,
    #[serde(default)]
    pub reports: Vec<DiscrepancyReport>,
    #[serde(default)]
    pub materials: Vec<MaterialItem>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Default for WorkspaceSnapshot {
    fn default() -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            documents: Vec::new(),
            validations: Vec::new(),
            reports: Vec::new(),
            materials: Vec::new(),
            comments: Vec::new(),
        }
    }
}

/// Facade over every conformance component of one review.
#[derive(Debug, Clone)]
pub struct ReviewWorkspace {
    store: ValidationStore,
    decisions: DecisionManager,
    registry: MaterialRegistry,
    comments: CommentThread,
}

impl Default for ReviewWorkspace {
    fn default() -> Self {
        Self::new(Classifier::default())
    }
}

impl ReviewWorkspace {
    pub fn new(classifier: Classifier) -> Self {
        let ids = CommentIdAllocator::default();
        let store = ValidationStore::new(classifier);
        Self {
            decisions: DecisionManager::new(store.clone()),
            registry: MaterialRegistry::new(ids.clone()),
            comments: CommentThread::new(store.clone(), ids),
            store,
        }
    }

    /// Rebuild a workspace from a snapshot.
    ///
    /// Records are ingested in dependency order (documents, results,
    /// reports, items, comments), so the first invalid record aborts the load.
    pub fn from_snapshot(snapshot: WorkspaceSnapshot, classifier: Classifier) -> Result<Self> {
        let workspace = Self::new(classifier);
        let counts = (
            snapshot.documents.len(),
            snapshot.validations.len(),
            snapshot.materials.len(),
        );
        for document in snapshot.documents {
            workspace.store.register_document(document)?;
        }
        for result in snapshot.validations {
            workspace.store.ingest(result)?;
        }
        for report in snapshot.reports {
            workspace.registry.register_report(report)?;
        }
        for item in snapshot.materials {
            workspace.registry.ingest_item(item)?;
        }
        for comment in snapshot.comments {
            workspace.comments.restore(comment)?;
        }
        info!(
            documents = counts.0,
            validations = counts.1,
            materials = counts.2,
            "workspace restored"
        );
        Ok(workspace)
    }

    pub fn snapshot(&self) -> WorkspaceSnapshot {
        WorkspaceSnapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            documents: self.store.documents(),
            validations: self.store.results(),
            reports: self.registry.reports(),
            materials: self.registry.items(),
            comments: self.comments.all(),
        }
    }

    pub fn store(&self) -> &ValidationStore {
        &self.store
    }

    pub fn decisions(&self) -> &DecisionManager {
        &self.decisions
    }

    pub fn registry(&self) -> &MaterialRegistry {
        &self.registry
    }

    pub fn comments(&self) -> &CommentThread {
        &self.comments
    }

    pub fn classifier(&self) -> &Classifier {
        self.store.classifier()
    }

    pub fn rows(&self, version_id: &VersionId, category: Category) -> Vec<ReviewRow> {
        views::review_rows(&self.store, version_id, category)
    }

    /// Filtered rows of a version. Input order is kept unless `sort` is given.
    pub fn list_rows(
        &self,
        version_id: &VersionId,
        criteria: &FilterCriteria,
        sort: Option<SortBy>,
    ) -> Vec<ReviewRow> {
        let category = criteria.category.unwrap_or_default();
        let rows = self.rows(version_id, category);
        let mut visible: Vec<ReviewRow> = filter(&rows, criteria).into_iter().cloned().collect();
        if let Some(sort) = sort {
            sort_items(&mut visible, sort);
        }
        visible
    }

    pub fn summary_for_version(&self, version_id: &VersionId, category: Category) -> ConfidenceSummary {
        views::summarize_rows(&self.rows(version_id, category))
    }

    pub fn category_breakdown(&self, version_id: &VersionId) -> Vec<CategorySummary> {
        views::category_breakdown(&self.store, version_id)
    }

    /// Comments on a validation result or material item, oldest first.
    pub fn comments_for(&self, target: &CommentTarget) -> Result<Vec<Comment>> {
        match target {
            CommentTarget::Validation(id) => {
                self.store.get(id)?;
                Ok(self.comments.list(id))
            }
            CommentTarget::Item(id) => self.registry.comments(id),
        }
    }

    pub fn append_comment(
        &self,
        target: &CommentTarget,
        author: &str,
        content: &str,
    ) -> Result<Comment> {
        match target {
            CommentTarget::Validation(id) => self.comments.append(id, author, content),
            CommentTarget::Item(id) => self.registry.append_comment(id, author, content),
        }
    }
}
