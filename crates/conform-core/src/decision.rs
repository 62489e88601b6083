//! Reviewer decisions.
//!
//! Decisions are held per (document, category): changing the overall
//! decision leaves the project-assets and performance-index records alone.
//! Any decision may follow any other; the latest write wins unless the
//! request pins an expected revision.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use conform_model::{
    ActorId, Category, ConformError, Decision, DocumentId, EntityKind, Result, ValidationError,
    ValidationResult,
};

use crate::batch::BatchReport;
use crate::lock;
use crate::store::ValidationStore;

/// A decision to record, with the acting user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRequest {
    pub decision: Decision,
    pub actor: ActorId,
    pub notes: Option<String>,
    pub expected_revision: Option<u64>,
}

impl DecisionRequest {
    /// Fails with `MissingActor` when `actor` is blank.
    pub fn new(decision: Decision, actor: impl Into<String>) -> Result<Self> {
        let actor = ActorId::new(actor).map_err(|_| ValidationError::MissingActor)?;
        Ok(Self {
            decision,
            actor,
            notes: None,
            expected_revision: None,
        })
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = if notes.trim().is_empty() {
            None
        } else {
            Some(notes)
        };
        self
    }

    /// Reject the write with `Conflict` unless the record is still at `revision`.
    #[must_use]
    pub fn expecting_revision(mut self, revision: u64) -> Self {
        self.expected_revision = Some(revision);
        self
    }
}

/// Target of a decision.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DecisionTarget {
    pub document_id: DocumentId,
    pub category: Category,
}

impl fmt::Display for DecisionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.document_id, self.category)
    }
}

/// Current decision state of one validation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionState {
    pub decision: Decision,
    pub decision_by: Option<ActorId>,
    pub decision_at: Option<DateTime<Utc>>,
    pub decision_notes: Option<String>,
    pub revision: u64,
}

impl From<&ValidationResult> for DecisionState {
    fn from(result: &ValidationResult) -> Self {
        Self {
            decision: result.decision,
            decision_by: result.decision_by.clone(),
            decision_at: result.decision_at,
            decision_notes: result.decision_notes.clone(),
            revision: result.revision,
        }
    }
}

/// Writes reviewer decisions through to a [`ValidationStore`].
#[derive(Debug, Clone)]
pub struct DecisionManager {
    store: ValidationStore,
}

impl DecisionManager {
    pub fn new(store: ValidationStore) -> Self {
        Self { store }
    }

    /// Read the decision of one (document, category).
    pub fn current(&self, document_id: &DocumentId, category: Category) -> Result<DecisionState> {
        let result = self.store.get_by_document_and_category(document_id, category)?;
        Ok(DecisionState::from(&result))
    }

    /// Record a decision on the overall result of a document.
    pub fn decide_overall(
        &self,
        document_id: &DocumentId,
        request: &DecisionRequest,
    ) -> Result<ValidationResult> {
        self.decide(document_id, Category::Overall, request)
    }

    /// Record a decision, overwriting any earlier one.
    pub fn decide(
        &self,
        document_id: &DocumentId,
        category: Category,
        request: &DecisionRequest,
    ) -> Result<ValidationResult> {
        let mut state = lock::write(self.store.state());
        let index = state.result_index(document_id, category)?;
        let result = state.result_mut(index);
        if let Some(expected) = request.expected_revision
            && expected != result.revision
        {
            warn!(
                document_id = %document_id,
                category = %category,
                expected,
                actual = result.revision,
                "decision rejected: stale revision"
            );
            return Err(ConformError::Conflict {
                kind: EntityKind::ValidationResult,
                id: format!("{document_id}/{category}"),
                expected,
                actual: result.revision,
            });
        }
        apply(result, request, Utc::now());
        info!(
            document_id = %document_id,
            category = %category,
            decision = %request.decision,
            actor = %request.actor,
            revision = result.revision,
            "decision recorded"
        );
        Ok(result.clone())
    }

    /// Apply one decision to every (document, category) pair.
    ///
    /// The whole batch runs under one write lock: either every target is
    /// updated or, when any is missing, none is. An empty `categories` slice
    /// means the overall category. `expected_revision` on the request is
    /// ignored here since one revision cannot describe many records.
    pub fn batch_decide<I>(
        &self,
        document_ids: I,
        categories: &[Category],
        request: &DecisionRequest,
    ) -> BatchReport<DecisionTarget>
    where
        I: IntoIterator<Item = DocumentId>,
    {
        let categories: BTreeSet<Category> = if categories.is_empty() {
            BTreeSet::from([Category::Overall])
        } else {
            categories.iter().copied().collect()
        };
        let document_ids: BTreeSet<DocumentId> = document_ids.into_iter().collect();
        let targets: Vec<DecisionTarget> = document_ids
            .iter()
            .flat_map(|document_id| {
                categories.iter().map(move |category| DecisionTarget {
                    document_id: document_id.clone(),
                    category: *category,
                })
            })
            .collect();

        let mut state = lock::write(self.store.state());
        let resolved: Vec<(DecisionTarget, Option<usize>)> = targets
            .into_iter()
            .map(|target| {
                let index = state
                    .result_index(&target.document_id, target.category)
                    .ok();
                (target, index)
            })
            .collect();

        if resolved.iter().any(|(_, index)| index.is_none()) {
            let missing = resolved.iter().filter(|(_, index)| index.is_none()).count();
            warn!(
                targets = resolved.len(),
                missing,
                decision = %request.decision,
                "batch decision rolled back"
            );
            return BatchReport::rolled_back(
                resolved
                    .into_iter()
                    .map(|(target, index)| (target, index.is_some()))
                    .collect(),
            );
        }

        let now = Utc::now();
        let mut applied = Vec::with_capacity(resolved.len());
        for (target, index) in resolved {
            if let Some(index) = index {
                apply(state.result_mut(index), request, now);
                applied.push(target);
            }
        }
        info!(
            targets = applied.len(),
            decision = %request.decision,
            actor = %request.actor,
            "batch decision committed"
        );
        BatchReport::committed(applied)
    }
}

fn apply(result: &mut ValidationResult, request: &DecisionRequest, at: DateTime<Utc>) {
    result.decision = request.decision;
    result.decision_by = Some(request.actor.clone());
    result.decision_at = Some(at);
    result.decision_notes = request.notes.clone();
    result.revision += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::BatchOutcome;
    use crate::test_support::{document, validation};

    fn doc(id: &str) -> DocumentId {
        DocumentId::new(id).unwrap()
    }

    fn setup() -> (ValidationStore, DecisionManager) {
        let store = ValidationStore::default();
        for id in ["doc-1", "doc-2"] {
            store.register_document(document(id, "v1")).unwrap();
            store
                .ingest(validation(&format!("{id}-o"), id, "v1", Category::Overall, 96))
                .unwrap();
        }
        store
            .ingest(validation("doc-1-pa", "doc-1", "v1", Category::ProjectAssets, 92))
            .unwrap();
        store
            .ingest(validation("doc-1-pi", "doc-1", "v1", Category::PerformanceIndex, 98))
            .unwrap();
        let manager = DecisionManager::new(store.clone());
        (store, manager)
    }

    #[test]
    fn decide_then_read_back() {
        let (store, manager) = setup();
        let request = DecisionRequest::new(Decision::Approved, "reviewer-1").unwrap();
        manager.decide_overall(&doc("doc-1"), &request).unwrap();
        let stored = store.get_by_document(&doc("doc-1")).unwrap();
        assert_eq!(stored.decision, Decision::Approved);
        assert!(stored.decision_at.is_some());
        assert_eq!(stored.decision_by.unwrap().as_str(), "reviewer-1");
        assert_eq!(stored.revision, 1);
    }

    #[test]
    fn categories_are_decided_independently() {
        let (store, manager) = setup();
        let request = DecisionRequest::new(Decision::Rejected, "reviewer-1").unwrap();
        manager.decide_overall(&doc("doc-1"), &request).unwrap();
        for category in [Category::ProjectAssets, Category::PerformanceIndex] {
            let other = store
                .get_by_document_and_category(&doc("doc-1"), category)
                .unwrap();
            assert_eq!(other.decision, Decision::Pending);
            assert!(other.decision_at.is_none());
        }
    }

    #[test]
    fn unknown_document_is_not_found() {
        let (_, manager) = setup();
        let request = DecisionRequest::new(Decision::Approved, "reviewer-1").unwrap();
        let error = manager.decide_overall(&doc("missing"), &request).unwrap_err();
        assert!(error.is_not_found());
    }

    #[test]
    fn blank_actor_is_rejected() {
        let error = DecisionRequest::new(Decision::Approved, "  ").unwrap_err();
        assert_eq!(error, ConformError::Validation(ValidationError::MissingActor));
    }

    #[test]
    fn reopening_to_pending_is_allowed() {
        let (_, manager) = setup();
        let approve = DecisionRequest::new(Decision::Approved, "reviewer-1").unwrap();
        let reopen = DecisionRequest::new(Decision::Pending, "reviewer-2")
            .unwrap()
            .with_notes("Needs a second look");
        manager.decide_overall(&doc("doc-1"), &approve).unwrap();
        let result = manager.decide_overall(&doc("doc-1"), &reopen).unwrap();
        assert_eq!(result.decision, Decision::Pending);
        assert_eq!(result.decision_notes.as_deref(), Some("Needs a second look"));
        assert_eq!(result.revision, 2);
    }

    #[test]
    fn stale_revision_conflicts() {
        let (_, manager) = setup();
        let first = DecisionRequest::new(Decision::Approved, "a").unwrap();
        manager.decide_overall(&doc("doc-1"), &first).unwrap();
        let stale = DecisionRequest::new(Decision::Rejected, "b")
            .unwrap()
            .expecting_revision(0);
        let error = manager.decide_overall(&doc("doc-1"), &stale).unwrap_err();
        assert!(error.is_conflict());
        let state = manager.current(&doc("doc-1"), Category::Overall).unwrap();
        assert_eq!(state.decision, Decision::Approved);
    }

    #[test]
    fn batch_applies_to_all_targets() {
        let (store, manager) = setup();
        let request = DecisionRequest::new(Decision::Approved, "reviewer-1").unwrap();
        let report = manager.batch_decide([doc("doc-1"), doc("doc-2")], &[], &request);
        assert!(report.committed);
        assert_eq!(report.applied().count(), 2);
        for id in ["doc-1", "doc-2"] {
            assert_eq!(
                store.get_by_document(&doc(id)).unwrap().decision,
                Decision::Approved
            );
        }
    }

    #[test]
    fn batch_with_missing_target_applies_nothing() {
        let (store, manager) = setup();
        let request = DecisionRequest::new(Decision::Approved, "reviewer-1").unwrap();
        // doc-2 has no project-assets result.
        let report = manager.batch_decide(
            [doc("doc-1"), doc("doc-2")],
            &[Category::Overall, Category::ProjectAssets],
            &request,
        );
        assert!(!report.committed);
        let missing: Vec<String> = report.failed().map(ToString::to_string).collect();
        assert_eq!(missing, vec!["doc-2/project_assets".to_string()]);
        assert!(
            report
                .entries
                .iter()
                .filter(|entry| entry.target.document_id.as_str() == "doc-1")
                .all(|entry| entry.outcome == BatchOutcome::NotApplied)
        );
        for result in store.results() {
            assert_eq!(result.decision, Decision::Pending);
        }
    }
}
