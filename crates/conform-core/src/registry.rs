//! Discrepancy (material item) registry.
//!
//! Reviewers overwrite item status directly; no derivation rule or
//! transition restriction applies. Each report keeps a generation counter
//! that every status or comment mutation bumps, and cached summaries are
//! only served while their generation is current.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, RwLock};

use chrono::Utc;
use tracing::{debug, info, warn};

use conform_model::{
    Comment, CommentTarget, ConfidenceSummary, ConformError, DiscrepancyReport, EntityKind,
    ItemId, MaterialItem, ReportId, Result, ValidationError, ValidationStatus,
};
use conform_validate::summarize;

use crate::batch::BatchReport;
use crate::comments::{CommentIdAllocator, sort_by_creation, validate_comment};
use crate::lock;

#[derive(Debug, Default)]
struct RegistryState {
    reports: Vec<DiscrepancyReport>,
    report_index: HashMap<ReportId, usize>,
    items: Vec<MaterialItem>,
    item_index: HashMap<ItemId, usize>,
    generations: HashMap<ReportId, u64>,
}

impl RegistryState {
    fn locate(&self, id: &ItemId) -> Result<usize> {
        self.item_index
            .get(id)
            .copied()
            .ok_or_else(|| ConformError::not_found(EntityKind::MaterialItem, id))
    }

    fn ensure_report(&self, id: &ReportId) -> Result<()> {
        if self.report_index.contains_key(id) {
            Ok(())
        } else {
            Err(ConformError::not_found(EntityKind::Report, id))
        }
    }

    fn touch(&mut self, report_id: &ReportId) {
        *self.generations.entry(report_id.clone()).or_default() += 1;
    }

    fn generation(&self, report_id: &ReportId) -> u64 {
        self.generations.get(report_id).copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy)]
struct CachedSummary {
    generation: u64,
    summary: ConfidenceSummary,
}

/// Thread-safe registry of discrepancy reports and material items.
#[derive(Debug, Clone, Default)]
pub struct MaterialRegistry {
    state: Arc<RwLock<RegistryState>>,
    summaries: Arc<Mutex<HashMap<ReportId, CachedSummary>>>,
    ids: CommentIdAllocator,
}

impl MaterialRegistry {
    pub fn new(ids: CommentIdAllocator) -> Self {
        Self {
            ids,
            ..Self::default()
        }
    }

    pub fn register_report(&self, report: DiscrepancyReport) -> Result<()> {
        let mut state = lock::write(&self.state);
        if state.report_index.contains_key(&report.id) {
            return Err(ConformError::Duplicate {
                kind: EntityKind::Report,
                id: report.id.to_string(),
            });
        }
        debug!(report_id = %report.id, "report registered");
        let index = state.reports.len();
        state.report_index.insert(report.id.clone(), index);
        state.reports.push(report);
        Ok(())
    }

    /// Ingest a material item into its (already registered) report.
    pub fn ingest_item(&self, mut item: MaterialItem) -> Result<()> {
        let mut state = lock::write(&self.state);
        if !state.report_index.contains_key(&item.report_id) {
            return Err(ValidationError::UnknownReport(item.report_id.to_string()).into());
        }
        if state.item_index.contains_key(&item.id) {
            return Err(ConformError::Duplicate {
                kind: EntityKind::MaterialItem,
                id: item.id.to_string(),
            });
        }
        for comment in &item.comments {
            if comment.target != CommentTarget::Item(item.id.clone()) {
                return Err(ValidationError::MisroutedComment(comment.id.to_string()).into());
            }
            self.ids.observe(comment.id);
        }
        sort_by_creation(&mut item.comments);
        debug!(item_id = %item.id, report_id = %item.report_id, "material item ingested");
        let report_id = item.report_id.clone();
        let index = state.items.len();
        state.item_index.insert(item.id.clone(), index);
        state.items.push(item);
        state.touch(&report_id);
        Ok(())
    }

    pub fn report(&self, id: &ReportId) -> Result<DiscrepancyReport> {
        let state = lock::read(&self.state);
        state
            .report_index
            .get(id)
            .map(|&index| state.reports[index].clone())
            .ok_or_else(|| ConformError::not_found(EntityKind::Report, id))
    }

    pub fn reports(&self) -> Vec<DiscrepancyReport> {
        lock::read(&self.state).reports.clone()
    }

    pub fn item(&self, id: &ItemId) -> Result<MaterialItem> {
        let state = lock::read(&self.state);
        let index = state.locate(id)?;
        Ok(state.items[index].clone())
    }

    /// Items of a report in ingestion order.
    pub fn list_by_report(&self, report_id: &ReportId) -> Result<Vec<MaterialItem>> {
        let state = lock::read(&self.state);
        state.ensure_report(report_id)?;
        Ok(state
            .items
            .iter()
            .filter(|item| &item.report_id == report_id)
            .cloned()
            .collect())
    }

    pub fn items(&self) -> Vec<MaterialItem> {
        lock::read(&self.state).items.clone()
    }

    /// Overwrite an item's status.
    pub fn set_status(&self, id: &ItemId, status: ValidationStatus) -> Result<MaterialItem> {
        self.write_status(id, status, None)
    }

    /// Overwrite an item's status only if it is still at `expected` revision.
    pub fn set_status_at_revision(
        &self,
        id: &ItemId,
        status: ValidationStatus,
        expected: u64,
    ) -> Result<MaterialItem> {
        self.write_status(id, status, Some(expected))
    }

    fn write_status(
        &self,
        id: &ItemId,
        status: ValidationStatus,
        expected: Option<u64>,
    ) -> Result<MaterialItem> {
        let mut state = lock::write(&self.state);
        let index = state.locate(id)?;
        let item = &mut state.items[index];
        if let Some(expected) = expected
            && expected != item.revision
        {
            warn!(item_id = %id, expected, actual = item.revision, "status rejected: stale revision");
            return Err(ConformError::Conflict {
                kind: EntityKind::MaterialItem,
                id: id.to_string(),
                expected,
                actual: item.revision,
            });
        }
        let previous = item.status;
        item.status = status;
        item.updated_at = Some(Utc::now());
        item.revision += 1;
        let updated = item.clone();
        state.touch(&updated.report_id);
        info!(item_id = %id, from = %previous, to = %status, "material status changed");
        Ok(updated)
    }

    /// Set one status on every listed item, or on none when any is unknown.
    pub fn batch_set_status<I>(&self, ids: I, status: ValidationStatus) -> BatchReport<ItemId>
    where
        I: IntoIterator<Item = ItemId>,
    {
        let ids: BTreeSet<ItemId> = ids.into_iter().collect();
        let mut state = lock::write(&self.state);
        let resolved: Vec<(ItemId, Option<usize>)> = ids
            .into_iter()
            .map(|id| {
                let index = state.item_index.get(&id).copied();
                (id, index)
            })
            .collect();

        if resolved.iter().any(|(_, index)| index.is_none()) {
            warn!(
                targets = resolved.len(),
                status = %status,
                "batch status change rolled back"
            );
            return BatchReport::rolled_back(
                resolved
                    .into_iter()
                    .map(|(id, index)| (id, index.is_some()))
                    .collect(),
            );
        }

        let now = Utc::now();
        let mut applied = Vec::with_capacity(resolved.len());
        let mut touched = BTreeSet::new();
        for (id, index) in resolved {
            if let Some(index) = index {
                let item = &mut state.items[index];
                item.status = status;
                item.updated_at = Some(now);
                item.revision += 1;
                touched.insert(item.report_id.clone());
                applied.push(id);
            }
        }
        for report_id in &touched {
            state.touch(report_id);
        }
        info!(targets = applied.len(), status = %status, "batch status change committed");
        BatchReport::committed(applied)
    }

    /// Append a comment to an item. Blank content is rejected.
    pub fn append_comment(&self, id: &ItemId, author: &str, content: &str) -> Result<Comment> {
        let (author_id, content) = validate_comment(author, content)?;
        let mut state = lock::write(&self.state);
        let index = state.locate(id)?;
        let comment = Comment {
            id: self.ids.next(),
            target: CommentTarget::Item(id.clone()),
            author_id,
            content,
            created_at: Utc::now(),
        };
        let item = &mut state.items[index];
        item.comments.push(comment.clone());
        item.updated_at = Some(comment.created_at);
        item.revision += 1;
        let report_id = item.report_id.clone();
        state.touch(&report_id);
        info!(item_id = %id, comment_id = %comment.id, author = %comment.author_id, "item comment appended");
        Ok(comment)
    }

    /// Comments on an item, oldest first.
    pub fn comments(&self, id: &ItemId) -> Result<Vec<Comment>> {
        let state = lock::read(&self.state);
        let index = state.locate(id)?;
        Ok(state.items[index].comments.clone())
    }

    /// Status counts and mean confidence of a report's items.
    pub fn summary_for_report(&self, report_id: &ReportId) -> Result<ConfidenceSummary> {
        let state = lock::read(&self.state);
        state.ensure_report(report_id)?;
        let generation = state.generation(report_id);

        let mut cache = lock::lock(&self.summaries);
        if let Some(cached) = cache.get(report_id)
            && cached.generation == generation
        {
            debug!(report_id = %report_id, generation, "summary cache hit");
            return Ok(cached.summary);
        }
        let summary = summarize(
            state
                .items
                .iter()
                .filter(|item| &item.report_id == report_id),
        );
        cache.insert(
            report_id.clone(),
            CachedSummary {
                generation,
                summary,
            },
        );
        debug!(report_id = %report_id, generation, "summary recomputed");
        Ok(summary)
    }
}
