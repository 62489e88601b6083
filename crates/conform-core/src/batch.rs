//! Per-id reporting for batch operations.
//!
//! Batches are all-or-nothing: when any target fails, nothing is applied
//! and the report says why for each id.

use serde::Serialize;

/// Outcome for one target of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchOutcome {
    /// The change was written.
    Applied,
    /// The target does not exist; the batch was rolled back.
    NotFound,
    /// The target was valid but another target failed.
    NotApplied,
}

/// One target and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchEntry<K> {
    pub target: K,
    pub outcome: BatchOutcome,
}

/// Result of a batch operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport<K> {
    /// Whether every target received the change.
    pub committed: bool,
    pub entries: Vec<BatchEntry<K>>,
}

impl<K> BatchReport<K> {
    pub(crate) fn committed(targets: Vec<K>) -> Self {
        Self {
            committed: true,
            entries: targets
                .into_iter()
                .map(|target| BatchEntry {
                    target,
                    outcome: BatchOutcome::Applied,
                })
                .collect(),
        }
    }

    pub(crate) fn rolled_back(entries: Vec<(K, bool)>) -> Self {
        Self {
            committed: false,
            entries: entries
                .into_iter()
                .map(|(target, found)| BatchEntry {
                    target,
                    outcome: if found {
                        BatchOutcome::NotApplied
                    } else {
                        BatchOutcome::NotFound
                    },
                })
                .collect(),
        }
    }

    pub fn applied(&self) -> impl Iterator<Item = &K> {
        self.entries
            .iter()
            .filter(|entry| entry.outcome == BatchOutcome::Applied)
            .map(|entry| &entry.target)
    }

    pub fn failed(&self) -> impl Iterator<Item = &K> {
        self.entries
            .iter()
            .filter(|entry| entry.outcome == BatchOutcome::NotFound)
            .map(|entry| &entry.target)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
