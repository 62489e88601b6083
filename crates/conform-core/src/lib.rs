//! Conformance review core.
//!
//! In-memory state for one review: the [`ValidationStore`] of documents and
//! validation results, reviewer decisions through the [`DecisionManager`],
//! discrepancy items in the [`MaterialRegistry`], comment threads, and the
//! filter/selection layer list views are built from. [`ReviewWorkspace`]
//! wires them together.
//!
//! Every handle is cheap to clone and shares state. Reads return owned
//! copies; writes to one store or registry are serialized, and batch
//! operations commit under a single write lock.

mod batch;
mod comments;
mod decision;
mod filter;
mod lock;
mod registry;
mod selection;
mod store;
mod views;
mod workspace;

#[cfg(test)]
mod test_support;

pub use batch::{BatchEntry, BatchOutcome, BatchReport};
pub use comments::{CommentIdAllocator, CommentThread};
pub use decision::{DecisionManager, DecisionRequest, DecisionState, DecisionTarget};
pub use filter::{FilterCriteria, Filterable, SortBy, StatusFilter, filter, sort_items};
pub use registry::MaterialRegistry;
pub use selection::Selection;
pub use store::ValidationStore;
pub use views::{
    CategorySummary, ReviewRow, UNVALIDATED, category_breakdown, review_rows, summarize_rows,
};
pub use workspace::{ReviewWorkspace, SNAPSHOT_SCHEMA_VERSION, WorkspaceSnapshot};
