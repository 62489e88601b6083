//! Append-only comment threads on validation results.
//!
//! Comments are never edited or deleted. Listing is ordered by creation
//! time, ties keeping append order.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use chrono::Utc;
use tracing::{debug, info};

use conform_model::{
    ActorId, Comment, CommentId, CommentTarget, ConformError, EntityKind, Result,
    ValidationError, ValidationId,
};

use crate::lock;
use crate::store::ValidationStore;

/// Hands out increasing comment ids. Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct CommentIdAllocator {
    last: Arc<AtomicU64>,
}

impl CommentIdAllocator {
    pub fn next(&self) -> CommentId {
        CommentId::new(self.last.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Ensure future ids are greater than `seen`.
    pub fn observe(&self, seen: CommentId) {
        self.last.fetch_max(seen.value(), Ordering::Relaxed);
    }
}

/// Check author and content. Content is kept exactly as written.
pub(crate) fn validate_comment(author: &str, content: &str) -> Result<(ActorId, String)> {
    let author = ActorId::new(author).map_err(|_| ValidationError::MissingActor)?;
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyComment.into());
    }
    Ok((author, content.to_string()))
}

pub(crate) fn sort_by_creation(comments: &mut [Comment]) {
    comments.sort_by_key(|comment| comment.created_at);
}

/// Comment threads keyed by validation result.
#[derive(Debug, Clone)]
pub struct CommentThread {
    threads: Arc<RwLock<HashMap<ValidationId, Vec<Comment>>>>,
    store: ValidationStore,
    ids: CommentIdAllocator,
}

impl CommentThread {
    pub fn new(store: ValidationStore, ids: CommentIdAllocator) -> Self {
        Self {
            threads: Arc::default(),
            store,
            ids,
        }
    }

    /// Append a comment to an existing validation result.
    pub fn append(
        &self,
        validation_id: &ValidationId,
        author: &str,
        content: &str,
    ) -> Result<Comment> {
        let (author_id, content) = validate_comment(author, content)?;
        if !self.store.contains(validation_id) {
            return Err(ConformError::not_found(
                EntityKind::ValidationResult,
                validation_id,
            ));
        }
        // Id and timestamp are taken under the lock so thread order matches id order.
        let mut threads = lock::write(&self.threads);
        let comment = Comment {
            id: self.ids.next(),
            target: CommentTarget::Validation(validation_id.clone()),
            author_id,
            content,
            created_at: Utc::now(),
        };
        threads
            .entry(validation_id.clone())
            .or_default()
            .push(comment.clone());
        drop(threads);
        info!(
            validation_id = %validation_id,
            comment_id = %comment.id,
            author = %comment.author_id,
            "comment appended"
        );
        Ok(comment)
    }

    /// Restore a previously recorded comment, e.g. from a snapshot.
    pub fn restore(&self, comment: Comment) -> Result<()> {
        let CommentTarget::Validation(validation_id) = &comment.target else {
            return Err(ValidationError::MisroutedComment(comment.id.to_string()).into());
        };
        if !self.store.contains(validation_id) {
            return Err(ConformError::not_found(
                EntityKind::ValidationResult,
                validation_id,
            ));
        }
        self.ids.observe(comment.id);
        let mut threads = lock::write(&self.threads);
        let thread = threads.entry(validation_id.clone()).or_default();
        thread.push(comment);
        sort_by_creation(thread);
        Ok(())
    }

    /// Comments on a validation result, oldest first.
    pub fn list(&self, validation_id: &ValidationId) -> Vec<Comment> {
        let comments = lock::read(&self.threads)
            .get(validation_id)
            .cloned()
            .unwrap_or_default();
        debug!(validation_id = %validation_id, count = comments.len(), "comments listed");
        comments
    }

    /// Every stored comment in id order.
    pub fn all(&self) -> Vec<Comment> {
        let threads = lock::read(&self.threads);
        let mut comments: Vec<Comment> = threads.values().flatten().cloned().collect();
        comments.sort_by_key(|comment| comment.id);
        comments
    }
}
