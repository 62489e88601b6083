use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ActorId, CommentId, ItemId, ValidationId};

/// What a comment is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum CommentTarget {
    Validation(ValidationId),
    Item(ItemId),
}

/// Append-only reviewer annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub target: CommentTarget,
    pub author_id: ActorId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
