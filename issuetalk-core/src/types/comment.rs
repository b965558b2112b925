//! Normalized comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ReactionSummary, User};

/// One comment on a thread, normalized across forges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment id on the forge.
    pub id: u64,
    /// Rendered HTML body.
    pub content: String,
    /// Source markdown body.
    pub content_raw: String,
    /// Comment author.
    pub author: User,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last edit time.
    pub updated_at: DateTime<Utc>,
    /// Reaction tallies, when the forge supports reactions and they were
    /// fetched alongside the comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reactions: Option<ReactionSummary>,
}
