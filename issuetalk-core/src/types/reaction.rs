//! Comment reactions.

use serde::{Deserialize, Serialize};

/// A reaction a commenter can leave on a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reaction {
    /// Thumbs up.
    Like,
    /// Thumbs down.
    Unlike,
    /// Heart.
    Heart,
}

impl Reaction {
    /// The content value used on the wire (`+1`, `-1`, `heart`).
    pub fn wire_name(&self) -> &'static str {
        match self {
            Reaction::Like => "+1",
            Reaction::Unlike => "-1",
            Reaction::Heart => "heart",
        }
    }

    /// Parse a wire content value; unknown contents map to `None`.
    pub fn from_wire(content: &str) -> Option<Self> {
        match content {
            "+1" => Some(Reaction::Like),
            "-1" => Some(Reaction::Unlike),
            "heart" => Some(Reaction::Heart),
            _ => None,
        }
    }
}

/// Reaction tallies for one comment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionSummary {
    pub like: u64,
    pub unlike: u64,
    pub heart: u64,
}

impl ReactionSummary {
    /// Total number of reactions.
    pub fn total(&self) -> u64 {
        self.like + self.unlike + self.heart
    }

    /// Whether no reactions have been left.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Tally for one reaction kind.
    pub fn count(&self, reaction: Reaction) -> u64 {
        match reaction {
            Reaction::Like => self.like,
            Reaction::Unlike => self.unlike,
            Reaction::Heart => self.heart,
        }
    }
}
