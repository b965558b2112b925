//! Gitea API v1 wire types.
//!
//! Request and response shapes for the handful of endpoints the adapter
//! touches. Response types stay lenient (`#[serde(default)]`) where Gitea
//! versions differ.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Response Types
// ============================================================================

/// A Gitea user.
#[derive(Debug, Clone, Deserialize)]
pub struct GiteaUser {
    /// Numeric user id.
    pub id: i64,
    /// Login name.
    pub login: String,
    /// Display name; often empty.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A Gitea issue.
#[derive(Debug, Clone, Deserialize)]
pub struct GiteaIssue {
    /// Global issue id (distinct from the per-repo number).
    pub id: i64,
    /// Per-repo issue number.
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// Issue body; may be absent on bare issues.
    #[serde(default)]
    pub body: Option<String>,
    /// URL of the issue on the forge.
    pub html_url: String,
    /// Issue author.
    pub user: GiteaUser,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Labels attached to the issue.
    #[serde(default)]
    pub labels: Vec<GiteaLabel>,
}

/// An issue comment.
#[derive(Debug, Clone, Deserialize)]
pub struct GiteaComment {
    pub id: u64,
    /// Source markdown body.
    #[serde(default)]
    pub body: String,
    /// Comment author.
    pub user: GiteaUser,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One reaction on a comment.
#[derive(Debug, Clone, Deserialize)]
pub struct GiteaReaction {
    /// Who reacted.
    pub user: GiteaUser,
    /// Reaction content (`+1`, `-1`, `heart`, `laugh`, ...).
    pub content: String,
}

/// A repository label.
#[derive(Debug, Clone, Deserialize)]
pub struct GiteaLabel {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub color: String,
}

/// Error body Gitea attaches to non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct GiteaErrorBody {
    pub message: String,
    #[serde(default)]
    pub url: Option<String>,
}

// ============================================================================
// Request Types
// ============================================================================

/// Body of `POST /repos/{owner}/{repo}/issues`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateIssueOption {
    pub title: String,
    pub body: String,
    /// Label ids to attach; Gitea rejects names here.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<u64>,
}

/// Body of `POST /repos/{owner}/{repo}/labels`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateLabelOption {
    pub name: String,
    pub color: String,
}

/// Body of comment create/edit requests.
#[derive(Debug, Clone, Serialize)]
pub struct CommentBody {
    pub body: String,
}

/// Body of reaction add/remove requests.
#[derive(Debug, Clone, Serialize)]
pub struct ReactionOption {
    pub content: String,
}

/// Body of `POST /markdown`.
#[derive(Debug, Clone, Serialize)]
pub struct MarkdownOption {
    pub text: String,
    /// Render mode; `gfm` matches how Gitea renders issue comments.
    pub mode: String,
    /// Repository context for relative links and issue references.
    pub context: String,
    pub wiki: bool,
}
