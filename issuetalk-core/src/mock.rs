//! In-memory platform for testing consumers.
//!
//! [`MockApi`] implements the full [`PlatformApi`] contract against
//! in-memory state, so widget and integration code can be exercised without
//! a forge. Seed it with issues and comments, then inspect what was called:
//!
//! ```rust
//! use issuetalk_core::MockApi;
//!
//! let api = MockApi::new()
//!     .with_issue("my-page", "https://example.com/my-page")
//!     .with_comment(1, "first!");
//! ```

use async_trait::async_trait;
use chrono::Utc;
use issuetalk_oauth::{OAuthConfig, OAuthContext, TokenResponse};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::api::{IssueSelector, PlatformApi};
use crate::errors::{ApiError, ApiResult};
use crate::types::{
    Comment, CommentPage, CommentQuery, Issue, Platform, PlatformMeta, Reaction, ReactionSummary,
    SortOrder, User,
};

#[derive(Default)]
struct MockState {
    issues: Vec<Issue>,
    comments: HashMap<u64, Vec<Comment>>,
    reactions: HashMap<u64, ReactionSummary>,
    own_reactions: HashMap<(u64, Reaction), bool>,
    calls: Vec<String>,
    next_issue: u64,
    next_comment: u64,
}

/// An in-memory [`PlatformApi`] implementation.
#[derive(Clone, Default)]
pub struct MockApi {
    user: Option<User>,
    state: Arc<Mutex<MockState>>,
}

impl MockApi {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the user returned by `current_user`.
    #[must_use]
    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    /// Seed an issue; its number is assigned sequentially from 1.
    #[must_use]
    pub fn with_issue(self, title: impl Into<String>, content: impl Into<String>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.next_issue += 1;
            let id = state.next_issue;
            state.issues.push(Issue {
                id,
                title: title.into(),
                content: content.into(),
                link: format!("mock://issues/{}", id),
            });
        }
        self
    }

    /// Seed a comment on an issue.
    #[must_use]
    pub fn with_comment(self, issue: u64, content_raw: impl Into<String>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.next_comment += 1;
            let id = state.next_comment;
            let content_raw = content_raw.into();
            let now = Utc::now();
            let comment = Comment {
                id,
                content: render(&content_raw),
                content_raw,
                author: User::new("mock-user"),
                created_at: now,
                updated_at: now,
                reactions: None,
            };
            state.comments.entry(issue).or_default().push(comment);
        }
        self
    }

    /// Operations invoked so far, in order.
    pub fn recorded_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, call: &str) {
        self.state.lock().unwrap().calls.push(call.to_string());
    }

    fn author(&self) -> User {
        self.user.clone().unwrap_or_else(|| User::new("mock-user"))
    }
}

fn render(markdown: &str) -> String {
    format!("<p>{}</p>", markdown)
}

#[async_trait]
impl PlatformApi for MockApi {
    fn platform(&self) -> Platform {
        Platform {
            name: "Mock".to_string(),
            link: "mock://".to_string(),
            version: "v0".to_string(),
            meta: PlatformMeta {
                reactable: true,
                sortable: true,
            },
        }
    }

    fn oauth_config(&self) -> OAuthConfig {
        OAuthConfig::new(
            "mock-client-id",
            "http://localhost/authorize",
            "http://localhost/token",
        )
    }

    async fn exchange_code(
        &self,
        _context: &OAuthContext,
        code: &str,
    ) -> ApiResult<TokenResponse> {
        self.record("exchange_code");
        Ok(TokenResponse {
            access_token: format!("mock-token-for-{}", code),
            refresh_token: None,
            token_type: Some("bearer".to_string()),
            expires_in: None,
            scope: None,
        })
    }

    async fn current_user(&self, _token: &str) -> ApiResult<User> {
        self.record("current_user");
        Ok(self.author())
    }

    async fn issue(
        &self,
        _token: Option<&str>,
        selector: &IssueSelector,
    ) -> ApiResult<Option<Issue>> {
        self.record("issue");
        let state = self.state.lock().unwrap();
        let found = match selector {
            IssueSelector::Number(number) => state.issues.iter().find(|i| i.id == *number),
            IssueSelector::Title(title) => state.issues.iter().find(|i| &i.title == title),
        };
        Ok(found.cloned())
    }

    async fn create_issue(&self, _token: &str, title: &str, content: &str) -> ApiResult<Issue> {
        self.record("create_issue");
        let mut state = self.state.lock().unwrap();
        state.next_issue += 1;
        let id = state.next_issue;
        let issue = Issue {
            id,
            title: title.to_string(),
            content: content.to_string(),
            link: format!("mock://issues/{}", id),
        };
        state.issues.push(issue.clone());
        Ok(issue)
    }

    async fn comments(
        &self,
        _token: Option<&str>,
        issue: u64,
        query: &CommentQuery,
    ) -> ApiResult<CommentPage> {
        self.record("comments");
        let state = self.state.lock().unwrap();
        let mut all: Vec<Comment> = state.comments.get(&issue).cloned().unwrap_or_default();
        for comment in &mut all {
            comment.reactions = Some(
                state
                    .reactions
                    .get(&comment.id)
                    .copied()
                    .unwrap_or_default(),
            );
        }
        match query.sort {
            SortOrder::Asc => all.sort_by_key(|c| c.created_at),
            SortOrder::Desc => all.sort_by_key(|c| std::cmp::Reverse(c.created_at)),
        }
        let count = all.len();
        let (start, end) = query.slice_bounds(count);
        Ok(CommentPage {
            count,
            page: query.page,
            per_page: query.per_page,
            data: all[start..end].to_vec(),
        })
    }

    async fn create_comment(&self, _token: &str, issue: u64, content: &str) -> ApiResult<Comment> {
        self.record("create_comment");
        let mut state = self.state.lock().unwrap();
        state.next_comment += 1;
        let id = state.next_comment;
        let now = Utc::now();
        let comment = Comment {
            id,
            content: render(content),
            content_raw: content.to_string(),
            author: self.author(),
            created_at: now,
            updated_at: now,
            reactions: None,
        };
        state.comments.entry(issue).or_default().push(comment.clone());
        Ok(comment)
    }

    async fn edit_comment(
        &self,
        _token: &str,
        issue: u64,
        comment: u64,
        content: &str,
    ) -> ApiResult<Comment> {
        self.record("edit_comment");
        let mut state = self.state.lock().unwrap();
        let existing = state
            .comments
            .get_mut(&issue)
            .and_then(|list| list.iter_mut().find(|c| c.id == comment))
            .ok_or_else(|| ApiError::not_found(format!("comment {}", comment)))?;
        existing.content_raw = content.to_string();
        existing.content = render(content);
        existing.updated_at = Utc::now();
        Ok(existing.clone())
    }

    async fn delete_comment(&self, _token: &str, issue: u64, comment: u64) -> ApiResult<bool> {
        self.record("delete_comment");
        let mut state = self.state.lock().unwrap();
        let list = state
            .comments
            .get_mut(&issue)
            .ok_or_else(|| ApiError::not_found(format!("issue {}", issue)))?;
        let before = list.len();
        list.retain(|c| c.id != comment);
        if list.len() == before {
            return Err(ApiError::not_found(format!("comment {}", comment)));
        }
        Ok(true)
    }

    async fn comment_reactions(
        &self,
        _token: Option<&str>,
        _issue: u64,
        comment: u64,
    ) -> ApiResult<ReactionSummary> {
        self.record("comment_reactions");
        let state = self.state.lock().unwrap();
        Ok(state.reactions.get(&comment).copied().unwrap_or_default())
    }

    async fn toggle_reaction(
        &self,
        _token: &str,
        _issue: u64,
        comment: u64,
        reaction: Reaction,
    ) -> ApiResult<bool> {
        self.record("toggle_reaction");
        let mut state = self.state.lock().unwrap();
        let own = state.own_reactions.entry((comment, reaction)).or_default();
        let adding = !*own;
        *own = adding;
        let summary = state.reactions.entry(comment).or_default();
        let slot = match reaction {
            Reaction::Like => &mut summary.like,
            Reaction::Unlike => &mut summary.unlike,
            Reaction::Heart => &mut summary.heart,
        };
        if adding {
            *slot += 1;
        } else {
            *slot = slot.saturating_sub(1);
        }
        Ok(true)
    }

    async fn render_markdown(&self, _token: Option<&str>, text: &str) -> ApiResult<String> {
        self.record("render_markdown");
        Ok(render(text))
    }
}
