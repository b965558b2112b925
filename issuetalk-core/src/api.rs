//! The platform contract implemented by every forge adapter.

use async_trait::async_trait;
use issuetalk_oauth::{OAuthConfig, OAuthContext, TokenResponse};
use std::sync::Arc;

use crate::errors::ApiResult;
use crate::types::{
    Comment, CommentPage, CommentQuery, Issue, Platform, Reaction, ReactionSummary, User,
};

/// How to locate the issue backing a comment thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueSelector {
    /// By issue number.
    Number(u64),
    /// By exact issue title (usually the page identifier).
    Title(String),
}

impl IssueSelector {
    /// Select by issue number.
    pub fn number(number: u64) -> Self {
        Self::Number(number)
    }

    /// Select by exact title.
    pub fn title(title: impl Into<String>) -> Self {
        Self::Title(title.into())
    }
}

/// The uniform contract over a forge's issue tracker.
///
/// An adapter maps one forge's REST API onto these operations so a consumer
/// can treat comment threads uniformly: sign in with OAuth, find or create
/// the issue backing a page, then list, post, edit, delete, and react to
/// comments on it.
///
/// Reads take `Option<&str>` tokens (anonymous reads are allowed on public
/// repositories); writes require a token.
#[async_trait]
pub trait PlatformApi: Send + Sync {
    /// Static description of the forge behind this adapter.
    fn platform(&self) -> Platform;

    /// OAuth endpoints and client configuration for this forge.
    fn oauth_config(&self) -> OAuthConfig;

    /// Build the authorization URL to send the user to.
    fn authorize_url(&self, context: &OAuthContext) -> String {
        issuetalk_oauth::build_authorization_url(&self.oauth_config(), context)
    }

    /// Exchange an authorization code for tokens.
    async fn exchange_code(&self, context: &OAuthContext, code: &str) -> ApiResult<TokenResponse> {
        Ok(issuetalk_oauth::exchange_code(&self.oauth_config(), context, code).await?)
    }

    /// Fetch the authenticated user.
    async fn current_user(&self, token: &str) -> ApiResult<User>;

    /// Fetch the issue backing a thread, by number or exact title.
    ///
    /// Returns `Ok(None)` when no such issue exists.
    async fn issue(&self, token: Option<&str>, selector: &IssueSelector)
        -> ApiResult<Option<Issue>>;

    /// Create the issue backing a new thread.
    async fn create_issue(&self, token: &str, title: &str, content: &str) -> ApiResult<Issue>;

    /// Fetch one page of comments on an issue, enriched with rendered HTML
    /// and reaction tallies.
    async fn comments(
        &self,
        token: Option<&str>,
        issue: u64,
        query: &CommentQuery,
    ) -> ApiResult<CommentPage>;

    /// Post a new comment.
    async fn create_comment(&self, token: &str, issue: u64, content: &str) -> ApiResult<Comment>;

    /// Edit an existing comment.
    async fn edit_comment(
        &self,
        token: &str,
        issue: u64,
        comment: u64,
        content: &str,
    ) -> ApiResult<Comment>;

    /// Delete a comment. Returns `true` when the forge confirmed deletion.
    async fn delete_comment(&self, token: &str, issue: u64, comment: u64) -> ApiResult<bool>;

    /// Fetch the reaction tallies for one comment.
    async fn comment_reactions(
        &self,
        token: Option<&str>,
        issue: u64,
        comment: u64,
    ) -> ApiResult<ReactionSummary>;

    /// Add the user's reaction to a comment, or remove it when already
    /// present. Returns `true` when the forge accepted the change.
    async fn toggle_reaction(
        &self,
        token: &str,
        issue: u64,
        comment: u64,
        reaction: Reaction,
    ) -> ApiResult<bool>;

    /// Render markdown the way the forge renders issue comments.
    async fn render_markdown(&self, token: Option<&str>, text: &str) -> ApiResult<String>;
}

/// Boxed adapter for dynamic dispatch.
pub type BoxedApi = Arc<dyn PlatformApi>;
