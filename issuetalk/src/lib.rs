//! # issuetalk - page comments stored in a forge's issue tracker
//!
//! issuetalk lets an application keep per-page comment threads in a forge's
//! issue tracker, behind a uniform API. Each page maps to one issue (found
//! by title or number); comments, edits, deletions, and reactions go through
//! the forge's REST API with the commenter's own OAuth identity.
//!
//! ## Quick start
//!
//! ```ignore
//! use issuetalk::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let api = GiteaApi::new("owner", "site-comments", "oauth-client-id")
//!         .with_base_url("https://git.example.com");
//!
//!     // Sign the user in (Authorization Code + PKCE).
//!     let (url, handle) = interactive_login(&api).await?;
//!     println!("open {url} to sign in");
//!     let tokens = handle.wait().await?;
//!
//!     // Find the thread for a page and post a comment.
//!     let issue = api
//!         .issue(None, &IssueSelector::title("/posts/hello"))
//!         .await?
//!         .expect("thread exists");
//!     api.create_comment(&tokens.access_token, issue.id, "First!")
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! issuetalk is organized as a workspace of focused crates:
//!
//! - [`issuetalk_core`] - canonical types, errors, and the [`PlatformApi`]
//!   contract (plus [`MockApi`] for tests)
//! - [`issuetalk_oauth`] - OAuth2 Authorization Code + PKCE utilities
//! - [`issuetalk_gitea`] - the Gitea v1 adapter
//!
//! Adapters for other forges implement the same [`PlatformApi`] contract,
//! so consumers stay forge-agnostic.

mod login;

pub use login::{interactive_login, LoginHandle};

pub use issuetalk_core::{
    ApiError, ApiResult, BoxedApi, Comment, CommentPage, CommentQuery, Issue, IssueSelector,
    MockApi, Platform, PlatformApi, PlatformMeta, Reaction, ReactionSummary, SortOrder, User,
};
pub use issuetalk_gitea::GiteaApi;
pub use issuetalk_oauth as oauth;

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        interactive_login, ApiError, ApiResult, Comment, CommentPage, CommentQuery, GiteaApi,
        Issue, IssueSelector, PlatformApi, Reaction, SortOrder, User,
    };
}
