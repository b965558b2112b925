//! Core types, errors, and the platform contract for issuetalk.
//!
//! This crate defines the forge-agnostic pieces every adapter shares:
//!
//! - [`types`]: the canonical comment-thread shapes ([`User`], [`Issue`],
//!   [`Comment`], [`ReactionSummary`], [`CommentQuery`], [`CommentPage`],
//!   [`Platform`])
//! - [`PlatformApi`]: the uniform contract an adapter implements over one
//!   forge's issue tracker
//! - [`ApiError`]: the error hierarchy adapters surface
//! - [`MockApi`]: an in-memory implementation for consumer tests
//!
//! Adapters live in sibling crates (e.g. `issuetalk-gitea`); consumers
//! should depend on the `issuetalk` facade.

mod api;
mod errors;
mod mock;
pub mod types;

pub use api::{BoxedApi, IssueSelector, PlatformApi};
pub use errors::{ApiError, ApiResult};
pub use mock::MockApi;
pub use types::{
    Comment, CommentPage, CommentQuery, Issue, Platform, PlatformMeta, Reaction, ReactionSummary,
    SortOrder, User,
};
