//! Canonical comment-thread types shared by every forge adapter.

mod comment;
mod issue;
mod platform;
mod query;
mod reaction;
mod user;

pub use comment::Comment;
pub use issue::Issue;
pub use platform::{Platform, PlatformMeta};
pub use query::{CommentPage, CommentQuery, SortOrder};
pub use reaction::{Reaction, ReactionSummary};
pub use user::User;
