//! Gitea adapter for issuetalk.
//!
//! [`GiteaApi`] implements the [`issuetalk_core::PlatformApi`] contract
//! against a Gitea instance's v1 REST API, storing a page's comment thread
//! as an issue in a configured repository.
//!
//! ```rust,no_run
//! use issuetalk_gitea::GiteaApi;
//!
//! let api = GiteaApi::new("owner", "site-comments", "oauth-client-id")
//!     .with_base_url("https://git.example.com")
//!     .with_labels(["comments"]);
//! ```
//!
//! Gitea quirks the adapter papers over:
//!
//! - comment listings are neither paged nor sorted server-side, so paging
//!   and ordering happen client-side;
//! - reactions and rendered HTML are separate endpoints, fetched
//!   concurrently for each comment in a page;
//! - posting an already-present reaction answers `200 OK`, which the
//!   adapter turns into a toggle;
//! - issue creation wants label ids, so configured label names are
//!   resolved (and created) first.

mod adapter;
pub mod normalize;
pub mod types;

pub use adapter::{GiteaApi, DEFAULT_BASE_URL};
