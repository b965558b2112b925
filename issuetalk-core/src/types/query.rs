//! Comment listing queries and pages.

use serde::{Deserialize, Serialize};

use super::Comment;

/// Ordering of a comment listing by creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Oldest first.
    Asc,
    /// Newest first.
    #[default]
    Desc,
}

/// Query parameters for one page of comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentQuery {
    /// 1-based page number.
    pub page: usize,
    /// Page size.
    pub per_page: usize,
    /// Ordering by creation time.
    pub sort: SortOrder,
}

impl Default for CommentQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
            sort: SortOrder::Desc,
        }
    }
}

impl CommentQuery {
    /// Create a query for a specific page.
    pub fn page(page: usize) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    /// Set the page size.
    #[must_use]
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page;
        self
    }

    /// Set the sort order.
    #[must_use]
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Bounds of this page's window into a listing of `total` items.
    ///
    /// Used by adapters whose forge cannot paginate server-side. Pages past
    /// the end come back empty rather than erroring.
    pub fn slice_bounds(&self, total: usize) -> (usize, usize) {
        let page = self.page.max(1);
        let start = (page - 1).saturating_mul(self.per_page).min(total);
        let end = start.saturating_add(self.per_page).min(total);
        (start, end)
    }
}

/// One page of comments plus listing metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPage {
    /// Total number of comments on the thread.
    pub count: usize,
    /// 1-based page number this page corresponds to.
    pub page: usize,
    /// Page size used.
    pub per_page: usize,
    /// The comments in this page window.
    pub data: Vec<Comment>,
}
