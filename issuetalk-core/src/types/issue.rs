//! Comment-thread issue.

use serde::{Deserialize, Serialize};

/// The issue backing one comment thread.
///
/// `id` is the issue *number* as shown on the forge, which is what every
/// other operation of the contract keys on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number.
    pub id: u64,
    /// Issue title (usually the page identifier).
    pub title: String,
    /// Issue body (usually a link back to the page).
    pub content: String,
    /// URL of the issue on the forge.
    pub link: String,
}
