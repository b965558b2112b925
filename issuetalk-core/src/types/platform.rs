//! Adapter self-description.

use serde::{Deserialize, Serialize};

/// Static description of the forge behind an adapter, for consumers that
/// need to adjust their UI (hide the sort toggle, hide reactions, link to
/// the forge).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    /// Human-readable forge name, e.g. "Gitea".
    pub name: String,
    /// Base URL of the forge instance.
    pub link: String,
    /// API version the adapter speaks, e.g. "v1".
    pub version: String,
    /// Capability flags.
    pub meta: PlatformMeta,
}

/// Capability flags for a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformMeta {
    /// Whether comments can carry reactions.
    pub reactable: bool,
    /// Whether the forge can sort comment listings server-side.
    pub sortable: bool,
}
