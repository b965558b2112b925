//! Runtime state for an in-progress OAuth PKCE flow.

use std::fmt::Write;

use crate::pkce::PkceChallenge;

/// Context lifetime before a flow is considered stale.
const CONTEXT_LIFETIME_SECS: u64 = 300;

/// Runtime state for an in-progress OAuth PKCE flow.
#[derive(Debug, Clone)]
pub struct OAuthContext {
    /// Random state parameter for CSRF protection
    pub state: String,
    /// PKCE verifier and challenge for this flow
    pub pkce: PkceChallenge,
    /// When this context was created (Unix timestamp)
    pub created_at: u64,
    /// Assigned redirect URI (set after the callback server starts)
    pub redirect_uri: Option<String>,
}

impl OAuthContext {
    /// Create a new context with fresh state and PKCE parameters.
    pub fn new() -> Self {
        Self {
            state: random_hex(32),
            pkce: PkceChallenge::generate(),
            created_at: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
            redirect_uri: None,
        }
    }

    /// Set the redirect URI.
    #[must_use]
    pub fn with_redirect_uri(mut self, uri: String) -> Self {
        self.redirect_uri = Some(uri);
        self
    }

    /// Check whether this context has expired (5 minute lifetime).
    pub fn is_expired(&self) -> bool {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        now.saturating_sub(self.created_at) > CONTEXT_LIFETIME_SECS
    }
}

impl Default for OAuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a random hex string from `bytes` random octets.
fn random_hex(bytes: usize) -> String {
    let mut rng_bytes = vec![0u8; bytes];
    getrandom::getrandom(&mut rng_bytes).expect("Failed to generate random bytes");
    let mut s = String::with_capacity(bytes * 2);
    for b in rng_bytes {
        write!(s, "{:02x}", b).unwrap();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_is_fresh() {
        let ctx = OAuthContext::new();
        assert!(!ctx.is_expired());
        assert_eq!(ctx.state.len(), 64);
        assert!(ctx.redirect_uri.is_none());
    }

    #[test]
    fn test_context_expiry() {
        let mut ctx = OAuthContext::new();
        ctx.created_at -= CONTEXT_LIFETIME_SECS + 1;
        assert!(ctx.is_expired());
    }

    #[test]
    fn test_states_are_unique() {
        assert_ne!(OAuthContext::new().state, OAuthContext::new().state);
    }
}
