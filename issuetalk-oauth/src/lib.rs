//! OAuth2 Authorization Code + PKCE utilities for issuetalk.
//!
//! This crate provides the reusable pieces of a PKCE-based sign-in flow:
//!
//! - [`PkceChallenge`]: code verifier and S256 challenge generation
//! - [`OAuthConfig`]: configuration for one authorization server
//! - [`OAuthContext`]: runtime state for an in-progress flow (state, verifier, challenge)
//! - [`TokenResponse`]: tokens returned from the token endpoint
//! - [`build_authorization_url`] / [`exchange_code`]: the two halves of the
//!   Authorization Code exchange
//! - [`run_pkce_flow`]: the complete flow with a local callback server
//!
//! Note: this crate does NOT handle token storage or refresh - that's the
//! application's responsibility.

pub mod config;
mod context;
mod flow;
pub mod pkce;
mod server;

pub use config::OAuthConfig;
pub use context::OAuthContext;
pub use flow::{build_authorization_url, exchange_code, run_pkce_flow, OAuthError, OAuthFlowHandle};
pub use pkce::{generate_code_verifier, PkceChallenge};
pub use server::{CallbackError, CallbackResult, CallbackServer};

/// Token response from the OAuth token endpoint.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
}
