//! OAuth PKCE flow execution.

use reqwest::Client;
use std::time::Duration;

use crate::server::{CallbackError, CallbackServer};
use crate::{OAuthConfig, OAuthContext, TokenResponse};

/// Errors that can occur during an OAuth flow.
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("Failed to start callback server: {0}")]
    ServerStart(#[from] std::io::Error),
    #[error("Callback error: {0}")]
    Callback(#[from] CallbackError),
    #[error("State mismatch: expected {expected}, got {actual}")]
    StateMismatch { expected: String, actual: String },
    #[error("Token exchange failed: {0}")]
    TokenExchange(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Run the complete OAuth PKCE flow.
///
/// This function:
/// 1. Creates a PKCE context (state, verifier, challenge)
/// 2. Starts a local callback server
/// 3. Returns the authorization URL for the user to open
/// 4. Waits for the callback with the authorization code
/// 5. Exchanges the code for tokens
///
/// **Important**: tokens are returned, never stored. Persistence is the
/// caller's responsibility.
///
/// Returns a tuple of (authorization_url, handle that resolves to tokens).
pub async fn run_pkce_flow(config: &OAuthConfig) -> Result<(String, OAuthFlowHandle), OAuthError> {
    let context = OAuthContext::new();
    let server = CallbackServer::start(config)?;

    let redirect_uri = config.redirect_uri(server.port());
    let context = context.with_redirect_uri(redirect_uri);

    let auth_url = build_authorization_url(config, &context);
    tracing::debug!(port = server.port(), "OAuth callback server listening");

    let handle = OAuthFlowHandle {
        server,
        context,
        config: config.clone(),
    };

    Ok((auth_url, handle))
}

/// Handle to a running OAuth flow.
pub struct OAuthFlowHandle {
    server: CallbackServer,
    context: OAuthContext,
    config: OAuthConfig,
}

impl OAuthFlowHandle {
    /// Get the port the callback server is listening on.
    pub fn port(&self) -> u16 {
        self.server.port()
    }

    /// Get the redirect URI.
    pub fn redirect_uri(&self) -> &str {
        self.context.redirect_uri.as_deref().unwrap_or("")
    }

    /// Get the flow context (state, PKCE parameters).
    pub fn context(&self) -> &OAuthContext {
        &self.context
    }

    /// Wait for the callback and exchange the code for tokens.
    pub async fn wait_for_tokens(self) -> Result<TokenResponse, OAuthError> {
        let timeout = Duration::from_secs(self.config.callback_timeout_secs);
        let result = self.server.wait_for_callback(timeout).await?;

        // Verify state
        if result.state != self.context.state {
            return Err(OAuthError::StateMismatch {
                expected: self.context.state,
                actual: result.state,
            });
        }

        exchange_code(&self.config, &self.context, &result.code).await
    }
}

/// Build the authorization URL with PKCE parameters.
pub fn build_authorization_url(config: &OAuthConfig, context: &OAuthContext) -> String {
    let redirect_uri = context.redirect_uri.as_deref().unwrap_or("");

    let mut params = vec![
        ("response_type", "code".to_string()),
        ("client_id", config.client_id.clone()),
        ("redirect_uri", redirect_uri.to_string()),
        ("code_challenge", context.pkce.code_challenge.clone()),
        (
            "code_challenge_method",
            context.pkce.code_challenge_method.to_string(),
        ),
        ("state", context.state.clone()),
    ];

    if !config.scopes.is_empty() {
        params.push(("scope", config.scopes.clone()));
    }

    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", config.auth_url, query)
}

/// Exchange an authorization code for tokens.
pub async fn exchange_code(
    config: &OAuthConfig,
    context: &OAuthContext,
    code: &str,
) -> Result<TokenResponse, OAuthError> {
    let redirect_uri = context.redirect_uri.as_deref().unwrap_or("");
    let client = Client::new();

    let params = [
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", redirect_uri),
        ("client_id", &config.client_id),
        ("code_verifier", &context.pkce.code_verifier),
    ];

    tracing::debug!(token_url = %config.token_url, "exchanging authorization code");
    let response = client
        .post(&config.token_url)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .header("Accept", "application/json")
        .form(&params)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(OAuthError::TokenExchange(format!(
            "HTTP {}: {}",
            status, body
        )));
    }

    let tokens: TokenResponse = response.json().await?;
    Ok(tokens)
}
