//! Interactive sign-in: the authorization redirect and callback exchange.

use std::time::Duration;

use issuetalk_core::{ApiResult, PlatformApi};
use issuetalk_oauth::{CallbackServer, OAuthContext, OAuthError, TokenResponse};

/// Start an interactive login against `api`'s forge.
///
/// Starts a loopback callback server, builds the authorization URL (with a
/// fresh state and PKCE challenge), and returns the URL together with a
/// handle. Send the user to the URL, then call [`LoginHandle::wait`] to
/// receive the tokens.
///
/// ```rust,no_run
/// # async fn example() -> issuetalk_core::ApiResult<()> {
/// use issuetalk_gitea::GiteaApi;
/// use issuetalk::interactive_login;
///
/// let api = GiteaApi::new("owner", "site-comments", "client-id");
/// let (url, handle) = interactive_login(&api).await?;
/// println!("open {url} to sign in");
/// let tokens = handle.wait().await?;
/// # Ok(())
/// # }
/// ```
pub async fn interactive_login(api: &dyn PlatformApi) -> ApiResult<(String, LoginHandle<'_>)> {
    let config = api.oauth_config();
    let server = CallbackServer::start(&config).map_err(OAuthError::from)?;

    let context = OAuthContext::new().with_redirect_uri(config.redirect_uri(server.port()));
    let url = api.authorize_url(&context);
    tracing::debug!(port = server.port(), "login callback server listening");

    let handle = LoginHandle {
        api,
        server,
        context,
        timeout: Duration::from_secs(config.callback_timeout_secs),
    };
    Ok((url, handle))
}

/// Handle to an in-progress login.
pub struct LoginHandle<'a> {
    api: &'a dyn PlatformApi,
    server: CallbackServer,
    context: OAuthContext,
    timeout: Duration,
}

impl LoginHandle<'_> {
    /// Port the callback server is listening on.
    pub fn port(&self) -> u16 {
        self.server.port()
    }

    /// The flow context (state, PKCE parameters, redirect URI).
    pub fn context(&self) -> &OAuthContext {
        &self.context
    }

    /// Wait for the redirect, verify the state, and exchange the code.
    pub async fn wait(self) -> ApiResult<TokenResponse> {
        let result = self
            .server
            .wait_for_callback(self.timeout)
            .await
            .map_err(OAuthError::from)?;

        if result.state != self.context.state {
            return Err(OAuthError::StateMismatch {
                expected: self.context.state,
                actual: result.state,
            }
            .into());
        }

        self.api.exchange_code(&self.context, &result.code).await
    }
}
