//! Error types for platform adapters.

use std::time::Duration;

use issuetalk_oauth::OAuthError;
use thiserror::Error;

/// Errors surfaced by platform adapters.
///
/// HTTP errors from the forge pass through with their status and body;
/// there is no retry policy in the library.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP error from the forge.
    #[error("HTTP error: {status} - {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// API-level error with a message the forge produced.
    #[error("API error: {message}")]
    Api {
        /// Error message.
        message: String,
        /// Error code, when the forge supplies one.
        code: Option<String>,
    },

    /// Rate limited by the forge.
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested retry delay, from the `Retry-After` header.
        retry_after: Option<Duration>,
    },

    /// Authentication failed or the token lacks permission.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The forge answered with something the adapter could not decode.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request timeout.
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Adapter misconfiguration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// OAuth flow error.
    #[error("OAuth error: {0}")]
    OAuth(#[from] OAuthError),

    /// Other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// Check whether this error is worth retrying by the caller.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Timeout(_) => true,
            ApiError::RateLimited { .. } => true,
            ApiError::Connection(_) => true,
            ApiError::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Get the retry-after duration if applicable.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            ApiError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }

    /// Create an HTTP error.
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// Create an API error.
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
            code: None,
        }
    }

    /// Create a rate limited error.
    pub fn rate_limited(retry_after: Option<Duration>) -> Self {
        Self::RateLimited { retry_after }
    }

    /// Create an authentication error.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(Duration::from_secs(30))
        } else if err.is_connect() {
            ApiError::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Http {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            ApiError::Other(err.into())
        }
    }
}

/// Result type for platform operations.
pub type ApiResult<T> = Result<T, ApiError>;
