use bookit_common::BookitError;
use thiserror::Error;

/// Errors raised while authenticating a request
///
/// Every variant except `Client` is the caller's problem and surfaces as 401.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing authorization header")]
    MissingHeader,

    #[error("invalid authorization format")]
    InvalidFormat,

    /// The provider answered but did not accept the token
    #[error("invalid token")]
    InvalidToken,

    /// The provider could not be reached
    #[error("identity provider unavailable: {0}")]
    Unreachable(String),

    #[error("identity provider timed out")]
    Timeout,

    /// 2xx from the provider with a body we could not read
    #[error("unexpected identity provider response: {0}")]
    MalformedResponse(String),

    /// Admin routes are mounted but no provider is configured
    #[error("authentication is not configured")]
    NotConfigured,

    /// Password grant refused; carries the provider's body verbatim
    #[error("login rejected")]
    LoginRejected(serde_json::Value),

    #[error("login failed: {0}")]
    LoginFailed(String),

    /// The outbound HTTP client could not be built
    #[error("identity client error: {0}")]
    Client(String),
}

impl AuthError {
    pub(crate) fn on_request(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AuthError::Timeout
        } else {
            AuthError::Unreachable(err.to_string())
        }
    }

    pub(crate) fn on_body(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AuthError::Timeout
        } else {
            AuthError::MalformedResponse(err.to_string())
        }
    }
}

impl From<AuthError> for BookitError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingHeader | AuthError::InvalidFormat | AuthError::InvalidToken => {
                BookitError::AuthError(err.to_string())
            }
            // Detail stays in the logs; callers only learn that auth failed.
            AuthError::Unreachable(_) | AuthError::MalformedResponse(_) => {
                BookitError::AuthError("authentication failed".to_string())
            }
            AuthError::Timeout => BookitError::TimeoutError("authentication timed out".to_string()),
            AuthError::NotConfigured => BookitError::AuthError(err.to_string()),
            AuthError::LoginRejected(_) | AuthError::LoginFailed(_) => {
                BookitError::AuthError("login failed".to_string())
            }
            AuthError::Client(msg) => BookitError::InternalError(msg),
        }
    }
}
