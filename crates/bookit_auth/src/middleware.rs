//! Bearer-token middleware for admin routes

use crate::error::AuthError;
use crate::models::UserContext;
use crate::verifier::{IdentityVerifier, RemoteIdentityProvider};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use bookit_common::BookitError;
use bookit_config::AppConfig;
use std::sync::Arc;
use tracing::{debug, warn};

/// Shared by the auth middleware and the login handler.
#[derive(Clone)]
pub struct AuthState {
    /// `None` when no provider is configured; every protected request is then refused
    pub verifier: Option<Arc<dyn IdentityVerifier>>,
    pub admin_email: Option<String>,
}

impl AuthState {
    pub fn new(verifier: Arc<dyn IdentityVerifier>, admin_email: Option<String>) -> Self {
        Self {
            verifier: Some(verifier),
            admin_email,
        }
    }

    pub fn disabled() -> Self {
        Self {
            verifier: None,
            admin_email: None,
        }
    }

    /// Build from the `auth` section, or a disabled state if it is absent
    pub fn from_config(config: &AppConfig) -> Result<Self, AuthError> {
        match config.auth.as_ref() {
            Some(auth) => {
                let provider = RemoteIdentityProvider::new(auth)?;
                Ok(Self::new(Arc::new(provider), auth.admin_email.clone()))
            }
            None => {
                warn!("No auth configuration found; admin routes will reject every request");
                Ok(Self::disabled())
            }
        }
    }

    pub fn verifier(&self) -> Result<&Arc<dyn IdentityVerifier>, AuthError> {
        self.verifier.as_ref().ok_or(AuthError::NotConfigured)
    }

    async fn authenticate(&self, header: Option<&str>) -> Result<UserContext, AuthError> {
        let header = header.ok_or(AuthError::MissingHeader)?;
        let token = bearer_token(header)?;
        let identity = self.verifier()?.verify(token).await?;
        Ok(UserContext::from_identity(identity, self.admin_email.as_deref()))
    }
}

fn bearer_token(header: &str) -> Result<&str, AuthError> {
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidFormat)?
        .trim();
    if token.is_empty() {
        return Err(AuthError::InvalidFormat);
    }
    Ok(token)
}

/// Axum middleware guarding admin routes.
///
/// On success the caller's [`UserContext`] is inserted into the request
/// extensions. Any failure, including a slow or unreachable provider, ends
/// the request with 401.
pub async fn require_auth(
    State(state): State<Arc<AuthState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let header = match req.headers().get(AUTHORIZATION) {
        Some(value) => match value.to_str() {
            Ok(value) => Some(value.to_string()),
            Err(_) => return BookitError::from(AuthError::InvalidFormat).into_response(),
        },
        None => None,
    };

    match state.authenticate(header.as_deref()).await {
        Ok(user) => {
            debug!("Authenticated {} ({:?})", user.email, user.role);
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(err) => {
            warn!("Rejected admin request: {}", err);
            BookitError::from(err).into_response()
        }
    }
}
