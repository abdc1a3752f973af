//! Identity-provider client
//!
//! Talks to a Supabase-compatible auth API:
//! `GET /auth/v1/user` to resolve a bearer token and
//! `POST /auth/v1/token?grant_type=password` to sign in.

use crate::error::AuthError;
use crate::models::{LoginRequest, VerifiedIdentity};
use bookit_common::create_client;
use bookit_common::services::BoxFuture;
use bookit_config::AuthConfig;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

const API_KEY_HEADER: &str = "apikey";

/// Something that can turn a bearer token into an identity.
///
/// Object safe so the router can hold an `Arc<dyn IdentityVerifier>` and tests
/// can swap in a stub.
pub trait IdentityVerifier: Send + Sync {
    /// Resolve `token` to the account it was issued for
    fn verify<'a>(&'a self, token: &'a str) -> BoxFuture<'a, VerifiedIdentity, AuthError>;

    /// Exchange email and password for a session, returning the provider's
    /// response body unchanged
    fn sign_in<'a>(
        &'a self,
        credentials: &'a LoginRequest,
    ) -> BoxFuture<'a, serde_json::Value, AuthError>;
}

/// [`IdentityVerifier`] backed by the remote identity provider.
#[derive(Debug, Clone)]
pub struct RemoteIdentityProvider {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl RemoteIdentityProvider {
    /// Build a provider client. Every call is bounded by `config.timeout_secs`.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        let client = create_client(Duration::from_secs(config.timeout_secs), false)
            .map_err(|e| AuthError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.provider_url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        })
    }

    async fn fetch_user(&self, token: &str) -> Result<VerifiedIdentity, AuthError> {
        let url = format!("{}/auth/v1/user", self.base_url);
        debug!("Verifying bearer token against {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .header(API_KEY_HEADER, &self.anon_key)
            .send()
            .await
            .map_err(AuthError::on_request)?;

        let status = response.status();
        if !status.is_success() {
            warn!("Identity provider rejected token with status {}", status);
            return Err(AuthError::InvalidToken);
        }

        response
            .json::<VerifiedIdentity>()
            .await
            .map_err(AuthError::on_body)
    }

    async fn password_grant(&self, credentials: &LoginRequest) -> Result<serde_json::Value, AuthError> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        debug!("Forwarding password login for {}", credentials.email);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.anon_key)
            .json(credentials)
            .send()
            .await
            .map_err(|e| AuthError::LoginFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .json::<serde_json::Value>()
            .await
            .unwrap_or(serde_json::Value::Null);

        if status.is_success() {
            Ok(body)
        } else {
            warn!("Identity provider refused login with status {}", status);
            Err(AuthError::LoginRejected(body))
        }
    }
}

impl IdentityVerifier for RemoteIdentityProvider {
    fn verify<'a>(&'a self, token: &'a str) -> BoxFuture<'a, VerifiedIdentity, AuthError> {
        Box::pin(self.fetch_user(token))
    }

    fn sign_in<'a>(
        &'a self,
        credentials: &'a LoginRequest,
    ) -> BoxFuture<'a, serde_json::Value, AuthError> {
        Box::pin(self.password_grant(credentials))
    }
}
