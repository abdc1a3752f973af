//! Authentication for Bookit admin routes
//!
//! Bearer tokens are verified by an external identity provider; Bookit never
//! sees passwords except to forward them on `POST /auth/login`.

pub mod doc;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod verifier;
#[cfg(test)]
mod verifier_test;

pub use error::AuthError;
pub use middleware::{require_auth, AuthState};
pub use models::{Role, UserContext, VerifiedIdentity};
pub use verifier::{IdentityVerifier, RemoteIdentityProvider};
