use crate::handlers::login_handler;
use crate::middleware::AuthState;
use axum::{routing::post, Router};
use std::sync::Arc;

/// Public authentication routes (`/auth/login`).
pub fn routes(state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/auth/login", post(login_handler))
        .with_state(state)
}
