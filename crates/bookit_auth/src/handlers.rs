use crate::error::AuthError;
use crate::middleware::AuthState;
use crate::models::{DashboardResponse, LoginRequest, UserContext};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use bookit_common::{BookitError, IntoHttpResponse};
use std::sync::Arc;
use tracing::{info, warn};

/// Forward a password login to the identity provider.
///
/// The provider's JSON body is passed through for both success and refusal.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session issued by the identity provider"),
        (status = 400, description = "Malformed credentials"),
        (status = 401, description = "Login refused")
    ),
    tag = "Auth"
))]
pub async fn login_handler(
    State(state): State<Arc<AuthState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let credentials = match payload {
        Ok(Json(credentials)) if credentials.is_well_formed() => credentials,
        _ => return BookitError::ValidationError("invalid input".to_string()).into_http_response(),
    };

    let verifier = match state.verifier() {
        Ok(verifier) => verifier,
        Err(err) => return BookitError::from(err).into_http_response(),
    };

    match verifier.sign_in(&credentials).await {
        Ok(session) => {
            info!("Login succeeded for {}", credentials.email);
            (StatusCode::OK, Json(session)).into_response()
        }
        Err(AuthError::LoginRejected(body)) => (StatusCode::UNAUTHORIZED, Json(body)).into_response(),
        Err(err) => {
            warn!("Login failed for {}: {}", credentials.email, err);
            BookitError::from(err).into_http_response()
        }
    }
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/admin/dashboard",
    responses(
        (status = 200, description = "Greeting for the signed-in admin", body = DashboardResponse),
        (status = 401, description = "Missing or rejected bearer token")
    ),
    security(("bearer" = [])),
    tag = "Auth"
))]
pub async fn dashboard_handler(Extension(user): Extension<UserContext>) -> Json<DashboardResponse> {
    Json(DashboardResponse {
        message: "Welcome to dashboard!".to_string(),
        email: user.email,
    })
}
