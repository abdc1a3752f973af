#![allow(dead_code)]
#![cfg(feature = "openapi")]

use crate::models::{DashboardResponse, LoginRequest, Role, UserContext};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::login_handler,
        crate::handlers::dashboard_handler
    ),
    components(
        schemas(LoginRequest, DashboardResponse, UserContext, Role)
    ),
    tags(
        (name = "Auth", description = "Identity-provider login and admin session")
    )
)]
pub struct AuthApiDoc;
