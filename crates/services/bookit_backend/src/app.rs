//! Router assembly.

use crate::app_state::AppState;
use axum::{middleware::from_fn_with_state, routing::get, Json, Router};
use bookit_auth::handlers::dashboard_handler;
use bookit_auth::require_auth;
use bookit_booking::models::MessageResponse;
use bookit_booking::routes::{admin_routes, public_routes};
use bookit_config::CorsConfig;
use http::{header, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse::new("API Running"))
}

pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(config.max_age_secs))
}

/// Build the full application router.
///
/// Public: `/`, `/booking`, `/bookings`, `/auth/login`.
/// Everything under `/admin` goes through the bearer-token middleware.
pub fn build_router(state: &AppState) -> Router {
    let admin = Router::new()
        .route("/dashboard", get(dashboard_handler))
        .merge(admin_routes(state.bookings.clone()))
        .layer(from_fn_with_state(state.auth.clone(), require_auth));

    #[allow(unused_mut)] // only mutated with the openapi feature
    let mut app = Router::new()
        .route("/", get(root_handler))
        .merge(public_routes(state.bookings.clone()))
        .merge(bookit_auth::routes::routes(state.auth.clone()))
        .nest("/admin", admin);

    #[cfg(feature = "openapi")]
    {
        use bookit_auth::doc::AuthApiDoc;
        use bookit_booking::doc::BookingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Bookit API",
                version = "0.1.0",
                description = "Appointment booking service"
            ),
            tags((name = "Bookit", description = "Core service endpoints"))
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(BookingApiDoc::openapi());
        openapi_doc.merge(AuthApiDoc::openapi());
        tracing::info!("Adding Swagger UI at /docs");

        app = app.merge(SwaggerUi::new("/docs").url("/docs/openapi.json", openapi_doc));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors))
}
