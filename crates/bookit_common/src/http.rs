// --- File: crates/bookit_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::error::{BookitError, HttpStatusCode};

// Include the client module
pub mod client;

/// Message returned for every 5xx; the detail only goes to the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Extension trait for BookitError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for BookitError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let error_message = if self.is_client_error() {
            self.to_string()
        } else {
            error!("Request failed with {}: {}", status_code, self);
            INTERNAL_ERROR_MESSAGE.to_string()
        };

        (status_code, Json(json!({ "error": error_message }))).into_response()
    }
}

/// Implement IntoResponse for BookitError to make it easier to use in Axum handlers.
impl IntoResponse for BookitError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}
