// --- File: crates/bookit_common/src/error.rs ---
use thiserror::Error;

/// The base error type for all Bookit errors.
///
/// Each crate keeps its own narrower error enum and implements
/// `From<SpecificError> for BookitError`, so handlers only ever return this type.
#[derive(Error, Debug)]
pub enum BookitError {
    /// Malformed input that could not be parsed (dates, clock times, JSON)
    #[error("{0}")]
    ParseError(String),

    /// Well-formed input that breaks a business rule
    #[error("{0}")]
    ValidationError(String),

    /// The requested interval collides with an existing reservation
    #[error("{0}")]
    ConflictError(String),

    /// Unknown identity on update/delete
    #[error("{0}")]
    NotFoundError(String),

    /// Missing, malformed or rejected credential
    #[error("{0}")]
    AuthError(String),

    /// An outbound call ran out of time
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// Error occurred during database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for BookitError {
    fn status_code(&self) -> u16 {
        match self {
            BookitError::ParseError(_) => 400,
            BookitError::ValidationError(_) => 400,
            BookitError::ConflictError(_) => 409,
            BookitError::NotFoundError(_) => 404,
            BookitError::AuthError(_) => 401,
            // Only the identity-provider round-trip is bounded; running out of
            // time there is an authentication failure.
            BookitError::TimeoutError(_) => 401,
            BookitError::DatabaseError(_) => 500,
            BookitError::ExternalServiceError { .. } => 502,
            BookitError::ConfigError(_) => 500,
            BookitError::InternalError(_) => 500,
        }
    }
}

impl BookitError {
    /// Whether the message may be shown to the caller as is.
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
