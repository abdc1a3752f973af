use bookit_common::models::ReservationId;
use bookit_common::BookitError;
use bookit_db::DbError;
use chrono::NaiveTime;
use thiserror::Error;

/// Input field a parse failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    Start,
    End,
}

impl Field {
    /// Name of the field as it appears in request bodies
    pub fn name(&self) -> &'static str {
        match self {
            Field::Date => "date",
            Field::Start => "start_time",
            Field::End => "end_time",
        }
    }
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("invalid {} format", .field.name())]
    Parse { field: Field },

    #[error("end_time must be after start_time")]
    Order,

    #[error(
        "bookings are only available {} - {}",
        .open.format("%H:%M"),
        .close.format("%H:%M")
    )]
    Hours { open: NaiveTime, close: NaiveTime },

    #[error("time slot already booked")]
    Conflict,

    #[error("booking {0} not found")]
    NotFound(ReservationId),

    /// Request shape problems: empty name, missing field, bad id
    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Storage(#[from] DbError),
}

impl BookingError {
    pub fn invalid_input() -> Self {
        BookingError::Invalid("invalid input".to_string())
    }
}

impl From<BookingError> for BookitError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Parse { .. } => BookitError::ParseError(err.to_string()),
            BookingError::Order | BookingError::Hours { .. } | BookingError::Invalid(_) => {
                BookitError::ValidationError(err.to_string())
            }
            BookingError::Conflict => BookitError::ConflictError(err.to_string()),
            BookingError::NotFound(_) => BookitError::NotFoundError("booking not found".to_string()),
            BookingError::Storage(db) => db.into(),
        }
    }
}
