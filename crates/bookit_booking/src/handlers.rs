use crate::error::BookingError;
use crate::models::{
    AdminReservation, BookedSlot, CreateBookingRequest, DateQuery, MessageResponse,
    UpdateBookingRequest,
};
use crate::service::BookingService;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use bookit_common::models::ReservationId;
use bookit_common::BookitError;
use bookit_db::ReservationRepository;
use std::sync::Arc;
use tracing::debug;

type HandlerResult<T> = Result<T, BookitError>;

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, BookingError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        debug!("Rejected request body: {}", rejection);
        BookingError::invalid_input()
    })
}

fn date_query(query: Result<Query<DateQuery>, QueryRejection>) -> Result<DateQuery, BookingError> {
    query.map(|Query(q)| q).map_err(|_| BookingError::invalid_input())
}

fn booking_id(raw: &str) -> Result<ReservationId, BookingError> {
    raw.parse::<ReservationId>()
        .map_err(|_| BookingError::Invalid("invalid booking id".to_string()))
}

/// `POST /booking`
pub async fn create_booking_handler<R: ReservationRepository + 'static>(
    State(service): State<Arc<BookingService<R>>>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> HandlerResult<(StatusCode, Json<MessageResponse>)> {
    let request = json_body(payload)?;
    service.create(request).await?;
    Ok((StatusCode::CREATED, Json(MessageResponse::new("booking created"))))
}

/// `GET /bookings?date=YYYY-MM-DD`
pub async fn list_booked_slots_handler<R: ReservationRepository + 'static>(
    State(service): State<Arc<BookingService<R>>>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> HandlerResult<Json<Vec<BookedSlot>>> {
    let query = date_query(query)?;
    let slots = service.list_public(query.date.as_deref()).await?;
    Ok(Json(slots))
}

/// `GET /admin/bookings[?date=YYYY-MM-DD]`
pub async fn list_reservations_handler<R: ReservationRepository + 'static>(
    State(service): State<Arc<BookingService<R>>>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> HandlerResult<Json<Vec<AdminReservation>>> {
    let query = date_query(query)?;
    let reservations = service.list_admin(query.date.as_deref()).await?;
    Ok(Json(reservations))
}

/// `PATCH /admin/booking/{id}`
pub async fn update_booking_handler<R: ReservationRepository + 'static>(
    State(service): State<Arc<BookingService<R>>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateBookingRequest>, JsonRejection>,
) -> HandlerResult<Json<MessageResponse>> {
    let id = booking_id(&id)?;
    let request = json_body(payload)?;
    service.update(id, request).await?;
    Ok(Json(MessageResponse::new("booking updated")))
}

/// `DELETE /admin/booking/{id}`
pub async fn delete_booking_handler<R: ReservationRepository + 'static>(
    State(service): State<Arc<BookingService<R>>>,
    Path(id): Path<String>,
) -> HandlerResult<Json<MessageResponse>> {
    let id = booking_id(&id)?;
    service.delete(id).await?;
    Ok(Json(MessageResponse::new("booking deleted")))
}
