use crate::handlers::{
    create_booking_handler, delete_booking_handler, list_booked_slots_handler,
    list_reservations_handler, update_booking_handler,
};
use crate::service::BookingService;
use axum::{
    routing::{get, patch, post},
    Router,
};
use bookit_db::ReservationRepository;
use std::sync::Arc;

/// Unauthenticated booking routes: create a booking, see occupied slots.
pub fn public_routes<R: ReservationRepository + 'static>(service: Arc<BookingService<R>>) -> Router {
    Router::new()
        .route("/booking", post(create_booking_handler::<R>))
        .route("/bookings", get(list_booked_slots_handler::<R>))
        .with_state(service)
}

/// Admin booking routes. The caller mounts these under `/admin` behind the
/// auth middleware.
pub fn admin_routes<R: ReservationRepository + 'static>(service: Arc<BookingService<R>>) -> Router {
    Router::new()
        .route(
            "/booking/{id}",
            patch(update_booking_handler::<R>).delete(delete_booking_handler::<R>),
        )
        .route("/bookings", get(list_reservations_handler::<R>))
        .with_state(service)
}
