#![allow(dead_code)]
#![cfg(feature = "openapi")]

use crate::models::{
    AdminReservation, BookedSlot, CreateBookingRequest, MessageResponse, UpdateBookingRequest,
};
use utoipa::OpenApi;

#[utoipa::path(
    post,
    path = "/booking",
    request_body(content = CreateBookingRequest, example = json!({
        "name": "Budi",
        "phone": "081234567890",
        "date": "2025-06-10",
        "start_time": "09:00",
        "end_time": "10:00"
    })),
    responses(
        (status = 201, description = "Booking stored", body = MessageResponse,
         example = json!({"message": "booking created"})),
        (status = 400, description = "Invalid input, format, order or hours",
         example = json!({"error": "bookings are only available 09:00 - 17:00"})),
        (status = 409, description = "Slot already booked",
         example = json!({"error": "time slot already booked"}))
    ),
    tag = "Booking"
)]
fn doc_create_booking_handler() {}

#[utoipa::path(
    get,
    path = "/bookings",
    params(
        ("date" = String, Query, description = "Day in YYYY-MM-DD format", example = "2025-06-10", format = "date")
    ),
    responses(
        (status = 200, description = "Occupied slots, local HH:MM", body = [BookedSlot],
         example = json!([{"start_time": "09:00", "end_time": "10:00"}])),
        (status = 400, description = "Missing or invalid date")
    ),
    tag = "Booking"
)]
fn doc_list_booked_slots_handler() {}

#[utoipa::path(
    get,
    path = "/admin/bookings",
    params(
        ("date" = Option<String>, Query, description = "Day in YYYY-MM-DD format", example = "2025-06-10", format = "date")
    ),
    responses(
        (status = 200, description = "Reservations ordered by start", body = [AdminReservation]),
        (status = 400, description = "Invalid date"),
        (status = 401, description = "Missing or rejected bearer token")
    ),
    tag = "Admin"
)]
fn doc_list_reservations_handler() {}

#[utoipa::path(
    patch,
    path = "/admin/booking/{id}",
    params(
        ("id" = i64, Path, description = "Reservation id")
    ),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking updated", body = MessageResponse),
        (status = 400, description = "Invalid input, format, order or hours"),
        (status = 404, description = "Unknown booking"),
        (status = 409, description = "Slot already booked")
    ),
    tag = "Admin"
)]
fn doc_update_booking_handler() {}

#[utoipa::path(
    delete,
    path = "/admin/booking/{id}",
    params(
        ("id" = i64, Path, description = "Reservation id")
    ),
    responses(
        (status = 200, description = "Booking deleted", body = MessageResponse),
        (status = 404, description = "Unknown booking")
    ),
    tag = "Admin"
)]
fn doc_delete_booking_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_create_booking_handler,
        doc_list_booked_slots_handler,
        doc_list_reservations_handler,
        doc_update_booking_handler,
        doc_delete_booking_handler
    ),
    components(
        schemas(
            CreateBookingRequest,
            UpdateBookingRequest,
            BookedSlot,
            AdminReservation,
            MessageResponse
        )
    ),
    tags(
        (name = "Booking", description = "Public booking API"),
        (name = "Admin", description = "Reservation management")
    )
)]
pub struct BookingApiDoc;
