//! Repository for reservations
//!
//! Storage for the shared booking calendar. The write operations that can
//! collide with another booking (`insert_if_free`, `update_if_free`) perform
//! the overlap check and the write as one atomic step, so two concurrent
//! requests can never both land in the same slot.

use crate::error::DbError;
use bookit_common::models::{Interval, NewReservation, Reservation, ReservationId};
use chrono::{DateTime, Utc};
use std::future::Future;

/// Repository for reservations
pub trait ReservationRepository: Send + Sync {
    /// Create the reservations table and its index if they don't already exist
    fn init_schema(&self) -> impl Future<Output = Result<(), DbError>> + Send;

    /// Store a new reservation unless its interval overlaps an existing one
    ///
    /// # Returns
    ///
    /// The stored reservation with its assigned id, or `None` if the slot
    /// was taken by the time the write happened.
    fn insert_if_free(
        &self,
        reservation: NewReservation,
    ) -> impl Future<Output = Result<Option<Reservation>, DbError>> + Send;

    fn find_by_id(
        &self,
        id: ReservationId,
    ) -> impl Future<Output = Result<Option<Reservation>, DbError>> + Send;

    /// Reservations whose start lies in `[from, to)`, ordered by start time
    ///
    /// Either bound may be omitted.
    fn find_in_range(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> impl Future<Output = Result<Vec<Reservation>, DbError>> + Send;

    /// Whether any stored reservation overlaps `candidate`
    ///
    /// `exclude` leaves one reservation out of the comparison, which is how
    /// a reservation being rescheduled avoids conflicting with itself.
    fn has_conflict(
        &self,
        candidate: Interval,
        exclude: Option<ReservationId>,
    ) -> impl Future<Output = Result<bool, DbError>> + Send;

    /// Overwrite name, phone and interval of `reservation.id` unless the new
    /// interval overlaps another reservation
    ///
    /// # Returns
    ///
    /// `false` if nothing was written, either because the id is gone or
    /// because the slot is taken.
    fn update_if_free(
        &self,
        reservation: Reservation,
    ) -> impl Future<Output = Result<bool, DbError>> + Send;

    /// Overwrite only name and phone. Returns `false` if the id is unknown.
    fn update_details(
        &self,
        id: ReservationId,
        name: String,
        phone: String,
    ) -> impl Future<Output = Result<bool, DbError>> + Send;

    /// Remove a reservation. Returns `false` if the id is unknown.
    fn delete(&self, id: ReservationId) -> impl Future<Output = Result<bool, DbError>> + Send;
}
