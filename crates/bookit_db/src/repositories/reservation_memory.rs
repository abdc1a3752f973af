//! In-memory implementation of the reservation repository
//!
//! A single lock guards the whole calendar, which makes the check-then-write
//! in `insert_if_free` and `update_if_free` atomic.

use crate::error::DbError;
use crate::repositories::reservation::ReservationRepository;
use bookit_common::models::{Interval, NewReservation, Reservation, ReservationId};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Calendar {
    next_id: ReservationId,
    entries: BTreeMap<ReservationId, Reservation>,
}

impl Calendar {
    fn overlaps(&self, candidate: &Interval, exclude: Option<ReservationId>) -> bool {
        self.entries
            .values()
            .filter(|r| Some(r.id) != exclude)
            .any(|r| r.interval().overlaps(candidate))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryReservationRepository {
    calendar: Arc<RwLock<Calendar>>,
}

impl MemoryReservationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReservationRepository for MemoryReservationRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn insert_if_free(
        &self,
        reservation: NewReservation,
    ) -> Result<Option<Reservation>, DbError> {
        let mut calendar = self.calendar.write().await;
        if calendar.overlaps(&reservation.interval, None) {
            return Ok(None);
        }

        calendar.next_id += 1;
        let stored = Reservation {
            id: calendar.next_id,
            name: reservation.name,
            phone: reservation.phone,
            start_time: reservation.interval.start,
            end_time: reservation.interval.end,
            created_at: reservation.created_at,
        };
        calendar.entries.insert(stored.id, stored.clone());
        Ok(Some(stored))
    }

    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>, DbError> {
        Ok(self.calendar.read().await.entries.get(&id).cloned())
    }

    async fn find_in_range(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Reservation>, DbError> {
        let calendar = self.calendar.read().await;
        let mut found: Vec<Reservation> = calendar
            .entries
            .values()
            .filter(|r| from.is_none_or(|from| r.start_time >= from))
            .filter(|r| to.is_none_or(|to| r.start_time < to))
            .cloned()
            .collect();
        found.sort_by_key(|r| (r.start_time, r.id));
        Ok(found)
    }

    async fn has_conflict(
        &self,
        candidate: Interval,
        exclude: Option<ReservationId>,
    ) -> Result<bool, DbError> {
        Ok(self.calendar.read().await.overlaps(&candidate, exclude))
    }

    async fn update_if_free(&self, reservation: Reservation) -> Result<bool, DbError> {
        let mut calendar = self.calendar.write().await;
        if !calendar.entries.contains_key(&reservation.id)
            || calendar.overlaps(&reservation.interval(), Some(reservation.id))
        {
            return Ok(false);
        }

        if let Some(existing) = calendar.entries.get_mut(&reservation.id) {
            existing.name = reservation.name;
            existing.phone = reservation.phone;
            existing.start_time = reservation.start_time;
            existing.end_time = reservation.end_time;
        }
        Ok(true)
    }

    async fn update_details(
        &self,
        id: ReservationId,
        name: String,
        phone: String,
    ) -> Result<bool, DbError> {
        let mut calendar = self.calendar.write().await;
        match calendar.entries.get_mut(&id) {
            Some(existing) => {
                existing.name = name;
                existing.phone = phone;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ReservationId) -> Result<bool, DbError> {
        Ok(self.calendar.write().await.entries.remove(&id).is_some())
    }
}
