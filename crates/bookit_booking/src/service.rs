//! Booking lifecycle: create, list, update, delete.
//!
//! Every write runs the same pipeline: normalize the civil input, check the
//! business-hours window, check for overlaps, then hand the interval to a
//! guarded repository write that repeats the overlap test atomically. The
//! early check gives a precise 409 in the common case; the guarded write
//! closes the gap between two concurrent requests.

use crate::conflict::ConflictDetector;
use crate::error::BookingError;
use crate::hours::BusinessHours;
use crate::interval::{normalize, parse_date};
use crate::models::{AdminReservation, BookedSlot, CreateBookingRequest, UpdateBookingRequest};
use bookit_common::models::{Interval, NewReservation, Reservation, ReservationId};
use bookit_db::ReservationRepository;
use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct BookingService<R> {
    repository: Arc<R>,
    hours: BusinessHours,
    conflicts: ConflictDetector<R>,
}

impl<R> Clone for BookingService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            hours: self.hours,
            conflicts: self.conflicts.clone(),
        }
    }
}

impl<R: ReservationRepository> BookingService<R> {
    pub fn new(repository: Arc<R>, hours: BusinessHours) -> Self {
        Self {
            conflicts: ConflictDetector::new(Arc::clone(&repository)),
            repository,
            hours,
        }
    }

    pub fn zone(&self) -> Tz {
        self.hours.zone()
    }

    pub fn hours(&self) -> &BusinessHours {
        &self.hours
    }

    /// Normalize and validate a civil interval in the configured zone.
    pub fn interval_for(&self, date: &str, start: &str, end: &str) -> Result<Interval, BookingError> {
        let interval = normalize(date, start, end, &self.zone())?;
        self.hours.validate(&interval)?;
        Ok(interval)
    }

    pub async fn create(&self, request: CreateBookingRequest) -> Result<Reservation, BookingError> {
        debug!(
            "Create booking on {} {}-{}",
            request.date, request.start_time, request.end_time
        );

        let name = required(&request.name)?;
        let phone = required(&request.phone)?;

        let interval = self
            .interval_for(&request.date, &request.start_time, &request.end_time)
            .inspect_err(|e| warn!("Rejected booking request: {}", e))?;

        self.conflicts.ensure_free(interval, None).await.inspect_err(|e| {
            warn!("Rejected booking request: {}", e);
        })?;

        let stored = self
            .repository
            .insert_if_free(NewReservation::new(name, phone, interval))
            .await?
            .ok_or_else(|| {
                warn!("Slot {} - {} taken by a concurrent request", interval.start, interval.end);
                BookingError::Conflict
            })?;

        info!("Created booking {}", stored.id);
        Ok(stored)
    }

    /// Occupied slots on `date` (required), as local `HH:MM` pairs.
    pub async fn list_public(&self, date: Option<&str>) -> Result<Vec<BookedSlot>, BookingError> {
        let date = date
            .filter(|d| !d.is_empty())
            .ok_or_else(|| BookingError::Invalid("date is required".to_string()))?;
        let day = parse_date(date)?;

        let zone = self.zone();
        Ok(self
            .reservations_on(Some(day))
            .await?
            .iter()
            .map(|r| BookedSlot::from_reservation(r, &zone))
            .collect())
    }

    /// Full reservations on `date`, or every reservation when no date is given.
    pub async fn list_admin(&self, date: Option<&str>) -> Result<Vec<AdminReservation>, BookingError> {
        let day = match date.filter(|d| !d.is_empty()) {
            Some(date) => Some(parse_date(date)?),
            None => None,
        };

        let zone = self.zone();
        Ok(self
            .reservations_on(day)
            .await?
            .into_iter()
            .map(|r| AdminReservation::from_reservation(r, &zone))
            .collect())
    }

    /// Merge the supplied fields into reservation `id`.
    ///
    /// When only some of date/start/end are supplied, the rest are taken
    /// from the reservation's current local date and times before the
    /// interval is validated again.
    pub async fn update(
        &self,
        id: ReservationId,
        request: UpdateBookingRequest,
    ) -> Result<Reservation, BookingError> {
        debug!("Update booking {}", id);

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(BookingError::NotFound(id))?;

        let name = match request.name.as_deref() {
            Some(name) => required(name)?,
            None => current.name.clone(),
        };
        let phone = match request.phone.as_deref() {
            Some(phone) => required(phone)?,
            None => current.phone.clone(),
        };

        if !request.touches_interval() {
            if !self.repository.update_details(id, name.clone(), phone.clone()).await? {
                return Err(BookingError::NotFound(id));
            }
            info!("Updated details of booking {}", id);
            return Ok(Reservation { name, phone, ..current });
        }

        let zone = self.zone();
        let local_start = current.start_time.with_timezone(&zone);
        let local_end = current.end_time.with_timezone(&zone);
        let date = request
            .date
            .unwrap_or_else(|| local_start.format("%Y-%m-%d").to_string());
        let start = request
            .start_time
            .unwrap_or_else(|| local_start.format("%H:%M").to_string());
        let end = request
            .end_time
            .unwrap_or_else(|| local_end.format("%H:%M").to_string());

        let interval = self
            .interval_for(&date, &start, &end)
            .inspect_err(|e| warn!("Rejected update of booking {}: {}", id, e))?;
        self.conflicts.ensure_free(interval, Some(id)).await.inspect_err(|e| {
            warn!("Rejected update of booking {}: {}", id, e);
        })?;

        let updated = Reservation {
            name,
            phone,
            start_time: interval.start,
            end_time: interval.end,
            ..current
        };

        if !self.repository.update_if_free(updated.clone()).await? {
            // Either the row vanished or a concurrent write took the slot.
            return match self.repository.find_by_id(id).await? {
                None => Err(BookingError::NotFound(id)),
                Some(_) => {
                    warn!("Slot for booking {} taken by a concurrent request", id);
                    Err(BookingError::Conflict)
                }
            };
        }

        info!("Rescheduled booking {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: ReservationId) -> Result<(), BookingError> {
        if !self.repository.delete(id).await? {
            warn!("Delete of unknown booking {}", id);
            return Err(BookingError::NotFound(id));
        }
        info!("Deleted booking {}", id);
        Ok(())
    }

    async fn reservations_on(&self, day: Option<NaiveDate>) -> Result<Vec<Reservation>, BookingError> {
        let Some(day) = day else {
            return Ok(self.repository.find_in_range(None, None).await?);
        };

        // Query a UTC window wide enough to cover the local day in any zone,
        // then keep only what starts on that local day.
        let midnight = Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN));
        let from = midnight - Duration::days(1);
        let to = midnight + Duration::days(2);

        let zone = self.zone();
        Ok(self
            .repository
            .find_in_range(Some(from), Some(to))
            .await?
            .into_iter()
            .filter(|r| r.start_time.with_timezone(&zone).date_naive() == day)
            .collect())
    }
}

fn required(value: &str) -> Result<String, BookingError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(BookingError::invalid_input())
    } else {
        Ok(trimmed.to_string())
    }
}
