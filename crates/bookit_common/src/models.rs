// --- File: crates/bookit_common/src/models.rs ---

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Surrogate identity of a reservation, assigned by storage.
pub type ReservationId = i64;

/// A half-open interval `[start, end)` of absolute instants.
///
/// Two intervals that merely touch (one ends when the other starts) do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// `[s1,e1)` and `[s2,e2)` overlap iff `s1 < e2 && s2 < e1`.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A persisted booking on the shared calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// The unique identifier, immutable once assigned
    pub id: ReservationId,

    /// Requester name
    pub name: String,

    /// Requester phone number
    pub phone: String,

    /// Start instant (inclusive)
    pub start_time: DateTime<Utc>,

    /// End instant (exclusive)
    pub end_time: DateTime<Utc>,

    /// Set once at creation
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn interval(&self) -> Interval {
        Interval::new(self.start_time, self.end_time)
    }
}

/// A reservation that has passed validation but has no identity yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub name: String,
    pub phone: String,
    pub interval: Interval,
    pub created_at: DateTime<Utc>,
}

impl NewReservation {
    pub fn new(name: String, phone: String, interval: Interval) -> Self {
        Self {
            name,
            phone,
            interval,
            created_at: Utc::now(),
        }
    }
}
