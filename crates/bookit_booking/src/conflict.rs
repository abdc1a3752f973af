//! Overlap detection against stored reservations.

use crate::error::BookingError;
use bookit_common::models::{Interval, ReservationId};
use bookit_db::ReservationRepository;
use std::sync::Arc;
use tracing::debug;

/// Half-open overlap: `[s1,e1)` and `[s2,e2)` collide iff `s1 < e2 && s2 < e1`.
///
/// Intervals that only touch do not collide.
pub fn overlaps(a: &Interval, b: &Interval) -> bool {
    a.overlaps(b)
}

/// Read-only view of the calendar used to reject colliding requests.
pub struct ConflictDetector<R> {
    repository: Arc<R>,
}

impl<R> Clone for ConflictDetector<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ReservationRepository> ConflictDetector<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Whether `candidate` overlaps any stored reservation other than `exclude`.
    pub async fn has_conflict(
        &self,
        candidate: Interval,
        exclude: Option<ReservationId>,
    ) -> Result<bool, BookingError> {
        let hit = self.repository.has_conflict(candidate, exclude).await?;
        debug!(
            "Conflict check {} - {} (excluding {:?}): {}",
            candidate.start, candidate.end, exclude, hit
        );
        Ok(hit)
    }

    pub async fn ensure_free(
        &self,
        candidate: Interval,
        exclude: Option<ReservationId>,
    ) -> Result<(), BookingError> {
        if self.has_conflict(candidate, exclude).await? {
            Err(BookingError::Conflict)
        } else {
            Ok(())
        }
    }
}
