use bookit_common::models::{Reservation, ReservationId};
use chrono::SecondsFormat;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Body of `POST /booking`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateBookingRequest {
    pub name: String,
    pub phone: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`, local time
    pub start_time: String,
    /// `HH:MM`, local time
    pub end_time: String,
}

/// Body of `PATCH /admin/booking/{id}`. Omitted fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateBookingRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl UpdateBookingRequest {
    pub fn touches_interval(&self) -> bool {
        self.date.is_some() || self.start_time.is_some() || self.end_time.is_some()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateQuery {
    /// `YYYY-MM-DD`
    pub date: Option<String>,
}

/// An occupied slot as shown to the public: no requester details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookedSlot {
    pub start_time: String,
    pub end_time: String,
}

impl BookedSlot {
    pub fn from_reservation(reservation: &Reservation, zone: &Tz) -> Self {
        Self {
            start_time: reservation.start_time.with_timezone(zone).format("%H:%M").to_string(),
            end_time: reservation.end_time.with_timezone(zone).format("%H:%M").to_string(),
        }
    }
}

/// A full reservation for admin views, instants rendered in the local zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AdminReservation {
    pub id: ReservationId,
    pub name: String,
    pub phone: String,
    /// RFC 3339 with the local offset, e.g. `2025-06-10T09:00:00+07:00`
    pub start_time: String,
    pub end_time: String,
    pub created_at: String,
}

impl AdminReservation {
    pub fn from_reservation(reservation: Reservation, zone: &Tz) -> Self {
        let render = |instant: chrono::DateTime<chrono::Utc>| {
            instant
                .with_timezone(zone)
                .to_rfc3339_opts(SecondsFormat::Secs, false)
        };
        Self {
            id: reservation.id,
            start_time: render(reservation.start_time),
            end_time: render(reservation.end_time),
            created_at: render(reservation.created_at),
            name: reservation.name,
            phone: reservation.phone,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
