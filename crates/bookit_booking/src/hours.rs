use crate::error::BookingError;
use bookit_common::models::Interval;
use bookit_config::{BookingConfig, ConfigValueError};
use chrono::NaiveTime;
use chrono_tz::Tz;

/// The daily window bookings must fit into, in one fixed civil zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessHours {
    zone: Tz,
    open: NaiveTime,
    close: NaiveTime,
}

impl BusinessHours {
    pub fn new(zone: Tz, open: NaiveTime, close: NaiveTime) -> Self {
        Self { zone, open, close }
    }

    pub fn from_config(config: &BookingConfig) -> Result<Self, ConfigValueError> {
        let (zone, open, close) = config.validate()?;
        Ok(Self::new(zone, open, close))
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    pub fn open(&self) -> NaiveTime {
        self.open
    }

    pub fn close(&self) -> NaiveTime {
        self.close
    }

    /// Check ordering first, then the window.
    ///
    /// Both endpoints are read back in the local zone: the start must not be
    /// before opening, the end must not be after closing, and the end must
    /// fall on the start's calendar day.
    pub fn validate(&self, interval: &Interval) -> Result<(), BookingError> {
        if interval.end <= interval.start {
            return Err(BookingError::Order);
        }

        let start = interval.start.with_timezone(&self.zone);
        let end = interval.end.with_timezone(&self.zone);

        let within = start.time() >= self.open
            && end.date_naive() == start.date_naive()
            && end.time() <= self.close;

        if within {
            Ok(())
        } else {
            Err(BookingError::Hours {
                open: self.open,
                close: self.close,
            })
        }
    }
}
