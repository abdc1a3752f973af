//! Civil date and clock times to absolute instants.
//!
//! Inputs are accepted only in their exact shapes: `YYYY-MM-DD` and 24-hour
//! `HH:MM`. Both clock times are combined with the same date in the
//! configured zone, then converted to UTC.

use crate::error::{BookingError, Field};
use bookit_common::models::Interval;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// A date plus two local clock times, before any zone is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilInterval {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl CivilInterval {
    /// Parse the three request strings, reporting the first bad field in
    /// the order date, start, end.
    pub fn parse(date: &str, start: &str, end: &str) -> Result<Self, BookingError> {
        Ok(Self {
            date: parse_date(date)?,
            start: parse_clock(start, Field::Start)?,
            end: parse_clock(end, Field::End)?,
        })
    }

    /// Pin both clock times to `date` in `zone` and convert to UTC.
    ///
    /// A local time skipped by a DST transition is reported as a parse error
    /// on that field. A repeated local time takes its earlier instant.
    pub fn to_absolute(&self, zone: &Tz) -> Result<Interval, BookingError> {
        let start = resolve(zone, self.date.and_time(self.start), Field::Start)?;
        let end = resolve(zone, self.date.and_time(self.end), Field::End)?;
        Ok(Interval::new(start, end))
    }
}

/// Parse and place an interval in one step.
pub fn normalize(date: &str, start: &str, end: &str, zone: &Tz) -> Result<Interval, BookingError> {
    CivilInterval::parse(date, start, end)?.to_absolute(zone)
}

fn resolve(zone: &Tz, local: NaiveDateTime, field: Field) -> Result<chrono::DateTime<Utc>, BookingError> {
    zone.from_local_datetime(&local)
        .earliest()
        .map(|instant| instant.with_timezone(&Utc))
        .ok_or(BookingError::Parse { field })
}

/// `YYYY-MM-DD`, nothing else.
pub fn parse_date(value: &str) -> Result<NaiveDate, BookingError> {
    let err = BookingError::Parse { field: Field::Date };
    if !has_shape(value, b"dddd-dd-dd") {
        return Err(err);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| err)
}

/// 24-hour `HH:MM`, nothing else.
pub fn parse_clock(value: &str, field: Field) -> Result<NaiveTime, BookingError> {
    if !has_shape(value, b"dd:dd") {
        return Err(BookingError::Parse { field });
    }
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| BookingError::Parse { field })
}

// chrono accepts single-digit fields and signed years, so the layout is
// checked byte by byte first. `d` stands for an ASCII digit.
fn has_shape(value: &str, pattern: &[u8]) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == pattern.len()
        && bytes.iter().zip(pattern).all(|(b, p)| match p {
            b'd' => b.is_ascii_digit(),
            other => b == other,
        })
}
