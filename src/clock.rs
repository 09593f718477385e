//! # 12-Hour Clock Normalization
//!
//! Scraped times arrive as `H:MM am|pm` strings. They are converted to
//! timestamps on a single reference day so that tides and sun times can be
//! compared directly. Nothing here handles times that cross midnight: every
//! value is assumed to belong to the reference day.
//!
//! ## Midnight and Noon
//! `12:xx am` maps to hour 0 and `12:xx pm` stays hour 12. Adding 12 to every
//! pm hour would turn noon into an impossible hour 24.

use crate::sun_data::SunWindow;
use crate::tide_data::LowTides;
use chrono::format::ParseErrorKind;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

/// A time string that could not be read as `H:MM am|pm`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    #[error("`{0}` is not an H:MM am/pm time")]
    Malformed(String),

    #[error("`{0}` is out of range for a 12-hour clock")]
    OutOfRange(String),
}

/// Parse `H:MM am|pm` into a time of day.
///
/// The meridiem is case-insensitive. Anything after it (a date in
/// parentheses, say) is ignored.
pub fn parse_clock_time(raw: &str) -> Result<NaiveTime, ClockError> {
    let mut parts = raw.split_whitespace();
    let (Some(hm), Some(meridiem)) = (parts.next(), parts.next()) else {
        return Err(ClockError::Malformed(raw.to_string()));
    };

    NaiveTime::parse_from_str(&format!("{hm} {meridiem}"), "%I:%M %p").map_err(|e| {
        match e.kind() {
            ParseErrorKind::OutOfRange => ClockError::OutOfRange(raw.to_string()),
            _ => ClockError::Malformed(raw.to_string()),
        }
    })
}

/// Parse `raw` and pin it to `day`.
pub fn on_day(day: NaiveDate, raw: &str) -> Result<NaiveDateTime, ClockError> {
    Ok(day.and_time(parse_clock_time(raw)?))
}

/// A low tide placed on the reference day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedTide {
    pub at: NaiveDateTime,
    pub height: String,
}

/// Sunrise to sunset on the reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaylightWindow {
    pub sunrise: NaiveDateTime,
    pub sunset: NaiveDateTime,
}

impl DaylightWindow {
    /// Strictly after sunrise and strictly before sunset.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.sunset > at && at > self.sunrise
    }
}

/// Normalize one location's scraped strings onto `day`.
///
/// Empty low tide slots are simply absent from the result.
pub fn normalize(
    day: NaiveDate,
    low_tides: &LowTides,
    sun: &SunWindow,
) -> Result<(Vec<TimedTide>, DaylightWindow), ClockError> {
    let tides = low_tides
        .iter()
        .map(|reading| {
            Ok(TimedTide {
                at: on_day(day, &reading.time)?,
                height: reading.height.clone(),
            })
        })
        .collect::<Result<Vec<_>, ClockError>>()?;

    let window = DaylightWindow {
        sunrise: on_day(day, &sun.sunrise)?,
        sunset: on_day(day, &sun.sunset)?,
    };

    Ok((tides, window))
}
