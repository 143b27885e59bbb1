//! Date and timestamp normalization for query routes.
//!
//! Path parameters arrive in one of two shapes: an ISO calendar date
//! (`2016-02-24`) or a decimal count of Unix epoch seconds (`1456272000`).
//! Everything here operates in UTC; the service never deals in local time.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Detects a `YYYY-M-D`-shaped substring anywhere in the input. Inputs that
/// look like a calendar date are parsed strictly as `%Y-%m-%d`; everything
/// else falls through to epoch-seconds parsing.
static CALENDAR_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,4}-\d{1,2}-\d{1,2}").expect("valid regex literal"));

/// A path parameter that is neither a valid calendar date nor epoch seconds.
#[derive(Debug, Error)]
pub enum TimeParseError {
    #[error("invalid calendar date: {0:?}, expected YYYY-MM-DD")]
    Date(String),

    #[error("invalid timestamp: {0:?}, expected Unix epoch seconds")]
    Epoch(String),
}

/// Inclusive-start, exclusive-end range of Unix epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: i64,
    pub to: i64,
}

/// Parse a caller-supplied date-or-timestamp string into a UTC instant.
///
/// Calendar dates yield midnight UTC of that day. Anything not shaped like a
/// date is read as a base-10 count of seconds since the Unix epoch.
pub fn normalize(input: &str) -> Result<DateTime<Utc>, TimeParseError> {
    if CALENDAR_DATE.is_match(input) {
        let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .map_err(|_| TimeParseError::Date(input.to_string()))?;
        Ok(date.and_time(NaiveTime::MIN).and_utc())
    } else {
        let secs: i64 = input
            .parse()
            .map_err(|_| TimeParseError::Epoch(input.to_string()))?;
        DateTime::from_timestamp(secs, 0).ok_or_else(|| TimeParseError::Epoch(input.to_string()))
    }
}

/// Compute the whole-day window starting at the given instant.
///
/// `from` is the instant itself, so callers wanting whole-day semantics must
/// pass a midnight-normalized instant. `to` is one calendar day later, which
/// rolls month and year boundaries correctly.
pub fn day_range(day: DateTime<Utc>) -> TimeWindow {
    TimeWindow {
        from: day.timestamp(),
        to: (day + Days::new(1)).timestamp(),
    }
}

/// Lenient epoch parse for the ping-recording route: non-numeric input
/// coerces to 0 instead of rejecting the request.
pub fn epoch_or_zero(input: &str) -> i64 {
    input.parse().unwrap_or(0)
}
