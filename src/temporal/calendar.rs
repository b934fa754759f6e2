//! Zone-less date and date-time parsing and rendering

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use super::errors::{TimestampError, TimestampResult};

/// Parses an ISO `yyyy-MM-dd` date
pub fn parse_date(text: &str) -> TimestampResult<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| TimestampError::MalformedDate(text.to_string()))
}

/// Parses an ISO local date-time, `T` separated, optional fraction.
///
/// The space-separated storage rendering is accepted too so a value read
/// back from the engine parses again.
pub fn parse_date_time(text: &str) -> TimestampResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .map_err(|_| TimestampError::MalformedDateTime(text.to_string()))
}

/// Renders a date as the engine prints it when cast to text
pub fn render_date(value: &NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

/// Renders a date-time as the engine prints it when cast to text:
/// space separated, fraction without trailing zeros.
pub fn render_date_time(value: &NaiveDateTime) -> String {
    let mut out = value.format("%Y-%m-%d %H:%M:%S").to_string();
    push_fraction(&mut out, value.nanosecond());
    out
}

/// Appends `.fraction` without trailing zeros, nothing when zero
pub(crate) fn push_fraction(out: &mut String, nanos: u32) {
    if nanos == 0 {
        return;
    }
    let digits = format!("{:09}", nanos);
    out.push('.');
    out.push_str(digits.trim_end_matches('0'));
}
