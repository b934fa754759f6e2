//! UTC-normalized instants

use std::fmt;

use chrono::{DateTime, Duration, FixedOffset, SecondsFormat, TimeZone, Utc};

/// A timezone-aware instant, always held in UTC.
///
/// Offsets only matter on the way in (they are folded into the UTC value)
/// and at presentation boundaries via [`ZonedInstant::in_offset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZonedInstant(DateTime<Utc>);

impl ZonedInstant {
    /// Wraps a UTC date-time
    pub fn from_utc(value: DateTime<Utc>) -> Self {
        Self(value)
    }

    /// Normalizes a date-time in any zone to UTC
    pub fn from_zoned<Tz: TimeZone>(value: &DateTime<Tz>) -> Self {
        Self(value.with_timezone(&Utc))
    }

    /// The current instant
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Instant from milliseconds since the Unix epoch
    pub fn from_epoch_millis(millis: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp_millis(millis).map(Self)
    }

    /// Instant from seconds and nanoseconds since the Unix epoch
    pub fn from_epoch_parts(seconds: i64, nanos: u32) -> Option<Self> {
        DateTime::<Utc>::from_timestamp(seconds, nanos).map(Self)
    }

    /// Returns the UTC date-time
    pub fn as_utc(&self) -> DateTime<Utc> {
        self.0
    }

    /// Milliseconds since the Unix epoch
    pub fn epoch_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Presents this instant at a fixed offset
    pub fn in_offset(&self, offset: FixedOffset) -> DateTime<FixedOffset> {
        self.0.with_timezone(&offset)
    }

    /// Adds a signed duration, `None` on overflow
    pub fn checked_add(&self, delta: Duration) -> Option<Self> {
        self.0.checked_add_signed(delta).map(Self)
    }

    /// ISO-8601 instant, e.g. `2024-01-02T03:04:05.123456789Z`
    pub fn to_iso_string(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl From<DateTime<Utc>> for ZonedInstant {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl From<DateTime<FixedOffset>> for ZonedInstant {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::from_zoned(&value)
    }
}

impl fmt::Display for ZonedInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_iso_string())
    }
}
