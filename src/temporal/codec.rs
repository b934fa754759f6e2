//! Zoned timestamp codec
//!
//! Maps a [`ZonedInstant`] to and from the storage engine's native
//! timestamp-with-timezone value and to and from text.
//!
//! Decode accepts, in priority order:
//! 1. a decimal string of epoch milliseconds
//! 2. a storage-native value
//! 3. `yyyy-MM-dd HH:mm:ss[.fraction][offset]` where the fraction has 0-9
//!    digits and the offset is `+HH:MM`, `+HH` or `Z`; no offset means UTC.
//!    Years outside `0000..=9999` carry a sign and may have more digits
//!    (`+10000-01-01`, `-0001-01-01`), as the ISO encoding writes them.
//!
//! Anything else fails with [`TimestampError::MalformedTimestamp`].

use std::sync::OnceLock;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use regex::Regex;

use super::calendar;
use super::errors::{TimestampError, TimestampResult};
use super::instant::ZonedInstant;
use crate::dialect::Dialect;

/// Largest offset magnitude accepted in text input, in hours
const MAX_OFFSET_HOURS: i32 = 18;

/// Native timestamp-with-timezone value as exchanged with the storage engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageTimestamp {
    /// Seconds since the Unix epoch, UTC
    pub seconds: i64,
    /// Sub-second nanoseconds
    pub nanos: u32,
}

/// A stored timestamp in one of the decodable shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawTimestamp<'a> {
    /// Textual value (epoch millis or the space-separated form)
    Text(&'a str),
    /// Storage-native value
    Native(StorageTimestamp),
    /// Integer epoch milliseconds
    EpochMillis(i64),
}

/// Bidirectional codec for zoned timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimestampCodec {
    dialect: Dialect,
}

impl TimestampCodec {
    /// Creates a codec for the given dialect
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Returns the dialect reported in decode errors
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Encodes as an ISO-8601 UTC instant
    pub fn encode(&self, instant: &ZonedInstant) -> String {
        instant.to_iso_string()
    }

    /// Encodes as the storage-native value
    pub fn to_storage(&self, instant: &ZonedInstant) -> StorageTimestamp {
        let utc = instant.as_utc();
        StorageTimestamp {
            seconds: utc.timestamp(),
            nanos: utc.timestamp_subsec_nanos(),
        }
    }

    /// Renders the value the way the storage engine prints a
    /// timestamp-with-timezone column cast to text in a UTC session,
    /// e.g. `2024-01-02 03:04:05.5+00`.
    pub fn render_storage_text(&self, instant: &ZonedInstant) -> String {
        let utc = instant.as_utc();
        let mut out = utc.format("%Y-%m-%d %H:%M:%S").to_string();
        calendar::push_fraction(&mut out, utc.timestamp_subsec_nanos());
        out.push_str("+00");
        out
    }

    /// Decodes any accepted stored shape
    pub fn decode(&self, raw: RawTimestamp<'_>) -> TimestampResult<ZonedInstant> {
        match raw {
            RawTimestamp::Text(text) => self.decode_text(text),
            RawTimestamp::Native(native) => {
                ZonedInstant::from_epoch_parts(native.seconds, native.nanos).ok_or_else(|| {
                    TimestampError::malformed(
                        format!("{}s+{}ns", native.seconds, native.nanos),
                        self.dialect,
                    )
                })
            }
            RawTimestamp::EpochMillis(millis) => ZonedInstant::from_epoch_millis(millis)
                .ok_or_else(|| TimestampError::malformed(millis.to_string(), self.dialect)),
        }
    }

    /// Decodes text: epoch millis first, then the space-separated form
    pub fn decode_text(&self, text: &str) -> TimestampResult<ZonedInstant> {
        if let Ok(millis) = text.parse::<i64>() {
            return ZonedInstant::from_epoch_millis(millis)
                .ok_or_else(|| TimestampError::malformed(text, self.dialect));
        }

        self.parse_separated(text)
            .ok_or_else(|| TimestampError::malformed(text, self.dialect))
    }

    fn parse_separated(&self, text: &str) -> Option<ZonedInstant> {
        let caps = timestamp_pattern().captures(text)?;

        let date = NaiveDate::from_ymd_opt(
            caps.name("year")?.as_str().parse::<i32>().ok()?,
            caps.name("month")?.as_str().parse::<u32>().ok()?,
            caps.name("day")?.as_str().parse::<u32>().ok()?,
        )?;
        let time = NaiveTime::parse_from_str(caps.name("time")?.as_str(), "%H:%M:%S").ok()?;
        let nanos = caps
            .name("fraction")
            .map(|m| fraction_to_nanos(m.as_str()))
            .unwrap_or(0);
        let naive = NaiveDateTime::new(date, time.with_nanosecond(nanos)?);

        let offset_seconds = match caps.name("offset").map(|m| m.as_str()) {
            None | Some("Z") => 0,
            Some(raw) => parse_offset_seconds(raw)?,
        };
        let offset = FixedOffset::east_opt(offset_seconds)?;
        let local = offset.from_local_datetime(&naive).single()?;

        Some(ZonedInstant::from_zoned(&local))
    }
}

fn timestamp_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?P<year>[+-]\d{4,}|\d{4})-(?P<month>\d{2})-(?P<day>\d{2})[ T](?P<time>\d{2}:\d{2}:\d{2})(?:\.(?P<fraction>\d{0,9}))?(?P<offset>Z|[+-]\d{2}(?::\d{2})?)?$",
        )
        .expect("timestamp pattern compiles")
    })
}

/// Right-pads a 0-9 digit fraction to nanoseconds
fn fraction_to_nanos(digits: &str) -> u32 {
    let mut nanos: u32 = 0;
    for (i, c) in digits.chars().take(9).enumerate() {
        let digit = c.to_digit(10).unwrap_or(0);
        nanos += digit * 10u32.pow(8 - i as u32);
    }
    nanos
}

/// Parses `+HH` or `+HH:MM` into signed seconds east of UTC
fn parse_offset_seconds(raw: &str) -> Option<i32> {
    let sign = match raw.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let body = &raw[1..];
    let (hours, minutes) = match body.split_once(':') {
        Some((h, m)) => (h.parse::<i32>().ok()?, m.parse::<i32>().ok()?),
        None => (body.parse::<i32>().ok()?, 0),
    };

    if hours > MAX_OFFSET_HOURS || minutes > 59 {
        return None;
    }

    Some(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TimestampCodec {
        TimestampCodec::new(Dialect::Postgres)
    }

    fn instant(seconds: i64, nanos: u32) -> ZonedInstant {
        ZonedInstant::from_epoch_parts(seconds, nanos).unwrap()
    }

    #[test]
    fn test_encode_iso_instant() {
        let t = instant(1_704_164_645, 123_456_789);
        assert_eq!(codec().encode(&t), "2024-01-02T03:04:05.123456789Z");
    }

    #[test]
    fn test_decode_epoch_millis_string() {
        let t = codec().decode_text("1704164645123").unwrap();
        assert_eq!(t, instant(1_704_164_645, 123_000_000));
    }

    #[test]
    fn test_decode_native() {
        let native = StorageTimestamp {
            seconds: 1_704_164_645,
            nanos: 7,
        };
        let t = codec().decode(RawTimestamp::Native(native)).unwrap();
        assert_eq!(t, instant(1_704_164_645, 7));
        assert_eq!(codec().to_storage(&t), native);
    }

    #[test]
    fn test_decode_without_offset_is_utc() {
        let t = codec().decode_text("2024-01-02 03:04:05").unwrap();
        assert_eq!(t, instant(1_704_164_645, 0));
    }

    #[test]
    fn test_decode_with_fraction_and_offsets() {
        let expected = instant(1_704_164_645, 500_000_000);

        assert_eq!(codec().decode_text("2024-01-02 03:04:05.5").unwrap(), expected);
        assert_eq!(codec().decode_text("2024-01-02 05:04:05.5+02:00").unwrap(), expected);
        assert_eq!(codec().decode_text("2024-01-02 05:04:05.500+02").unwrap(), expected);
        assert_eq!(codec().decode_text("2024-01-01 22:04:05.5-05:00").unwrap(), expected);
        assert_eq!(codec().decode_text("2024-01-02 03:04:05.").unwrap(), instant(1_704_164_645, 0));
    }

    #[test]
    fn test_decode_nine_digit_fraction() {
        let t = codec().decode_text("2024-01-02 03:04:05.123456789+00").unwrap();
        assert_eq!(t, instant(1_704_164_645, 123_456_789));
    }

    #[test]
    fn test_decode_rejects_ambiguous_input() {
        for bad in [
            "",
            "yesterday",
            "2024-01-02",
            "2024-01-02 03:04",
            "2024-01-02 03:04:05.1234567891",
            "2024-13-02 03:04:05",
            "2024-01-02 03:04:05+19",
            "2024-01-02 03:04:05 UTC",
            "10000-01-01 00:00:00",
            "+999-01-01 00:00:00",
            "12.5",
        ] {
            let err = codec().decode_text(bad).unwrap_err();
            assert_eq!(
                err,
                TimestampError::MalformedTimestamp {
                    text: bad.to_string(),
                    dialect: Dialect::Postgres
                }
            );
        }
    }

    #[test]
    fn test_round_trip_through_text_and_storage() {
        let c = codec();
        for t in [
            instant(0, 0),
            instant(1_704_164_645, 123_456_789),
            instant(-86_400, 1),
            instant(4_102_444_800, 999_999_999),
            // +10000-01-01T00:00:00Z
            instant(253_402_300_800, 0),
            // -0001-01-01T00:00:00Z
            instant(-62_198_755_200, 250_000_000),
        ] {
            assert_eq!(c.decode_text(&c.encode(&t)).unwrap(), t);
            assert_eq!(c.decode_text(&c.render_storage_text(&t)).unwrap(), t);
            assert_eq!(c.decode(RawTimestamp::Native(c.to_storage(&t))).unwrap(), t);
        }
    }

    #[test]
    fn test_render_storage_text() {
        let c = codec();
        assert_eq!(c.render_storage_text(&instant(1_704_164_645, 0)), "2024-01-02 03:04:05+00");
        assert_eq!(
            c.render_storage_text(&instant(1_704_164_645, 120_000_000)),
            "2024-01-02 03:04:05.12+00"
        );
    }

    #[test]
    fn test_decode_signed_years() {
        let c = codec();
        assert_eq!(
            c.decode_text("+10000-01-01T00:00:00Z").unwrap(),
            instant(253_402_300_800, 0)
        );
        assert_eq!(
            c.decode_text("-0001-01-01 00:00:00.25+00").unwrap(),
            instant(-62_198_755_200, 250_000_000)
        );
        assert_eq!(c.encode(&instant(253_402_300_800, 0)), "+10000-01-01T00:00:00Z");
    }

    #[test]
    fn test_error_reports_dialect() {
        let err = TimestampCodec::new(Dialect::H2).decode_text("nope").unwrap_err();
        assert!(matches!(
            err,
            TimestampError::MalformedTimestamp { dialect: Dialect::H2, .. }
        ));
    }
}
