//! Typed values
//!
//! A value carries its own kind tag. Input is parsed once, at the registry
//! boundary, and nothing downstream re-interprets it.

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use uuid::Uuid;

use super::types::ColumnKind;
use crate::temporal::{calendar, RawTimestamp, TimestampCodec, ZonedInstant};

/// A value of one column kind
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Integer64(i64),
    Float64(f64),
    Text(String),
    Identifier(Uuid),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    DateTimeTz(ZonedInstant),
    Boolean(bool),
}

impl TypedValue {
    /// Returns the kind tag
    pub fn kind(&self) -> ColumnKind {
        match self {
            TypedValue::Integer64(_) => ColumnKind::Integer64,
            TypedValue::Float64(_) => ColumnKind::Float64,
            TypedValue::Text(_) => ColumnKind::Text,
            TypedValue::Identifier(_) => ColumnKind::Identifier,
            TypedValue::Date(_) => ColumnKind::Date,
            TypedValue::DateTime(_) => ColumnKind::DateTime,
            TypedValue::DateTimeTz(_) => ColumnKind::DateTimeTz,
            TypedValue::Boolean(_) => ColumnKind::Boolean,
        }
    }

    /// Renders the value as the storage engine prints it when the column
    /// is cast to text. Substring containment on non-text kinds is defined
    /// over this rendering.
    pub fn render(&self, codec: &TimestampCodec) -> String {
        match self {
            TypedValue::Integer64(v) => v.to_string(),
            TypedValue::Float64(v) => render_float(*v),
            TypedValue::Text(v) => v.clone(),
            TypedValue::Identifier(v) => v.hyphenated().to_string(),
            TypedValue::Date(v) => calendar::render_date(v),
            TypedValue::DateTime(v) => calendar::render_date_time(v),
            TypedValue::DateTimeTz(v) => codec.render_storage_text(v),
            TypedValue::Boolean(v) => v.to_string(),
        }
    }

    /// Compares two values of the same kind.
    ///
    /// Returns `None` across kinds and for kinds without an order.
    pub fn compare(&self, other: &TypedValue) -> Option<Ordering> {
        match (self, other) {
            (TypedValue::Integer64(a), TypedValue::Integer64(b)) => Some(a.cmp(b)),
            (TypedValue::Float64(a), TypedValue::Float64(b)) => a.partial_cmp(b),
            (TypedValue::Text(a), TypedValue::Text(b)) => Some(a.cmp(b)),
            (TypedValue::Identifier(a), TypedValue::Identifier(b)) => Some(a.cmp(b)),
            (TypedValue::Date(a), TypedValue::Date(b)) => Some(a.cmp(b)),
            (TypedValue::DateTime(a), TypedValue::DateTime(b)) => Some(a.cmp(b)),
            (TypedValue::DateTimeTz(a), TypedValue::DateTimeTz(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Converts to JSON for responses and fixture files
    pub fn to_json(&self, codec: &TimestampCodec) -> Value {
        match self {
            TypedValue::Integer64(v) => Value::from(*v),
            TypedValue::Float64(v) => serde_json::Number::from_f64(*v)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            TypedValue::Boolean(v) => Value::Bool(*v),
            TypedValue::DateTimeTz(v) => Value::String(codec.encode(v)),
            TypedValue::DateTime(v) => Value::String(v.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
            other => Value::String(other.render(codec)),
        }
    }

    /// Reads a stored JSON value as the given kind.
    ///
    /// Zoned timestamps accept integer epoch millis or any textual form the
    /// codec decodes; other kinds accept their native JSON shape or a string.
    pub fn from_json(kind: ColumnKind, value: &Value, codec: &TimestampCodec) -> Result<Self, String> {
        match (kind, value) {
            (ColumnKind::Integer64, Value::Number(n)) => n
                .as_i64()
                .map(TypedValue::Integer64)
                .ok_or_else(|| format!("{} is not a 64-bit integer", n)),
            (ColumnKind::Float64, Value::Number(n)) => n
                .as_f64()
                .map(TypedValue::Float64)
                .ok_or_else(|| format!("{} is not a float", n)),
            (ColumnKind::Boolean, Value::Bool(b)) => Ok(TypedValue::Boolean(*b)),
            (ColumnKind::DateTimeTz, Value::Number(n)) => {
                let millis = n.as_i64().ok_or_else(|| format!("{} is not epoch millis", n))?;
                codec
                    .decode(RawTimestamp::EpochMillis(millis))
                    .map(TypedValue::DateTimeTz)
                    .map_err(|e| e.to_string())
            }
            (ColumnKind::DateTimeTz, Value::String(s)) => codec
                .decode(RawTimestamp::Text(s))
                .map(TypedValue::DateTimeTz)
                .map_err(|e| e.to_string()),
            (kind, Value::String(s)) => kind.parse(s, codec),
            (kind, other) => Err(format!("{} is not a valid {}", other, kind.type_name())),
        }
    }
}

/// Shortest round-trip digits, switching to `1.5e+20` / `1e-07` notation
/// when the decimal exponent is below -4 or at least 15
fn render_float(value: f64) -> String {
    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return value.to_string(),
    };

    if value == 0.0 || !value.is_finite() || (-4..15).contains(&exponent) {
        return value.to_string();
    }

    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", mantissa, sign, exponent.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn codec() -> TimestampCodec {
        TimestampCodec::default()
    }

    #[test]
    fn test_kind_tag() {
        assert_eq!(TypedValue::Integer64(1).kind(), ColumnKind::Integer64);
        assert_eq!(TypedValue::Text("a".into()).kind(), ColumnKind::Text);
        assert_eq!(TypedValue::Boolean(true).kind(), ColumnKind::Boolean);
    }

    #[test]
    fn test_render_text_cast() {
        let c = codec();
        assert_eq!(TypedValue::Integer64(-43).render(&c), "-43");
        assert_eq!(TypedValue::Float64(2.5).render(&c), "2.5");
        assert_eq!(TypedValue::Float64(3.0).render(&c), "3");
        assert_eq!(TypedValue::Float64(0.0001).render(&c), "0.0001");
        assert_eq!(TypedValue::Float64(0.0000001).render(&c), "1e-07");
        assert_eq!(TypedValue::Float64(-2.5e-10).render(&c), "-2.5e-10");
        assert_eq!(TypedValue::Float64(1e14).render(&c), "100000000000000");
        assert_eq!(TypedValue::Float64(1e15).render(&c), "1e+15");
        assert_eq!(TypedValue::Float64(1.5e300).render(&c), "1.5e+300");

        let dt = NaiveDateTime::parse_from_str("2024-01-02 03:04:05.250", "%Y-%m-%d %H:%M:%S%.f")
            .unwrap();
        assert_eq!(TypedValue::DateTime(dt).render(&c), "2024-01-02 03:04:05.25");

        let instant = ZonedInstant::from_epoch_parts(1_704_164_645, 0).unwrap();
        assert_eq!(
            TypedValue::DateTimeTz(instant).render(&c),
            "2024-01-02 03:04:05+00"
        );

        let id = Uuid::parse_str("67E55044-10B1-426F-9247-BB680E5FE0C8").unwrap();
        assert_eq!(
            TypedValue::Identifier(id).render(&c),
            "67e55044-10b1-426f-9247-bb680e5fe0c8"
        );
    }

    #[test]
    fn test_compare_same_kind_only() {
        assert_eq!(
            TypedValue::Integer64(1).compare(&TypedValue::Integer64(2)),
            Some(Ordering::Less)
        );
        assert_eq!(TypedValue::Integer64(1).compare(&TypedValue::Float64(1.0)), None);
        assert_eq!(TypedValue::Boolean(true).compare(&TypedValue::Boolean(false)), None);
    }

    #[test]
    fn test_from_json() {
        let c = codec();

        assert_eq!(
            TypedValue::from_json(ColumnKind::Integer64, &json!(7), &c).unwrap(),
            TypedValue::Integer64(7)
        );
        assert_eq!(
            TypedValue::from_json(ColumnKind::DateTimeTz, &json!(0), &c).unwrap(),
            TypedValue::DateTimeTz(ZonedInstant::from_epoch_millis(0).unwrap())
        );
        assert_eq!(
            TypedValue::from_json(ColumnKind::DateTimeTz, &json!("2024-01-02T03:04:05Z"), &c).unwrap(),
            TypedValue::DateTimeTz(ZonedInstant::from_epoch_parts(1_704_164_645, 0).unwrap())
        );
        assert!(TypedValue::from_json(ColumnKind::Integer64, &json!("x"), &c).is_err());
        assert!(TypedValue::from_json(ColumnKind::Text, &json!(null), &c).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let c = codec();
        let values = [
            TypedValue::Integer64(9),
            TypedValue::Float64(0.25),
            TypedValue::Text("User5".into()),
            TypedValue::Identifier(Uuid::nil()),
            TypedValue::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()),
            TypedValue::DateTimeTz(ZonedInstant::from_epoch_parts(1_704_164_645, 5).unwrap()),
            TypedValue::Boolean(false),
        ];

        for value in values {
            let json = value.to_json(&c);
            assert_eq!(TypedValue::from_json(value.kind(), &json, &c).unwrap(), value);
        }
    }
}
