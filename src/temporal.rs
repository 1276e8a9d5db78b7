use chrono::{DateTime, NaiveDateTime};
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: f64 = 86_400_000.0;
/// Julian day number of 1970-01-01T00:00:00Z.
const UNIX_EPOCH_JULIAN_DAY: f64 = 2_440_587.5;

/// How date/time values are stored, chosen once per connection by the
/// `julian_day` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateEncoding {
    /// Milliseconds since the Unix epoch as an INTEGER.
    #[default]
    UnixMillis,
    /// Fractional julian day number as a REAL.
    JulianDay,
}

impl DateEncoding {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn encode(self, ts: &NaiveDateTime) -> Value {
        let millis = ts.and_utc().timestamp_millis();
        match self {
            DateEncoding::UnixMillis => Value::Integer(millis),
            DateEncoding::JulianDay => {
                Value::Real(millis as f64 / MILLIS_PER_DAY + UNIX_EPOCH_JULIAN_DAY)
            }
        }
    }

    /// Inverse of [`DateEncoding::encode`], at millisecond precision.
    ///
    /// Text in `YYYY-MM-DD HH:MM:SS[.fff]` form is accepted under either
    /// encoding; anything else that does not match the encoding yields `None`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn decode(self, value: &Value) -> Option<NaiveDateTime> {
        let millis = match (self, value) {
            (_, Value::Text(s)) => {
                return NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").ok();
            }
            (DateEncoding::UnixMillis, Value::Integer(ms)) => *ms,
            (DateEncoding::JulianDay, Value::Real(jd)) => {
                ((jd - UNIX_EPOCH_JULIAN_DAY) * MILLIS_PER_DAY).round() as i64
            }
            (DateEncoding::JulianDay, Value::Integer(jd)) => {
                ((*jd as f64 - UNIX_EPOCH_JULIAN_DAY) * MILLIS_PER_DAY).round() as i64
            }
            _ => return None,
        };
        DateTime::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
    }
}
