//! Date formatters for `json-bind`.
//!
//! Each formatter converts between a JSON value and [`time::OffsetDateTime`]:
//!
//! - [`TimestampMillis`]: a number of milliseconds since the Unix epoch;
//! - [`DateFormat`]: a string such as `"2015-10-02 07:00:00 +0000"`;
//! - [`Rfc3339`]: a string such as `"2015-10-02T07:00:00Z"`.
//!
//! Errors reported by `time` are wrapped into [`JsonError::Wrapped`].
//!
//! # Example
//!
//! ```
//! use json_bind::JsonValue;
//! use json_bind_time::{DateFormat, TimestampMillis};
//!
//! let doc = JsonValue::decode_str(
//!     r#"{"updated": 1443769200000, "pretty": "2015-10-02 07:00:00 +0000"}"#,
//! )
//! .unwrap();
//!
//! let updated = doc.format::<TimestampMillis>().retrieve("updated").unwrap();
//! let pretty = doc.format::<DateFormat>().retrieve("pretty").unwrap();
//! assert_eq!(updated, pretty);
//! ```

use json_bind::{JsonError, JsonFormatter, JsonNumber, JsonValue, Result};
use time::format_description::well_known;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::debug;

const NANOS_PER_MILLI: i128 = 1_000_000;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute]"
);

// ── Timestamps ────────────────────────────────────────────────────────────

/// Milliseconds since the Unix epoch, as a JSON number.
///
/// Fractional milliseconds are kept down to the nanosecond. Encoding yields
/// an integer when the instant falls on a whole millisecond.
pub struct TimestampMillis;

impl JsonFormatter for TimestampMillis {
    type Value = OffsetDateTime;

    fn decode(value: &JsonValue) -> Result<OffsetDateTime> {
        let nanos = match value.as_number() {
            Some(JsonNumber::Int(ms)) => i128::from(ms) * NANOS_PER_MILLI,
            Some(JsonNumber::UInt(ms)) => i128::from(ms) * NANOS_PER_MILLI,
            Some(JsonNumber::Float(ms)) if ms.is_finite() => {
                float_millis_to_nanos(ms).ok_or_else(|| {
                    JsonError::custom(format!("{ms} is out of range for a timestamp"))
                })?
            }
            Some(JsonNumber::Float(ms)) => {
                return Err(JsonError::custom(format!("{ms} is not a timestamp")))
            }
            _ => return Err(JsonError::type_mismatch::<OffsetDateTime>(value)),
        };
        OffsetDateTime::from_unix_timestamp_nanos(nanos).map_err(|err| {
            debug!(error = %err, nanos = %nanos, "timestamp out of range");
            JsonError::wrap(err, "timestamp out of range")
        })
    }

    fn encode(value: &OffsetDateTime) -> Result<JsonValue> {
        let nanos = value.unix_timestamp_nanos();
        if nanos % NANOS_PER_MILLI == 0 {
            let millis = i64::try_from(nanos / NANOS_PER_MILLI)
                .map_err(|err| JsonError::wrap(err, "timestamp out of range"))?;
            Ok(JsonValue::from(millis))
        } else {
            Ok(JsonValue::from(nanos as f64 / NANOS_PER_MILLI as f64))
        }
    }
}

/// `None` when the value does not fit in `i128` nanoseconds.
fn float_millis_to_nanos(ms: f64) -> Option<i128> {
    // `as` saturates, so anything at the i128 bounds is treated as overflow.
    let whole = ms.trunc() as i128;
    if whole == i128::MAX || whole == i128::MIN {
        return None;
    }
    let frac = (ms.fract() * 1_000_000.0).round() as i128;
    whole.checked_mul(NANOS_PER_MILLI)?.checked_add(frac)
}

// ── Text formats ──────────────────────────────────────────────────────────

fn text_of(value: &JsonValue) -> Result<String> {
    value
        .as_str()
        .map(|s| s.into_owned())
        .ok_or_else(|| JsonError::type_mismatch::<OffsetDateTime>(value))
}

/// `YYYY-MM-DD hh:mm:ss +hhmm`, e.g. `2015-10-02 07:00:00 +0000`.
pub struct DateFormat;

impl JsonFormatter for DateFormat {
    type Value = OffsetDateTime;

    fn decode(value: &JsonValue) -> Result<OffsetDateTime> {
        let text = text_of(value)?;
        OffsetDateTime::parse(&text, DATE_FORMAT).map_err(|err| {
            debug!(error = %err, text = %text, "unparseable date");
            JsonError::wrap(err, format!("could not parse date {text:?}"))
        })
    }

    fn encode(value: &OffsetDateTime) -> Result<JsonValue> {
        value
            .format(DATE_FORMAT)
            .map(JsonValue::from)
            .map_err(|err| JsonError::wrap(err, "could not format date"))
    }
}

/// RFC 3339 date-time strings.
pub struct Rfc3339;

impl JsonFormatter for Rfc3339 {
    type Value = OffsetDateTime;

    fn decode(value: &JsonValue) -> Result<OffsetDateTime> {
        let text = text_of(value)?;
        OffsetDateTime::parse(&text, &well_known::Rfc3339).map_err(|err| {
            debug!(error = %err, text = %text, "unparseable RFC 3339 date");
            JsonError::wrap(err, format!("could not parse RFC 3339 date {text:?}"))
        })
    }

    fn encode(value: &OffsetDateTime) -> Result<JsonValue> {
        value
            .format(&well_known::Rfc3339)
            .map(JsonValue::from)
            .map_err(|err| JsonError::wrap(err, "could not format RFC 3339 date"))
    }
}
