//! Scalar codecs and field extraction for Bithumb's string-heavy payloads.
//!
//! The exchange encodes nearly every quantity as a decimal string and every
//! timestamp as a digit string whose trailing digits are the sub-second
//! component. Everything here decodes fallibly: a malformed value is a
//! [`DecodeError`] naming the offending field, never a silent zero.

use std::collections::HashMap;

use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::error::DecodeError;
use crate::types::Currency;

/// Top-level payload keys that are not currency symbols.
///
/// Aggregated (`ALL`) responses mix these in with the per-currency entries;
/// they are excluded by name, never by inspecting the value's type.
pub(crate) const RESERVED_KEYS: &[&str] = &["date", "timestamp", "payment_currency"];

const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// Parse a decimal string into an `f64`.
///
/// Tolerates surrounding whitespace, thousands separators, and the spacing
/// the ledger endpoint puts after a sign (`"+ 543.5"`). Empty or non-numeric
/// input is an error.
pub fn parse_decimal(field: &str, raw: &str) -> Result<f64, DecodeError> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace() && *c != ',').collect();
    if cleaned.is_empty() {
        return Err(DecodeError::new(field, "empty decimal string"));
    }
    cleaned
        .parse::<f64>()
        .map_err(|_| DecodeError::new(field, format!("invalid decimal string `{raw}`")))
}

fn split_epoch(field: &str, raw: &str, frac_digits: usize) -> Result<(i64, i64), DecodeError> {
    if raw.len() <= frac_digits || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::new(
            field,
            format!("invalid epoch string `{raw}`"),
        ));
    }
    let (seconds, fraction) = raw.split_at(raw.len() - frac_digits);
    let seconds = seconds
        .parse::<i64>()
        .map_err(|_| DecodeError::new(field, format!("epoch seconds out of range in `{raw}`")))?;
    // Fraction part always parses: frac_digits ASCII digits.
    Ok((seconds, fraction.parse::<i64>().unwrap_or(0)))
}

/// Decode a millisecond-epoch digit string (e.g. `"1500000000123"`).
///
/// The last 3 digits are milliseconds, the rest whole seconds since the Unix
/// epoch (UTC). Strings shorter than 4 digits are rejected.
pub fn decode_milli_epoch(field: &str, raw: &str) -> Result<OffsetDateTime, DecodeError> {
    let (seconds, millis) = split_epoch(field, raw, 3)?;
    OffsetDateTime::from_unix_timestamp_nanos(
        seconds as i128 * NANOS_PER_SECOND + millis as i128 * 1_000_000,
    )
    .map_err(|_| DecodeError::new(field, format!("epoch out of range in `{raw}`")))
}

/// Encode a timestamp back into the exchange's millisecond-epoch string form.
pub fn encode_milli_epoch(timestamp: OffsetDateTime) -> String {
    (timestamp.unix_timestamp_nanos() / 1_000_000).to_string()
}

/// Decode a microsecond-epoch digit string (e.g. `"1500000000123456"`).
///
/// The last 6 digits are microseconds, the rest whole seconds since the Unix
/// epoch (UTC). Strings shorter than 7 digits are rejected.
pub fn decode_micro_epoch(field: &str, raw: &str) -> Result<OffsetDateTime, DecodeError> {
    let (seconds, micros) = split_epoch(field, raw, 6)?;
    OffsetDateTime::from_unix_timestamp_nanos(
        seconds as i128 * NANOS_PER_SECOND + micros as i128 * 1_000,
    )
    .map_err(|_| DecodeError::new(field, format!("epoch out of range in `{raw}`")))
}

/// View a value as a JSON object, or fail naming the field it came from.
pub(crate) fn as_object<'a>(
    field: &str,
    value: &'a Value,
) -> Result<&'a Map<String, Value>, DecodeError> {
    value
        .as_object()
        .ok_or_else(|| DecodeError::new(field, "expected a JSON object"))
}

/// Extract a string field from a payload object.
pub(crate) fn str_field<'a>(
    raw: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a str, DecodeError> {
    raw.get(field)
        .ok_or_else(|| DecodeError::missing(field))?
        .as_str()
        .ok_or_else(|| DecodeError::new(field, "expected a string"))
}

/// Decode a decimal value. Accepts the exchange's string encoding as well
/// as a plain JSON number.
pub(crate) fn decimal_value(field: &str, value: &Value) -> Result<f64, DecodeError> {
    match value {
        Value::String(s) => parse_decimal(field, s),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| DecodeError::new(field, "number out of range")),
        _ => Err(DecodeError::new(field, "expected a decimal string")),
    }
}

/// Extract a decimal field from a payload object.
pub(crate) fn decimal_field(raw: &Map<String, Value>, field: &str) -> Result<f64, DecodeError> {
    let value = raw.get(field).ok_or_else(|| DecodeError::missing(field))?;
    decimal_value(field, value)
}

/// Extract a decimal field that may legitimately be absent.
///
/// Absent, null, or empty-string fields decode to `None`; a present but
/// malformed value is still an error. This is the only way a quantity may
/// come back unpopulated.
pub(crate) fn optional_decimal_field(
    raw: &Map<String, Value>,
    field: &str,
) -> Result<Option<f64>, DecodeError> {
    match raw.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => parse_decimal(field, s).map(Some),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| DecodeError::new(field, "number out of range")),
        Some(_) => Err(DecodeError::new(field, "expected a decimal string")),
    }
}

/// Extract an integer field. Accepts a JSON number or a digit string.
pub(crate) fn int_field(raw: &Map<String, Value>, field: &str) -> Result<i64, DecodeError> {
    match raw.get(field) {
        None => Err(DecodeError::missing(field)),
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| DecodeError::new(field, "expected an integer")),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| DecodeError::new(field, format!("invalid integer string `{s}`"))),
        Some(_) => Err(DecodeError::new(field, "expected an integer")),
    }
}

/// Extract an array field.
pub(crate) fn array_field<'a>(
    raw: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a Vec<Value>, DecodeError> {
    raw.get(field)
        .ok_or_else(|| DecodeError::missing(field))?
        .as_array()
        .ok_or_else(|| DecodeError::new(field, "expected an array"))
}

/// Extract a currency-symbol field, normalized to lowercase.
pub(crate) fn currency_field(
    raw: &Map<String, Value>,
    field: &str,
) -> Result<Currency, DecodeError> {
    Currency::new(str_field(raw, field)?)
        .map_err(|e| DecodeError::new(field, e.reason))
}

/// Extract a string field that may be absent or empty.
///
/// The exchange sends `""` where other APIs would send null (e.g. the cancel
/// date of an order that was never canceled).
pub(crate) fn optional_str_field<'a>(
    raw: &'a Map<String, Value>,
    field: &str,
) -> Result<Option<&'a str>, DecodeError> {
    match raw.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(DecodeError::new(field, "expected a string")),
    }
}

/// Extract a millisecond-epoch string field.
pub(crate) fn milli_epoch_field(
    raw: &Map<String, Value>,
    field: &str,
) -> Result<OffsetDateTime, DecodeError> {
    decode_milli_epoch(field, str_field(raw, field)?)
}

/// Extract a microsecond-epoch string field.
pub(crate) fn micro_epoch_field(
    raw: &Map<String, Value>,
    field: &str,
) -> Result<OffsetDateTime, DecodeError> {
    decode_micro_epoch(field, str_field(raw, field)?)
}

/// Extract a microsecond-epoch string field that may be absent or empty.
pub(crate) fn optional_micro_epoch_field(
    raw: &Map<String, Value>,
    field: &str,
) -> Result<Option<OffsetDateTime>, DecodeError> {
    optional_str_field(raw, field)?
        .map(|s| decode_micro_epoch(field, s))
        .transpose()
}

/// Map an array of payload objects element-wise, preserving input order.
pub(crate) fn map_elements<T, F>(
    field: &str,
    items: &[Value],
    map_one: F,
) -> Result<Vec<T>, DecodeError>
where
    F: Fn(&Map<String, Value>) -> Result<T, DecodeError>,
{
    items
        .iter()
        .enumerate()
        .map(|(index, value)| map_one(as_object(&format!("{field}[{index}]"), value)?))
        .collect()
}

/// Decode an `ALL`-aggregated payload into one entity per currency.
///
/// Every top-level key that is not on [`RESERVED_KEYS`] is taken as a
/// currency symbol and its nested object mapped with `map_one`. One failing
/// entry fails the whole decode; the resulting map is unordered.
pub(crate) fn decode_currency_map<T, F>(
    data: &Map<String, Value>,
    map_one: F,
) -> Result<HashMap<Currency, T>, DecodeError>
where
    F: Fn(&Map<String, Value>) -> Result<T, DecodeError>,
{
    let mut result = HashMap::with_capacity(data.len());
    for (key, value) in data {
        if RESERVED_KEYS.contains(&key.as_str()) {
            continue;
        }
        let currency =
            Currency::new(key).map_err(|e| DecodeError::new(key.clone(), e.reason))?;
        let entity = map_one(as_object(key, value)?)?;
        result.insert(currency, entity);
    }
    Ok(result)
}
