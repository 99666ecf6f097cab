//! Shared request-decoding helpers for HTTP handlers
//!
//! The mobile client posts values typed into text fields, so numbers may
//! arrive as JSON numbers or as numeric strings.

use std::fmt;

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde_json::Value;

/// Accepts a JSON number or a numeric string; `null` and blank strings are absent
struct LenientNumber;

impl Visitor<'_> for LenientNumber {
    type Value = Option<f64>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Some)
            .ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }
}

/// Required lenient number
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer
        .deserialize_any(LenientNumber)?
        .ok_or_else(|| de::Error::invalid_value(Unexpected::Other("empty value"), &LenientNumber))
}

/// Optional lenient number; use with `#[serde(default)]`
pub fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientNumber)
}

/// Interpret a loosely typed `liked` value
///
/// The value is truncated to an integer first, so `0.5` and `"0.5"` are not
/// liked while `"1abc"` is. Booleans map directly. Anything else, including a
/// missing value, counts as not liked.
pub fn liked_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v.trunc() != 0.0),
        Some(Value::String(s)) => leading_integer_is_nonzero(s),
        _ => false,
    }
}

/// Whether the integer a string starts with is non-zero
///
/// Whole numeric strings (`"2.7"`, `"1e3"`) are truncated; otherwise only a
/// leading run of digits counts and text without one reads as zero.
fn leading_integer_is_nonzero(text: &str) -> bool {
    let text = text.trim();
    if let Ok(v) = text.parse::<f64>() {
        return v.is_finite() && v.trunc() != 0.0;
    }
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    digits.chars().take_while(char::is_ascii_digit).any(|c| c != '0')
}

/// A username if the value is a string, otherwise nothing
pub fn username_text(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str)
}
