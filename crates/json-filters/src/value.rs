//! The value-model contract paths operate on.
//!
//! Parsed documents are `serde_json::Value` trees: `Object` is the map variant
//! and `Array` the sequence variant. This module names those variants for error
//! messages and holds the numeric-recognition rules shared by the `Number`
//! step and the numeric getters.

use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// The variant of a [`Value`], as reported in shape errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Map,
    Sequence,
    String,
    Number,
    Boolean,
    Null,
}

impl ValueKind {
    /// Classify a value by its variant.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => ValueKind::Map,
            Value::Array(_) => ValueKind::Sequence,
            Value::String(_) => ValueKind::String,
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Null => ValueKind::Null,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Map => "map",
            ValueKind::Sequence => "sequence",
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Null => "null",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Textual form of a value that may be read as a number.
///
/// Numbers render through `serde_json::Number`'s `Display`, so `11` stays
/// `"11"` and `0.125` stays `"0.125"`. Strings are returned as-is, which lets
/// loosely-typed sources that quote their numbers pass numeric checks.
/// Every other variant is never numeric and yields `None`.
pub fn numeric_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        _ => None,
    }
}

/// Why numeric text could not be read as a float.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FloatError {
    #[error(transparent)]
    Syntax(#[from] ParseFloatError),

    /// A finite literal too large for `f64`, e.g. `1e400`.
    #[error("value out of range")]
    OutOfRange,
}

/// Check that `text` is an integer or floating-point literal.
///
/// Integer parsing is tried first; when it fails the text is parsed as a
/// float and that error is the one reported.
pub fn recognize_number(text: &str) -> Result<(), FloatError> {
    if text.parse::<i64>().is_ok() {
        return Ok(());
    }
    parse_float(text).map(|_| ())
}

/// Strict integer parsing: `"3.14"` and `"1e3"` are rejected.
pub fn parse_int(text: &str) -> Result<i64, ParseIntError> {
    text.parse::<i64>()
}

/// Permissive float parsing: integer and float literals are both accepted.
///
/// Overflowing literals are rejected rather than read as infinity; only an
/// explicit `inf`/`infinity` spelling yields an infinite value.
pub fn parse_float(text: &str) -> Result<f64, FloatError> {
    let parsed = text.parse::<f64>()?;
    if parsed.is_infinite() && !is_infinity_literal(text) {
        return Err(FloatError::OutOfRange);
    }
    Ok(parsed)
}

fn is_infinity_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}
