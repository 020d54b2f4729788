//! Paths bound to a root value, with typed getters.
//!
//! A [`BoundPath`] caches nothing: every getter re-applies the whole path to
//! the root, then checks the terminal value's variant. Getters never coerce
//! across variants, with one exception for numbers: a string holding an
//! integer or float literal is read as that number.

use crate::error::{FilterError, Result};
use crate::path::Path;
use crate::value::{self, FloatError, ValueKind};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// A [`Path`] paired with the root value it will be applied to.
#[derive(Debug, Clone, Copy)]
pub struct BoundPath<'p, 'v> {
    path: &'p Path,
    root: &'v Value,
}

impl<'p, 'v> BoundPath<'p, 'v> {
    pub fn new(path: &'p Path, root: &'v Value) -> Self {
        Self { path, root }
    }

    pub fn path(&self) -> &'p Path {
        self.path
    }

    pub fn root(&self) -> &'v Value {
        self.root
    }

    /// Apply the path to the root and return the terminal value.
    pub fn get(&self) -> Result<&'v Value> {
        self.path.apply(self.root)
    }

    /// Whether the path applies cleanly. The error, if any, is discarded.
    pub fn is_valid(&self) -> bool {
        self.get().is_ok()
    }

    pub fn get_string(&self) -> Result<&'v str> {
        match self.get()? {
            Value::String(s) => Ok(s.as_str()),
            other => Err(terminal_shape(ValueKind::String, other)),
        }
    }

    pub fn get_bool(&self) -> Result<bool> {
        match self.get()? {
            Value::Bool(b) => Ok(*b),
            other => Err(terminal_shape(ValueKind::Boolean, other)),
        }
    }

    pub fn get_map(&self) -> Result<&'v Map<String, Value>> {
        match self.get()? {
            Value::Object(map) => Ok(map),
            other => Err(terminal_shape(ValueKind::Map, other)),
        }
    }

    pub fn get_sequence(&self) -> Result<&'v [Value]> {
        match self.get()? {
            Value::Array(items) => Ok(items.as_slice()),
            other => Err(terminal_shape(ValueKind::Sequence, other)),
        }
    }

    /// Read the terminal value as an integer.
    ///
    /// Parsing is strict: `11` and `"11"` succeed, but `6.25` fails with a
    /// number parse error even though [`BoundPath::get_float`] accepts it.
    pub fn get_int(&self) -> Result<i64> {
        let text = numeric_text(self.get()?)?;
        value::parse_int(&text).map_err(|e| FilterError::NumberParse {
            text: text.into_owned(),
            target: "integer",
            reason: e.to_string(),
        })
    }

    /// Read the terminal value as a float. Integer literals are accepted.
    pub fn get_float(&self) -> Result<f64> {
        let text = numeric_text(self.get()?)?;
        value::parse_float(&text).map_err(|e| FilterError::NumberParse {
            text: text.into_owned(),
            target: "float",
            reason: e.to_string(),
        })
    }
}

fn terminal_shape(expected: ValueKind, found: &Value) -> FilterError {
    FilterError::TerminalShape {
        expected,
        found: ValueKind::of(found),
    }
}

/// Numbers always qualify; strings only when they are written as a numeric
/// literal, even one too large to represent. Anything else, including
/// non-numeric strings, is a terminal shape error.
fn numeric_text(terminal: &Value) -> Result<Cow<'_, str>> {
    match value::numeric_text(terminal) {
        Some(text) if is_numeric_literal(&text) => Ok(text),
        _ => Err(terminal_shape(ValueKind::Number, terminal)),
    }
}

fn is_numeric_literal(text: &str) -> bool {
    !matches!(value::recognize_number(text), Err(FloatError::Syntax(_)))
}
