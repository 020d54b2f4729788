//! Single navigation steps.
//!
//! A step consumes one value and either passes it on (assertions), projects
//! to a child (selectors), or fails with a [`StepFailure`]. Steps hold no
//! mutable state, so a step can be applied any number of times from any thread.

use crate::error::StepFailure;
use crate::value::{self, ValueKind};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Signature of a user-supplied step operation.
pub type StepFn = dyn for<'v> Fn(&'v Value) -> Result<&'v Value, StepFailure> + Send + Sync;

/// One typed operation in a [`crate::Path`].
#[derive(Clone)]
pub enum Step {
    /// Require a map; pass it through.
    AsMap,
    /// Require a sequence; pass it through.
    AsSequence,
    /// Require a string; pass it through. No coercion from other scalars.
    AsString,
    /// Require a number, or a string holding an integer or float literal.
    AsNumber,
    /// Require a boolean; pass it through.
    AsBool,
    /// Require a map and select the value under `name`.
    Key(String),
    /// Require a sequence and select the element at the index.
    Index(i64),
    /// A named, user-supplied operation.
    Custom {
        description: Arc<str>,
        op: Arc<StepFn>,
    },
}

impl Step {
    /// Short label used in error messages, e.g. `Key` or `Index`.
    pub fn description(&self) -> &str {
        match self {
            Step::AsMap => "Map",
            Step::AsSequence => "Sequence",
            Step::AsString => "String",
            Step::AsNumber => "Number",
            Step::AsBool => "Bool",
            Step::Key(_) => "Key",
            Step::Index(_) => "Index",
            Step::Custom { description, .. } => description.as_ref(),
        }
    }

    pub fn apply<'v>(&self, value: &'v Value) -> Result<&'v Value, StepFailure> {
        match self {
            Step::AsMap => expect_map(value).map(|_| value),
            Step::AsSequence => expect_sequence(value).map(|_| value),
            Step::AsString => match value {
                Value::String(_) => Ok(value),
                other => Err(StepFailure::shape(ValueKind::String, other)),
            },
            Step::AsNumber => check_number(value).map(|()| value),
            Step::AsBool => match value {
                Value::Bool(_) => Ok(value),
                other => Err(StepFailure::shape(ValueKind::Boolean, other)),
            },
            Step::Key(name) => select_key(value, name),
            Step::Index(index) => select_index(value, *index),
            Step::Custom { op, .. } => op(value),
        }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::AsMap => f.write_str("AsMap"),
            Step::AsSequence => f.write_str("AsSequence"),
            Step::AsString => f.write_str("AsString"),
            Step::AsNumber => f.write_str("AsNumber"),
            Step::AsBool => f.write_str("AsBool"),
            Step::Key(name) => f.debug_tuple("Key").field(name).finish(),
            Step::Index(index) => f.debug_tuple("Index").field(index).finish(),
            Step::Custom { description, .. } => f
                .debug_struct("Custom")
                .field("description", description)
                .finish_non_exhaustive(),
        }
    }
}

/// Renders the step in textual path syntax: `.name`, `["odd key"]`, `[3]`,
/// `:map`, and `:<description>` for custom steps.
impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::AsMap => f.write_str(":map"),
            Step::AsSequence => f.write_str(":seq"),
            Step::AsString => f.write_str(":string"),
            Step::AsNumber => f.write_str(":number"),
            Step::AsBool => f.write_str(":bool"),
            Step::Key(name) if is_identifier(name) => write!(f, ".{name}"),
            // serde_json's Display yields a correctly escaped JSON string literal.
            Step::Key(name) => write!(f, "[{}]", Value::String(name.clone())),
            Step::Index(index) => write!(f, "[{index}]"),
            Step::Custom { description, .. } => write!(f, ":<{description}>"),
        }
    }
}

/// Whether `name` can be written as a bare `.name` key step.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn expect_map(value: &Value) -> Result<&Map<String, Value>, StepFailure> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StepFailure::shape(ValueKind::Map, other)),
    }
}

fn expect_sequence(value: &Value) -> Result<&Vec<Value>, StepFailure> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(StepFailure::shape(ValueKind::Sequence, other)),
    }
}

fn check_number(value: &Value) -> Result<(), StepFailure> {
    let text = value::numeric_text(value)
        .ok_or_else(|| StepFailure::shape(ValueKind::Number, value))?;
    value::recognize_number(&text).map_err(|e| StepFailure::NumberParse {
        text: text.into_owned(),
        reason: e.to_string(),
    })
}

fn select_key<'v>(value: &'v Value, name: &str) -> Result<&'v Value, StepFailure> {
    expect_map(value)?
        .get(name)
        .ok_or_else(|| StepFailure::KeyNotFound(name.to_string()))
}

fn select_index(value: &Value, index: i64) -> Result<&Value, StepFailure> {
    let items = expect_sequence(value)?;
    usize::try_from(index)
        .ok()
        .and_then(|i| items.get(i))
        .ok_or(StepFailure::IndexOutOfRange {
            index,
            len: items.len(),
        })
}
