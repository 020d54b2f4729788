//! Error types for path parsing and application.

use crate::value::ValueKind;
use thiserror::Error;

/// Why a single step rejected its input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StepFailure {
    /// The input's variant is not the one the step requires.
    #[error("expected {expected}, found {found}")]
    ShapeMismatch {
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("key \"{0}\" not found")]
    KeyNotFound(String),

    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: i64, len: usize },

    /// The input looked like text but not like a numeric literal.
    #[error("invalid number \"{text}\": {reason}")]
    NumberParse { text: String, reason: String },

    /// Failure reported by a user-supplied step.
    #[error("{0}")]
    Custom(String),
}

impl StepFailure {
    pub fn custom(message: impl Into<String>) -> Self {
        StepFailure::Custom(message.into())
    }

    pub(crate) fn shape(expected: ValueKind, found: &serde_json::Value) -> Self {
        StepFailure::ShapeMismatch {
            expected,
            found: ValueKind::of(found),
        }
    }
}

/// Coarse classification of a [`FilterError`], for callers that branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ShapeMismatch,
    KeyNotFound,
    IndexOutOfRange,
    NumberParse,
    TerminalShapeMismatch,
    /// A custom step failed.
    StepFailed,
    /// A textual path could not be parsed.
    Syntax,
}

/// Errors surfaced to callers of [`crate::Path`] and [`crate::BoundPath`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// Step `position` (zero-based) failed; later steps were not attempted.
    #[error("{step}({position}): {cause}")]
    Step {
        position: usize,
        step: String,
        #[source]
        cause: StepFailure,
    },

    /// The path applied cleanly but the terminal value has the wrong variant
    /// for the getter that was called.
    #[error("expected {expected} at end of path, found {found}")]
    TerminalShape {
        expected: ValueKind,
        found: ValueKind,
    },

    /// The terminal value is numeric text that does not parse as the
    /// requested numeric type.
    #[error("cannot read \"{text}\" as {target}: {reason}")]
    NumberParse {
        text: String,
        target: &'static str,
        reason: String,
    },

    #[error("path syntax error at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },
}

impl FilterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FilterError::Step { cause, .. } => match cause {
                StepFailure::ShapeMismatch { .. } => ErrorKind::ShapeMismatch,
                StepFailure::KeyNotFound(_) => ErrorKind::KeyNotFound,
                StepFailure::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
                StepFailure::NumberParse { .. } => ErrorKind::NumberParse,
                StepFailure::Custom(_) => ErrorKind::StepFailed,
            },
            FilterError::TerminalShape { .. } => ErrorKind::TerminalShapeMismatch,
            FilterError::NumberParse { .. } => ErrorKind::NumberParse,
            FilterError::Syntax { .. } => ErrorKind::Syntax,
        }
    }

    /// Zero-based index of the failing step, when a step failed.
    pub fn position(&self) -> Option<usize> {
        match self {
            FilterError::Step { position, .. } => Some(*position),
            _ => None,
        }
    }

    pub(crate) fn syntax(offset: usize, message: impl Into<String>) -> Self {
        FilterError::Syntax {
            offset,
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout json-filters.
pub type Result<T> = std::result::Result<T, FilterError>;
