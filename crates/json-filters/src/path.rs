//! Reusable navigation paths.
//!
//! A [`Path`] is an immutable list of [`Step`]s. Builder methods never touch
//! data and never fail: each returns a new path with one more step and leaves
//! the receiver alone, so one base path can be extended into many independent
//! variants. All checking happens in [`Path::apply`].
//!
//! # Textual syntax
//!
//! Paths also have a compact textual form, used by `Display` and `FromStr`:
//!
//! | text            | step                 |
//! |-----------------|----------------------|
//! | `.name`         | `Key("name")`        |
//! | `["any key"]`   | `Key("any key")`     |
//! | `[3]`, `[-1]`   | `Index(3)`, `Index(-1)` |
//! | `:map` `:seq` `:string` `:number` `:bool` | assertions |
//!
//! The empty string and `.` both denote the empty path.

use crate::bound::BoundPath;
use crate::error::{FilterError, Result, StepFailure};
use crate::step::{self, Step};
use crate::value::ValueKind;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// An ordered, immutable sequence of steps.
///
/// Cloning is cheap (the step list is reference counted) and a `Path` is
/// `Send + Sync`, so one instance can be applied from many threads at once.
#[derive(Clone, Debug)]
pub struct Path {
    steps: Arc<[Step]>,
}

impl Path {
    /// The empty path. Applying it yields the root unchanged.
    pub fn new() -> Self {
        Self {
            steps: Arc::from(Vec::new()),
        }
    }

    /// Build a path directly from a list of steps.
    pub fn from_steps(steps: Vec<Step>) -> Self {
        Self {
            steps: Arc::from(steps),
        }
    }

    fn extend(&self, step: Step) -> Self {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend_from_slice(&self.steps);
        steps.push(step);
        Self::from_steps(steps)
    }

    pub fn as_map(&self) -> Self {
        self.extend(Step::AsMap)
    }

    pub fn as_sequence(&self) -> Self {
        self.extend(Step::AsSequence)
    }

    pub fn as_string(&self) -> Self {
        self.extend(Step::AsString)
    }

    pub fn as_number(&self) -> Self {
        self.extend(Step::AsNumber)
    }

    pub fn as_bool(&self) -> Self {
        self.extend(Step::AsBool)
    }

    /// Select the value under `name`. Existence is only checked when applied.
    pub fn key(&self, name: impl Into<String>) -> Self {
        self.extend(Step::Key(name.into()))
    }

    /// Select the element at `index`. Negative and out-of-range indices are
    /// accepted here and fail when applied.
    pub fn index(&self, index: i64) -> Self {
        self.extend(Step::Index(index))
    }

    /// Append a user-supplied step.
    ///
    /// `op` must be a pure function of its input. Its failures are reported
    /// under `description` with the step's position, like built-in steps.
    ///
    /// ```
    /// use json_filters::{Path, StepFailure};
    /// use serde_json::json;
    ///
    /// let positive = Path::new().key("n").then("Positive", |v| match v.as_i64() {
    ///     Some(n) if n > 0 => Ok(v),
    ///     _ => Err(StepFailure::custom("not a positive integer")),
    /// });
    ///
    /// assert_eq!(positive.bind(&json!({"n": 4})).get_int().unwrap(), 4);
    /// let err = positive.bind(&json!({"n": -4})).get().unwrap_err();
    /// assert_eq!(err.to_string(), "Positive(1): not a positive integer");
    /// ```
    pub fn then<F>(&self, description: impl Into<String>, op: F) -> Self
    where
        F: for<'v> Fn(&'v Value) -> std::result::Result<&'v Value, StepFailure>
            + Send
            + Sync
            + 'static,
    {
        let description: String = description.into();
        self.extend(Step::Custom {
            description: Arc::from(description),
            op: Arc::new(op),
        })
    }

    /// A new path running this path's steps followed by `other`'s.
    pub fn join(&self, other: &Path) -> Self {
        let mut steps = Vec::with_capacity(self.steps.len() + other.steps.len());
        steps.extend_from_slice(&self.steps);
        steps.extend_from_slice(&other.steps);
        Self::from_steps(steps)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Fold `root` through every step, left to right.
    ///
    /// Stops at the first failing step; later steps are never run and no
    /// partial result is returned.
    pub fn apply<'v>(&self, root: &'v Value) -> Result<&'v Value> {
        let mut current = root;
        for (position, step) in self.steps.iter().enumerate() {
            current = step.apply(current).map_err(|cause| {
                log::debug!("step {position} ({}) failed: {cause}", step.description());
                FilterError::Step {
                    position,
                    step: step.description().to_string(),
                    cause,
                }
            })?;
            log::trace!(
                "step {position} ({}) produced a {}",
                step.description(),
                ValueKind::of(current)
            );
        }
        Ok(current)
    }

    /// Pair this path with a root value for later evaluation.
    pub fn bind<'p, 'v>(&'p self, root: &'v Value) -> BoundPath<'p, 'v> {
        BoundPath::new(self, root)
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str(".");
        }
        for step in self.steps.iter() {
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = FilterError;

    fn from_str(input: &str) -> Result<Self> {
        PathParser::new(input).parse()
    }
}

/// Hand-written scanner for the textual path syntax.
struct PathParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> PathParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn parse(mut self) -> Result<Path> {
        if self.input.trim() == "." {
            return Ok(Path::new());
        }

        let mut steps = Vec::new();
        loop {
            self.skip_whitespace();
            let start = self.pos;
            let Some(c) = self.bump() else {
                break;
            };
            let step = match c {
                '.' => self.dotted_key(start)?,
                '[' => self.bracketed(start)?,
                ':' => self.assertion(start)?,
                '*' => return Err(FilterError::syntax(start, "wildcards are not supported")),
                other => {
                    return Err(FilterError::syntax(
                        start,
                        format!("unexpected character '{other}'"),
                    ))
                }
            };
            steps.push(step);
        }
        Ok(Path::from_steps(steps))
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let input = self.input;
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        &input[start..self.pos]
    }

    fn dotted_key(&mut self, start: usize) -> Result<Step> {
        match self.peek() {
            Some('.') => {
                return Err(FilterError::syntax(
                    start,
                    "recursive descent is not supported",
                ))
            }
            Some('*') => return Err(FilterError::syntax(start, "wildcards are not supported")),
            _ => {}
        }
        let name = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !step::is_identifier(name) {
            return Err(FilterError::syntax(
                start,
                "expected a key name after '.'; quote other keys as [\"...\"]",
            ));
        }
        Ok(Step::Key(name.to_string()))
    }

    fn bracketed(&mut self, start: usize) -> Result<Step> {
        self.skip_whitespace();
        let step = match self.peek() {
            Some('"') => Step::Key(self.quoted_key()?),
            Some(c) if c == '-' || c.is_ascii_digit() => Step::Index(self.index()?),
            Some('*') => return Err(FilterError::syntax(start, "wildcards are not supported")),
            Some('?') => return Err(FilterError::syntax(start, "filters are not supported")),
            Some(':') => return Err(FilterError::syntax(start, "slices are not supported")),
            _ => {
                return Err(FilterError::syntax(
                    start,
                    "expected a quoted key or an index inside brackets",
                ))
            }
        };
        self.skip_whitespace();
        match self.bump() {
            Some(']') => Ok(step),
            Some(':') => Err(FilterError::syntax(start, "slices are not supported")),
            Some(',') => Err(FilterError::syntax(start, "unions are not supported")),
            _ => Err(FilterError::syntax(start, "unclosed bracket")),
        }
    }

    fn quoted_key(&mut self) -> Result<String> {
        let start = self.pos;
        self.bump();
        loop {
            match self.bump() {
                None => return Err(FilterError::syntax(start, "unterminated quoted key")),
                Some('\\') => {
                    self.bump();
                }
                Some('"') => break,
                Some(_) => {}
            }
        }
        serde_json::from_str(&self.input[start..self.pos])
            .map_err(|e| FilterError::syntax(start, format!("invalid quoted key: {e}")))
    }

    fn index(&mut self) -> Result<i64> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.bump();
        }
        self.take_while(|c| c.is_ascii_digit());
        let text = &self.input[start..self.pos];
        text.parse::<i64>()
            .map_err(|e| FilterError::syntax(start, format!("invalid index '{text}': {e}")))
    }

    fn assertion(&mut self, start: usize) -> Result<Step> {
        let name = self.take_while(|c| c.is_ascii_alphabetic());
        match name {
            "map" => Ok(Step::AsMap),
            "seq" | "sequence" => Ok(Step::AsSequence),
            "string" => Ok(Step::AsString),
            "number" => Ok(Step::AsNumber),
            "bool" | "boolean" => Ok(Step::AsBool),
            "" => Err(FilterError::syntax(
                start,
                "expected an assertion name after ':'",
            )),
            other => Err(FilterError::syntax(
                start,
                format!("unknown assertion ':{other}'"),
            )),
        }
    }
}
