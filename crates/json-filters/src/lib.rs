//! # json-filters
//!
//! Reusable, composable path queries over parsed JSON trees.
//!
//! Describe a navigation route once ("key `a`, then index `0`, then expect a
//! string"), then bind it to as many documents as you like and read a typed
//! result or a precise error naming the step that broke.
//!
//! ## Quick start
//!
//! ```rust
//! use json_filters::{ErrorKind, Path};
//! use serde_json::json;
//!
//! let doc = json!({"a": {"b": 11, "c": ["x", 2, false]}});
//!
//! let a = Path::new().key("a");
//! let b = a.key("b");
//! let first = a.key("c").index(0);
//!
//! assert_eq!(b.bind(&doc).get_int().unwrap(), 11);
//! assert_eq!(first.bind(&doc).get_string().unwrap(), "x");
//!
//! let err = a.key("missing").bind(&doc).get().unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::KeyNotFound);
//! assert_eq!(err.to_string(), "Key(1): key \"missing\" not found");
//! ```
//!
//! Paths can also be written as text:
//!
//! ```rust
//! use json_filters::Path;
//! use serde_json::json;
//!
//! let path: Path = ".a.c[1]:number".parse().unwrap();
//! let doc = json!({"a": {"c": ["x", 2]}});
//! assert_eq!(path.bind(&doc).get_int().unwrap(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`path`] — `Path` building, application and the textual syntax
//! - [`bound`] — `BoundPath` and its typed getters
//! - [`step`] — the individual assertion and selector steps
//! - [`value`] — variant names and numeric recognition for `serde_json::Value`
//! - [`error`] — error types

pub mod bound;
pub mod error;
pub mod path;
pub mod step;
pub mod value;

pub use bound::BoundPath;
pub use error::{ErrorKind, FilterError, StepFailure};
pub use path::Path;
pub use step::Step;
pub use value::ValueKind;
