/// End-to-end tests: reusable paths bound to a parsed document.
///
/// One set of paths is built up front from a shared base and then applied to
/// the sample document, the way callers use the crate.
use json_filters::{ErrorKind, FilterError, Path, StepFailure, ValueKind};
use serde_json::Value;

// ============================================================================
// Fixture
// ============================================================================

const SAMPLE: &str = r#"{
  "z": 123,
  "a": {
    "b": 11,
    "c": ["a", 2, false]
  },
  "d": [0, 1, 2, 3],
  "e": {
    "f": [12, {
      "g": 3.1415
    }]
  }
}"#;

fn sample() -> Value {
    serde_json::from_str(SAMPLE).expect("sample document must parse")
}

// ============================================================================
// 1. Scenarios
// ============================================================================

#[test]
fn top_level_integer() {
    let doc = sample();
    let z = Path::new().key("z");
    assert_eq!(z.bind(&doc).get_int().unwrap(), 123);
}

#[test]
fn nested_integer() {
    let doc = sample();
    let b = Path::new().key("a").key("b");
    assert_eq!(b.bind(&doc).get_int().unwrap(), 11);
}

#[test]
fn string_inside_sequence() {
    let doc = sample();
    let c0 = Path::new().key("a").key("c").index(0);
    assert_eq!(c0.bind(&doc).get_string().unwrap(), "a");
}

#[test]
#[allow(clippy::approx_constant)]
fn float_deep_in_mixed_containers() {
    let doc = sample();
    let g = Path::new().key("e").key("f").index(1).key("g");
    assert_eq!(g.bind(&doc).get_float().unwrap(), 3.1415);
}

#[test]
fn int_on_string_terminal_is_terminal_shape_mismatch() {
    let doc = sample();
    let c0 = Path::new().key("a").key("c").index(0);
    let err = c0.bind(&doc).get_int().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TerminalShapeMismatch);
    assert_eq!(
        err,
        FilterError::TerminalShape {
            expected: ValueKind::Number,
            found: ValueKind::String,
        }
    );
}

#[test]
fn missing_key_names_step_zero() {
    let doc = sample();
    let err = Path::new().key("missing").bind(&doc).get().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyNotFound);
    assert_eq!(err.position(), Some(0));
    assert_eq!(err.to_string(), "Key(0): key \"missing\" not found");
}

#[test]
fn index_past_end_is_out_of_range() {
    let doc = sample();
    let err = Path::new().key("d").index(9).bind(&doc).get().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
    assert_eq!(
        err,
        FilterError::Step {
            position: 1,
            step: "Index".to_string(),
            cause: StepFailure::IndexOutOfRange { index: 9, len: 4 },
        }
    );
}

// ============================================================================
// 2. Shared base paths
// ============================================================================

#[test]
fn one_base_many_variants() {
    let doc = sample();
    let base = Path::new();
    let a = base.key("a");
    let z = base.key("z");
    let b = a.key("b");
    let c = a.key("c");

    assert_eq!(z.bind(&doc).get_int().unwrap(), 123);
    assert_eq!(b.bind(&doc).get_int().unwrap(), 11);
    assert_eq!(c.bind(&doc).get_sequence().unwrap().len(), 3);
    assert_eq!(a.bind(&doc).get_map().unwrap().len(), 2);
    // The base is still the empty path.
    assert_eq!(base.bind(&doc).get().unwrap(), &doc);
}

#[test]
fn same_path_bound_to_many_documents() {
    let name = Path::new().key("user").key("name").as_string();
    let docs: Vec<Value> = ["Ada", "Grace", "Barbara"]
        .iter()
        .map(|n| serde_json::json!({"user": {"name": n}}))
        .collect();

    let names: Vec<&str> = docs
        .iter()
        .map(|d| name.bind(d).get_string().unwrap())
        .collect();
    assert_eq!(names, vec!["Ada", "Grace", "Barbara"]);
}

// ============================================================================
// 3. Assertion steps inside paths
// ============================================================================

#[test]
fn assertion_steps_check_shape_mid_path() {
    let doc = sample();
    let ok = Path::new().as_map().key("a").as_map().key("c").as_sequence().index(2).as_bool();
    assert!(!ok.bind(&doc).get_bool().unwrap());

    let err = Path::new().key("a").as_sequence().bind(&doc).get().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    assert_eq!(err.position(), Some(1));
    assert_eq!(err.to_string(), "Sequence(1): expected sequence, found map");
}

#[test]
fn number_assertion_accepts_ints_and_floats() {
    let doc = sample();
    assert!(Path::new().key("z").as_number().bind(&doc).is_valid());
    assert!(Path::new()
        .key("e")
        .key("f")
        .index(1)
        .key("g")
        .as_number()
        .bind(&doc)
        .is_valid());
}

#[test]
fn number_assertion_on_plain_string_is_parse_error() {
    let doc = sample();
    let err = Path::new()
        .key("a")
        .key("c")
        .index(0)
        .as_number()
        .bind(&doc)
        .get()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NumberParse);
    assert_eq!(err.position(), Some(3));
}

#[test]
fn string_assertion_does_not_coerce_numbers() {
    let doc = sample();
    let err = Path::new().key("z").as_string().bind(&doc).get().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
}

// ============================================================================
// 4. Validity checks
// ============================================================================

#[test]
fn is_valid_collapses_errors() {
    let doc = sample();
    assert!(Path::new().key("d").index(3).bind(&doc).is_valid());
    assert!(!Path::new().key("d").index(4).bind(&doc).is_valid());
    assert!(!Path::new().key("d").index(-1).bind(&doc).is_valid());
    assert!(!Path::new().key("z").key("y").bind(&doc).is_valid());
}

#[test]
fn is_valid_ignores_terminal_shape() {
    let doc = sample();
    let c0 = Path::new().key("a").key("c").index(0);
    assert!(c0.bind(&doc).is_valid());
    assert!(c0.bind(&doc).get_int().is_err());
}

// ============================================================================
// 5. Loosely-typed numbers
// ============================================================================

#[test]
fn quoted_numbers_are_numeric() {
    let doc: Value = serde_json::from_str(r#"{"count":"17","ratio":"0.5","flag":true}"#).unwrap();
    assert_eq!(Path::new().key("count").bind(&doc).get_int().unwrap(), 17);
    assert_eq!(Path::new().key("count").bind(&doc).get_float().unwrap(), 17.0);
    assert_eq!(Path::new().key("ratio").bind(&doc).get_float().unwrap(), 0.5);
    assert_eq!(
        Path::new().key("ratio").bind(&doc).get_int().unwrap_err().kind(),
        ErrorKind::NumberParse
    );
    assert_eq!(
        Path::new().key("flag").bind(&doc).get_int().unwrap_err().kind(),
        ErrorKind::TerminalShapeMismatch
    );
}

#[test]
fn float_literal_text_fails_int_but_not_float() {
    let doc: Value = serde_json::from_str(r#"["3.14", 3.0]"#).unwrap();
    let text = Path::new().index(0);
    let whole_float = Path::new().index(1);

    assert_eq!(text.bind(&doc).get_int().unwrap_err().kind(), ErrorKind::NumberParse);
    assert_eq!(text.bind(&doc).get_float().unwrap().to_string(), "3.14");
    assert_eq!(
        whole_float.bind(&doc).get_int().unwrap_err().kind(),
        ErrorKind::NumberParse
    );
    assert_eq!(whole_float.bind(&doc).get_float().unwrap(), 3.0);
}

#[test]
fn overflowing_float_text_is_rejected() {
    let doc: Value = serde_json::from_str(r#"{"big":"1e400","inf":"-Infinity"}"#).unwrap();
    let big = Path::new().key("big");

    let err = big.as_number().bind(&doc).get().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NumberParse);
    assert_eq!(err.position(), Some(1));
    assert_eq!(
        err.to_string(),
        "Number(1): invalid number \"1e400\": value out of range"
    );
    assert!(!big.as_number().bind(&doc).is_valid());

    let err = big.bind(&doc).get_float().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NumberParse);
    assert_eq!(err.to_string(), "cannot read \"1e400\" as float: value out of range");

    // Spelled-out infinity is a literal, not an overflow.
    let inf = Path::new().key("inf");
    assert!(inf.as_number().bind(&doc).is_valid());
    assert_eq!(inf.bind(&doc).get_float().unwrap(), f64::NEG_INFINITY);
}
