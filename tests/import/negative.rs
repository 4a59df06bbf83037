//! Negative import tests: every error kind, with path diagnostics.

use serde_json::{json, Value};

use shcanon::import::{bash, posix, ImportError, ImportErrorKind, ImportOptions};

fn lit(text: &str) -> Value {
    Value::Array(text.chars().map(|ch| json!(["C", ch as u32])).collect())
}

fn posix_err(value: &Value) -> ImportError {
    posix::import_program(value, &ImportOptions::default())
        .expect_err("fixture should fail to import")
}

fn bash_err(value: &Value) -> ImportError {
    bash::import_program(value, &ImportOptions::default())
        .expect_err("fixture should fail to import")
}

// ---------------------------------------------------------------------------
// Schema errors
// ---------------------------------------------------------------------------

#[test]
fn posix_unknown_tag() {
    let err = posix_err(&json!(["Bogus", {}]));
    assert_eq!(err.kind, ImportErrorKind::Schema);
    assert!(err.message.contains("Bogus"), "message: {}", err.message);
}

#[test]
fn posix_wrong_payload_arity() {
    let err = posix_err(&json!(["Command", [1, []]]));
    assert_eq!(err.kind, ImportErrorKind::Schema);
    assert_eq!(err.path.to_string(), "$.Command");
}

#[test]
fn posix_error_path_reaches_the_offending_word() {
    let fixture = json!(["Command", [1, [], [[["Z", 1]]], []]]);
    let err = posix_err(&fixture);
    assert_eq!(err.kind, ImportErrorKind::Schema);
    assert_eq!(err.path.to_string(), "$.Command[2][0][0]");
}

#[test]
fn posix_mistyped_line_number() {
    let err = posix_err(&json!(["Command", ["one", [], [], []]]));
    assert_eq!(err.kind, ImportErrorKind::Schema);
}

#[test]
fn posix_here_string_tag_is_not_part_of_the_schema() {
    // The here-string form exists only in the superset schema; the POSIX
    // importer rejects it, which is what keeps it unreachable from here.
    let fixture = json!(["Command", [
        1,
        [],
        [lit("read")],
        [["File", ["ReadingString", 0, lit("hi")]]]
    ]]);
    let err = posix_err(&fixture);
    assert_eq!(err.kind, ImportErrorKind::Schema);
}

#[test]
fn bash_missing_required_field() {
    let err = bash_err(&json!({
        "type": "If",
        "flags": [],
        "redirects": [],
        "value": {"true_case": {"type": "Simple", "value": {"words": []}}}
    }));
    assert_eq!(err.kind, ImportErrorKind::Schema);
    assert!(err.message.contains("test"), "message: {}", err.message);
}

#[test]
fn bash_assignment_without_equals() {
    let err = bash_err(&json!({
        "type": "Simple",
        "flags": [],
        "redirects": [],
        "value": {"line": 1, "words": [{"text": "FOO", "flags": ["assignment"]}], "redirects": []}
    }));
    assert_eq!(err.kind, ImportErrorKind::Schema);
}

#[test]
fn error_display_names_the_path() {
    let err = posix_err(&json!(["Command", [1, []]]));
    let rendered = err.to_string();
    assert!(
        rendered.contains("schema mismatch at $.Command"),
        "rendered: {rendered}"
    );
}

// ---------------------------------------------------------------------------
// Unsupported constructs
// ---------------------------------------------------------------------------

#[test]
fn bash_unknown_command_type() {
    let err = bash_err(&json!({
        "type": "Mapfile",
        "flags": [],
        "redirects": [],
        "value": {}
    }));
    assert_eq!(err.kind, ImportErrorKind::UnsupportedConstruct);
    assert!(err.message.contains("Mapfile"), "message: {}", err.message);
}

#[test]
fn bash_unknown_connector() {
    let err = bash_err(&json!({
        "type": "Connection",
        "flags": [],
        "redirects": [],
        "value": {
            "connector": "|&",
            "first": {"type": "Simple", "flags": [], "redirects": [],
                      "value": {"line": 1, "words": [], "redirects": []}},
            "second": null
        }
    }));
    assert_eq!(err.kind, ImportErrorKind::UnsupportedConstruct);
}

#[test]
fn bash_unknown_redirect_instruction() {
    let err = bash_err(&json!({
        "type": "Simple",
        "flags": [],
        "redirects": [{"instruction": "teleport", "rflags": []}],
        "value": {"line": 1, "words": [], "redirects": []}
    }));
    assert_eq!(err.kind, ImportErrorKind::UnsupportedConstruct);
}

// ---------------------------------------------------------------------------
// Depth bounds
// ---------------------------------------------------------------------------

#[test]
fn posix_depth_bound_fails_instead_of_overflowing() {
    let mut fixture = json!(["Command", [1, [], [lit("true")], []]]);
    for _ in 0..32 {
        fixture = json!(["Not", fixture]);
    }
    let options = ImportOptions { max_depth: 8 };
    let err = posix::import_program(&fixture, &options).expect_err("should hit the bound");
    assert_eq!(err.kind, ImportErrorKind::DepthExceeded);
}

#[test]
fn bash_depth_bound_fails_instead_of_overflowing() {
    let mut fixture = json!({
        "type": "Simple",
        "flags": [],
        "redirects": [],
        "value": {"line": 1, "words": [{"text": "true", "flags": []}], "redirects": []}
    });
    for _ in 0..32 {
        fixture = json!({
            "type": "Group",
            "flags": [],
            "redirects": [],
            "value": {"command": fixture}
        });
    }
    let options = ImportOptions { max_depth: 8 };
    let err = bash::import_program(&fixture, &options).expect_err("should hit the bound");
    assert_eq!(err.kind, ImportErrorKind::DepthExceeded);
}

#[test]
fn default_depth_accepts_realistic_nesting() {
    let mut fixture = json!(["Command", [1, [], [lit("true")], []]]);
    for _ in 0..64 {
        fixture = json!(["Not", fixture]);
    }
    assert!(posix::import_program(&fixture, &ImportOptions::default()).is_ok());
}
