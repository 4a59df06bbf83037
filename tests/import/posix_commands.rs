//! Tests for the POSIX-style importer: command structure mapping.

use serde_json::{json, Value};

use shcanon::ast::{AstNode, FdSpec, Redirect};
use shcanon::import::{posix, ImportOptions};
use shcanon::print::Dialect;

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

/// A literal word in the POSIX parser's serialization: one `["C", code]`
/// entry per character.
fn lit(text: &str) -> Value {
    Value::Array(text.chars().map(|ch| json!(["C", ch as u32])).collect())
}

/// A bare simple command node.
fn cmd(text: &str) -> Value {
    let words: Vec<Value> = text.split_whitespace().map(lit).collect();
    json!(["Command", [1, [], words, []]])
}

fn import(value: &Value) -> AstNode {
    posix::import_program(value, &ImportOptions::default()).expect("fixture should import")
}

fn pretty(value: &Value, dialect: Dialect) -> String {
    import(value).pretty(dialect)
}

// ---------------------------------------------------------------------------
// Simple commands
// ---------------------------------------------------------------------------

#[test]
fn simple_command_words() {
    let tree = import(&cmd("echo hello world"));
    let AstNode::Simple(ref simple) = tree else {
        panic!("expected a simple command, got {tree:?}");
    };
    assert_eq!(simple.words.len(), 3);
    assert_eq!(simple.line, Some(1));
    assert_eq!(tree.pretty(Dialect::Posix), "echo hello world");
}

#[test]
fn simple_command_assignments() {
    let fixture = json!(["Command", [1, [["FOO", lit("bar")]], [], []]]);
    let tree = import(&fixture);
    let AstNode::Simple(ref simple) = tree else {
        panic!("expected a simple command, got {tree:?}");
    };
    assert_eq!(simple.assignments.len(), 1);
    assert_eq!(simple.assignments[0].name, "FOO");
    assert_eq!(tree.pretty(Dialect::Posix), "FOO=bar");
}

#[test]
fn assignment_prefix_before_words() {
    let fixture = json!(["Command", [1, [["X", lit("1")]], [lit("env")], []]]);
    assert_eq!(pretty(&fixture, Dialect::Posix), "X=1 env");
}

#[test]
fn empty_command_prints_nothing() {
    let fixture = json!(["Command", [-1, [], [], []]]);
    let tree = import(&fixture);
    assert!(tree.is_empty_command());
    assert_eq!(tree.pretty(Dialect::Posix), "");
}

// ---------------------------------------------------------------------------
// Connections
// ---------------------------------------------------------------------------

#[test]
fn pipeline() {
    let fixture = json!(["Pipe", [false, [cmd("ls"), cmd("wc -l")]]]);
    let tree = import(&fixture);
    let AstNode::Pipe(ref pipe) = tree else {
        panic!("expected a pipeline, got {tree:?}");
    };
    assert!(!pipe.background);
    assert_eq!(pipe.commands.len(), 2);
    assert_eq!(tree.pretty(Dialect::Posix), "ls | wc -l");
}

#[test]
fn background_pipeline_wraps_in_braces() {
    let fixture = json!(["Pipe", [true, [cmd("ls"), cmd("wc -l")]]]);
    assert_eq!(pretty(&fixture, Dialect::Bash), "{ ls | wc -l; } &");
    assert_eq!(pretty(&fixture, Dialect::Posix), "{ ls | wc -l } &");
}

#[test]
fn and_or_operands_are_braced() {
    let fixture = json!(["And", [cmd("true"), cmd("echo yes")]]);
    let tree = import(&fixture);
    let AstNode::And(ref and) = tree else {
        panic!("expected an and node, got {tree:?}");
    };
    assert!(!and.no_braces);
    assert_eq!(tree.pretty(Dialect::Bash), "{ true; } && { echo yes; }");
    assert_eq!(tree.pretty(Dialect::Posix), "{ true } && { echo yes }");

    let fixture = json!(["Or", [cmd("false"), cmd("echo no")]]);
    assert_eq!(pretty(&fixture, Dialect::Bash), "{ false; } || { echo no; }");
}

#[test]
fn explicit_semi_keeps_the_semicolon() {
    let fixture = json!(["Semi", [cmd("a"), cmd("b")]]);
    let tree = import(&fixture);
    let AstNode::Semi(ref semi) = tree else {
        panic!("expected a semi node, got {tree:?}");
    };
    assert!(semi.semicolon);
    assert_eq!(tree.pretty(Dialect::Posix), "a ; b");
}

#[test]
fn top_level_list_folds_with_newline_sequencing() {
    let fixture = json!([cmd("a"), cmd("b"), cmd("c")]);
    let tree = import(&fixture);
    let AstNode::Semi(ref semi) = tree else {
        panic!("expected a semi chain, got {tree:?}");
    };
    assert!(!semi.semicolon);
    assert_eq!(tree.pretty(Dialect::Posix), "a\nb\nc");
}

#[test]
fn empty_program_is_the_empty_command() {
    let tree = import(&json!([]));
    assert!(tree.is_empty_command());
}

#[test]
fn negation() {
    let fixture = json!(["Not", cmd("probe")]);
    assert_eq!(pretty(&fixture, Dialect::Bash), "! { probe; }");
    assert_eq!(pretty(&fixture, Dialect::Posix), "! { probe }");
}

// ---------------------------------------------------------------------------
// Compounds
// ---------------------------------------------------------------------------

#[test]
fn if_without_else() {
    let fixture = json!(["If", [cmd("true"), cmd("echo y"), null]]);
    assert_eq!(pretty(&fixture, Dialect::Posix), "if true; then echo y; fi");
}

#[test]
fn if_with_empty_else_closes_directly() {
    let empty = json!(["Command", [-1, [], [], []]]);
    let fixture = json!(["If", [cmd("true"), cmd("echo y"), empty]]);
    assert_eq!(pretty(&fixture, Dialect::Posix), "if true; then echo y; fi");
}

#[test]
fn if_else_chain_prints_elif() {
    let inner = json!(["If", [cmd("other"), cmd("echo o"), null]]);
    let fixture = json!(["If", [cmd("first"), cmd("echo f"), inner]]);
    assert_eq!(
        pretty(&fixture, Dialect::Posix),
        "if first; then echo f; elif other; then echo o; fi"
    );
}

#[test]
fn while_loop() {
    let fixture = json!(["While", [cmd("probe"), cmd("work")]]);
    assert_eq!(pretty(&fixture, Dialect::Posix), "while probe; do work; done");
}

#[test]
fn for_loop() {
    let fixture = json!(["For", [1, [lit("a"), lit("b")], cmd("echo x"), "i"]]);
    assert_eq!(
        pretty(&fixture, Dialect::Posix),
        "for i in a b; do echo x; done"
    );
}

#[test]
fn case_with_two_arms() {
    let fixture = json!(["Case", [
        1,
        lit("target"),
        [
            {"cpattern": [lit("a"), lit("b")], "cbody": cmd("echo ab")},
            {"cpattern": [lit("*")], "cbody": null}
        ]
    ]]);
    assert_eq!(
        pretty(&fixture, Dialect::Posix),
        "case target in a|b) echo ab;; *) ;; esac"
    );
}

#[test]
fn function_definition() {
    let fixture = json!(["Defun", [1, "greet", cmd("echo hi")]]);
    let tree = import(&fixture);
    let AstNode::Defun(ref defun) = tree else {
        panic!("expected a function definition, got {tree:?}");
    };
    assert!(!defun.reserved_word);
    assert_eq!(tree.pretty(Dialect::Posix), "greet () {\necho hi\n}");
    // The portable form is also the superset form without the keyword.
    assert_eq!(tree.pretty(Dialect::Bash), "greet () {\necho hi\n}");
}

#[test]
fn subshell() {
    let fixture = json!(["Subshell", [1, json!(["Semi", [cmd("a"), cmd("b")]]), []]]);
    assert_eq!(pretty(&fixture, Dialect::Posix), "( a ; b )");
}

#[test]
fn background_job() {
    let fixture = json!(["Background", [1, cmd("sleep 1"), []]]);
    let tree = import(&fixture);
    let AstNode::Background(ref bg) = tree else {
        panic!("expected a background node, got {tree:?}");
    };
    assert!(!bg.after_ampersand);
    assert!(!bg.no_braces);
    assert_eq!(tree.pretty(Dialect::Bash), "{ sleep 1; } &");
}

#[test]
fn redirections_attach_to_wrapped_command() {
    let fixture = json!(["Redir", [
        1,
        cmd("work"),
        [["File", ["To", 1, lit("out.log")]]]
    ]]);
    let tree = import(&fixture);
    let AstNode::Redir(ref redir) = tree else {
        panic!("expected a redir node, got {tree:?}");
    };
    assert_eq!(redir.redirects.len(), 1);
    match &redir.redirects[0] {
        Redirect::File(file) => assert_eq!(file.fd, FdSpec::Fixed(1)),
        other => panic!("expected a file redirect, got {other:?}"),
    }
    assert_eq!(tree.pretty(Dialect::Posix), "work > out.log");
}

#[test]
fn import_is_deterministic() {
    let fixture = json!([
        cmd("a"),
        json!(["If", [cmd("true"), cmd("echo y"), null]]),
        json!(["Pipe", [false, [cmd("ls"), cmd("wc")]]])
    ]);
    assert_eq!(import(&fixture), import(&fixture));
}
