//! Redirection printing: descriptor tagging, defaults, and the
//! POSIX-dialect contract violations that must fail loud.

use shcanon::ast::{
    word_from_str, AstNode, DupKind, DupRedir, DupTarget, FdSpec, FileRedir, FileRedirKind,
    Redirect, SimpleCommand, SingleArgRedir,
};
use shcanon::print::Dialect;

fn with_redirect(text: &str, redirect: Redirect) -> AstNode {
    AstNode::Simple(SimpleCommand {
        line: Some(1),
        assignments: Vec::new(),
        words: text.split_whitespace().map(word_from_str).collect(),
        redirects: vec![redirect],
    })
}

fn file(kind: FileRedirKind, fd: FdSpec, target: &str) -> Redirect {
    Redirect::File(FileRedir {
        kind,
        fd,
        target: word_from_str(target),
    })
}

// ---------------------------------------------------------------------------
// Descriptor tagging
// ---------------------------------------------------------------------------

#[test]
fn fixed_descriptor_prints_bare() {
    let tree = with_redirect("work", file(FileRedirKind::To, FdSpec::Fixed(2), "err"));
    assert_eq!(tree.pretty(Dialect::Posix), "work 2> err");
    assert_eq!(tree.pretty(Dialect::Bash), "work 2> err");
}

#[test]
fn descriptor_variable_prints_braced() {
    let tree = with_redirect(
        "exec",
        file(FileRedirKind::To, FdSpec::Var("fd".to_owned()), "log.txt"),
    );
    assert_eq!(tree.pretty(Dialect::Bash), "exec {fd}> log.txt");
}

#[test]
fn default_descriptors_are_suppressed() {
    let out = with_redirect("work", file(FileRedirKind::To, FdSpec::Fixed(1), "out"));
    assert_eq!(out.pretty(Dialect::Posix), "work > out");

    let input = with_redirect("work", file(FileRedirKind::From, FdSpec::Fixed(0), "in"));
    assert_eq!(input.pretty(Dialect::Posix), "work < in");

    // The output default does not apply to input operators.
    let swapped = with_redirect("work", file(FileRedirKind::From, FdSpec::Fixed(1), "in"));
    assert_eq!(swapped.pretty(Dialect::Posix), "work 1< in");
}

#[test]
fn dup_and_move_targets() {
    let dup = with_redirect(
        "work",
        Redirect::Dup(DupRedir {
            kind: DupKind::ToFd,
            fd: FdSpec::Fixed(2),
            target: DupTarget::Fd(1),
            move_fd: false,
        }),
    );
    assert_eq!(dup.pretty(Dialect::Posix), "work 2>&1");

    let mv = with_redirect(
        "work",
        Redirect::Dup(DupRedir {
            kind: DupKind::FromFd,
            fd: FdSpec::Fixed(3),
            target: DupTarget::Word(word_from_str("$saved")),
            move_fd: true,
        }),
    );
    assert_eq!(mv.pretty(Dialect::Bash), "work 3<&\\$saved-");
}

#[test]
fn single_argument_forms() {
    let close = with_redirect(
        "work",
        Redirect::SingleArg(SingleArgRedir::CloseThis {
            fd: FdSpec::Fixed(2),
        }),
    );
    assert_eq!(close.pretty(Dialect::Bash), "work 2>&-");

    let both = with_redirect(
        "work",
        Redirect::SingleArg(SingleArgRedir::ErrAndOut {
            target: word_from_str("all.log"),
        }),
    );
    assert_eq!(both.pretty(Dialect::Bash), "work &> all.log");
}

// ---------------------------------------------------------------------------
// POSIX-dialect contract violations fail loud
// ---------------------------------------------------------------------------

#[test]
#[should_panic(expected = "descriptor variable")]
fn descriptor_variable_in_posix_output_panics() {
    let tree = with_redirect(
        "exec",
        file(FileRedirKind::To, FdSpec::Var("fd".to_owned()), "log.txt"),
    );
    let _ = tree.pretty(Dialect::Posix);
}

#[test]
#[should_panic(expected = "here-string")]
fn here_string_in_posix_output_panics() {
    let tree = with_redirect(
        "read",
        file(FileRedirKind::HereString, FdSpec::Fixed(0), "hello"),
    );
    let _ = tree.pretty(Dialect::Posix);
}

#[test]
#[should_panic(expected = "single-argument")]
fn err_and_out_in_posix_output_panics() {
    let tree = with_redirect(
        "work",
        Redirect::SingleArg(SingleArgRedir::ErrAndOut {
            target: word_from_str("all.log"),
        }),
    );
    let _ = tree.pretty(Dialect::Posix);
}
