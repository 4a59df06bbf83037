//! Redirection rendering, including here-document headers and bodies.

use crate::ast::{
    DupKind, DupRedir, DupTarget, FdSpec, FileRedir, FileRedirKind, HeredocKind, HeredocRedir,
    Redirect, SingleArgRedir,
};
use crate::print::word::{print_word, QuoteMode};
use crate::print::Dialect;

/// Renders a redirection list, each entry preceded by a space.
///
/// With `ignore_heredocs` the here-documents are skipped; callers that defer
/// them print the headers and bodies themselves.
pub(crate) fn print_redirects(
    redirects: &[Redirect],
    dialect: Dialect,
    ignore_heredocs: bool,
) -> String {
    let mut out = String::new();
    for redirect in redirects {
        if ignore_heredocs && redirect.is_heredoc() {
            continue;
        }
        out.push(' ');
        out.push_str(&print_redirect(redirect, dialect));
    }
    out
}

/// The here-documents of a redirection list as deferred `(header, body)`
/// pairs, in source order.
pub(crate) fn heredoc_parts(redirects: &[Redirect], dialect: Dialect) -> Vec<(String, String)> {
    let mut deferred = Vec::new();
    for redirect in redirects {
        if let Redirect::Heredoc(heredoc) = redirect {
            let marker = heredoc_marker(heredoc, dialect);
            deferred.push((
                heredoc_header(heredoc, &marker, dialect),
                heredoc_body(heredoc, &marker, dialect),
            ));
        }
    }
    deferred
}

/// Renders one redirection.
pub(crate) fn print_redirect(redirect: &Redirect, dialect: Dialect) -> String {
    match redirect {
        Redirect::File(file) => print_file(file, dialect),
        Redirect::Dup(dup) => print_dup(dup, dialect),
        Redirect::Heredoc(heredoc) => {
            let marker = heredoc_marker(heredoc, dialect);
            format!(
                "{}\n{}",
                heredoc_header(heredoc, &marker, dialect),
                heredoc_body(heredoc, &marker, dialect)
            )
        }
        Redirect::SingleArg(single) => print_single_arg(single, dialect),
    }
}

fn print_file(file: &FileRedir, dialect: Dialect) -> String {
    let op = match file.kind {
        FileRedirKind::To => ">",
        FileRedirKind::Clobber => ">|",
        FileRedirKind::From => "<",
        FileRedirKind::FromTo => "<>",
        FileRedirKind::Append => ">>",
        FileRedirKind::HereString => {
            if dialect == Dialect::Posix {
                panic!("here-string redirection is not representable in POSIX output");
            }
            "<<<"
        }
    };
    format!(
        "{}{op} {}",
        fd_prefix(&file.fd, file.kind.default_fd(), dialect),
        print_word(&file.target, QuoteMode::Unquoted, dialect)
    )
}

fn print_dup(dup: &DupRedir, dialect: Dialect) -> String {
    let op = match dup.kind {
        DupKind::ToFd => ">&",
        DupKind::FromFd => "<&",
    };
    let target = match &dup.target {
        DupTarget::Fd(fd) => fd.to_string(),
        DupTarget::Word(word) => print_word(word, QuoteMode::Unquoted, dialect),
    };
    let move_suffix = if dup.move_fd { "-" } else { "" };
    format!(
        "{}{op}{target}{move_suffix}",
        fd_prefix(&dup.fd, dup.kind.default_fd(), dialect)
    )
}

fn print_single_arg(single: &SingleArgRedir, dialect: Dialect) -> String {
    if dialect == Dialect::Posix {
        panic!("single-argument redirection is not representable in POSIX output");
    }
    match single {
        SingleArgRedir::CloseThis { fd } => format!("{}>&-", fd_text(fd, dialect)),
        SingleArgRedir::ErrAndOut { target } => {
            format!("&> {}", print_word(target, QuoteMode::Unquoted, dialect))
        }
        SingleArgRedir::AppendErrAndOut { target } => {
            format!("&>> {}", print_word(target, QuoteMode::Unquoted, dialect))
        }
    }
}

/// The descriptor prefix of an operator, suppressed when it matches the
/// operator's default.
fn fd_prefix(fd: &FdSpec, default_fd: u32, dialect: Dialect) -> String {
    match fd {
        FdSpec::Fixed(n) if *n == default_fd => String::new(),
        _ => fd_text(fd, dialect),
    }
}

/// The descriptor itself: a bare number, or the brace-delimited descriptor
/// variable.
///
/// A descriptor variable reaching a POSIX print is a construction error —
/// such trees cannot come from the POSIX front end and have no valid POSIX
/// rendering — so it fails loud rather than coercing.
fn fd_text(fd: &FdSpec, dialect: Dialect) -> String {
    match fd {
        FdSpec::Fixed(n) => n.to_string(),
        FdSpec::Var(name) => {
            if dialect == Dialect::Posix {
                panic!("descriptor variable `{name}` is not representable in POSIX output");
            }
            format!("{{{name}}}")
        }
    }
}

/// The delimiter for a here-document: the recorded one, or a fresh marker
/// not occurring in the body.
fn heredoc_marker(heredoc: &HeredocRedir, dialect: Dialect) -> String {
    if let Some(delim) = &heredoc.delim {
        return delim.clone();
    }
    let body = print_word(&heredoc.body, QuoteMode::Heredoc, dialect);
    if !body.contains("EOF") {
        return "EOF".to_owned();
    }
    let mut n = 0usize;
    loop {
        let candidate = format!("EOF{n}");
        if !body.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn heredoc_header(heredoc: &HeredocRedir, marker: &str, dialect: Dialect) -> String {
    let strip = if heredoc.strip_tabs { "-" } else { "" };
    let delim = match heredoc.kind {
        HeredocKind::XHere => marker.to_owned(),
        HeredocKind::Here => format!("'{marker}'"),
    };
    format!("{}<<{strip}{delim}", fd_prefix(&heredoc.fd, 0, dialect))
}

fn heredoc_body(heredoc: &HeredocRedir, marker: &str, dialect: Dialect) -> String {
    let mut body = print_word(&heredoc.body, QuoteMode::Heredoc, dialect);
    if !body.is_empty() && !body.ends_with('\n') {
        body.push('\n');
    }
    format!("{body}{marker}\n")
}
