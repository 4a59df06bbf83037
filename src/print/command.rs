//! Command rendering: one exhaustive match over the node model.
//!
//! Each compound decides its own punctuation from its formatting flags plus
//! the requested dialect. The superset dialect rejects `}` without a
//! preceding separator, so brace wrappers consult the dialect; the
//! POSIX-style dialect tolerates the omission and prints the lighter form.

use crate::ast::{
    And, AstNode, Background, Case, CaseArm, Cond, CondKind, Defun, Group, If, Not, Or, Pipe,
    Semi, SimpleCommand, Subshell, While,
};
use crate::print::redirect::{heredoc_parts, print_redirects};
use crate::print::word::{print_word, print_words, QuoteMode};
use crate::print::Dialect;

/// Renders one node.
pub(crate) fn print_node(node: &AstNode, dialect: Dialect) -> String {
    match node {
        AstNode::Simple(cmd) => print_simple(cmd, dialect, false),
        AstNode::Pipe(pipe) => print_pipe(pipe, dialect),
        AstNode::And(and) => print_and(and, dialect),
        AstNode::Or(or) => print_or(or, dialect),
        AstNode::Semi(semi) => print_semi(semi, dialect),
        AstNode::Not(not) => print_not(not, dialect),
        AstNode::Redir(redir) => format!(
            "{}{}",
            print_node(&redir.body, dialect),
            print_redirects(&redir.redirects, dialect, false)
        ),
        AstNode::Background(bg) => print_background(bg, dialect),
        AstNode::Subshell(subshell) => print_subshell(subshell, dialect),
        AstNode::If(if_node) => print_if(if_node, dialect),
        AstNode::While(while_node) => print_while(while_node, dialect),
        AstNode::For(for_node) => format!(
            "for {} in {}; do {}; done",
            print_word(&for_node.var, QuoteMode::Unquoted, dialect),
            print_words(&for_node.items, QuoteMode::Unquoted, dialect),
            print_node(&for_node.body, dialect)
        ),
        AstNode::Case(case) => print_case(case, dialect),
        AstNode::Defun(defun) => print_defun(defun, dialect),
        AstNode::Select(select) => format!(
            "select {} in {}; do {}; done",
            print_word(&select.var, QuoteMode::Unquoted, dialect),
            print_words(&select.items, QuoteMode::Unquoted, dialect),
            print_node(&select.body, dialect)
        ),
        AstNode::Arith(arith) => format!(
            "(({}))",
            print_words(&arith.body, QuoteMode::Unquoted, dialect)
        ),
        AstNode::Cond(cond) => print_cond(cond, true, dialect),
        AstNode::ArithFor(arith_for) => format!(
            "for (({}; {}; {})); do {}; done",
            print_words(&arith_for.init, QuoteMode::Unquoted, dialect),
            print_words(&arith_for.test, QuoteMode::Unquoted, dialect),
            print_words(&arith_for.step, QuoteMode::Unquoted, dialect),
            print_node(&arith_for.body, dialect)
        ),
        AstNode::Coproc(coproc) => {
            let body = print_node(&coproc.body, dialect);
            match &*coproc.body {
                AstNode::Simple(_) => format!("coproc {body}"),
                _ => format!(
                    "coproc {} {body}",
                    print_word(&coproc.name, QuoteMode::Unquoted, dialect)
                ),
            }
        }
        AstNode::Time(time) => {
            let flag = if time.posix { "-p " } else { "" };
            format!("time {flag}{}", print_node(&time.body, dialect))
        }
        AstNode::Group(group) => print_group(group, dialect),
    }
}

// ---------------------------------------------------------------------------
// Simple commands
// ---------------------------------------------------------------------------

fn print_simple(cmd: &SimpleCommand, dialect: Dialect, ignore_heredocs: bool) -> String {
    let mut out = cmd
        .assignments
        .iter()
        .map(|assign| {
            format!(
                "{}={}",
                assign.name,
                print_word(&assign.value, QuoteMode::Unquoted, dialect)
            )
        })
        .collect::<Vec<_>>()
        .join(" ");
    if !cmd.assignments.is_empty() && !cmd.words.is_empty() {
        out.push(' ');
    }
    out.push_str(&print_words(&cmd.words, QuoteMode::Unquoted, dialect));
    out.push_str(&print_redirects(&cmd.redirects, dialect, ignore_heredocs));
    out
}

// ---------------------------------------------------------------------------
// Connections
// ---------------------------------------------------------------------------

fn print_pipe(pipe: &Pipe, dialect: Dialect) -> String {
    let text = if pipe.commands.len() > 1 {
        match deferred_body(&pipe.commands[0], dialect) {
            Some((head, deferred)) => {
                let rest = pipe.commands[1..]
                    .iter()
                    .map(|stage| print_node(stage, dialect))
                    .collect::<Vec<_>>()
                    .join(" | ");
                let (headers, bodies) = join_deferred(&deferred);
                format!("{head} {headers} | {rest}\n{bodies}")
            }
            None => pipe
                .commands
                .iter()
                .map(|stage| print_node(stage, dialect))
                .collect::<Vec<_>>()
                .join(" | "),
        }
    } else {
        pipe.commands
            .iter()
            .map(|stage| print_node(stage, dialect))
            .collect::<Vec<_>>()
            .join(" | ")
    };
    if pipe.background {
        format!("{} &", braces(&text, dialect))
    } else {
        text
    }
}

fn print_and(and: &And, dialect: Dialect) -> String {
    let right = print_node(&and.right, dialect);
    if let Some((head, deferred)) = deferred_body(&and.left, dialect) {
        let (headers, bodies) = join_deferred(&deferred);
        return if and.no_braces {
            format!("{head} {headers} &&\n{bodies}{right}")
        } else {
            format!(
                "{} {headers} &&\n{bodies}{}",
                braces(&head, dialect),
                braces(&right, dialect)
            )
        };
    }
    let left = print_node(&and.left, dialect);
    if and.no_braces {
        format!("{left} && {right}")
    } else {
        format!("{} && {}", braces(&left, dialect), braces(&right, dialect))
    }
}

fn print_or(or: &Or, dialect: Dialect) -> String {
    let left = print_node(&or.left, dialect);
    let right = print_node(&or.right, dialect);
    if or.no_braces {
        format!("{left} || {right}")
    } else {
        format!("{} || {}", braces(&left, dialect), braces(&right, dialect))
    }
}

fn print_semi(semi: &Semi, dialect: Dialect) -> String {
    let left = print_node(&semi.left, dialect);
    let right = print_node(&semi.right, dialect);
    if semi.semicolon {
        format!("{left} ; {right}")
    } else {
        format!("{left}\n{right}")
    }
}

fn print_not(not: &Not, dialect: Dialect) -> String {
    let body = print_node(&not.body, dialect);
    if not.no_braces {
        format!("! {body}")
    } else {
        format!("! {}", braces(&body, dialect))
    }
}

fn print_background(bg: &Background, dialect: Dialect) -> String {
    if bg.after_ampersand {
        // The job body carries a here-document: its content must start on
        // the line after the ampersand or the shell would read it as the
        // next command.
        let (head, mut deferred) = match deferred_body(&bg.body, dialect) {
            Some((head, deferred)) => (head, deferred),
            None => (print_node(&bg.body, dialect), Vec::new()),
        };
        let inline = print_redirects(&bg.redirects, dialect, true);
        deferred.extend(heredoc_parts(&bg.redirects, dialect));
        if !deferred.is_empty() {
            let (headers, bodies) = join_deferred(&deferred);
            return format!("{head}{inline} {headers} &\n{bodies}");
        }
    }
    let body = format!(
        "{}{}",
        print_node(&bg.body, dialect),
        print_redirects(&bg.redirects, dialect, false)
    );
    if bg.no_braces {
        format!("{body} &")
    } else {
        format!("{} &", braces(&body, dialect))
    }
}

// ---------------------------------------------------------------------------
// Compounds
// ---------------------------------------------------------------------------

fn print_subshell(subshell: &Subshell, dialect: Dialect) -> String {
    format!(
        "( {} ){}",
        print_node(&subshell.body, dialect),
        print_redirects(&subshell.redirects, dialect, false)
    )
}

fn print_if(if_node: &If, dialect: Dialect) -> String {
    let mut out = format!(
        "if {}; then {}",
        print_node(&if_node.cond, dialect),
        print_node(&if_node.then_branch, dialect)
    );
    match &if_node.else_branch {
        None => out.push_str("; fi"),
        Some(else_branch) if else_branch.is_empty_command() => out.push_str("; fi"),
        Some(else_branch) => match &**else_branch {
            // `elif` chains: the nested conditional brings its own `fi`.
            AstNode::If(_) => {
                out.push_str("; el");
                out.push_str(&print_node(else_branch, dialect));
            }
            _ => {
                out.push_str(&format!("; else {}; fi", print_node(else_branch, dialect)));
            }
        },
    }
    out
}

fn print_while(while_node: &While, dialect: Dialect) -> String {
    let body = print_node(&while_node.body, dialect);
    if let AstNode::Not(not) = &*while_node.test {
        // Canonical form of the superset's negated-loop keyword: re-emit
        // the keyword where the grammar has one, spell out the negation
        // where it does not.
        let test = print_node(&not.body, dialect);
        return match dialect {
            Dialect::Bash => format!("until {test}; do {body}; done"),
            Dialect::Posix => format!("while ! {test}; do {body}; done"),
        };
    }
    format!(
        "while {}; do {body}; done",
        print_node(&while_node.test, dialect)
    )
}

fn print_case(case: &Case, dialect: Dialect) -> String {
    let arms = case
        .arms
        .iter()
        .map(|arm| print_case_arm(arm, dialect))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "case {} in {arms} esac",
        print_word(&case.word, QuoteMode::Unquoted, dialect)
    )
}

fn print_case_arm(arm: &CaseArm, dialect: Dialect) -> String {
    let patterns = arm
        .patterns
        .iter()
        .map(|pattern| print_word(pattern, QuoteMode::Unquoted, dialect))
        .collect::<Vec<_>>()
        .join("|");
    // A literal `esac` pattern must be parenthesized or it closes the case.
    let lead = match arm.patterns.first() {
        Some(first) if print_word(first, QuoteMode::Unquoted, dialect) == "esac" => "(",
        _ => "",
    };
    let body = match &arm.body {
        Some(body) => print_node(body, dialect),
        None => String::new(),
    };
    let delim = if arm.fallthrough { ";&" } else { ";;" };
    format!("{lead}{patterns}) {body}{delim}")
}

fn print_defun(defun: &Defun, dialect: Dialect) -> String {
    let name = print_word(&defun.name, QuoteMode::Unquoted, dialect);
    // A brace-group body supplies no braces of its own here; the definition
    // syntax provides them.
    let body = match &*defun.body {
        AstNode::Group(group) => print_node(&group.body, dialect),
        other => print_node(other, dialect),
    };
    let keyword = if defun.reserved_word && dialect == Dialect::Bash {
        "function "
    } else {
        ""
    };
    format!("{keyword}{name} () {{\n{body}\n}}")
}

fn print_cond(cond: &Cond, with_brackets: bool, dialect: Dialect) -> String {
    let sub = |side: &Option<Box<Cond>>| match side {
        Some(side) => print_cond(side, false, dialect),
        None => String::new(),
    };
    let op = |op: &Option<crate::ast::Word>| match op {
        Some(op) => print_word(op, QuoteMode::Unquoted, dialect),
        None => String::new(),
    };
    let mut out = String::new();
    if with_brackets {
        out.push_str("[[ ");
    }
    if cond.invert {
        out.push_str("! ");
    }
    match cond.kind {
        CondKind::Expr => out.push_str(&format!("( {} )", sub(&cond.left))),
        CondKind::And => out.push_str(&format!("{} && {}", sub(&cond.left), sub(&cond.right))),
        CondKind::Or => out.push_str(&format!("{} || {}", sub(&cond.left), sub(&cond.right))),
        CondKind::Unary => out.push_str(&format!("{} {}", op(&cond.op), sub(&cond.left))),
        CondKind::Binary => out.push_str(&format!(
            "{} {} {}",
            sub(&cond.left),
            op(&cond.op),
            sub(&cond.right)
        )),
        CondKind::Term => out.push_str(&op(&cond.op)),
    }
    if with_brackets {
        out.push_str(" ]]");
    }
    out
}

fn print_group(group: &Group, dialect: Dialect) -> String {
    braces(&print_node(&group.body, dialect), dialect)
}

// ---------------------------------------------------------------------------
// Brace wrapping and deferred here-documents
// ---------------------------------------------------------------------------

/// Wraps a body in `{ … }`, inserting the separator the dialect demands
/// before the closing brace.
fn braces(body: &str, dialect: Dialect) -> String {
    if needs_separator(body, dialect) {
        format!("{{ {body}; }}")
    } else {
        format!("{{ {body} }}")
    }
}

/// The superset grammar rejects `}` without a preceding `;`, `&`, or
/// newline; the POSIX-style grammar tolerates the omission.
fn needs_separator(body: &str, dialect: Dialect) -> bool {
    match dialect {
        Dialect::Posix => false,
        Dialect::Bash => !matches!(body.chars().last(), Some('&' | ';' | '\n')),
    }
}

/// Renders a command with its here-documents deferred, returning the inline
/// text and the `(header, body)` pairs. `None` when the node carries no
/// here-document.
fn deferred_body(node: &AstNode, dialect: Dialect) -> Option<(String, Vec<(String, String)>)> {
    match node {
        AstNode::Simple(cmd) => {
            let deferred = heredoc_parts(&cmd.redirects, dialect);
            if deferred.is_empty() {
                return None;
            }
            Some((print_simple(cmd, dialect, true), deferred))
        }
        AstNode::Redir(redir) => {
            let deferred = heredoc_parts(&redir.redirects, dialect);
            if deferred.is_empty() {
                return None;
            }
            let inline = print_redirects(&redir.redirects, dialect, true);
            Some((
                format!("{}{inline}", print_node(&redir.body, dialect)),
                deferred,
            ))
        }
        _ => None,
    }
}

/// Joins deferred heredoc pairs into a space-separated header run and a
/// concatenated body block.
fn join_deferred(deferred: &[(String, String)]) -> (String, String) {
    let headers = deferred
        .iter()
        .map(|(header, _)| header.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let bodies = deferred
        .iter()
        .map(|(_, body)| body.as_str())
        .collect::<Vec<_>>()
        .concat();
    (headers, bodies)
}
