//! Word rendering with quote-mode-sensitive escaping.

use crate::ast::{ArgChar, ParamExp, ParamOp, Word};
use crate::print::{command, Dialect};

/// Escaping context for word characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QuoteMode {
    /// Bare word position.
    Unquoted,
    /// Inside a double-quoted region.
    Quoted,
    /// Inside a here-document body.
    Heredoc,
}

/// Characters escaped in every context.
const ESCAPE_ALWAYS: &[char] = &['\'', '"', '`', '(', ')', '{', '}', '$', '&', '|', ';'];

/// Characters escaped only outside quotes.
const ESCAPE_UNQUOTED: &[char] = &['*', '?', '[', ']', '#', '<', '>', '~', ' '];

/// Renders one word.
pub(crate) fn print_word(word: &Word, mode: QuoteMode, dialect: Dialect) -> String {
    let mut out = String::new();
    for (i, ch) in word.iter().enumerate() {
        match ch {
            ArgChar::Char { ch, verbatim } => {
                if !*verbatim && *ch == '"' && mode == QuoteMode::Quoted {
                    out.push_str("\\\"");
                } else if !*verbatim && *ch == '$' && i + 1 < word.len() {
                    // A literal dollar followed by more text would read as an
                    // expansion when re-parsed.
                    out.push_str("\\$");
                } else {
                    out.push(*ch);
                }
            }
            ArgChar::Escaped(ch) => out.push_str(&escaped(*ch, mode)),
            ArgChar::Tilde(None) => out.push('~'),
            ArgChar::Tilde(Some(user)) => {
                out.push('~');
                out.push_str(user);
            }
            ArgChar::Arith(inner) => {
                out.push_str("$((");
                out.push_str(&print_word(inner, mode, dialect));
                out.push_str("))");
            }
            ArgChar::Param(param) => out.push_str(&print_param(param, mode, dialect)),
            ArgChar::Quoted(inner) => {
                out.push('"');
                out.push_str(&print_word(inner, QuoteMode::Quoted, dialect));
                out.push('"');
            }
            ArgChar::CommandSubst(node) => {
                let body = command::print_node(node, dialect);
                // `$((…))` would read as arithmetic; pad a subshell body.
                if body.starts_with('(') && body.ends_with(')') {
                    out.push_str(&format!("$( {body} )"));
                } else {
                    out.push_str(&format!("$({body})"));
                }
            }
        }
    }
    out
}

/// Renders a word list, space-separated.
pub(crate) fn print_words(words: &[Word], mode: QuoteMode, dialect: Dialect) -> String {
    words
        .iter()
        .map(|word| print_word(word, mode, dialect))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escaped(ch: char, mode: QuoteMode) -> String {
    if ESCAPE_ALWAYS.contains(&ch)
        || (mode == QuoteMode::Unquoted && ESCAPE_UNQUOTED.contains(&ch))
    {
        format!("\\{ch}")
    } else {
        ch.to_string()
    }
}

fn print_param(param: &ParamExp, mode: QuoteMode, dialect: Dialect) -> String {
    if param.op == ParamOp::Length {
        return format!("${{#{}}}", param.name);
    }
    let mut out = format!("${{{}", param.name);
    if param.test_null {
        out.push(':');
    }
    out.push_str(param_op_str(param.op));
    out.push_str(&print_word(&param.word, mode, dialect));
    out.push('}');
    out
}

fn param_op_str(op: ParamOp) -> &'static str {
    match op {
        ParamOp::Normal | ParamOp::Length => "",
        ParamOp::Minus => "-",
        ParamOp::Plus => "+",
        ParamOp::Question => "?",
        ParamOp::Assign => "=",
        ParamOp::TrimR => "%",
        ParamOp::TrimRMax => "%%",
        ParamOp::TrimL => "#",
        ParamOp::TrimLMax => "##",
    }
}
