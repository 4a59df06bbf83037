//! Word contracts: the character-level representation of shell words.
//!
//! A word is a sequence of [`ArgChar`] values rather than a plain string so
//! that quoting, expansions, and substitutions survive the round trip from
//! parse tree to regenerated source.

use serde::{Deserialize, Serialize};

use crate::ast::AstNode;

/// A shell word: command names, arguments, patterns, redirect targets.
pub type Word = Vec<ArgChar>;

/// One element of a shell word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgChar {
    /// A plain character.
    ///
    /// `verbatim` marks characters carried over byte-for-byte from the
    /// superset front end; the printer never re-escapes them.
    Char {
        /// The character itself.
        ch: char,
        /// Emit without any escaping.
        verbatim: bool,
    },
    /// A character that was escaped in the source and must stay escaped
    /// wherever the shell would otherwise interpret it.
    Escaped(char),
    /// Tilde expansion, optionally naming a user (`~` or `~user`).
    Tilde(Option<String>),
    /// Arithmetic expansion, `$(( … ))`.
    Arith(Word),
    /// Parameter expansion, `$name` / `${name…}`.
    Param(ParamExp),
    /// A double-quoted region.
    Quoted(Word),
    /// Command substitution, `$( … )`.
    CommandSubst(Box<AstNode>),
}

impl ArgChar {
    /// Creates a plain, escapable character.
    pub fn plain(ch: char) -> Self {
        ArgChar::Char {
            ch,
            verbatim: false,
        }
    }

    /// Creates a verbatim character (never re-escaped on output).
    pub fn verbatim(ch: char) -> Self {
        ArgChar::Char { ch, verbatim: true }
    }
}

/// A parameter expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamExp {
    /// Expansion operator.
    pub op: ParamOp,
    /// Whether the operator also tests for null (the `:` forms).
    pub test_null: bool,
    /// Parameter name.
    pub name: String,
    /// Operand word (default value, error message, pattern, …).
    pub word: Word,
}

/// Parameter expansion operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamOp {
    /// `${name}`
    Normal,
    /// `${name-word}` / `${name:-word}`
    Minus,
    /// `${name+word}` / `${name:+word}`
    Plus,
    /// `${name?word}` / `${name:?word}`
    Question,
    /// `${name=word}` / `${name:=word}`
    Assign,
    /// `${name%word}`
    TrimR,
    /// `${name%%word}`
    TrimRMax,
    /// `${name#word}`
    TrimL,
    /// `${name##word}`
    TrimLMax,
    /// `${#name}`
    Length,
}

/// Builds a word from plain text, one escapable [`ArgChar::Char`] per char.
pub fn word_from_str(text: &str) -> Word {
    text.chars().map(ArgChar::plain).collect()
}

/// Builds a word from superset text, carried verbatim.
pub fn word_from_verbatim(text: &str) -> Word {
    text.chars().map(ArgChar::verbatim).collect()
}
