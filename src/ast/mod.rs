//! Canonical shell AST contracts.
//!
//! The node model is pure data: importers build it, the printer reads it,
//! and structural equality (`PartialEq`) is the identity that round-trip
//! tests compare.

pub mod node;
pub mod redirect;
pub mod word;

pub use node::{
    And, Arith, ArithFor, AstNode, Background, Case, CaseArm, Cond, CondKind, Coproc, Defun, For,
    Group, If, Not, Or, Pipe, Redir, Select, Semi, SimpleCommand, Subshell, Time, While,
};
pub use node::Assignment;
pub use redirect::{
    DupKind, DupRedir, DupTarget, FdSpec, FileRedir, FileRedirKind, HeredocKind, HeredocRedir,
    Redirect, SingleArgRedir,
};
pub use word::{word_from_str, word_from_verbatim, ArgChar, ParamExp, ParamOp, Word};
