//! Library entrypoint for `shcanon`.
//!
//! The crate normalizes the parse output of two shell front ends — a
//! POSIX-style dialect and a bash-style superset — into one canonical AST,
//! and regenerates syntactically valid source text for either dialect.

pub mod ast;
pub mod import;
pub mod print;
