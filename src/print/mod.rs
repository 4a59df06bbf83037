//! Dialect-aware pretty-printing of the canonical tree.
//!
//! Printing is a pure function of `(tree, dialect)`: post-order structural
//! recursion, no external state, never failing on a tree that satisfies the
//! node model's invariants. The one construction-contract violation —
//! superset-only redirection forms printed for the POSIX dialect — panics
//! rather than silently coercing.

pub(crate) mod command;
pub(crate) mod redirect;
pub(crate) mod word;

use crate::ast::AstNode;

/// The dialect source text is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// The POSIX-style baseline grammar.
    Posix,
    /// The bash-style superset grammar.
    Bash,
}

/// Renders a canonical tree as source text for the requested dialect.
pub fn pretty(node: &AstNode, dialect: Dialect) -> String {
    command::print_node(node, dialect)
}

impl AstNode {
    /// Renders this node as source text for the requested dialect.
    pub fn pretty(&self, dialect: Dialect) -> String {
        pretty(self, dialect)
    }
}
