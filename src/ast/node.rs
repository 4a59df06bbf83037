//! The canonical, dialect-agnostic command tree.
//!
//! Both importers produce this tree and the printer consumes it. The enum is
//! closed on purpose: adding a node kind is a compile-time obligation for
//! every consumer, which is what keeps the two front ends and the printer
//! from silently disagreeing about a construct.

use serde::{Deserialize, Serialize};

use crate::ast::{Redirect, Word};

/// A canonical command node.
///
/// The first fourteen variants are reachable from either front end; the
/// remainder only ever come from the superset importer (or from callers
/// building trees by hand).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AstNode {
    /// Simple command: assignments, words, redirections.
    Simple(SimpleCommand),
    /// Pipeline, `a | b | c`.
    Pipe(Pipe),
    /// `left && right`.
    And(And),
    /// `left || right`.
    Or(Or),
    /// Sequencing, `left ; right` or newline-separated.
    Semi(Semi),
    /// Negation, `! body`.
    Not(Not),
    /// A command with redirections applied at the command level.
    Redir(Redir),
    /// Background job, `body &`.
    Background(Background),
    /// Subshell, `( body )`.
    Subshell(Subshell),
    /// `if … then … [else …] fi`.
    If(If),
    /// `while … do … done`; a `Not` test marks the negated-loop form.
    While(While),
    /// `for name in items; do … done`.
    For(For),
    /// `case word in … esac`.
    Case(Case),
    /// Function definition.
    Defun(Defun),

    /// `select name in items; do … done` — superset-only.
    Select(Select),
    /// Arithmetic command, `(( … ))` — superset-only.
    Arith(Arith),
    /// Conditional command, `[[ … ]]` — superset-only.
    Cond(Cond),
    /// Arithmetic for loop, `for ((…; …; …))` — superset-only.
    ArithFor(ArithFor),
    /// Coprocess — superset-only.
    Coproc(Coproc),
    /// Timed command, `time body` — superset-only.
    Time(Time),
    /// Explicit brace group, `{ body; }` — superset-only.
    Group(Group),
}

impl AstNode {
    /// The empty simple command (no words, no assignments, no redirects).
    pub fn empty() -> Self {
        AstNode::Simple(SimpleCommand::default())
    }

    /// Whether this node is the empty simple command.
    pub fn is_empty_command(&self) -> bool {
        match self {
            AstNode::Simple(cmd) => {
                cmd.line.is_none()
                    && cmd.assignments.is_empty()
                    && cmd.words.is_empty()
                    && cmd.redirects.is_empty()
            }
            _ => false,
        }
    }
}

/// Simple command.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SimpleCommand {
    /// Source line, when the front end recorded one.
    pub line: Option<u32>,
    /// Leading variable assignments, in source order.
    pub assignments: Vec<Assignment>,
    /// Command words, in source order.
    pub words: Vec<Word>,
    /// Redirections, in source order.
    pub redirects: Vec<Redirect>,
}

/// A `name=value` assignment prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Variable name.
    pub name: String,
    /// Assigned value.
    pub value: Word,
}

/// Pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipe {
    /// Whether the whole pipeline runs in the background.
    pub background: bool,
    /// Pipeline stages, left to right; always at least one.
    pub commands: Vec<AstNode>,
}

/// `left && right`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct And {
    /// Left operand.
    pub left: Box<AstNode>,
    /// Right operand.
    pub right: Box<AstNode>,
    /// Print operands bare instead of wrapped in `{ … }`.
    pub no_braces: bool,
}

/// `left || right`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Or {
    /// Left operand.
    pub left: Box<AstNode>,
    /// Right operand.
    pub right: Box<AstNode>,
    /// Print operands bare instead of wrapped in `{ … }`.
    pub no_braces: bool,
}

/// Sequencing of two commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semi {
    /// First command.
    pub left: Box<AstNode>,
    /// Second command.
    pub right: Box<AstNode>,
    /// `true` prints `left ; right`; `false` prints a newline between them
    /// (the synthesized form for newline-terminated sequences).
    pub semicolon: bool,
}

/// `! body`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Not {
    /// Negated command.
    pub body: Box<AstNode>,
    /// Print the body bare instead of wrapped in `{ … }`.
    pub no_braces: bool,
}

/// Command-level redirections wrapped around a compound command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redir {
    /// Source line, when the front end recorded one.
    pub line: Option<u32>,
    /// The command the redirections apply to.
    pub body: Box<AstNode>,
    /// Redirections, in source order.
    pub redirects: Vec<Redirect>,
}

/// Background job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Background {
    /// Source line, when the front end recorded one.
    pub line: Option<u32>,
    /// The job body.
    pub body: Box<AstNode>,
    /// Redirections applied to the job.
    pub redirects: Vec<Redirect>,
    /// Print the body bare instead of wrapped in `{ … }`.
    pub no_braces: bool,
    /// The body carries a here-document, so its content must follow the
    /// newline after `&`.
    pub after_ampersand: bool,
}

/// Subshell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subshell {
    /// Source line, when the front end recorded one.
    pub line: Option<u32>,
    /// Subshell body.
    pub body: Box<AstNode>,
    /// Redirections applied to the subshell.
    pub redirects: Vec<Redirect>,
}

/// Conditional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct If {
    /// Test command.
    pub cond: Box<AstNode>,
    /// Then branch.
    pub then_branch: Box<AstNode>,
    /// Else branch; `None` or the empty command closes with `fi` directly.
    pub else_branch: Option<Box<AstNode>>,
}

/// While loop. A test wrapped in [`Not`] is the canonical form of the
/// superset's dedicated negated-loop keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct While {
    /// Loop test.
    pub test: Box<AstNode>,
    /// Loop body.
    pub body: Box<AstNode>,
}

/// For loop over a word list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct For {
    /// Source line, when the front end recorded one.
    pub line: Option<u32>,
    /// Loop variable.
    pub var: Word,
    /// Words iterated over.
    pub items: Vec<Word>,
    /// Loop body.
    pub body: Box<AstNode>,
}

/// Case command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    /// Source line, when the front end recorded one.
    pub line: Option<u32>,
    /// The word being matched.
    pub word: Word,
    /// Arms, in source order.
    pub arms: Vec<CaseArm>,
}

/// One arm of a case command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseArm {
    /// Patterns, `|`-separated in the source.
    pub patterns: Vec<Word>,
    /// Arm body; `None` for an empty arm.
    pub body: Option<Box<AstNode>>,
    /// Terminated with `;&` instead of `;;`.
    pub fallthrough: bool,
}

/// Function definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defun {
    /// Source line, when the front end recorded one.
    pub line: Option<u32>,
    /// Function name.
    pub name: Word,
    /// Function body.
    pub body: Box<AstNode>,
    /// Defined with the superset's `function` keyword.
    pub reserved_word: bool,
}

/// Select loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Select {
    /// Source line, when the front end recorded one.
    pub line: Option<u32>,
    /// Loop variable.
    pub var: Word,
    /// Menu items.
    pub items: Vec<Word>,
    /// Loop body.
    pub body: Box<AstNode>,
}

/// Arithmetic command, `(( … ))`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arith {
    /// Source line, when the front end recorded one.
    pub line: Option<u32>,
    /// Expression words, space-joined on output.
    pub body: Vec<Word>,
}

/// Conditional-expression node kinds inside `[[ … ]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CondKind {
    /// `left && right`
    And,
    /// `left || right`
    Or,
    /// `op operand`
    Unary,
    /// `left op right`
    Binary,
    /// A bare term.
    Term,
    /// A parenthesized sub-expression.
    Expr,
}

/// Conditional command, `[[ … ]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cond {
    /// Source line, when the front end recorded one.
    pub line: Option<u32>,
    /// Node kind.
    pub kind: CondKind,
    /// Operator word for unary/binary/term kinds.
    pub op: Option<Word>,
    /// Left operand (or sole operand for unary/expr kinds).
    pub left: Option<Box<Cond>>,
    /// Right operand.
    pub right: Option<Box<Cond>>,
    /// Negated with `!`.
    pub invert: bool,
}

/// Arithmetic for loop, `for ((init; test; step))`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArithFor {
    /// Source line, when the front end recorded one.
    pub line: Option<u32>,
    /// Initializer expression words.
    pub init: Vec<Word>,
    /// Test expression words.
    pub test: Vec<Word>,
    /// Step expression words.
    pub step: Vec<Word>,
    /// Loop body.
    pub body: Box<AstNode>,
}

/// Coprocess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coproc {
    /// Coprocess name.
    pub name: Word,
    /// Coprocess body.
    pub body: Box<AstNode>,
}

/// Timed command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Time {
    /// `time -p` form.
    pub posix: bool,
    /// The command being timed.
    pub body: Box<AstNode>,
}

/// Explicit brace group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group body.
    pub body: Box<AstNode>,
}
