//! Redirection contracts shared by both importers and the printer.

use serde::{Deserialize, Serialize};

use crate::ast::Word;

/// The file descriptor a redirection applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FdSpec {
    /// A concrete descriptor number, e.g. the `2` in `2>err.log`.
    Fixed(u32),
    /// A descriptor variable, e.g. the `fd` in `exec {fd}>log.txt`.
    ///
    /// Only the superset front end produces this form; the shell assigns
    /// the opened descriptor number to the named variable at runtime.
    Var(String),
}

/// A redirection attached to a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Redirect {
    /// Redirection to or from a file target.
    File(FileRedir),
    /// Descriptor duplication (`n>&m`, `n<&m`).
    Dup(DupRedir),
    /// Here-document.
    Heredoc(HeredocRedir),
    /// Superset-only single-argument forms (`>&-`, `&>`, `&>>`).
    SingleArg(SingleArgRedir),
}

impl Redirect {
    /// Whether this redirection is a here-document.
    pub fn is_heredoc(&self) -> bool {
        matches!(self, Redirect::Heredoc(_))
    }
}

/// File redirection operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileRedirKind {
    /// `> target`
    To,
    /// `>| target`
    Clobber,
    /// `< target`
    From,
    /// `<> target`
    FromTo,
    /// `>> target`
    Append,
    /// `<<< target` — here-string; superset-only.
    HereString,
}

impl FileRedirKind {
    /// The descriptor implied when the source omits one.
    pub fn default_fd(self) -> u32 {
        match self {
            FileRedirKind::To | FileRedirKind::Clobber | FileRedirKind::Append => 1,
            FileRedirKind::From | FileRedirKind::FromTo | FileRedirKind::HereString => 0,
        }
    }
}

/// Redirection to or from a file (or inline string) target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRedir {
    /// Operator.
    pub kind: FileRedirKind,
    /// Descriptor being redirected.
    pub fd: FdSpec,
    /// Target word (filename, or the string for `HereString`).
    pub target: Word,
}

/// Duplication direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DupKind {
    /// `n>&target`
    ToFd,
    /// `n<&target`
    FromFd,
}

impl DupKind {
    /// The descriptor implied when the source omits one.
    pub fn default_fd(self) -> u32 {
        match self {
            DupKind::ToFd => 1,
            DupKind::FromFd => 0,
        }
    }
}

/// What a duplication points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DupTarget {
    /// A concrete descriptor, `2>&1`.
    Fd(u32),
    /// A word evaluated at runtime, `2>&$fd`.
    Word(Word),
}

/// Descriptor duplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DupRedir {
    /// Direction.
    pub kind: DupKind,
    /// Descriptor being duplicated onto.
    pub fd: FdSpec,
    /// Duplication source.
    pub target: DupTarget,
    /// Move form (`2>&3-`): the source descriptor is closed afterwards.
    pub move_fd: bool,
}

/// Here-document flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeredocKind {
    /// Quoted delimiter: the body is taken literally.
    Here,
    /// Unquoted delimiter: the body undergoes expansion.
    XHere,
}

/// A here-document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeredocRedir {
    /// Flavor.
    pub kind: HeredocKind,
    /// Descriptor the body is fed into.
    pub fd: FdSpec,
    /// Body content.
    pub body: Word,
    /// `<<-` form: leading tabs are stripped.
    pub strip_tabs: bool,
    /// Delimiter from the source; `None` makes the printer synthesize one.
    pub delim: Option<String>,
}

/// Superset-only redirections that take a single operand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SingleArgRedir {
    /// `n>&-`: close the descriptor.
    CloseThis {
        /// Descriptor to close.
        fd: FdSpec,
    },
    /// `&> target`: stdout and stderr to a file.
    ErrAndOut {
        /// Target filename word.
        target: Word,
    },
    /// `&>> target`: stdout and stderr appended to a file.
    AppendErrAndOut {
        /// Target filename word.
        target: Word,
    },
}
