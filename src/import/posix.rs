//! Importer for the POSIX-style front end.
//!
//! The input is the parser's own serialization: every node is a
//! `[tag, payload]` array with positional fields. The mapping is structural
//! and total — one tag to one canonical variant, no synthesis — with a
//! single normalization: a newline-terminated top-level sequence arrives as
//! a bare node list and is folded into `Semi` nodes with the default
//! (newline) sequencing operator.
//!
//! Descriptor variables, here-strings, and every superset-only construct are
//! unreachable from this importer by construction: their tags are not part
//! of this schema and fail as `Schema` errors.

use serde_json::Value;

use crate::ast::{
    And, Assignment, AstNode, Background, Case, CaseArm, Defun, DupKind, DupRedir, FdSpec,
    FileRedir, FileRedirKind, For, HeredocKind, HeredocRedir, If, Not, Or, ParamExp, ParamOp,
    Pipe, Redir, Redirect, Semi, SimpleCommand, Subshell, While, Word,
};
use crate::ast::{word_from_str, ArgChar};
use crate::import::cursor::Cursor;
use crate::import::error::ImportError;
use crate::import::{dup_target, semi_sequence, ImportOptions};

/// Imports a whole script: a top-level array of nodes (or a single node).
///
/// The node list is folded right-associatively into `Semi` nodes with
/// `semicolon: false`, the canonical form of newline sequencing. An empty
/// list yields the empty simple command.
pub fn import_program(value: &Value, options: &ImportOptions) -> Result<AstNode, ImportError> {
    let importer = Importer::new(options);
    let root = Cursor::root(value);
    if value.is_array() && root.tagged().is_err() {
        let nodes = root
            .elements()?
            .iter()
            .map(|cur| importer.node(cur, 0))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(semi_sequence(nodes))
    } else {
        importer.node(&root, 0)
    }
}

/// Imports a single command node.
pub fn import_command(value: &Value, options: &ImportOptions) -> Result<AstNode, ImportError> {
    Importer::new(options).node(&Cursor::root(value), 0)
}

struct Importer {
    max_depth: usize,
}

impl Importer {
    fn new(options: &ImportOptions) -> Self {
        Self {
            max_depth: options.max_depth,
        }
    }

    fn check_depth(&self, cur: &Cursor<'_>, depth: usize) -> Result<(), ImportError> {
        if depth > self.max_depth {
            return Err(ImportError::depth_exceeded(cur.path.clone(), self.max_depth));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    fn node(&self, cur: &Cursor<'_>, depth: usize) -> Result<AstNode, ImportError> {
        self.check_depth(cur, depth)?;
        let (tag, payload) = cur.tagged()?;
        match tag {
            "Command" => self.simple_command(&payload, depth),
            "Pipe" => self.pipe(&payload, depth),
            "And" => {
                let (left, right) = self.pair(&payload, depth)?;
                Ok(AstNode::And(And {
                    left: Box::new(left),
                    right: Box::new(right),
                    no_braces: false,
                }))
            }
            "Or" => {
                let (left, right) = self.pair(&payload, depth)?;
                Ok(AstNode::Or(Or {
                    left: Box::new(left),
                    right: Box::new(right),
                    no_braces: false,
                }))
            }
            "Semi" => {
                let (left, right) = self.pair(&payload, depth)?;
                Ok(AstNode::Semi(Semi {
                    left: Box::new(left),
                    right: Box::new(right),
                    semicolon: true,
                }))
            }
            "Not" => Ok(AstNode::Not(Not {
                body: Box::new(self.node(&payload, depth + 1)?),
                no_braces: false,
            })),
            "Redir" => {
                let (line, body, redirects) = self.wrapped(&payload, depth)?;
                Ok(AstNode::Redir(Redir {
                    line,
                    body: Box::new(body),
                    redirects,
                }))
            }
            "Background" => {
                let (line, body, redirects) = self.wrapped(&payload, depth)?;
                Ok(AstNode::Background(Background {
                    line,
                    body: Box::new(body),
                    redirects,
                    no_braces: false,
                    after_ampersand: false,
                }))
            }
            "Subshell" => {
                let (line, body, redirects) = self.wrapped(&payload, depth)?;
                Ok(AstNode::Subshell(Subshell {
                    line,
                    body: Box::new(body),
                    redirects,
                }))
            }
            "If" => self.if_node(&payload, depth),
            "While" => {
                let parts = payload.tuple(2)?;
                Ok(AstNode::While(While {
                    test: Box::new(self.node(&parts[0], depth + 1)?),
                    body: Box::new(self.node(&parts[1], depth + 1)?),
                }))
            }
            "For" => self.for_node(&payload, depth),
            "Case" => self.case_node(&payload, depth),
            "Defun" => self.defun(&payload, depth),
            other => Err(cur.schema(format!("unknown node tag `{other}`"))),
        }
    }

    fn pair(&self, payload: &Cursor<'_>, depth: usize) -> Result<(AstNode, AstNode), ImportError> {
        let parts = payload.tuple(2)?;
        Ok((
            self.node(&parts[0], depth + 1)?,
            self.node(&parts[1], depth + 1)?,
        ))
    }

    /// `[line, node, redirects]` payloads shared by Redir/Background/Subshell.
    fn wrapped(
        &self,
        payload: &Cursor<'_>,
        depth: usize,
    ) -> Result<(Option<u32>, AstNode, Vec<Redirect>), ImportError> {
        let parts = payload.tuple(3)?;
        Ok((
            parts[0].line()?,
            self.node(&parts[1], depth + 1)?,
            self.redirects(&parts[2], depth)?,
        ))
    }

    fn simple_command(&self, payload: &Cursor<'_>, depth: usize) -> Result<AstNode, ImportError> {
        let parts = payload.tuple(4)?;
        let line = parts[0].line()?;
        let assignments = parts[1]
            .elements()?
            .iter()
            .map(|cur| self.assignment(cur, depth))
            .collect::<Result<Vec<_>, _>>()?;
        let words = self.words(&parts[2], depth)?;
        let redirects = self.redirects(&parts[3], depth)?;
        Ok(AstNode::Simple(SimpleCommand {
            line,
            assignments,
            words,
            redirects,
        }))
    }

    fn assignment(&self, cur: &Cursor<'_>, depth: usize) -> Result<Assignment, ImportError> {
        let parts = cur.tuple(2)?;
        Ok(Assignment {
            name: parts[0].str()?.to_owned(),
            value: self.word(&parts[1], depth)?,
        })
    }

    fn pipe(&self, payload: &Cursor<'_>, depth: usize) -> Result<AstNode, ImportError> {
        let parts = payload.tuple(2)?;
        let background = parts[0].bool()?;
        let commands = parts[1]
            .elements()?
            .iter()
            .map(|cur| self.node(cur, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;
        if commands.is_empty() {
            return Err(payload.schema("pipeline must carry at least one command"));
        }
        Ok(AstNode::Pipe(Pipe {
            background,
            commands,
        }))
    }

    fn if_node(&self, payload: &Cursor<'_>, depth: usize) -> Result<AstNode, ImportError> {
        let parts = payload.tuple(3)?;
        let else_branch = if parts[2].value.is_null() {
            None
        } else {
            Some(Box::new(self.node(&parts[2], depth + 1)?))
        };
        Ok(AstNode::If(If {
            cond: Box::new(self.node(&parts[0], depth + 1)?),
            then_branch: Box::new(self.node(&parts[1], depth + 1)?),
            else_branch,
        }))
    }

    fn for_node(&self, payload: &Cursor<'_>, depth: usize) -> Result<AstNode, ImportError> {
        let parts = payload.tuple(4)?;
        Ok(AstNode::For(For {
            line: parts[0].line()?,
            items: self.words(&parts[1], depth)?,
            body: Box::new(self.node(&parts[2], depth + 1)?),
            var: word_from_str(parts[3].str()?),
        }))
    }

    fn case_node(&self, payload: &Cursor<'_>, depth: usize) -> Result<AstNode, ImportError> {
        let parts = payload.tuple(3)?;
        let arms = parts[2]
            .elements()?
            .iter()
            .map(|cur| self.case_arm(cur, depth))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AstNode::Case(Case {
            line: parts[0].line()?,
            word: self.word(&parts[1], depth)?,
            arms,
        }))
    }

    fn case_arm(&self, cur: &Cursor<'_>, depth: usize) -> Result<CaseArm, ImportError> {
        let patterns = self.words(&cur.field("cpattern")?, depth)?;
        let body = match cur.opt_field("cbody") {
            Some(body) => Some(Box::new(self.node(&body, depth + 1)?)),
            None => None,
        };
        Ok(CaseArm {
            patterns,
            body,
            fallthrough: false,
        })
    }

    fn defun(&self, payload: &Cursor<'_>, depth: usize) -> Result<AstNode, ImportError> {
        let parts = payload.tuple(3)?;
        Ok(AstNode::Defun(Defun {
            line: parts[0].line()?,
            name: word_from_str(parts[1].str()?),
            body: Box::new(self.node(&parts[2], depth + 1)?),
            reserved_word: false,
        }))
    }

    // -----------------------------------------------------------------------
    // Words
    // -----------------------------------------------------------------------

    fn words(&self, cur: &Cursor<'_>, depth: usize) -> Result<Vec<Word>, ImportError> {
        cur.elements()?
            .iter()
            .map(|word| self.word(word, depth))
            .collect()
    }

    fn word(&self, cur: &Cursor<'_>, depth: usize) -> Result<Word, ImportError> {
        cur.elements()?
            .iter()
            .map(|ch| self.arg_char(ch, depth))
            .collect()
    }

    fn arg_char(&self, cur: &Cursor<'_>, depth: usize) -> Result<ArgChar, ImportError> {
        let (tag, payload) = cur.tagged()?;
        match tag {
            "C" => Ok(ArgChar::plain(self.char_code(&payload)?)),
            "E" => Ok(ArgChar::Escaped(self.char_code(&payload)?)),
            "T" => self.tilde(&payload),
            "A" => Ok(ArgChar::Arith(self.word(&payload, depth)?)),
            "V" => self.param(&payload, depth),
            "Q" => Ok(ArgChar::Quoted(self.word(&payload, depth)?)),
            "B" => Ok(ArgChar::CommandSubst(Box::new(
                self.node(&payload, depth + 1)?,
            ))),
            other => Err(cur.schema(format!("unknown word character tag `{other}`"))),
        }
    }

    fn char_code(&self, cur: &Cursor<'_>) -> Result<char, ImportError> {
        let code = cur.u32()?;
        char::from_u32(code).ok_or_else(|| cur.schema("invalid character code"))
    }

    /// Tilde payload: `"None"` or `["Some", user]`.
    fn tilde(&self, cur: &Cursor<'_>) -> Result<ArgChar, ImportError> {
        if let Ok(text) = cur.str() {
            if text == "None" {
                return Ok(ArgChar::Tilde(None));
            }
            return Err(cur.schema(format!("unknown tilde form `{text}`")));
        }
        let parts = cur.tuple(2)?;
        if parts[0].str()? != "Some" {
            return Err(cur.schema("tilde payload must be \"None\" or [\"Some\", user]"));
        }
        Ok(ArgChar::Tilde(Some(parts[1].str()?.to_owned())))
    }

    fn param(&self, cur: &Cursor<'_>, depth: usize) -> Result<ArgChar, ImportError> {
        let parts = cur.tuple(4)?;
        let op = match parts[0].str()? {
            "Normal" => ParamOp::Normal,
            "Minus" => ParamOp::Minus,
            "Plus" => ParamOp::Plus,
            "Question" => ParamOp::Question,
            "Assign" => ParamOp::Assign,
            "TrimR" => ParamOp::TrimR,
            "TrimRMax" => ParamOp::TrimRMax,
            "TrimL" => ParamOp::TrimL,
            "TrimLMax" => ParamOp::TrimLMax,
            "Length" => ParamOp::Length,
            other => return Err(parts[0].schema(format!("unknown parameter operator `{other}`"))),
        };
        Ok(ArgChar::Param(ParamExp {
            op,
            test_null: parts[1].bool()?,
            name: parts[2].str()?.to_owned(),
            word: self.word(&parts[3], depth)?,
        }))
    }

    // -----------------------------------------------------------------------
    // Redirections
    // -----------------------------------------------------------------------

    fn redirects(&self, cur: &Cursor<'_>, depth: usize) -> Result<Vec<Redirect>, ImportError> {
        cur.elements()?
            .iter()
            .map(|redir| self.redirect(redir, depth))
            .collect()
    }

    fn redirect(&self, cur: &Cursor<'_>, depth: usize) -> Result<Redirect, ImportError> {
        let (tag, payload) = cur.tagged()?;
        match tag {
            "File" => {
                let parts = payload.tuple(3)?;
                let kind = match parts[0].str()? {
                    "To" => FileRedirKind::To,
                    "Clobber" => FileRedirKind::Clobber,
                    "From" => FileRedirKind::From,
                    "FromTo" => FileRedirKind::FromTo,
                    "Append" => FileRedirKind::Append,
                    other => {
                        return Err(parts[0].schema(format!("unknown file redirect `{other}`")))
                    }
                };
                Ok(Redirect::File(FileRedir {
                    kind,
                    fd: FdSpec::Fixed(parts[1].u32()?),
                    target: self.word(&parts[2], depth)?,
                }))
            }
            "Dup" => {
                let parts = payload.tuple(3)?;
                let kind = match parts[0].str()? {
                    "ToFD" => DupKind::ToFd,
                    "FromFD" => DupKind::FromFd,
                    other => {
                        return Err(parts[0].schema(format!("unknown dup redirect `{other}`")))
                    }
                };
                let target = self.word(&parts[2], depth)?;
                Ok(Redirect::Dup(DupRedir {
                    kind,
                    fd: FdSpec::Fixed(parts[1].u32()?),
                    target: dup_target(target),
                    move_fd: false,
                }))
            }
            "Heredoc" => {
                let parts = payload.tuple(3)?;
                let kind = match parts[0].str()? {
                    "Here" => HeredocKind::Here,
                    "XHere" => HeredocKind::XHere,
                    other => {
                        return Err(parts[0].schema(format!("unknown heredoc kind `{other}`")))
                    }
                };
                Ok(Redirect::Heredoc(HeredocRedir {
                    kind,
                    fd: FdSpec::Fixed(parts[1].u32()?),
                    body: self.word(&parts[2], depth)?,
                    strip_tabs: false,
                    delim: None,
                }))
            }
            other => Err(cur.schema(format!("unknown redirect tag `{other}`"))),
        }
    }
}
