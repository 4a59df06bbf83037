//! Importer for the bash-style superset front end.
//!
//! The input is the superset parser's own node hierarchy: objects carrying a
//! `type` tag, command flags, command-level redirections, and a `value`
//! object with per-type fields. Three mapping classes apply:
//!
//! - *direct* — constructs shared with the POSIX-style dialect map
//!   structurally, additionally populating descriptor variables,
//!   here-strings, and `after_ampersand` when present;
//! - *exclusive* — select loops, arithmetic and conditional commands,
//!   arithmetic for loops, coprocesses, timed commands, and the
//!   single-argument redirections map one-to-one onto their dedicated
//!   variants;
//! - *reconciling* — constructs both dialects express differently: the
//!   negated-loop keyword becomes a `While` over a `Not` test, explicit
//!   brace groups are kept or flattened depending on whether the grouping
//!   carries weight, and the parser's uniform connection node fans out into
//!   the operator-specific variants.
//!
//! A recognized construct with no reconciling mapping fails with
//! `UnsupportedConstruct` rather than guessing.

mod redirect;
mod word;

use serde_json::Value;

use crate::ast::{
    And, Arith, ArithFor, AstNode, Background, Case, CaseArm, Cond, CondKind, Coproc, Defun, For,
    Group, If, Not, Or, Pipe, Redir, Redirect, Select, Semi, SimpleCommand, Subshell, Time, While,
};
use crate::import::cursor::Cursor;
use crate::import::error::ImportError;
use crate::import::{semi_sequence, ImportOptions};

/// Imports a whole script: a top-level array of nodes, or a
/// `{"type": "File", "commands": […]}` wrapper, or a single node.
///
/// Like the POSIX-style importer, the top-level sequence folds into `Semi`
/// nodes with the default (newline) sequencing operator.
pub fn import_program(value: &Value, options: &ImportOptions) -> Result<AstNode, ImportError> {
    let importer = Importer::new(options);
    let root = Cursor::root(value);
    let list = if value.is_array() {
        Some(root.clone())
    } else if root
        .opt_field("type")
        .is_some_and(|t| t.value.as_str() == Some("File"))
    {
        Some(root.field("commands")?)
    } else {
        None
    };
    match list {
        Some(list) => {
            let nodes = list
                .elements()?
                .iter()
                .map(|cur| importer.node(cur, 0))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(semi_sequence(nodes))
        }
        None => importer.node(&root, 0),
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
    // Command dispatch
    // -----------------------------------------------------------------------

    fn node(&self, cur: &Cursor<'_>, depth: usize) -> Result<AstNode, ImportError> {
        self.check_depth(cur, depth)?;
        let type_cur = cur.field("type")?;
        let node_type = type_cur.str()?;
        let mut redirects = match cur.opt_field("redirects") {
            Some(list) => redirect::redirects(&list)?,
            None => Vec::new(),
        };
        let value = cur.field("value")?;

        let node = match node_type {
            "Simple" => self.simple(&value)?,
            // A background connection owns the command-level redirections;
            // every other connective leaves them to the plain wrapping below.
            "Connection" => {
                let node = self.connection(&value, &redirects, depth)?;
                if value.field("connector")?.str()? == "&" {
                    redirects = Vec::new();
                }
                node
            }
            "If" => self.if_node(&value, depth)?,
            "While" => AstNode::While(While {
                test: Box::new(self.node(&value.field("test")?, depth + 1)?),
                body: Box::new(self.node(&value.field("action")?, depth + 1)?),
            }),
            // The negated-loop keyword has no POSIX analogue; canonicalized
            // as a while loop over a negated test. The printer re-emits the
            // keyword for the superset dialect.
            "Until" => AstNode::While(While {
                test: Box::new(AstNode::Not(Not {
                    body: Box::new(self.node(&value.field("test")?, depth + 1)?),
                    no_braces: true,
                })),
                body: Box::new(self.node(&value.field("action")?, depth + 1)?),
            }),
            "For" => AstNode::For(For {
                line: self.line(&value)?,
                var: word::word(&value.field("name")?)?,
                items: word::words(&value.field("map_list")?)?,
                body: Box::new(self.node(&value.field("action")?, depth + 1)?),
            }),
            "Select" => AstNode::Select(Select {
                line: self.line(&value)?,
                var: word::word(&value.field("name")?)?,
                items: word::words(&value.field("map_list")?)?,
                body: Box::new(self.node(&value.field("action")?, depth + 1)?),
            }),
            "Case" => self.case_node(&value, depth)?,
            "FunctionDef" => self.defun(&value, depth)?,
            "Group" => self.group(&value, depth)?,
            "Subshell" => AstNode::Subshell(Subshell {
                line: self.line(&value)?,
                body: Box::new(self.node(&value.field("command")?, depth + 1)?),
                redirects: Vec::new(),
            }),
            "Arith" => AstNode::Arith(Arith {
                line: self.line(&value)?,
                body: word::words(&value.field("exp")?)?,
            }),
            "Cond" => AstNode::Cond(self.cond(&value, depth)?),
            "ArithFor" => AstNode::ArithFor(ArithFor {
                line: self.line(&value)?,
                init: word::words(&value.field("init")?)?,
                test: word::words(&value.field("test")?)?,
                step: word::words(&value.field("step")?)?,
                body: Box::new(self.node(&value.field("action")?, depth + 1)?),
            }),
            "Coproc" => AstNode::Coproc(Coproc {
                name: word::word(&value.field("name")?)?,
                body: Box::new(self.node(&value.field("command")?, depth + 1)?),
            }),
            other => {
                return Err(type_cur.unsupported(format!(
                    "command type `{other}` has no canonical mapping"
                )))
            }
        };

        let node = wrap_redirects(node, redirects);
        self.wrap_flags(cur, node)
    }

    /// Command-level flags wrap the finished node: `invert_return` negates
    /// it, the timing flags wrap it in a timed command.
    fn wrap_flags(&self, cur: &Cursor<'_>, node: AstNode) -> Result<AstNode, ImportError> {
        let mut node = node;
        if self.has_flag(cur, "invert_return")? {
            node = AstNode::Not(Not {
                body: Box::new(node),
                no_braces: true,
            });
        }
        if self.has_flag(cur, "time_pipeline")? {
            node = AstNode::Time(Time {
                posix: self.has_flag(cur, "time_posix")?,
                body: Box::new(node),
            });
        }
        Ok(node)
    }

    fn has_flag(&self, cur: &Cursor<'_>, flag: &str) -> Result<bool, ImportError> {
        let Some(flags) = cur.opt_field("flags") else {
            return Ok(false);
        };
        for entry in flags.elements()? {
            if entry.str()? == flag {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn line(&self, value: &Cursor<'_>) -> Result<Option<u32>, ImportError> {
        match value.opt_field("line") {
            Some(line) => line.line(),
            None => Ok(None),
        }
    }

    // -----------------------------------------------------------------------
    // Direct constructs
    // -----------------------------------------------------------------------

    fn simple(&self, value: &Cursor<'_>) -> Result<AstNode, ImportError> {
        let (assignments, words) = word::split_simple_words(&value.field("words")?)?;
        let redirects = match value.opt_field("redirects") {
            Some(list) => redirect::redirects(&list)?,
            None => Vec::new(),
        };
        Ok(AstNode::Simple(SimpleCommand {
            line: self.line(value)?,
            assignments,
            words,
            redirects,
        }))
    }

    fn if_node(&self, value: &Cursor<'_>, depth: usize) -> Result<AstNode, ImportError> {
        let else_branch = match value.opt_field("false_case") {
            Some(case) => Some(Box::new(self.node(&case, depth + 1)?)),
            None => None,
        };
        Ok(AstNode::If(If {
            cond: Box::new(self.node(&value.field("test")?, depth + 1)?),
            then_branch: Box::new(self.node(&value.field("true_case")?, depth + 1)?),
            else_branch,
        }))
    }

    fn case_node(&self, value: &Cursor<'_>, depth: usize) -> Result<AstNode, ImportError> {
        let mut arms = Vec::new();
        for clause in value.field("clauses")?.elements()? {
            let body = match clause.opt_field("action") {
                Some(action) => Some(Box::new(self.node(&action, depth + 1)?)),
                None => None,
            };
            arms.push(CaseArm {
                patterns: word::words(&clause.field("patterns")?)?,
                body,
                fallthrough: self.has_flag(&clause, "fallthrough")?,
            });
        }
        Ok(AstNode::Case(Case {
            line: self.line(value)?,
            word: word::word(&value.field("word")?)?,
            arms,
        }))
    }

    fn defun(&self, value: &Cursor<'_>, depth: usize) -> Result<AstNode, ImportError> {
        let reserved_word = match value.opt_field("reserved_word") {
            Some(flag) => flag.bool()?,
            None => false,
        };
        Ok(AstNode::Defun(Defun {
            line: self.line(value)?,
            name: word::word(&value.field("name")?)?,
            body: Box::new(self.node(&value.field("command")?, depth + 1)?),
            reserved_word,
        }))
    }

    // -----------------------------------------------------------------------
    // Reconciling constructs
    // -----------------------------------------------------------------------

    /// The parser models every connective with one node plus an operator
    /// tag; the canonical tree stores the operator in the variant.
    fn connection(
        &self,
        value: &Cursor<'_>,
        redirects: &[Redirect],
        depth: usize,
    ) -> Result<AstNode, ImportError> {
        let connector_cur = value.field("connector")?;
        let connector = connector_cur.str()?;
        let first = self.node(&value.field("first")?, depth + 1)?;

        if connector == "&" {
            let background = AstNode::Background(Background {
                line: None,
                after_ampersand: has_heredoc(&first),
                body: Box::new(first),
                redirects: redirects.to_vec(),
                no_braces: true,
            });
            return Ok(match value.opt_field("second") {
                Some(second) => AstNode::Semi(Semi {
                    left: Box::new(background),
                    right: Box::new(self.node(&second, depth + 1)?),
                    semicolon: false,
                }),
                None => background,
            });
        }

        let second = self.node(&value.field("second")?, depth + 1)?;
        Ok(match connector {
            "&&" => AstNode::And(And {
                left: Box::new(first),
                right: Box::new(second),
                no_braces: true,
            }),
            "||" => AstNode::Or(Or {
                left: Box::new(first),
                right: Box::new(second),
                no_braces: true,
            }),
            ";" => AstNode::Semi(Semi {
                left: Box::new(first),
                right: Box::new(second),
                semicolon: true,
            }),
            "\n" => AstNode::Semi(Semi {
                left: Box::new(first),
                right: Box::new(second),
                semicolon: false,
            }),
            "|" => {
                let mut commands = pipe_items(first);
                commands.extend(pipe_items(second));
                AstNode::Pipe(Pipe {
                    background: false,
                    commands,
                })
            }
            other => {
                return Err(connector_cur
                    .unsupported(format!("connector `{other}` has no canonical mapping")))
            }
        })
    }

    /// Explicit brace groups stay explicit when the grouping carries weight;
    /// a group around a single bare simple command is purely syntactic and
    /// flattens to its body. Command-level redirections are wrapped around
    /// the result by the caller either way.
    fn group(&self, value: &Cursor<'_>, depth: usize) -> Result<AstNode, ImportError> {
        let body = self.node(&value.field("command")?, depth + 1)?;
        match body {
            AstNode::Simple(ref cmd) if cmd.redirects.is_empty() => Ok(body),
            _ => Ok(AstNode::Group(Group {
                body: Box::new(body),
            })),
        }
    }

    fn cond(&self, value: &Cursor<'_>, depth: usize) -> Result<Cond, ImportError> {
        self.check_depth(value, depth)?;
        let kind_cur = value.field("cond_type")?;
        let kind = match kind_cur.str()? {
            "and" => CondKind::And,
            "or" => CondKind::Or,
            "unary" => CondKind::Unary,
            "binary" => CondKind::Binary,
            "term" => CondKind::Term,
            "expr" => CondKind::Expr,
            other => {
                return Err(
                    kind_cur.unsupported(format!("conditional kind `{other}` has no mapping"))
                )
            }
        };
        let op = match value.opt_field("op") {
            Some(op) => Some(word::word(&op)?),
            None => None,
        };
        let left = match value.opt_field("left") {
            Some(left) => Some(Box::new(self.cond(&left, depth + 1)?)),
            None => None,
        };
        let right = match value.opt_field("right") {
            Some(right) => Some(Box::new(self.cond(&right, depth + 1)?)),
            None => None,
        };
        Ok(Cond {
            line: self.line(value)?,
            kind,
            op,
            left,
            right,
            invert: self.has_flag(value, "invert_return")?,
        })
    }
}

/// Command-level redirections wrap the node. Background connections clear
/// their list before this runs; the job node owns them instead.
fn wrap_redirects(node: AstNode, redirects: Vec<Redirect>) -> AstNode {
    if redirects.is_empty() {
        return node;
    }
    AstNode::Redir(Redir {
        line: None,
        body: Box::new(node),
        redirects,
    })
}

/// Flattens nested pipelines so `a | b | c` becomes one stage list.
fn pipe_items(node: AstNode) -> Vec<AstNode> {
    match node {
        AstNode::Pipe(pipe) if !pipe.background => pipe.commands,
        other => vec![other],
    }
}

/// Whether a background job's command carries a here-document, directly or
/// under its command-level redirections.
fn has_heredoc(node: &AstNode) -> bool {
    match node {
        AstNode::Simple(cmd) => cmd.redirects.iter().any(Redirect::is_heredoc),
        AstNode::Redir(redir) => {
            redir.redirects.iter().any(Redirect::is_heredoc) || has_heredoc(&redir.body)
        }
        _ => false,
    }
}
