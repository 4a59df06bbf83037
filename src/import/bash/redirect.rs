//! Redirection mapping for the superset front end.
//!
//! The parser describes every redirection with one record: an instruction
//! name, a redirector (the descriptor side), a redirectee (the target side),
//! optional flags, and the here-document delimiter. This module folds that
//! record into the canonical redirect variants, including the superset-only
//! forms: descriptor variables (`{fd}>file`), here-strings, descriptor
//! moves, and the `&>` family.

use crate::ast::{
    DupKind, DupRedir, DupTarget, FdSpec, FileRedir, FileRedirKind, HeredocKind, HeredocRedir,
    Redirect, SingleArgRedir,
};
use crate::import::bash::word;
use crate::import::cursor::Cursor;
use crate::import::error::ImportError;
use crate::import::dup_target;

/// Reads a redirection list.
pub(crate) fn redirects(cur: &Cursor<'_>) -> Result<Vec<Redirect>, ImportError> {
    cur.elements()?.iter().map(redirect).collect()
}

/// Reads one redirection record.
pub(crate) fn redirect(cur: &Cursor<'_>) -> Result<Redirect, ImportError> {
    let instruction = cur.field("instruction")?;
    let instruction_name = instruction.str()?;
    let varassign = has_rflag(cur, "varassign")?;

    match instruction_name {
        "output_direction" => file(cur, FileRedirKind::To, varassign),
        "input_direction" => file(cur, FileRedirKind::From, varassign),
        "appending_to" => file(cur, FileRedirKind::Append, varassign),
        "input_output" => file(cur, FileRedirKind::FromTo, varassign),
        "output_force" => file(cur, FileRedirKind::Clobber, varassign),
        "reading_string" => file(cur, FileRedirKind::HereString, varassign),
        "reading_until" => heredoc(cur, false, varassign),
        "deblank_reading_until" => heredoc(cur, true, varassign),
        "duplicating_input" => dup(cur, DupKind::FromFd, TargetForm::Fd, false, varassign),
        "duplicating_output" => dup(cur, DupKind::ToFd, TargetForm::Fd, false, varassign),
        "duplicating_input_word" => dup(cur, DupKind::FromFd, TargetForm::Word, false, varassign),
        "duplicating_output_word" => dup(cur, DupKind::ToFd, TargetForm::Word, false, varassign),
        "move_input" => dup(cur, DupKind::FromFd, TargetForm::Fd, true, varassign),
        "move_output" => dup(cur, DupKind::ToFd, TargetForm::Fd, true, varassign),
        "move_input_word" => dup(cur, DupKind::FromFd, TargetForm::Word, true, varassign),
        "move_output_word" => dup(cur, DupKind::ToFd, TargetForm::Word, true, varassign),
        "close_this" => Ok(Redirect::SingleArg(SingleArgRedir::CloseThis {
            fd: fd_spec(cur, 0, varassign)?,
        })),
        "err_and_out" => Ok(Redirect::SingleArg(SingleArgRedir::ErrAndOut {
            target: redirectee_word(cur)?,
        })),
        "append_err_and_out" => Ok(Redirect::SingleArg(SingleArgRedir::AppendErrAndOut {
            target: redirectee_word(cur)?,
        })),
        other => Err(instruction.unsupported(format!(
            "redirection instruction `{other}` has no canonical mapping"
        ))),
    }
}

fn file(cur: &Cursor<'_>, kind: FileRedirKind, varassign: bool) -> Result<Redirect, ImportError> {
    Ok(Redirect::File(FileRedir {
        kind,
        fd: fd_spec(cur, kind.default_fd(), varassign)?,
        target: redirectee_word(cur)?,
    }))
}

fn heredoc(cur: &Cursor<'_>, strip_tabs: bool, varassign: bool) -> Result<Redirect, ImportError> {
    let body_cur = cur.field("redirectee")?.field("filename")?;
    // An unquoted delimiter makes the body subject to expansion; the parser
    // records the quoting on the body word.
    let kind = if word::has_flag(&body_cur, "quoted")? {
        HeredocKind::Here
    } else {
        HeredocKind::XHere
    };
    let delim = match cur.opt_field("here_doc_eof") {
        Some(eof) => Some(eof.str()?.to_owned()),
        None => None,
    };
    Ok(Redirect::Heredoc(HeredocRedir {
        kind,
        fd: fd_spec(cur, 0, varassign)?,
        body: word::word(&body_cur)?,
        strip_tabs,
        delim,
    }))
}

enum TargetForm {
    Fd,
    Word,
}

fn dup(
    cur: &Cursor<'_>,
    kind: DupKind,
    form: TargetForm,
    move_fd: bool,
    varassign: bool,
) -> Result<Redirect, ImportError> {
    let redirectee = cur.field("redirectee")?;
    let target = match form {
        TargetForm::Fd => DupTarget::Fd(redirectee.field("dest")?.u32()?),
        TargetForm::Word => dup_target(word::word(&redirectee.field("filename")?)?),
    };
    Ok(Redirect::Dup(DupRedir {
        kind,
        fd: fd_spec(cur, kind.default_fd(), varassign)?,
        target,
        move_fd,
    }))
}

/// Resolves the descriptor side of a record.
///
/// With `varassign` the redirector names a descriptor variable; otherwise it
/// carries a concrete descriptor, or nothing, in which case the operator's
/// default applies.
fn fd_spec(cur: &Cursor<'_>, default_fd: u32, varassign: bool) -> Result<FdSpec, ImportError> {
    let Some(redirector) = cur.opt_field("redirector") else {
        if varassign {
            return Err(cur.schema("varassign redirection carries no redirector"));
        }
        return Ok(FdSpec::Fixed(default_fd));
    };
    if varassign {
        let name = word::text(&redirector.field("filename")?)?;
        return Ok(FdSpec::Var(name));
    }
    match redirector.opt_field("dest") {
        Some(dest) => Ok(FdSpec::Fixed(dest.u32()?)),
        None => Ok(FdSpec::Fixed(default_fd)),
    }
}

fn redirectee_word(cur: &Cursor<'_>) -> Result<crate::ast::Word, ImportError> {
    word::word(&cur.field("redirectee")?.field("filename")?)
}

fn has_rflag(cur: &Cursor<'_>, flag: &str) -> Result<bool, ImportError> {
    let Some(rflags) = cur.opt_field("rflags") else {
        return Ok(false);
    };
    for entry in rflags.elements()? {
        if entry.str()? == flag {
            return Ok(true);
        }
    }
    Ok(false)
}
