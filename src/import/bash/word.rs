//! Word mapping for the superset front end.
//!
//! The superset parser hands words over as flat text plus flags; the text is
//! carried into the canonical tree as verbatim characters and never
//! re-escaped, since it may already contain quoting and expansion syntax.

use crate::ast::{word_from_verbatim, Assignment, Word};
use crate::import::cursor::Cursor;
use crate::import::error::ImportError;

/// Reads a word: either a bare string or a `{"text", "flags"}` object.
pub(crate) fn word(cur: &Cursor<'_>) -> Result<Word, ImportError> {
    Ok(word_from_verbatim(&text(cur)?))
}

/// Reads a list of words.
pub(crate) fn words(cur: &Cursor<'_>) -> Result<Vec<Word>, ImportError> {
    cur.elements()?.iter().map(word).collect()
}

/// The word's text.
pub(crate) fn text(cur: &Cursor<'_>) -> Result<String, ImportError> {
    if let Some(text) = cur.value.as_str() {
        return Ok(text.to_owned());
    }
    Ok(cur.field("text")?.str()?.to_owned())
}

/// Whether the word object carries the given flag.
pub(crate) fn has_flag(cur: &Cursor<'_>, flag: &str) -> Result<bool, ImportError> {
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

/// Splits a simple command's word list into assignment prefixes and
/// arguments. A word flagged `assignment` splits at its first `=`.
pub(crate) fn split_simple_words(
    cur: &Cursor<'_>,
) -> Result<(Vec<Assignment>, Vec<Word>), ImportError> {
    let mut assignments = Vec::new();
    let mut arguments = Vec::new();
    for entry in cur.elements()? {
        if has_flag(&entry, "assignment")? {
            assignments.push(assignment(&entry)?);
        } else {
            arguments.push(word(&entry)?);
        }
    }
    Ok((assignments, arguments))
}

fn assignment(cur: &Cursor<'_>) -> Result<Assignment, ImportError> {
    let text = text(cur)?;
    let Some(eq) = text.find('=') else {
        return Err(cur.schema("assignment word carries no `=`"));
    };
    Ok(Assignment {
        name: text[..eq].to_owned(),
        value: word_from_verbatim(&text[eq + 1..]),
    })
}
