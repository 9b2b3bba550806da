//! Rename-symbol: whole-text, token-boundary substitution.
//!
//! Deliberately scope-unaware: every standalone occurrence of the name is
//! replaced, whatever it refers to.

use super::ParsedUnit;
use crate::error::{RefactorError, Result};
use crate::result::Change;
use crate::syntax::{is_identifier, is_keyword};
use regex::{NoExpand, Regex};
use ropey::Rope;

pub(super) fn rename_symbol(
    unit: &ParsedUnit,
    old_name: &str,
    new_name: &str,
) -> Result<(String, Vec<Change>)> {
    if !is_identifier(old_name) {
        return Err(RefactorError::InvalidIdentifier(old_name.to_string()));
    }
    if !is_identifier(new_name) || is_keyword(new_name) {
        return Err(RefactorError::InvalidIdentifier(new_name.to_string()));
    }

    let source = unit.source();
    let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(old_name)))?;
    let rope = Rope::from_str(source);

    let changes: Vec<Change> = pattern
        .find_iter(source)
        .map(|m| Change::Rename {
            old: old_name.to_string(),
            new: new_name.to_string(),
            position: rope.byte_to_char(m.start()),
        })
        .collect();

    let refactored = pattern.replace_all(source, NoExpand(new_name)).into_owned();
    Ok((refactored, changes))
}
