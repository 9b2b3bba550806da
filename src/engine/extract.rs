//! Extract-function: move a line range into a new function and call it.
//!
//! Purely textual. The caller decides the parameter list; nothing is
//! inferred from variable usage.

use super::ParsedUnit;
use crate::config::EngineConfig;
use crate::error::{RefactorError, Result};
use crate::result::Change;
use crate::syntax::{is_identifier, is_keyword};

pub(super) fn extract_function(
    unit: &ParsedUnit,
    config: &EngineConfig,
    name: &str,
    start_line: i64,
    end_line: i64,
    parameters: &[String],
) -> Result<(String, Vec<Change>)> {
    if !is_identifier(name) || is_keyword(name) {
        return Err(RefactorError::InvalidIdentifier(name.to_string()));
    }

    let lines = unit.lines();
    let start = clamp_index(start_line.saturating_sub(1), lines.len());
    let end = clamp_index(end_line, lines.len());
    if start >= end {
        return Err(RefactorError::EmptySelection {
            start_line,
            end_line,
        });
    }

    let selected = &lines[start..end];
    let indent = leading_whitespace(&selected[0]);
    let params = parameters.join(", ");

    let mut spliced: Vec<String> = Vec::with_capacity(lines.len() + 2);
    spliced.extend_from_slice(&lines[..start]);
    spliced.push(format!("{}def {}({}):", indent, name, params));
    for line in selected {
        let body = strip_indent(line, indent.len());
        if body.trim().is_empty() {
            spliced.push(String::new());
        } else {
            spliced.push(format!("{}{}{}", indent, config.indent_unit, body));
        }
    }
    spliced.push(format!("{}{}({})", indent, name, params));
    spliced.extend_from_slice(&lines[end..]);

    let change = Change::ExtractFunction {
        name: name.to_string(),
        start_line,
        end_line,
        parameters: parameters.to_vec(),
    };

    Ok((unit.join_lines(&spliced), vec![change]))
}

/// Map a possibly out-of-range line number onto `0..=len`.
fn clamp_index(value: i64, len: usize) -> usize {
    if value <= 0 {
        return 0;
    }
    usize::try_from(value).map_or(len, |v| v.min(len))
}

fn leading_whitespace(line: &str) -> &str {
    let rest = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - rest.len()]
}

/// Remove at most `width` bytes of leading whitespace.
fn strip_indent(line: &str, width: usize) -> &str {
    let available = leading_whitespace(line).len().min(width);
    &line[available..]
}
