//! Move-to-file: cut a function or class out of the source and import it
//! back from its new module.

use super::ParsedUnit;
use crate::error::{RefactorError, Result};
use crate::range::SourceRange;
use crate::result::Change;
use log::debug;

/// Output of a successful move.
pub(super) struct MovedDefinition {
    pub refactored_source: String,
    pub new_file_content: String,
    pub change: Change,
}

pub(super) fn move_to_file(
    unit: &ParsedUnit,
    symbol_name: &str,
    target_file: &str,
) -> Result<MovedDefinition> {
    let definition = unit
        .definitions()
        .into_iter()
        .find(|d| d.name == symbol_name)
        .ok_or_else(|| RefactorError::SymbolNotFound(symbol_name.to_string()))?;

    // Decorators travel with the definition
    let span = SourceRange::new(
        definition.decorated_start_line,
        0,
        definition.range.end_line,
        definition.range.end_col,
    );
    debug!(
        "moving {} '{}' ({} lines from line {})",
        definition.kind.as_str(),
        symbol_name,
        span.line_count(),
        span.start_line
    );

    let lines = unit.lines();
    let start = (span.start_line - 1).min(lines.len());
    let end = span.end_line.min(lines.len()).max(start);

    let moved = &lines[start..end];
    let mut new_file_content = moved.join(unit.line_ending());
    new_file_content.push_str(unit.line_ending());

    let mut remaining: Vec<String> = Vec::with_capacity(lines.len() - moved.len() + 1);
    remaining.push(format!(
        "from {} import {}",
        module_path_for(target_file),
        symbol_name
    ));
    remaining.extend_from_slice(&lines[..start]);
    remaining.extend_from_slice(&lines[end..]);

    let refactored_source = unit.join_lines(&remaining);

    Ok(MovedDefinition {
        refactored_source,
        new_file_content,
        change: Change::MoveToFile {
            symbol: symbol_name.to_string(),
            target_file: target_file.to_string(),
            lines_moved: moved.len(),
        },
    })
}

/// Derive an import path from a file path: `pkg/utils.py` → `pkg.utils`.
pub fn module_path_for(target_file: &str) -> String {
    let trimmed = target_file.trim_start_matches("./").trim_start_matches(".\\");
    let without_ext = match trimmed.rfind('.') {
        Some(dot) if !trimmed[dot..].contains(['/', '\\']) && dot > 0 => &trimmed[..dot],
        _ => trimmed,
    };
    without_ext.replace(['/', '\\'], ".")
}
