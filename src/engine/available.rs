//! Position-based availability query.

use super::ParsedUnit;
use crate::result::{AvailableRefactoring, RefactoringKind};

/// A definition is "under" the cursor when the line lies within its span and
/// the column lies between its header column and its end column plus
/// `slack`. The column test is intentionally loose.
pub(super) fn available_refactorings(
    unit: &ParsedUnit,
    line: usize,
    col: usize,
    slack: usize,
) -> Vec<AvailableRefactoring> {
    let mut offered = Vec::new();

    for definition in unit.definitions() {
        let range = definition.range;
        let on_lines = line >= range.start_line && line <= range.end_line;
        let on_cols = col >= range.start_col && col <= range.end_col.saturating_add(slack);
        if on_lines && on_cols {
            offered.push(AvailableRefactoring::for_symbol(
                RefactoringKind::ExtractFunction,
                &definition.name,
            ));
            offered.push(AvailableRefactoring::for_symbol(
                RefactoringKind::MoveToFile,
                &definition.name,
            ));
        }
    }

    offered.push(AvailableRefactoring::rename());
    offered
}
