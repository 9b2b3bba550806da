//! Result values returned by engine operations.

use crate::error::RefactorError;
use serde::Serialize;

/// One atomic edit produced by an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Change {
    /// Lines replaced by a call to a new function.
    ExtractFunction {
        /// Name of the new function.
        name: String,
        /// First extracted line (1-based, as requested).
        start_line: i64,
        /// Last extracted line (1-based, as requested).
        end_line: i64,
        /// Parameters of the new function, verbatim.
        parameters: Vec<String>,
    },
    /// One identifier occurrence replaced.
    Rename {
        /// Previous name.
        old: String,
        /// New name.
        new: String,
        /// Character offset of the occurrence in the original text.
        position: usize,
    },
    /// A definition moved out of the source.
    MoveToFile {
        /// Moved symbol.
        symbol: String,
        /// File receiving the definition.
        target_file: String,
        /// Number of lines removed from the source.
        lines_moved: usize,
    },
}

/// Outcome of a single refactoring operation.
///
/// A failed result always has an empty `refactored_source` and a non-empty
/// `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefactoringResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Source the operation ran against.
    pub original_source: String,
    /// Rewritten source; empty on failure.
    pub refactored_source: String,
    /// Edits applied, in order.
    pub changes: Vec<Change>,
    /// Failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RefactoringResult {
    /// Successful result.
    pub fn success(original_source: String, refactored_source: String, changes: Vec<Change>) -> Self {
        Self {
            success: true,
            original_source,
            refactored_source,
            changes,
            error: None,
        }
    }

    /// Failed result carrying `error`'s message.
    pub fn failure(original_source: String, error: &RefactorError) -> Self {
        let mut message = error.to_string();
        if message.is_empty() {
            message = error.kind().to_string();
        }
        Self {
            success: false,
            original_source,
            refactored_source: String::new(),
            changes: Vec::new(),
            error: Some(message),
        }
    }
}

/// Refactorings the availability query can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefactoringKind {
    /// Extract lines into a new function.
    ExtractFunction,
    /// Move a definition to another file.
    MoveToFile,
    /// Rename a symbol.
    RenameSymbol,
}

impl RefactoringKind {
    /// Convert to string identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            RefactoringKind::ExtractFunction => "extract_function",
            RefactoringKind::MoveToFile => "move_to_file",
            RefactoringKind::RenameSymbol => "rename_symbol",
        }
    }
}

/// A refactoring offered at a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableRefactoring {
    /// What can be done.
    #[serde(rename = "type")]
    pub kind: RefactoringKind,
    /// Definition the refactoring applies to; `None` for rename.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Human-readable label.
    pub description: String,
}

impl AvailableRefactoring {
    /// Descriptor for a definition under the cursor.
    pub fn for_symbol(kind: RefactoringKind, symbol: &str) -> Self {
        let description = match kind {
            RefactoringKind::ExtractFunction => format!("Extract code from '{}' into a function", symbol),
            RefactoringKind::MoveToFile => format!("Move '{}' to another file", symbol),
            RefactoringKind::RenameSymbol => format!("Rename '{}'", symbol),
        };
        Self {
            kind,
            symbol: Some(symbol.to_string()),
            description,
        }
    }

    /// The always-offered rename descriptor.
    pub fn rename() -> Self {
        Self {
            kind: RefactoringKind::RenameSymbol,
            symbol: None,
            description: "Rename symbol".to_string(),
        }
    }
}
