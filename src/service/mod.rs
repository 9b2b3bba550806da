//! Request/response contract for hosts that expose the engine over JSON.
//!
//! Each handler takes the engine explicitly: hosts create one engine per
//! request or session, or guard a shared one with their own lock. Preview
//! fields are truncated to the engine's `preview_chars` budget.

use crate::engine::RefactoringEngine;
use crate::result::{AvailableRefactoring, Change, RefactoringResult};
use log::warn;
use serde::{Deserialize, Serialize};

const PARSE_FAILURE: &str = "failed to parse source";

/// Input for [`handle_extract`].
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractRequest {
    /// Source text.
    pub source: String,
    /// Name of the new function.
    pub name: String,
    /// First line to extract (1-based).
    pub start_line: i64,
    /// Last line to extract (1-based, inclusive).
    pub end_line: i64,
    /// Parameter list for the new function.
    #[serde(default)]
    pub parameters: Vec<String>,
}

/// Output of [`handle_extract`].
#[derive(Debug, Clone, Serialize)]
pub struct ExtractResponse {
    /// Whether the extraction succeeded.
    pub success: bool,
    /// Preview of the original source.
    pub original: String,
    /// Preview of the refactored source.
    pub refactored: String,
    /// Edits applied.
    pub changes: Vec<Change>,
    /// Failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Input for [`handle_rename`].
#[derive(Debug, Clone, Deserialize)]
pub struct RenameRequest {
    /// Source text.
    pub source: String,
    /// Current name.
    pub old_name: String,
    /// Replacement name.
    pub new_name: String,
}

/// Output of [`handle_rename`].
#[derive(Debug, Clone, Serialize)]
pub struct RenameResponse {
    /// Whether the rename succeeded.
    pub success: bool,
    /// Number of occurrences replaced.
    pub changes: usize,
    /// Preview of the refactored source.
    pub refactored: String,
    /// Failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Input for [`handle_move`].
#[derive(Debug, Clone, Deserialize)]
pub struct MoveRequest {
    /// Source text.
    pub source: String,
    /// Function or class to move.
    pub symbol_name: String,
    /// File receiving the definition.
    pub target_file: String,
}

/// Output of [`handle_move`].
#[derive(Debug, Clone, Serialize)]
pub struct MoveResponse {
    /// Whether the move succeeded.
    pub success: bool,
    /// Edits applied to the source file.
    pub source_file_changes: Vec<Change>,
    /// Preview of the new file's content.
    pub new_file: Option<String>,
    /// Failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Input for [`handle_availability`].
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityRequest {
    /// Source text.
    pub source: String,
    /// Cursor line (1-based).
    pub line: usize,
    /// Cursor column (0-based).
    pub col: usize,
}

/// Output of [`handle_availability`].
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    /// Offered refactorings.
    pub refactorings: Vec<AvailableRefactoring>,
    /// Number of offered refactorings.
    pub count: usize,
}

/// Truncate `text` to at most `limit` characters.
pub fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Parse and extract.
pub fn handle_extract(engine: &mut RefactoringEngine, request: &ExtractRequest) -> ExtractResponse {
    let limit = engine.config().preview_chars;
    if !engine.parse_source(&request.source) {
        return ExtractResponse {
            success: false,
            original: preview(&request.source, limit),
            refactored: String::new(),
            changes: Vec::new(),
            error: Some(PARSE_FAILURE.to_string()),
        };
    }

    let result = engine.extract_function(
        &request.name,
        request.start_line,
        request.end_line,
        request.parameters.as_slice(),
    );
    ExtractResponse {
        success: result.success,
        original: preview(&result.original_source, limit),
        refactored: preview(&result.refactored_source, limit),
        changes: result.changes,
        error: result.error,
    }
}

/// Parse and rename.
pub fn handle_rename(engine: &mut RefactoringEngine, request: &RenameRequest) -> RenameResponse {
    let limit = engine.config().preview_chars;
    if !engine.parse_source(&request.source) {
        return RenameResponse {
            success: false,
            changes: 0,
            refactored: String::new(),
            error: Some(PARSE_FAILURE.to_string()),
        };
    }

    let result = engine.rename_symbol(&request.old_name, &request.new_name);
    RenameResponse {
        success: result.success,
        changes: result.changes.len(),
        refactored: preview(&result.refactored_source, limit),
        error: result.error,
    }
}

/// Parse and move.
pub fn handle_move(engine: &mut RefactoringEngine, request: &MoveRequest) -> MoveResponse {
    let limit = engine.config().preview_chars;
    if !engine.parse_source(&request.source) {
        return MoveResponse {
            success: false,
            source_file_changes: Vec::new(),
            new_file: None,
            error: Some(PARSE_FAILURE.to_string()),
        };
    }

    let (result, new_file): (RefactoringResult, Option<String>) =
        engine.move_to_file(&request.symbol_name, &request.target_file);
    MoveResponse {
        success: result.success,
        source_file_changes: result.changes,
        new_file: new_file.map(|content| preview(&content, limit)),
        error: result.error,
    }
}

/// Parse and list available refactorings. A source that does not parse
/// yields an empty list.
pub fn handle_availability(
    engine: &mut RefactoringEngine,
    request: &AvailabilityRequest,
) -> AvailabilityResponse {
    if !engine.parse_source(&request.source) {
        return AvailabilityResponse {
            refactorings: Vec::new(),
            count: 0,
        };
    }

    let refactorings = engine
        .get_available_refactorings(request.line, request.col)
        .unwrap_or_else(|e| {
            warn!("availability query failed: {}", e);
            Vec::new()
        });
    AvailabilityResponse {
        count: refactorings.len(),
        refactorings,
    }
}
