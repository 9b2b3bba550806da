//! Reforge error types.
//!
//! Every engine failure is one of these variants. Public engine operations
//! never return them directly; they fold them into a failed
//! [`RefactoringResult`](crate::result::RefactoringResult).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Reforge operations.
#[derive(Error, Debug)]
pub enum RefactorError {
    /// I/O error during file operations.
    #[error("I/O error for path {path}: {source}")]
    Io {
        /// The file path that caused the I/O error.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Source text did not parse cleanly.
    #[error("syntax error at line {line}, column {column}: {message}")]
    Parse {
        /// Line of the first error node (1-based).
        line: usize,
        /// Column of the first error node (0-based).
        column: usize,
        /// Parser diagnostic.
        message: String,
    },

    /// An operation was invoked before any source was parsed.
    #[error("no source parsed")]
    NoSourceParsed,

    /// No function or class definition carries the requested name.
    #[error("symbol not found: {0}")]
    SymbolNotFound(String),

    /// The requested line range selects no lines.
    #[error("empty selection: lines {start_line}..={end_line} select nothing")]
    EmptySelection {
        /// Requested first line (1-based, as given).
        start_line: i64,
        /// Requested last line (1-based, as given).
        end_line: i64,
    },

    /// A name is not usable as an identifier.
    #[error("invalid identifier: '{0}'")]
    InvalidIdentifier(String),

    /// A refactoring returned a failed result.
    #[error("{operation} failed: {message}")]
    OperationFailed {
        /// Operation name (extract_function, rename_symbol, move_to_file).
        operation: String,
        /// Error carried by the failed result.
        message: String,
    },

    /// Invalid plan schema.
    #[error("Invalid plan schema: {message}")]
    InvalidPlanSchema {
        /// The schema validation error message.
        message: String,
    },

    /// Plan execution failed at step.
    #[error("Plan execution failed at step {step}: {error}")]
    PlanExecutionFailed {
        /// The step number that failed (1-based).
        step: usize,
        /// The error that occurred.
        error: String,
    },

    /// The rename matcher could not be built.
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{0}")]
    Other(String),
}

impl RefactorError {
    /// Stable identifier used in CLI error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            RefactorError::Io { .. } => "Io",
            RefactorError::Parse { .. } => "Parse",
            RefactorError::NoSourceParsed => "NoSourceParsed",
            RefactorError::SymbolNotFound(_) => "SymbolNotFound",
            RefactorError::EmptySelection { .. } => "EmptySelection",
            RefactorError::InvalidIdentifier(_) => "InvalidIdentifier",
            RefactorError::OperationFailed { .. } => "OperationFailed",
            RefactorError::InvalidPlanSchema { .. } => "InvalidPlanSchema",
            RefactorError::PlanExecutionFailed { .. } => "PlanExecutionFailed",
            RefactorError::Pattern(_) => "Pattern",
            RefactorError::Json(_) => "Json",
            RefactorError::Other(_) => "Other",
        }
    }

    /// Short remediation hint, when one applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            RefactorError::Parse { .. } => Some("Fix the syntax error and retry."),
            RefactorError::SymbolNotFound(_) => {
                Some("Only top-level or nested `def`/`class` names can be moved.")
            }
            RefactorError::EmptySelection { .. } => {
                Some("Line numbers are 1-based and inclusive; check the file length.")
            }
            RefactorError::InvalidIdentifier(_) => {
                Some("Names must start with a letter or '_' and must not be keywords.")
            }
            _ => None,
        }
    }

    /// File path attached to the error, if any.
    pub fn file_path(&self) -> Option<&std::path::Path> {
        match self {
            RefactorError::Io { path, .. } => Some(path.as_path()),
            _ => None,
        }
    }
}

/// Result type alias for Reforge operations.
pub type Result<T> = std::result::Result<T, RefactorError>;
