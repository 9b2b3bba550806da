//! Reforge: text-level refactoring engine for Python source.
//!
//! Parses a snippet with tree-sitter, builds a flat definition/reference
//! index, and offers extract-function, rename-symbol, move-to-file and a
//! position-based availability query. Every operation returns a
//! [`RefactoringResult`] value; failures never escape as panics.

#![warn(missing_docs)]
// env_logger is used by src/main.rs (binary), not this library
#![expect(unused_crate_dependencies)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod plan;
pub mod range;
pub mod result;
pub mod scope;
pub mod service;
pub mod syntax;

/// Re-export common error types for convenience.
pub use error::{RefactorError, Result};

/// Re-export engine types for convenience.
pub use engine::{ParsedUnit, RefactoringEngine};

/// Re-export result types for convenience.
pub use result::{AvailableRefactoring, Change, RefactoringKind, RefactoringResult};

/// Reforge version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
