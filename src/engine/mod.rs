//! Stateful refactoring facade.
//!
//! The engine holds at most one [`ParsedUnit`]. `parse_source` replaces it
//! wholesale; every operation reads it and returns an independent
//! [`RefactoringResult`]. Operations take `&self`, so the borrow checker
//! rules out re-parsing while an operation is running.

mod available;
mod extract;
mod relocate;
mod rename;

use crate::config::EngineConfig;
use crate::error::{RefactorError, Result};
use crate::result::{AvailableRefactoring, Change, RefactoringKind, RefactoringResult};
use crate::scope::ScopeAnalyzer;
use crate::syntax::{collect_definitions, parse_python, DefinitionNode};
use log::{error, info, warn};

pub use relocate::module_path_for;

/// A successfully parsed source and everything derived from it.
#[derive(Debug, Clone)]
pub struct ParsedUnit {
    source: String,
    lines: Vec<String>,
    line_ending: &'static str,
    tree: tree_sitter::Tree,
    analyzer: ScopeAnalyzer,
}

impl ParsedUnit {
    /// Parse `source` and index it.
    pub fn parse(source: &str) -> Result<Self> {
        let tree = parse_python(source)?;
        let analyzer = ScopeAnalyzer::analyze(&tree, source);
        Ok(Self {
            source: source.to_string(),
            lines: source.lines().map(str::to_string).collect(),
            line_ending: detect_line_ending(source),
            tree,
            analyzer,
        })
    }

    /// Source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Source split on line breaks.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Line terminator used when rejoining lines: `"\r\n"` when the source
    /// contains any CRLF, otherwise `"\n"`.
    pub fn line_ending(&self) -> &'static str {
        self.line_ending
    }

    /// Syntax tree.
    pub fn tree(&self) -> &tree_sitter::Tree {
        &self.tree
    }

    /// Use/definition index.
    pub fn analyzer(&self) -> &ScopeAnalyzer {
        &self.analyzer
    }

    /// Function and class definitions in document order.
    pub fn definitions(&self) -> Vec<DefinitionNode> {
        collect_definitions(&self.tree, &self.source, &self.lines)
    }

    /// Rejoin `lines`, keeping the source's trailing newline if it had one.
    fn join_lines(&self, lines: &[String]) -> String {
        let mut text = lines.join(self.line_ending);
        if self.source.ends_with('\n') && !lines.is_empty() {
            text.push_str(self.line_ending);
        }
        text
    }
}

fn detect_line_ending(source: &str) -> &'static str {
    if source.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// Refactoring engine over one parsed unit at a time.
#[derive(Debug, Clone, Default)]
pub struct RefactoringEngine {
    config: EngineConfig,
    unit: Option<ParsedUnit>,
}

impl RefactoringEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config, unit: None }
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current parsed unit, if any.
    pub fn unit(&self) -> Option<&ParsedUnit> {
        self.unit.as_ref()
    }

    /// Whether a source has been parsed.
    pub fn is_parsed(&self) -> bool {
        self.unit.is_some()
    }

    /// Use/definition index of the current unit.
    pub fn analyzer(&self) -> Option<&ScopeAnalyzer> {
        self.unit.as_ref().map(ParsedUnit::analyzer)
    }

    /// Parse `text`, replacing the current unit on success.
    ///
    /// On a syntax error the previous unit is kept and the typed error is
    /// returned.
    pub fn try_parse(&mut self, text: &str) -> Result<()> {
        let unit = ParsedUnit::parse(text)?;
        info!(
            "parsed {} lines, {} names defined",
            unit.lines.len(),
            unit.analyzer.definitions().len()
        );
        self.unit = Some(unit);
        Ok(())
    }

    /// Parse `text`; returns `false` (and logs) on a syntax error.
    pub fn parse_source(&mut self, text: &str) -> bool {
        match self.try_parse(text) {
            Ok(()) => true,
            Err(e) => {
                warn!("parse failed, keeping previous source: {}", e);
                false
            }
        }
    }

    fn require_unit(&self) -> Result<&ParsedUnit> {
        self.unit.as_ref().ok_or(RefactorError::NoSourceParsed)
    }

    /// Replace lines `start_line..=end_line` with a call to a new function
    /// holding those lines.
    ///
    /// Lines are 1-based; out-of-range values are clamped to the source.
    pub fn extract_function<S: AsRef<str>>(
        &self,
        name: &str,
        start_line: i64,
        end_line: i64,
        parameters: &[S],
    ) -> RefactoringResult {
        let parameters: Vec<String> = parameters.iter().map(|p| p.as_ref().to_string()).collect();
        self.run(RefactoringKind::ExtractFunction, |unit| {
            extract::extract_function(unit, &self.config, name, start_line, end_line, &parameters)
        })
    }

    /// Rename every whole-identifier occurrence of `old_name`.
    pub fn rename_symbol(&self, old_name: &str, new_name: &str) -> RefactoringResult {
        self.run(RefactoringKind::RenameSymbol, |unit| {
            rename::rename_symbol(unit, old_name, new_name)
        })
    }

    /// Move the first definition named `symbol_name` out of the source.
    ///
    /// Returns the result for the original file and, on success, the code
    /// for `target_file`.
    pub fn move_to_file(
        &self,
        symbol_name: &str,
        target_file: &str,
    ) -> (RefactoringResult, Option<String>) {
        let unit = match self.require_unit() {
            Ok(unit) => unit,
            Err(e) => {
                error!("{}: {}", RefactoringKind::MoveToFile.as_str(), e);
                return (RefactoringResult::failure(String::new(), &e), None);
            }
        };

        match relocate::move_to_file(unit, symbol_name, target_file) {
            Ok(moved) => {
                info!(
                    "{}: moved '{}' to {}",
                    RefactoringKind::MoveToFile.as_str(),
                    symbol_name,
                    target_file
                );
                (
                    RefactoringResult::success(
                        unit.source.clone(),
                        moved.refactored_source,
                        vec![moved.change],
                    ),
                    Some(moved.new_file_content),
                )
            }
            Err(e) => {
                error!("{}: {}", RefactoringKind::MoveToFile.as_str(), e);
                (RefactoringResult::failure(unit.source.clone(), &e), None)
            }
        }
    }

    /// Refactorings offered at `(line, col)`.
    pub fn get_available_refactorings(
        &self,
        line: usize,
        col: usize,
    ) -> Result<Vec<AvailableRefactoring>> {
        let unit = self.require_unit()?;
        Ok(available::available_refactorings(
            unit,
            line,
            col,
            self.config.availability_slack,
        ))
    }

    /// Run an operation against the current unit, folding errors into a
    /// failed result.
    fn run<F>(&self, kind: RefactoringKind, op: F) -> RefactoringResult
    where
        F: FnOnce(&ParsedUnit) -> Result<(String, Vec<Change>)>,
    {
        let operation = kind.as_str();
        let unit = match self.require_unit() {
            Ok(unit) => unit,
            Err(e) => {
                error!("{}: {}", operation, e);
                return RefactoringResult::failure(String::new(), &e);
            }
        };

        match op(unit) {
            Ok((refactored, changes)) => {
                info!("{}: {} change(s)", operation, changes.len());
                RefactoringResult::success(unit.source.clone(), refactored, changes)
            }
            Err(e) => {
                error!("{}: {}", operation, e);
                RefactoringResult::failure(unit.source.clone(), &e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_engine_is_unparsed() {
        let engine = RefactoringEngine::default();
        assert!(!engine.is_parsed());
        assert!(engine.unit().is_none());
        assert!(engine.analyzer().is_none());
    }

    #[test]
    fn test_failed_parse_keeps_previous_unit() {
        let mut engine = RefactoringEngine::default();
        assert!(engine.parse_source("x = 1\n"));
        assert!(!engine.parse_source("def broken(:\n"));
        assert_eq!(engine.unit().unwrap().source(), "x = 1\n");
    }

    #[test]
    fn test_join_lines_keeps_trailing_newline() {
        let unit = ParsedUnit::parse("a = 1\nb = 2\n").unwrap();
        assert_eq!(unit.join_lines(unit.lines()), "a = 1\nb = 2\n");
        let unit = ParsedUnit::parse("a = 1").unwrap();
        assert_eq!(unit.join_lines(unit.lines()), "a = 1");
    }

    #[test]
    fn test_join_lines_keeps_crlf() {
        let unit = ParsedUnit::parse("a = 1\r\nb = 2\r\n").unwrap();
        assert_eq!(unit.line_ending(), "\r\n");
        assert_eq!(unit.lines()[0], "a = 1");
        assert_eq!(unit.join_lines(unit.lines()), "a = 1\r\nb = 2\r\n");
    }
}
