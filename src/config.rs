//! Engine configuration.
//!
//! Loaded from a JSON file (missing fields fall back to defaults) and
//! optionally overridden from the command line.

use crate::error::{RefactorError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Extra columns past a definition's end column that still count as "on" it.
pub const AVAILABILITY_COLUMN_SLACK: usize = 10;

/// Character budget for preview fields in service responses.
pub const DEFAULT_PREVIEW_CHARS: usize = 500;

/// Indentation added to an extracted function body.
pub const DEFAULT_INDENT_UNIT: &str = "    ";

/// Tunables for [`RefactoringEngine`](crate::engine::RefactoringEngine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// One level of indentation for extracted bodies.
    pub indent_unit: String,
    /// Column slack for the availability query.
    pub availability_slack: usize,
    /// Preview truncation budget, in characters.
    pub preview_chars: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            indent_unit: DEFAULT_INDENT_UNIT.to_string(),
            availability_slack: AVAILABILITY_COLUMN_SLACK,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

impl EngineConfig {
    /// Read a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| RefactorError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Use `width` spaces as the indentation unit.
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_unit = " ".repeat(width);
        self
    }

    /// Override the availability slack.
    pub fn with_availability_slack(mut self, slack: usize) -> Self {
        self.availability_slack = slack;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"preview_chars": 80}"#).unwrap();
        assert_eq!(config.preview_chars, 80);
        assert_eq!(config.indent_unit, "    ");
        assert_eq!(config.availability_slack, AVAILABILITY_COLUMN_SLACK);
    }

    #[test]
    fn test_overrides() {
        let config = EngineConfig::default()
            .with_indent_width(2)
            .with_availability_slack(0);
        assert_eq!(config.indent_unit, "  ");
        assert_eq!(config.availability_slack, 0);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = EngineConfig::load(Path::new("/nonexistent/reforge.json")).unwrap_err();
        assert_eq!(err.kind(), "Io");
    }
}
