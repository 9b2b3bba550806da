//! Rectangular text spans.

use serde::{Deserialize, Serialize};

/// A span of source text: 1-based lines, 0-based columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRange {
    /// First line (1-based).
    pub start_line: usize,
    /// Column on the first line (0-based).
    pub start_col: usize,
    /// Last line (1-based).
    pub end_line: usize,
    /// Column on the last line (0-based).
    pub end_col: usize,
}

impl SourceRange {
    /// Create a new range.
    pub fn new(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Whether `(line, col)` falls inside the range.
    ///
    /// Interior lines accept any column; the first line only bounds the
    /// column from below and the last line only from above.
    pub fn contains(&self, line: usize, col: usize) -> bool {
        if line < self.start_line || line > self.end_line {
            return false;
        }

        if self.start_line == self.end_line {
            return col >= self.start_col && col <= self.end_col;
        }

        if line == self.start_line {
            col >= self.start_col
        } else if line == self.end_line {
            col <= self.end_col
        } else {
            true
        }
    }

    /// Number of lines covered, inclusive.
    pub fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }
}
