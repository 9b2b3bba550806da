//! Python-specific tree-sitter parsing logic.
//!
//! This module wraps tree-sitter-python: it produces syntax trees, reports
//! the first syntax error, and enumerates function and class definitions
//! with line/column spans.

use crate::error::{RefactorError, Result};
use crate::range::SourceRange;
use serde::Serialize;
use unicode_ident::{is_xid_continue, is_xid_start};

/// Python reserved words. A rename must not produce one of these.
const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise",
    "return", "try", "while", "with", "yield",
];

/// Kinds of definitions the engine can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefinitionKind {
    /// `def` (or `async def`) statement.
    Function,
    /// `class` statement.
    Class,
}

impl DefinitionKind {
    /// Convert to string for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            DefinitionKind::Function => "function",
            DefinitionKind::Class => "class",
        }
    }
}

/// A function or class definition located in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionNode {
    /// Defined name.
    pub name: String,

    /// Function or class.
    pub kind: DefinitionKind,

    /// Header position through the end of the body.
    pub range: SourceRange,

    /// First line of attached decorators, or the header line when undecorated.
    pub decorated_start_line: usize,
}

/// Create a tree-sitter parser for Python.
fn python_parser() -> Result<tree_sitter::Parser> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&tree_sitter_python::language())
        .map_err(|e| RefactorError::Other(format!("Failed to set Python language: {:?}", e)))?;
    Ok(parser)
}

/// Parse Python source, rejecting trees that contain error or missing nodes.
pub fn parse_python(source: &str) -> Result<tree_sitter::Tree> {
    let mut parser = python_parser()?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| RefactorError::Parse {
            line: 1,
            column: 0,
            message: "Parse failed - no tree returned".to_string(),
        })?;

    if let Some(bad) = first_error(tree.root_node()) {
        let position = bad.start_position();
        let message = if bad.is_missing() {
            format!("missing '{}'", bad.kind())
        } else {
            "unexpected token".to_string()
        };
        return Err(RefactorError::Parse {
            line: position.row + 1,
            column: position.column,
            message,
        });
    }

    Ok(tree)
}

/// Find the first error or missing node in document order.
fn first_error(node: tree_sitter::Node) -> Option<tree_sitter::Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find_map(first_error);
    found
}

/// Collect every function and class definition in document (pre-)order.
///
/// `lines` must be the line array of the parsed source; it is used to pull
/// end positions back over trailing blank lines.
pub fn collect_definitions(
    tree: &tree_sitter::Tree,
    source: &str,
    lines: &[String],
) -> Vec<DefinitionNode> {
    let mut definitions = Vec::new();
    walk_definitions(tree.root_node(), source.as_bytes(), lines, &mut definitions);
    definitions
}

fn walk_definitions(
    node: tree_sitter::Node,
    source: &[u8],
    lines: &[String],
    definitions: &mut Vec<DefinitionNode>,
) {
    let kind = match node.kind() {
        "function_definition" => Some(DefinitionKind::Function),
        "class_definition" => Some(DefinitionKind::Class),
        _ => None,
    };

    if let Some(kind) = kind {
        if let Some(definition) = definition_node(node, source, lines, kind) {
            definitions.push(definition);
        }
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk_definitions(child, source, lines, definitions);
    }
}

fn definition_node(
    node: tree_sitter::Node,
    source: &[u8],
    lines: &[String],
    kind: DefinitionKind,
) -> Option<DefinitionNode> {
    let name = node
        .child_by_field_name("name")?
        .utf8_text(source)
        .ok()?
        .to_string();

    let start = node.start_position();
    let end = node.end_position();

    let start_line = start.row + 1;
    let (mut end_line, mut end_col) = (end.row + 1, end.column);

    // A node that stops at column 0 really ended on the previous line
    if end_col == 0 && end_line > start_line {
        end_line -= 1;
        end_col = line_len(lines, end_line);
    }
    while end_line > start_line && is_blank(lines, end_line) {
        end_line -= 1;
        end_col = line_len(lines, end_line);
    }

    let decorated_start_line = node
        .parent()
        .filter(|parent| parent.kind() == "decorated_definition")
        .map(|parent| parent.start_position().row + 1)
        .unwrap_or(start_line);

    Some(DefinitionNode {
        name,
        kind,
        range: SourceRange::new(start_line, start.column, end_line, end_col),
        decorated_start_line,
    })
}

fn line_len(lines: &[String], line: usize) -> usize {
    lines.get(line - 1).map(|l| l.len()).unwrap_or(0)
}

fn is_blank(lines: &[String], line: usize) -> bool {
    lines
        .get(line - 1)
        .map(|l| l.trim().is_empty())
        .unwrap_or(true)
}

/// Whether `name` is a syntactically valid identifier (XID rules, with
/// `_` allowed as a start character).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_xid_start(first) || first == '_' => chars.all(is_xid_continue),
        _ => false,
    }
}

/// Whether `name` is a reserved keyword.
pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}
