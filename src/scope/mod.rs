//! Flat definition/reference index over a Python syntax tree.
//!
//! A single pre-order traversal records where names are written and read.
//! Function and class bodies push and pop a scope frame, but the frame is
//! bookkeeping only: both maps are file-global, so a nested definition
//! overwrites an outer definition of the same name for the rest of the walk.

use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/// Line/column of a name occurrence (1-based line, 0-based column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SymbolPosition {
    /// Line (1-based).
    pub line: usize,
    /// Column (0-based, in bytes).
    pub col: usize,
}

impl SymbolPosition {
    /// Create a new position.
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    fn of(node: tree_sitter::Node) -> Self {
        let point = node.start_position();
        Self::new(point.row + 1, point.column)
    }
}

/// Node kinds that wrap assignment targets without changing their context.
const TARGET_WRAPPERS: &[&str] = &[
    "pattern_list",
    "tuple_pattern",
    "list_pattern",
    "list_splat_pattern",
];

/// Subtrees whose identifiers are never name expressions.
const OPAQUE_NODES: &[&str] = &[
    "import_statement",
    "import_from_statement",
    "future_import_statement",
    "global_statement",
    "nonlocal_statement",
    "lambda_parameters",
];

/// How an identifier is used at its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameContext {
    Write,
    Read,
}

/// Scope-agnostic use/definition index.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScopeAnalyzer {
    definitions: BTreeMap<String, SymbolPosition>,
    references: BTreeMap<String, Vec<SymbolPosition>>,
    #[serde(skip)]
    scope_stack: Vec<String>,
    max_depth: usize,
}

impl ScopeAnalyzer {
    /// Create an empty analyzer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index for a parsed tree.
    pub fn analyze(tree: &tree_sitter::Tree, source: &str) -> Self {
        let mut analyzer = Self::new();
        analyzer.visit(tree.root_node(), source.as_bytes());
        debug!(
            "scope analysis: {} definitions, {} referenced names, max depth {}",
            analyzer.definitions.len(),
            analyzer.references.len(),
            analyzer.max_depth
        );
        analyzer
    }

    /// Name → last recorded definition position.
    pub fn definitions(&self) -> &BTreeMap<String, SymbolPosition> {
        &self.definitions
    }

    /// Name → read occurrences, in traversal order.
    pub fn references(&self) -> &BTreeMap<String, Vec<SymbolPosition>> {
        &self.references
    }

    /// Last recorded definition of `name`.
    pub fn definition_of(&self, name: &str) -> Option<SymbolPosition> {
        self.definitions.get(name).copied()
    }

    /// Read occurrences of `name`; empty when it is never read.
    pub fn references_to(&self, name: &str) -> &[SymbolPosition] {
        self.references
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Deepest function/class nesting seen during the walk.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn define(&mut self, name: &str, position: SymbolPosition) {
        self.definitions.insert(name.to_string(), position);
    }

    fn reference(&mut self, name: &str, position: SymbolPosition) {
        self.references
            .entry(name.to_string())
            .or_default()
            .push(position);
    }

    fn push_scope(&mut self, name: String) {
        self.scope_stack.push(name);
        self.max_depth = self.max_depth.max(self.scope_stack.len());
    }

    fn pop_scope(&mut self) {
        self.scope_stack.pop();
    }

    fn visit(&mut self, node: tree_sitter::Node, source: &[u8]) {
        let kind = node.kind();
        if OPAQUE_NODES.contains(&kind) {
            return;
        }

        match kind {
            "function_definition" => self.visit_function(node, source),
            "class_definition" => self.visit_class(node, source),
            "assignment" | "augmented_assignment" => {
                if let Some(left) = node.child_by_field_name("left") {
                    self.define_targets(left, source);
                }
                self.visit_children(node, source);
            }
            "identifier" => self.visit_identifier(node, source),
            "as_pattern_target" if node.named_child_count() == 0 => {
                if let Ok(name) = node.utf8_text(source) {
                    self.define(name, SymbolPosition::of(node));
                }
            }
            "attribute" => {
                // `obj.attr`: only the object is a name expression
                if let Some(object) = node.child_by_field_name("object") {
                    self.visit(object, source);
                }
            }
            "keyword_argument" => {
                if let Some(value) = node.child_by_field_name("value") {
                    self.visit(value, source);
                }
            }
            _ => self.visit_children(node, source),
        }
    }

    fn visit_children(&mut self, node: tree_sitter::Node, source: &[u8]) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child, source);
        }
    }

    fn visit_function(&mut self, node: tree_sitter::Node, source: &[u8]) {
        let header = SymbolPosition::of(node);
        let name = node
            .child_by_field_name("name")
            .and_then(|n| n.utf8_text(source).ok())
            .unwrap_or_default()
            .to_string();

        if !name.is_empty() {
            self.define(&name, header);
        }

        if let Some(parameters) = node.child_by_field_name("parameters") {
            self.visit_parameters(parameters, header.line, source);
        }

        self.push_scope(name);
        if let Some(return_type) = node.child_by_field_name("return_type") {
            self.visit(return_type, source);
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.visit(body, source);
        }
        self.pop_scope();
    }

    fn visit_class(&mut self, node: tree_sitter::Node, source: &[u8]) {
        let name = node
            .child_by_field_name("name")
            .and_then(|n| n.utf8_text(source).ok())
            .unwrap_or_default()
            .to_string();

        if !name.is_empty() {
            self.define(&name, SymbolPosition::of(node));
        }

        if let Some(superclasses) = node.child_by_field_name("superclasses") {
            self.visit(superclasses, source);
        }

        self.push_scope(name);
        if let Some(body) = node.child_by_field_name("body") {
            self.visit(body, source);
        }
        self.pop_scope();
    }

    /// Parameter names are definitions on the header line; annotations and
    /// default values are ordinary expressions.
    fn visit_parameters(&mut self, parameters: tree_sitter::Node, header_line: usize, source: &[u8]) {
        let mut cursor = parameters.walk();
        for param in parameters.children(&mut cursor) {
            match param.kind() {
                "identifier" => self.define_parameter(param, header_line, source),
                "list_splat_pattern" | "dictionary_splat_pattern" => {
                    if let Some(ident) = first_identifier(param) {
                        self.define_parameter(ident, header_line, source);
                    }
                }
                "typed_parameter" => {
                    if let Some(ident) = first_identifier(param) {
                        self.define_parameter(ident, header_line, source);
                    }
                    if let Some(ty) = param.child_by_field_name("type") {
                        self.visit(ty, source);
                    }
                }
                "default_parameter" | "typed_default_parameter" => {
                    if let Some(ident) = param.child_by_field_name("name") {
                        self.define_parameter(ident, header_line, source);
                    }
                    if let Some(ty) = param.child_by_field_name("type") {
                        self.visit(ty, source);
                    }
                    if let Some(value) = param.child_by_field_name("value") {
                        self.visit(value, source);
                    }
                }
                _ => {}
            }
        }
    }

    fn define_parameter(&mut self, ident: tree_sitter::Node, header_line: usize, source: &[u8]) {
        if let Ok(name) = ident.utf8_text(source) {
            let col = ident.start_position().column;
            self.define(name, SymbolPosition::new(header_line, col));
        }
    }

    /// Record simple assignment targets (`a = ...`, `a, b = ...`).
    fn define_targets(&mut self, target: tree_sitter::Node, source: &[u8]) {
        match target.kind() {
            "identifier" => {
                if let Ok(name) = target.utf8_text(source) {
                    self.define(name, SymbolPosition::of(target));
                }
            }
            kind if TARGET_WRAPPERS.contains(&kind) => {
                let mut cursor = target.walk();
                for child in target.named_children(&mut cursor) {
                    self.define_targets(child, source);
                }
            }
            _ => {}
        }
    }

    fn visit_identifier(&mut self, node: tree_sitter::Node, source: &[u8]) {
        let Ok(name) = node.utf8_text(source) else {
            return;
        };
        let position = SymbolPosition::of(node);
        match name_context(node) {
            NameContext::Write => self.define(name, position),
            NameContext::Read => self.reference(name, position),
        }
    }
}

fn first_identifier(node: tree_sitter::Node) -> Option<tree_sitter::Node> {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .find(|child| child.kind() == "identifier");
    found
}

/// Classify an identifier by climbing through target wrappers to the
/// statement that owns it.
fn name_context(node: tree_sitter::Node) -> NameContext {
    let mut current = node;
    let mut parent = node.parent();
    while let Some(p) = parent {
        if !TARGET_WRAPPERS.contains(&p.kind()) {
            break;
        }
        current = p;
        parent = p.parent();
    }

    let Some(parent) = parent else {
        return NameContext::Read;
    };

    let is_field = |field: &str| parent.child_by_field_name(field) == Some(current);

    match parent.kind() {
        "assignment" | "augmented_assignment" | "for_statement" | "for_in_clause"
            if is_field("left") =>
        {
            NameContext::Write
        }
        "named_expression" if is_field("name") => NameContext::Write,
        "as_pattern_target" => NameContext::Write,
        _ => NameContext::Read,
    }
}
