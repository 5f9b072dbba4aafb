//! Go front end on top of tree-sitter-go.
//!
//! Uses tree-sitter-go crate's LANGUAGE constant (converted via .into()).
//! A file with any ERROR or MISSING node is rejected as a whole; the caller
//! turns that into a fatal parse error for the package.

use crate::parsing::comment::comment_text;
use crate::parsing::{Import, ImportAlias};
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser, Tree};

/// Go language parser
pub struct GoParser {
    parser: Parser,
}

/// Position and reason of the first syntax error in a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// 1-based
    pub line: usize,
    /// 1-based
    pub column: usize,
    pub reason: String,
}

/// A successfully parsed Go source file
pub struct ParsedFile {
    pub path: PathBuf,
    source: String,
    tree: Tree,
}

/// One top-level declaration that can produce an entity.
#[derive(Debug, Clone, Copy)]
pub enum Declaration<'tree> {
    Function(Node<'tree>),
    Method(Node<'tree>),
    /// A `type_spec` or `type_alias` together with its enclosing
    /// `type_declaration`, which holds the doc comment of ungrouped specs.
    Type {
        spec: Node<'tree>,
        group: Node<'tree>,
    },
}

impl<'tree> Declaration<'tree> {
    pub fn node(&self) -> Node<'tree> {
        match self {
            Declaration::Function(node) | Declaration::Method(node) => *node,
            Declaration::Type { spec, .. } => *spec,
        }
    }

    pub fn name<'s>(&self, source: &'s str) -> Option<&'s str> {
        self.node()
            .child_by_field_name("name")
            .map(|n| node_text(n, source))
    }

    /// The underlying type expression of a type declaration.
    pub fn type_node(&self) -> Option<Node<'tree>> {
        match self {
            Declaration::Type { spec, .. } => spec.child_by_field_name("type"),
            _ => None,
        }
    }

    /// Plain text of the doc comment attached to this declaration.
    pub fn doc(&self, source: &str) -> String {
        match self {
            Declaration::Function(node) | Declaration::Method(node) => doc_comment(*node, source),
            Declaration::Type { spec, group } => {
                let own = doc_comment(*spec, source);
                if own.is_empty() {
                    doc_comment(*group, source)
                } else {
                    own
                }
            }
        }
    }
}

impl GoParser {
    /// Create a new Go parser
    pub fn new() -> Result<Self, String> {
        let mut parser = Parser::new();
        let lang = tree_sitter_go::LANGUAGE;
        parser
            .set_language(&lang.into())
            .map_err(|e| format!("Failed to set Go language: {e}"))?;

        Ok(Self { parser })
    }

    /// Parse one file. Any syntax error rejects the file.
    pub fn parse(&mut self, path: &Path, source: String) -> Result<ParsedFile, SyntaxError> {
        let tree = self.parser.parse(&source, None).ok_or_else(|| SyntaxError {
            line: 1,
            column: 1,
            reason: "parser produced no tree".to_string(),
        })?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(first_syntax_error(root, &source));
        }

        Ok(ParsedFile {
            path: path.to_path_buf(),
            source,
            tree,
        })
    }
}

impl ParsedFile {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Name from the `package` clause.
    pub fn package_name(&self) -> Option<&str> {
        let root = self.root();
        let mut cursor = root.walk();
        let clause = root
            .children(&mut cursor)
            .find(|n| n.kind() == "package_clause")?;

        let mut cursor = clause.walk();
        let name = clause
            .children(&mut cursor)
            .find(|n| n.kind() == "package_identifier")?;
        Some(node_text(name, &self.source))
    }

    pub fn is_test_file(&self) -> bool {
        is_test_file(&self.path)
    }

    /// Functions, methods and type specs in source order.
    pub fn declarations(&self) -> Vec<Declaration<'_>> {
        let root = self.root();
        let mut declarations = Vec::new();

        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            match child.kind() {
                "function_declaration" => declarations.push(Declaration::Function(child)),
                "method_declaration" => declarations.push(Declaration::Method(child)),
                "type_declaration" => {
                    let mut spec_cursor = child.walk();
                    for spec in child.named_children(&mut spec_cursor) {
                        if matches!(spec.kind(), "type_spec" | "type_alias") {
                            declarations.push(Declaration::Type { spec, group: child });
                        }
                    }
                }
                _ => {}
            }
        }

        declarations
    }

    /// Import specs of this file in source order.
    pub fn imports(&self) -> Vec<Import> {
        let root = self.root();
        let mut imports = Vec::new();

        let mut cursor = root.walk();
        for decl in root.children(&mut cursor) {
            if decl.kind() != "import_declaration" {
                continue;
            }
            // import_declaration holds either a single import_spec or an import_spec_list
            for child in decl.children(&mut decl.walk()) {
                match child.kind() {
                    "import_spec" => {
                        imports.extend(self.import_from_spec(child, Some(decl)));
                    }
                    "import_spec_list" => {
                        for spec in child.children(&mut child.walk()) {
                            if spec.kind() == "import_spec" {
                                imports.extend(self.import_from_spec(spec, None));
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        imports
    }

    fn import_from_spec(&self, spec: Node, declaration: Option<Node>) -> Option<Import> {
        let source = self.source.as_str();
        let path_node = spec.child_by_field_name("path")?;
        let path = node_text(path_node, source).trim_matches(|c| c == '"' || c == '`');

        let alias = match spec.child_by_field_name("name") {
            Some(name) => match name.kind() {
                "dot" => ImportAlias::Dot,
                "blank_identifier" => ImportAlias::Anonymous,
                _ => ImportAlias::Named(node_text(name, source).to_string()),
            },
            None => ImportAlias::None,
        };

        let mut doc = doc_comment(spec, source);
        if doc.is_empty() {
            if let Some(declaration) = declaration {
                doc = doc_comment(declaration, source);
            }
        }

        Some(
            Import::new(path)
                .with_alias(alias)
                .with_doc(doc)
                .with_comment(trailing_comment(spec, source)),
        )
    }
}

/// `*_test.go` files are only parsed when tests are included.
pub fn is_test_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with("_test.go"))
}

/// Source text covered by a node.
pub fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    &source[node.byte_range()]
}

fn is_terminator(node: Node) -> bool {
    !node.is_named() && matches!(node.kind(), "\n" | ";" | "\0")
}

/// True if nothing but whitespace precedes the node on its first line.
fn starts_line(node: Node, source: &str) -> bool {
    let start = node.start_byte();
    let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
    source[line_start..start].trim().is_empty()
}

/// Doc comment directly above `anchor`: consecutive comments, each on its
/// own line, with no blank line inside the block or before the anchor.
pub fn doc_comment(anchor: Node, source: &str) -> String {
    let mut comments: Vec<&str> = Vec::new();
    let mut next_row = anchor.start_position().row;
    let mut current = anchor.prev_sibling();

    while let Some(sibling) = current {
        if is_terminator(sibling) {
            current = sibling.prev_sibling();
            continue;
        }
        if sibling.kind() != "comment"
            || sibling.end_position().row + 1 != next_row
            || !starts_line(sibling, source)
        {
            break;
        }

        comments.push(node_text(sibling, source));
        next_row = sibling.start_position().row;
        current = sibling.prev_sibling();
    }

    comments.reverse();
    comment_text(&comments)
}

/// Comment that follows `node` on the same line, if any.
pub fn trailing_comment(node: Node, source: &str) -> String {
    let row = node.end_position().row;
    let mut current = node.next_sibling().or_else(|| node.parent()?.next_sibling());

    while let Some(sibling) = current {
        if is_terminator(sibling) && sibling.start_position().row == row {
            current = sibling.next_sibling();
            continue;
        }
        if sibling.kind() == "comment" && sibling.start_position().row == row {
            return comment_text(&[node_text(sibling, source)]);
        }
        break;
    }

    String::new()
}

fn first_syntax_error(root: Node, source: &str) -> SyntaxError {
    let mut cursor = root.walk();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let position = node.start_position();
            let reason = if node.is_missing() {
                format!("missing '{}'", node.kind())
            } else {
                let snippet: String = node_text(node, source)
                    .lines()
                    .next()
                    .unwrap_or_default()
                    .chars()
                    .take(40)
                    .collect();
                format!("unexpected '{}'", snippet.trim())
            };
            return SyntaxError {
                line: position.row + 1,
                column: position.column + 1,
                reason,
            };
        }

        if node.has_error() {
            // Depth-first, leftmost child first
            let children: Vec<Node> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }

    SyntaxError {
        line: 1,
        column: 1,
        reason: "syntax error".to_string(),
    }
}
