use std::path::Path;

use tracing::debug;
use tree_sitter::{Node, Parser, Tree};

use crate::error::{Result, ScanError};
use crate::model::{DeclarationKind, Language};

pub mod bindings;
pub mod syntax;

/// A parsed source file.
///
/// Owns both the tree-sitter tree and the text it was parsed from, so node
/// text can be sliced without copying the source around.
pub struct SourceTree {
    tree: Tree,
    source: String,
}

impl SourceTree {
    /// Parse `source` with the grammar implied by the extension of `path`.
    ///
    /// tree-sitter always produces a tree, recovering from bad input with
    /// ERROR and MISSING nodes. When the tree has any, the file is checked
    /// with [`syntax::is_well_formed`]: malformed files are reported as a
    /// [`ScanError::Parse`] at the first error node, and files that only hit
    /// a grammar gap keep their recovered tree.
    pub fn parse(source: impl Into<String>, path: &Path) -> Result<Self> {
        let source = source.into();
        let language = detect_language(path).ok_or_else(|| ScanError::UnsupportedFile {
            path: path.to_path_buf(),
        })?;
        let mut parser = create_parser(language)?;
        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| ScanError::Parse {
                path: path.to_path_buf(),
                line: 1,
                column: 1,
            })?;

        let root = tree.root_node();
        if root.has_error() {
            let (line, column) = first_error_position(root).unwrap_or((1, 1));
            if !syntax::is_well_formed(&source, path) {
                return Err(ScanError::Parse {
                    path: path.to_path_buf(),
                    line,
                    column,
                });
            }
            debug!(path = %path.display(), line, column, "grammar gap in well-formed file");
        }

        Ok(Self { tree, source })
    }

    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode::new(self.tree.root_node(), &self.source)
    }

    /// Visit every node in pre-order, depth-first, exactly once.
    pub fn walk<'t, F>(&'t self, mut visit: F)
    where
        F: FnMut(SyntaxNode<'t>),
    {
        let mut cursor = self.tree.walk();
        loop {
            visit(SyntaxNode::new(cursor.node(), &self.source));
            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return;
                }
            }
        }
    }
}

/// A borrowed view of one syntax node and the text it spans.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'t> {
    node: Node<'t>,
    source: &'t str,
}

impl<'t> SyntaxNode<'t> {
    fn new(node: Node<'t>, source: &'t str) -> Self {
        Self { node, source }
    }

    pub fn kind(&self) -> &'static str {
        self.node.kind()
    }

    pub fn text(&self) -> &'t str {
        self.node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// 1-based line where the node starts.
    pub fn line(&self) -> usize {
        self.node.start_position().row + 1
    }

    pub fn is_import_declaration(&self) -> bool {
        self.node.kind() == "import_statement"
    }

    pub fn is_export_declaration(&self) -> bool {
        self.node.kind() == "export_statement"
    }

    pub fn declaration_kind(&self) -> Option<DeclarationKind> {
        if self.is_import_declaration() {
            Some(DeclarationKind::Import)
        } else if self.is_export_declaration() {
            Some(DeclarationKind::Export)
        } else {
            None
        }
    }

    /// The module specifier of an import/export declaration, without quotes.
    ///
    /// Returns `None` for anything that is not a declaration with a string
    /// literal source: local `export { a }`, `export const`, and TypeScript
    /// `import x = require("...")` all carry no source field.
    pub fn module_specifier(&self) -> Option<&'t str> {
        self.declaration_kind()?;
        let source = self.field("source")?;
        if source.kind() != "string" {
            return None;
        }
        Some(string_contents(source.text()))
    }

    pub fn field(&self, name: &str) -> Option<SyntaxNode<'t>> {
        self.node
            .child_by_field_name(name)
            .map(|n| SyntaxNode::new(n, self.source))
    }

    /// Named children in source order (punctuation and keywords skipped).
    pub fn named_children(&self) -> Vec<SyntaxNode<'t>> {
        let mut cursor = self.node.walk();
        self.node
            .named_children(&mut cursor)
            .map(|n| SyntaxNode::new(n, self.source))
            .collect()
    }
}

/// Strip one pair of matching surrounding quotes from a string literal.
pub(crate) fn string_contents(literal: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = literal
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    literal
}

pub fn detect_language(path: &Path) -> Option<Language> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(Language::from_extension)
}

fn create_parser(language: Language) -> Result<Parser> {
    let grammar: tree_sitter::Language = match language {
        Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        Language::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
    };
    let mut parser = Parser::new();
    parser
        .set_language(&grammar)
        .map_err(|source| ScanError::Grammar { language, source })?;
    Ok(parser)
}

/// Position (1-based line, 1-based column) of the first ERROR or MISSING node.
fn first_error_position(root: Node<'_>) -> Option<(usize, usize)> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            let pos = node.start_position();
            return Some((pos.row + 1, pos.column + 1));
        }
        // Only descend into subtrees that contain an error.
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}
