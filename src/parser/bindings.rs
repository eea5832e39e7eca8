//! Bound-name extraction for import and export declarations.
//!
//! Tree-sitter shapes handled here:
//!
//! ```text
//! import_statement  > import_clause > identifier          (default)
//!                                   > named_imports > import_specifier[name, alias?]
//!                                   > namespace_import > identifier
//! export_statement  > export_clause > export_specifier[name, alias?]
//!                   > namespace_export > identifier | string
//! ```

use super::{string_contents, SyntaxNode};
use crate::model::DeclarationKind;

/// Names an import/export declaration binds or re-exports, in source order.
///
/// Returns an empty list for nodes that are not declarations and for
/// declarations with no clause (`import "pkg"`, `export * from "pkg"`).
pub fn extract_bound_names(node: &SyntaxNode<'_>) -> Vec<String> {
    let mut names = Vec::new();
    match node.declaration_kind() {
        Some(DeclarationKind::Import) => {
            for child in node.named_children() {
                match child.kind() {
                    "import_clause" => extract_import_clause(&child, &mut names),
                    "named_imports" => extract_specifiers(&child, "import_specifier", &mut names),
                    "namespace_import" => extract_namespace(&child, &mut names),
                    _ => {}
                }
            }
        }
        Some(DeclarationKind::Export) => {
            for child in node.named_children() {
                match child.kind() {
                    "export_clause" => extract_specifiers(&child, "export_specifier", &mut names),
                    "namespace_export" => extract_namespace(&child, &mut names),
                    _ => {}
                }
            }
        }
        None => {}
    }
    names
}

fn extract_import_clause(clause: &SyntaxNode<'_>, names: &mut Vec<String>) {
    for child in clause.named_children() {
        match child.kind() {
            // import Foo from '...'
            "identifier" => names.push(child.text().to_string()),
            "named_imports" => extract_specifiers(&child, "import_specifier", names),
            "namespace_import" => extract_namespace(&child, names),
            _ => {}
        }
    }
}

/// `{ a, b as c }`: the alias when present, otherwise the name itself.
fn extract_specifiers(list: &SyntaxNode<'_>, specifier_kind: &str, names: &mut Vec<String>) {
    for specifier in list.named_children() {
        if specifier.kind() != specifier_kind {
            continue;
        }
        let local = specifier
            .field("alias")
            .or_else(|| specifier.field("name"))
            .map(|n| binding_text(&n));
        if let Some(local) = local.filter(|n| !n.is_empty()) {
            names.push(local);
        }
    }
}

/// `* as ns`
fn extract_namespace(node: &SyntaxNode<'_>, names: &mut Vec<String>) {
    let ident = node
        .named_children()
        .into_iter()
        .find(|c| matches!(c.kind(), "identifier" | "string"));
    if let Some(ident) = ident {
        names.push(binding_text(&ident));
    }
}

/// Identifier text, or the contents of an arbitrary-name string literal
/// (`export { "a-b" } from '...'`).
fn binding_text(node: &SyntaxNode<'_>) -> String {
    if node.kind() == "string" {
        string_contents(node.text()).to_string()
    } else {
        node.text().to_string()
    }
}
