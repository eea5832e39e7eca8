//! Second opinion on files the tree-sitter grammars reject.
//!
//! tree-sitter-typescript trails the language: `export type * from` and
//! `in`/`out` variance modifiers come back as ERROR nodes. oxc follows the
//! TypeScript compiler, so a file it parses cleanly is well-formed and the
//! recovered tree-sitter tree is kept.

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;

/// Whether `source` parses without diagnostics as the file type implied by
/// `path`. Unknown extensions are never well-formed.
pub fn is_well_formed(source: &str, path: &Path) -> bool {
    let Ok(source_type) = SourceType::from_path(path) else {
        return false;
    };
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, source_type).parse();
    ret.errors.is_empty() && !ret.panicked
}
