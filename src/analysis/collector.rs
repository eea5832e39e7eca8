use std::path::Path;

use crate::matcher::PackageMatcher;
use crate::model::ImportRecord;
use crate::parser::bindings::extract_bound_names;
use crate::parser::SourceTree;

/// Append a record to `records` for every declaration in `tree` that binds
/// at least one name from a package accepted by `matcher`.
///
/// `file` is stored on each record as-is; callers pass the root-relative
/// path. Traversal continues below declarations, so nested declarations
/// (e.g. inside `declare module` blocks) are found too.
pub fn collect_file(
    tree: &SourceTree,
    file: &Path,
    matcher: &PackageMatcher,
    records: &mut Vec<ImportRecord>,
) {
    tree.walk(|node| {
        let Some(kind) = node.declaration_kind() else {
            return;
        };
        let Some(specifier) = node.module_specifier() else {
            return;
        };
        if !matcher.matches(specifier) {
            return;
        }

        let bound_names = extract_bound_names(&node);
        if bound_names.is_empty() {
            return;
        }

        records.push(ImportRecord {
            file: file.to_path_buf(),
            declaration_kind: kind,
            package_specifier: specifier.to_string(),
            bound_names,
            line: node.line(),
        });
    });
}
