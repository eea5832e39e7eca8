use std::collections::BTreeSet;

use crate::model::ImportRecord;

/// Flatten every record's bound names into a sorted, de-duplicated list.
///
/// Each name goes through [`split_binding`] first, so a name that arrives
/// as `"{ a, b }"` is counted as `a` and `b`.
pub fn unique_names(records: &[ImportRecord]) -> Vec<String> {
    let mut names = BTreeSet::new();
    for record in records {
        for raw in &record.bound_names {
            names.extend(split_binding(raw));
        }
    }
    names.into_iter().collect()
}

/// Strip braces, trim, and split on commas, dropping empty pieces.
pub fn split_binding(raw: &str) -> Vec<String> {
    let cleaned: String = raw.chars().filter(|c| *c != '{' && *c != '}').collect();
    cleaned
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Records ordered by file path; records from the same file keep their
/// source order.
pub fn sorted_by_file(records: &[ImportRecord]) -> Vec<&ImportRecord> {
    let mut sorted: Vec<&ImportRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.file.cmp(&b.file));
    sorted
}
