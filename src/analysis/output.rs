use clap::ValueEnum;

use super::aggregate::{sorted_by_file, unique_names};
use crate::model::ImportRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One unique name per line, sorted
    Simple,
    /// One line per declaration, grouped by file
    Detailed,
    /// Pretty-printed JSON records
    Json,
    /// Single-line JSON records
    Compact,
}

/// Format scan records for output. No trailing newline.
pub fn format_records(records: &[ImportRecord], format: &OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(records).unwrap_or_default(),
        OutputFormat::Compact => serde_json::to_string(records).unwrap_or_default(),
        OutputFormat::Simple => unique_names(records).join("\n"),
        OutputFormat::Detailed => sorted_by_file(records)
            .into_iter()
            .map(format_detailed_line)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// `file: name1, name2 (kind from specifier)`
fn format_detailed_line(record: &ImportRecord) -> String {
    format!(
        "{}: {} ({} from {})",
        record.file.display(),
        record.bound_names.join(", "),
        record.declaration_kind,
        record.package_specifier,
    )
}
