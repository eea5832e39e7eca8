pub mod aggregate;
pub mod collector;
pub mod output;

use tracing::{debug, error, info, warn};

use crate::config::ScanConfig;
use crate::discovery::{discover_files, DiscoveredFile, DiscoveryConfig};
use crate::error::{Result, ScanError};
use crate::matcher::PackageMatcher;
use crate::model::{FileFailure, ImportRecord, ScanStats};
use crate::parser::SourceTree;

use self::collector::collect_file;
use self::output::{format_records, OutputFormat};

/// Scans a directory for declarations importing from one target package.
///
/// The scanner owns the records of its most recent scan; every call to
/// [`scan_directory`](Self::scan_directory) starts from an empty set.
pub struct ImportScanner {
    config: ScanConfig,
    matcher: PackageMatcher,
    records: Vec<ImportRecord>,
    failures: Vec<FileFailure>,
    stats: ScanStats,
}

impl ImportScanner {
    /// Fails only if the target is an invalid pattern.
    pub fn new(config: ScanConfig) -> Result<Self> {
        let matcher = PackageMatcher::new(&config.target)?;
        Ok(Self {
            config,
            matcher,
            records: Vec::new(),
            failures: Vec::new(),
            stats: ScanStats::default(),
        })
    }

    /// Scan every file under the root matching `patterns` (or the configured
    /// patterns when empty) and return the sorted unique bound names.
    ///
    /// A discovery failure is logged and yields an empty list.
    pub fn scan_directory(&mut self, patterns: &[String]) -> Vec<String> {
        match self.try_scan_directory(patterns) {
            Ok(names) => names,
            Err(err) => {
                error!(root = %self.config.root.display(), error = %err, "scan aborted");
                Vec::new()
            }
        }
    }

    /// Like [`scan_directory`](Self::scan_directory), but surfaces discovery
    /// failures to the caller. Unreadable or unparsable files are still
    /// skipped and listed in [`failures`](Self::failures).
    pub fn try_scan_directory(&mut self, patterns: &[String]) -> Result<Vec<String>> {
        self.records.clear();
        self.failures.clear();
        self.stats = ScanStats::default();

        let discovery = DiscoveryConfig {
            patterns: if patterns.is_empty() {
                self.config.patterns.clone()
            } else {
                patterns.to_vec()
            },
            exclude: self.config.exclude.clone(),
            respect_gitignore: self.config.respect_gitignore,
        };
        let files = discover_files(&self.config.root, &discovery)?;
        self.stats.files_discovered = files.len();

        for file in &files {
            match self.scan_file(file) {
                Ok(()) => self.stats.files_scanned += 1,
                Err(err) => {
                    warn!(path = %file.relative.display(), error = %err, "skipping file");
                    self.failures.push(FileFailure {
                        path: file.relative.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }

        self.stats.files_failed = self.failures.len();
        self.stats.records = self.records.len();
        info!(
            files = self.stats.files_discovered,
            failed = self.stats.files_failed,
            records = self.stats.records,
            "scan complete"
        );

        Ok(self.unique_names())
    }

    fn scan_file(&mut self, file: &DiscoveredFile) -> Result<()> {
        debug!(path = %file.relative.display(), language = %file.language, "scanning");
        let source = std::fs::read_to_string(&file.path).map_err(|source| ScanError::FileRead {
            path: file.relative.clone(),
            source,
        })?;
        let tree = SourceTree::parse(source, &file.relative)?;
        collect_file(&tree, &file.relative, &self.matcher, &mut self.records);
        Ok(())
    }

    /// Records from the last scan, in discovery then source order.
    pub fn detailed_results(&self) -> &[ImportRecord] {
        &self.records
    }

    /// Sorted unique bound names from the last scan.
    pub fn unique_names(&self) -> Vec<String> {
        aggregate::unique_names(&self.records)
    }

    /// Files skipped during the last scan.
    pub fn failures(&self) -> &[FileFailure] {
        &self.failures
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    pub fn render_results(&self, format: &OutputFormat) -> String {
        format_records(&self.records, format)
    }

    /// Write the last scan's results to stdout.
    pub fn print_results(&self, format: &OutputFormat) {
        let output = self.render_results(format);
        if !output.is_empty() {
            println!("{}", output);
        }
    }
}
