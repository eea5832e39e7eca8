use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};

use crate::config::{find_config_path, load_config, FileConfig, ScanConfig};
use crate::matcher::{MatchMode, TargetSpec};

pub use crate::analysis::output::{format_records, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "importscan",
    version,
    about = "List every name a codebase imports from a package",
    after_help = "Example: importscan --search-path ./packages --target-pkg @scope/pkg-name --exclude-paths packages/pkg"
)]
pub struct Cli {
    /// Glob patterns selecting files to scan (default: **/*.ts **/*.tsx)
    pub patterns: Vec<String>,

    /// Directory to scan
    #[arg(long = "search-path", alias = "searchPath", default_value = ".")]
    pub search_path: PathBuf,

    /// Package to look for: a specifier prefix, or a regex with --regex
    #[arg(long = "target-pkg", alias = "targetPkg")]
    pub target_pkg: Option<String>,

    /// Treat --target-pkg as a regular expression
    #[arg(long)]
    pub regex: bool,

    /// Comma-separated globs to exclude, relative to the search path
    #[arg(long = "exclude-paths", alias = "excludePaths", value_delimiter = ',')]
    pub exclude_paths: Vec<String>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Shorthand for --format json
    #[arg(long, conflicts_with_all = ["detailed", "format"])]
    pub json: bool,

    /// Shorthand for --format detailed
    #[arg(long, conflicts_with = "format")]
    pub detailed: bool,

    /// Config file (default: .importscan.toml or importscan.toml in the search path)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Scan files even if .gitignore excludes them
    #[arg(long)]
    pub no_gitignore: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.detailed {
            OutputFormat::Detailed
        } else {
            self.format.unwrap_or(OutputFormat::Simple)
        }
    }

    /// Merge command-line flags over the config file, if any.
    pub fn scan_config(&self) -> Result<ScanConfig> {
        let file = match find_config_path(&self.search_path, self.config.as_deref()) {
            Some(path) => load_config(&path)?,
            None => {
                if let Some(missing) = &self.config {
                    bail!("config file not found: {}", missing.display());
                }
                FileConfig::default()
            }
        };

        let target = self
            .target_pkg
            .clone()
            .or(file.target)
            .filter(|t| !t.is_empty())
            .context("--target-pkg is required (or set `target` in importscan.toml)")?;
        let mode = if self.regex {
            MatchMode::Pattern
        } else {
            file.mode.unwrap_or_default()
        };

        let mut exclude = file.exclude;
        exclude.extend(
            self.exclude_paths
                .iter()
                .filter(|p| !p.trim().is_empty())
                .cloned(),
        );

        let patterns = if self.patterns.is_empty() {
            file.patterns
        } else {
            self.patterns.clone()
        };

        Ok(ScanConfig {
            root: self.search_path.clone(),
            target: TargetSpec { target, mode },
            exclude,
            patterns,
            respect_gitignore: !self.no_gitignore && file.respect_gitignore.unwrap_or(true),
        })
    }
}
