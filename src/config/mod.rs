use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};
use crate::matcher::{MatchMode, TargetSpec};

/// Everything an [`ImportScanner`](crate::analysis::ImportScanner) needs.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory to scan; record paths are relative to it.
    pub root: PathBuf,
    pub target: TargetSpec,
    /// Extra exclusion globs, on top of the built-in ones.
    pub exclude: Vec<String>,
    /// Include globs used when a scan is started without any.
    pub patterns: Vec<String>,
    pub respect_gitignore: bool,
}

impl ScanConfig {
    pub fn new(root: impl Into<PathBuf>, target: TargetSpec) -> Self {
        Self {
            root: root.into(),
            target,
            exclude: Vec::new(),
            patterns: Vec::new(),
            respect_gitignore: true,
        }
    }

    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }
}

/// Contents of an `importscan.toml` file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub target: Option<String>,
    pub mode: Option<MatchMode>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub patterns: Vec<String>,
    pub respect_gitignore: Option<bool>,
}

/// Default config file names, searched in order.
const CONFIG_FILENAMES: &[&str] = &[".importscan.toml", "importscan.toml"];

/// Find the config file for a scan root.
///
/// If `config_override` is provided, use that path directly.
/// Otherwise, search for config files in the root.
pub fn find_config_path(root: &Path, config_override: Option<&Path>) -> Option<PathBuf> {
    if let Some(override_path) = config_override {
        if override_path.exists() {
            return Some(override_path.to_path_buf());
        }
        return None;
    }

    CONFIG_FILENAMES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.exists())
}

/// Load and parse a config file.
pub fn load_config(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ScanError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_config(&content).map_err(|message| ScanError::Config {
        path: path.to_path_buf(),
        message,
    })
}

/// Parse a config from a TOML string.
pub fn parse_config(toml_str: &str) -> std::result::Result<FileConfig, String> {
    toml::from_str(toml_str).map_err(|e| e.message().to_string())
}
