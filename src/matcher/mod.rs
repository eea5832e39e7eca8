use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};

/// How the configured target is compared against module specifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    #[default]
    Prefix,
    Pattern,
}

/// The package a scan looks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    pub target: String,
    pub mode: MatchMode,
}

impl TargetSpec {
    pub fn prefix(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            mode: MatchMode::Prefix,
        }
    }

    pub fn pattern(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            mode: MatchMode::Pattern,
        }
    }
}

/// Decides whether a module specifier refers to the target package.
///
/// Prefix mode is a plain `starts_with` after quote stripping, so
/// `@scope/pkg` also matches `@scope/pkgX`.
#[derive(Debug, Clone)]
pub enum PackageMatcher {
    Prefix(String),
    Pattern(Regex),
}

impl PackageMatcher {
    pub fn new(spec: &TargetSpec) -> Result<Self> {
        match spec.mode {
            MatchMode::Prefix => Ok(PackageMatcher::Prefix(spec.target.clone())),
            MatchMode::Pattern => Regex::new(&spec.target)
                .map(PackageMatcher::Pattern)
                .map_err(|source| ScanError::InvalidPattern {
                    pattern: spec.target.clone(),
                    source,
                }),
        }
    }

    pub fn matches(&self, specifier: &str) -> bool {
        let clean = strip_quotes(specifier);
        match self {
            PackageMatcher::Prefix(target) => clean.starts_with(target.as_str()),
            PackageMatcher::Pattern(re) => re.is_match(clean),
        }
    }
}

/// Remove at most one quote character from each end.
fn strip_quotes(specifier: &str) -> &str {
    let s = specifier.strip_prefix(['\'', '"']).unwrap_or(specifier);
    s.strip_suffix(['\'', '"']).unwrap_or(s)
}
