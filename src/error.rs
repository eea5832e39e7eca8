use std::path::PathBuf;
use thiserror::Error;

use crate::model::Language;

/// Errors raised while configuring or running a scan.
///
/// Anything raised while scanning a single file (read, parse, grammar) is
/// logged and the file skipped. `Discovery` aborts the whole scan.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("syntax error in {} at line {line}, column {column}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("no grammar for {}", path.display())]
    UnsupportedFile { path: PathBuf },

    #[error("failed to load {language} grammar: {source}")]
    Grammar {
        language: Language,
        #[source]
        source: tree_sitter::LanguageError,
    },

    #[error("file discovery failed: {message}")]
    Discovery { message: String },

    #[error("invalid target pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid config at {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl ScanError {
    pub fn discovery(message: impl Into<String>) -> Self {
        Self::Discovery {
            message: message.into(),
        }
    }
}

pub type Result<T, E = ScanError> = std::result::Result<T, E>;
