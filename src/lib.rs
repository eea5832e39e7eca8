pub mod analysis;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod model;
pub mod parser;

pub use analysis::ImportScanner;
pub use config::ScanConfig;
pub use error::ScanError;
pub use matcher::{MatchMode, PackageMatcher, TargetSpec};
pub use model::{DeclarationKind, ImportRecord};
