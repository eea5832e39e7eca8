use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::error::{Result, ScanError};
use crate::model::Language;

/// A discovered source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Path as seen from the process (root joined with `relative`).
    pub path: PathBuf,
    /// Path relative to the scan root.
    pub relative: PathBuf,
    pub language: Language,
}

/// Configuration for file discovery.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Glob patterns, relative to the root, selecting files to scan.
    /// Empty means [`DEFAULT_PATTERNS`].
    pub patterns: Vec<String>,
    /// Glob patterns to exclude, on top of [`DEFAULT_EXCLUDE_PATTERNS`].
    pub exclude: Vec<String>,
    /// Honour `.gitignore`, `.ignore` and git exclude files.
    pub respect_gitignore: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            exclude: Vec::new(),
            respect_gitignore: true,
        }
    }
}

pub const DEFAULT_PATTERNS: &[&str] = &["**/*.ts", "**/*.tsx"];

/// Dependency, build and coverage output directories, plus git metadata.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    "node_modules/",
    "dist/",
    "build/",
    "coverage/",
    ".git/",
];

/// List every file under `root` matching the configured patterns.
///
/// Paths come back sorted by their root-relative form, each file once even
/// when several patterns select it. Files matching a pattern but with no
/// known grammar are skipped.
///
/// Only a bad root or pattern fails discovery. Entries below the root that
/// cannot be read (permissions, dangling symlinks, symlink loops) are
/// logged and skipped.
pub fn discover_files(root: &Path, config: &DiscoveryConfig) -> Result<Vec<DiscoveredFile>> {
    if !root.is_dir() {
        return Err(ScanError::discovery(format!(
            "{} is not a readable directory",
            root.display()
        )));
    }
    std::fs::read_dir(root)
        .map_err(|e| ScanError::discovery(format!("cannot read {}: {e}", root.display())))?;

    let include = build_include_set(&config.patterns)?;

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(false)
        .follow_links(true)
        .ignore(config.respect_gitignore)
        .git_ignore(config.respect_gitignore)
        .git_global(config.respect_gitignore)
        .git_exclude(config.respect_gitignore)
        .parents(config.respect_gitignore);

    let mut overrides = OverrideBuilder::new(root);
    let excludes = DEFAULT_EXCLUDE_PATTERNS
        .iter()
        .copied()
        .chain(config.exclude.iter().map(String::as_str));
    for pattern in excludes {
        let pattern = normalize_pattern(pattern);
        if pattern.is_empty() {
            continue;
        }
        overrides
            .add(&format!("!{}", pattern))
            .map_err(|e| ScanError::discovery(format!("invalid exclude pattern `{pattern}`: {e}")))?;
    }
    builder.overrides(
        overrides
            .build()
            .map_err(|e| ScanError::discovery(format!("failed to build excludes: {e}")))?,
    );

    let mut files = Vec::new();
    for result in builder.build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        if !include.is_match(relative) {
            continue;
        }

        let language = match path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Language::from_extension)
        {
            Some(lang) => lang,
            None => {
                debug!(path = %relative.display(), "skipping file with no grammar");
                continue;
            }
        };

        files.push(DiscoveredFile {
            path: path.to_path_buf(),
            relative: relative.to_path_buf(),
            language,
        });
    }

    files.sort_by(|a, b| a.relative.cmp(&b.relative));
    files.dedup_by(|a, b| a.relative == b.relative);
    debug!(count = files.len(), root = %root.display(), "discovered files");
    Ok(files)
}

fn build_include_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    let defaults: Vec<String> = DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect();
    let patterns = if patterns.is_empty() {
        &defaults
    } else {
        patterns
    };
    for pattern in patterns {
        let glob = GlobBuilder::new(normalize_pattern(pattern))
            .literal_separator(true)
            .build()
            .map_err(|e| ScanError::discovery(format!("invalid pattern `{pattern}`: {e}")))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| ScanError::discovery(format!("failed to build patterns: {e}")))
}

/// Patterns are root-relative; accept a leading `./` as users tend to write it.
fn normalize_pattern(pattern: &str) -> &str {
    pattern.trim().trim_start_matches("./")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup_test_project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        fs::create_dir_all(root.join("src/components")).unwrap();
        fs::write(root.join("src/index.ts"), "export const x = 1;").unwrap();
        fs::write(root.join("src/components/Button.tsx"), "export {};").unwrap();
        fs::write(root.join("src/legacy.js"), "console.log('hello');").unwrap();
        fs::write(root.join("src/styles.css"), "body { color: red; }").unwrap();
        fs::write(root.join("root.ts"), "export {};").unwrap();

        for dir in ["node_modules/pkg", "dist", "build", "coverage"] {
            fs::create_dir_all(root.join(dir)).unwrap();
            fs::write(root.join(dir).join("index.ts"), "// ignored").unwrap();
        }

        dir
    }

    fn relative_paths(files: &[DiscoveredFile]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.relative.to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_default_patterns_find_ts_and_tsx() {
        let dir = setup_test_project();
        let files = discover_files(dir.path(), &DiscoveryConfig::default()).unwrap();
        assert_eq!(
            relative_paths(&files),
            vec!["root.ts", "src/components/Button.tsx", "src/index.ts"]
        );
    }

    #[test]
    fn test_default_excludes_skip_output_dirs() {
        let dir = setup_test_project();
        let files = discover_files(dir.path(), &DiscoveryConfig::default()).unwrap();
        for path in relative_paths(&files) {
            for excluded in ["node_modules", "dist", "build", "coverage"] {
                assert!(!path.contains(excluded), "{path} should be excluded");
            }
        }
    }

    #[test]
    fn test_language_detection() {
        let dir = setup_test_project();
        let files = discover_files(dir.path(), &DiscoveryConfig::default()).unwrap();

        let tsx = files.iter().find(|f| f.relative.ends_with("Button.tsx")).unwrap();
        assert_eq!(tsx.language, Language::Tsx);
        let ts = files.iter().find(|f| f.relative.ends_with("index.ts")).unwrap();
        assert_eq!(ts.language, Language::TypeScript);
    }

    #[test]
    fn test_custom_patterns() {
        let dir = setup_test_project();
        let config = DiscoveryConfig {
            patterns: vec!["src/**/*.js".to_string()],
            ..Default::default()
        };
        let files = discover_files(dir.path(), &config).unwrap();
        assert_eq!(relative_paths(&files), vec!["src/legacy.js"]);
        assert_eq!(files[0].language, Language::JavaScript);
    }

    #[test]
    fn test_star_does_not_cross_directories() {
        let dir = setup_test_project();
        let config = DiscoveryConfig {
            patterns: vec!["*.ts".to_string()],
            ..Default::default()
        };
        let files = discover_files(dir.path(), &config).unwrap();
        assert_eq!(relative_paths(&files), vec!["root.ts"]);
    }

    #[test]
    fn test_overlapping_patterns_are_deduplicated() {
        let dir = setup_test_project();
        let config = DiscoveryConfig {
            patterns: vec![
                "**/*.ts".to_string(),
                "src/*.ts".to_string(),
                "./src/index.ts".to_string(),
            ],
            ..Default::default()
        };
        let files = discover_files(dir.path(), &config).unwrap();
        assert_eq!(relative_paths(&files), vec!["root.ts", "src/index.ts"]);
    }

    #[test]
    fn test_pattern_matching_unsupported_files_skips_them() {
        let dir = setup_test_project();
        let config = DiscoveryConfig {
            patterns: vec!["**/*".to_string()],
            ..Default::default()
        };
        let files = discover_files(dir.path(), &config).unwrap();
        let paths = relative_paths(&files);
        assert!(!paths.iter().any(|p| p.ends_with(".css")));
        assert!(paths.contains(&"src/legacy.js".to_string()));
    }

    #[test]
    fn test_exclude_pattern_filters_files() {
        let dir = setup_test_project();
        let config = DiscoveryConfig {
            exclude: vec!["./src/components".to_string()],
            ..Default::default()
        };
        let files = discover_files(dir.path(), &config).unwrap();
        assert_eq!(relative_paths(&files), vec!["root.ts", "src/index.ts"]);
    }

    #[test]
    fn test_respects_gitignore() {
        let dir = setup_test_project();
        let root = dir.path();
        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join(".gitignore"), "generated/\n").unwrap();
        fs::create_dir_all(root.join("generated")).unwrap();
        fs::write(root.join("generated/api.ts"), "export {};").unwrap();

        let files = discover_files(root, &DiscoveryConfig::default()).unwrap();
        assert!(!relative_paths(&files).iter().any(|p| p.starts_with("generated")));

        let config = DiscoveryConfig {
            respect_gitignore: false,
            ..Default::default()
        };
        let files = discover_files(root, &config).unwrap();
        assert!(relative_paths(&files).contains(&"generated/api.ts".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_entries_are_skipped() {
        let dir = setup_test_project();
        let root = dir.path();
        std::os::unix::fs::symlink(root.join("src/missing.ts"), root.join("src/dangling.ts"))
            .unwrap();
        std::os::unix::fs::symlink(root, root.join("src/loop")).unwrap();

        let files = discover_files(root, &DiscoveryConfig::default()).unwrap();
        assert_eq!(
            relative_paths(&files),
            vec!["root.ts", "src/components/Button.tsx", "src/index.ts"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_files_are_followed() {
        let dir = setup_test_project();
        let root = dir.path();
        std::os::unix::fs::symlink(root.join("src/index.ts"), root.join("src/alias.ts")).unwrap();

        let files = discover_files(root, &DiscoveryConfig::default()).unwrap();
        assert!(relative_paths(&files).contains(&"src/alias.ts".to_string()));
    }

    #[test]
    fn test_invalid_pattern_is_a_discovery_error() {
        let dir = setup_test_project();
        let config = DiscoveryConfig {
            patterns: vec!["src/[".to_string()],
            ..Default::default()
        };
        let err = discover_files(dir.path(), &config).unwrap_err();
        assert!(matches!(err, ScanError::Discovery { .. }));
    }

    #[test]
    fn test_nonexistent_directory_returns_error() {
        let result = discover_files(
            Path::new("/nonexistent/path/that/surely/doesnt/exist"),
            &DiscoveryConfig::default(),
        );
        assert!(matches!(result, Err(ScanError::Discovery { .. })));
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let files = discover_files(dir.path(), &DiscoveryConfig::default()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_deeply_nested_files_are_discovered() {
        let dir = TempDir::new().unwrap();
        let deep_path = dir.path().join("a/b/c/d/e/f");
        fs::create_dir_all(&deep_path).unwrap();
        fs::write(deep_path.join("deep.ts"), "export const deep = true;").unwrap();

        let files = discover_files(dir.path(), &DiscoveryConfig::default()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].relative.ends_with("deep.ts"));
        assert!(files[0].path.starts_with(dir.path()));
    }
}
