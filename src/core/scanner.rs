use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use walkdir::WalkDir;

use super::ignore::IgnoreRules;
use crate::utils::to_slash;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
pub struct ScanResult {
    /// Source files in path order.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// What to walk and what to leave out.
pub struct ScanOptions<'a> {
    pub project_root: &'a Path,
    pub source_root: &'a Path,
    /// Directories below `source_root` to scan instead of the whole tree.
    pub includes: &'a [String],
    /// Globs matched against the full path (config `ignores`).
    pub ignores: &'a [String],
    /// Patterns from `.localiseignore`, matched relative to the project root.
    pub ignore_rules: &'a IgnoreRules,
}

pub fn scan_files(options: &ScanOptions<'_>) -> ScanResult {
    let mut files: BTreeSet<PathBuf> = BTreeSet::new();
    let mut skipped_count = 0;

    let mut glob_patterns: Vec<Pattern> = Vec::new();
    for p in options.ignores {
        match Pattern::new(p) {
            Ok(pattern) => glob_patterns.push(pattern),
            Err(e) => tracing::warn!("Invalid ignore pattern '{}': {}", p, e),
        }
    }

    for dir in dirs_to_scan(options) {
        let walker = WalkDir::new(dir)
            .into_iter()
            .filter_entry(|e| e.file_name() != "node_modules");
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    tracing::warn!("Cannot access path: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() || !is_scannable_file(path) {
                continue;
            }

            let path_str = to_slash(path);
            let relative = path
                .strip_prefix(options.project_root)
                .map(to_slash)
                .unwrap_or_else(|_| path_str.clone());
            if glob_patterns
                .iter()
                .any(|p| p.matches(&path_str) || p.matches(&relative))
            {
                continue;
            }

            if options.ignore_rules.is_ignored(&relative) {
                tracing::debug!(file = %relative, "ignored by {}", super::ignore::IGNORE_FILE_NAME);
                continue;
            }

            files.insert(path.to_path_buf());
        }
    }

    ScanResult {
        files: files.into_iter().collect(),
        skipped_count,
    }
}

fn dirs_to_scan(options: &ScanOptions<'_>) -> Vec<PathBuf> {
    let base_dir = options.source_root;
    if options.includes.is_empty() {
        return vec![base_dir.to_path_buf()];
    }

    let mut paths = Vec::new();
    for inc in options.includes {
        let path = base_dir.join(inc);
        if is_glob_pattern(inc) {
            match glob(&path.to_string_lossy()) {
                Ok(entries) => paths.extend(entries.flatten().filter(|entry| entry.is_dir())),
                Err(e) => tracing::warn!("Invalid glob pattern '{}': {}", inc, e),
            }
        } else if path.exists() {
            paths.push(path);
        } else {
            tracing::warn!("Include path does not exist: {}", path.display());
        }
    }
    paths
}

fn is_scannable_file(path: &Path) -> bool {
    let is_declaration = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".d.ts"));
    !is_declaration
        && matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("tsx" | "ts" | "jsx" | "js")
        )
}
