//! Project-local exclusion patterns read from `.localiseignore`.
//!
//! One glob per line, blank lines and `#` comments skipped. Patterns are
//! matched against paths relative to the project root using `/` separators.
//! A pattern without a slash matches any single path component, and a
//! trailing slash matches everything below that directory.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use glob::Pattern;

pub const IGNORE_FILE_NAME: &str = ".localiseignore";

#[derive(Debug, Default, Clone)]
pub struct IgnoreRules {
    patterns: Vec<IgnorePattern>,
}

#[derive(Debug, Clone)]
struct IgnorePattern {
    glob: Pattern,
    /// No `/` in the pattern: match against each path component.
    component: bool,
}

impl IgnoreRules {
    /// Load `.localiseignore` from `root`. A missing file yields no rules.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(IGNORE_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        Self::from_patterns(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    pub fn from_patterns<'a>(patterns: impl IntoIterator<Item = &'a str>) -> Self {
        let mut rules = Self::default();
        for raw in patterns {
            let mut pattern = raw.trim_start_matches("./").trim_start_matches('/').to_string();
            if pattern.ends_with('/') {
                pattern.push_str("**");
            }
            let component = !pattern.contains('/');
            match Pattern::new(&pattern) {
                Ok(glob) => rules.patterns.push(IgnorePattern { glob, component }),
                Err(e) => tracing::warn!(pattern = raw, error = %e, "invalid ignore pattern"),
            }
        }
        rules
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether `relative_path` (relative to the project root) is excluded.
    pub fn is_ignored(&self, relative_path: &str) -> bool {
        let path = relative_path.trim_start_matches("./");
        self.patterns.iter().any(|p| {
            if p.component {
                path.split('/').any(|part| p.glob.matches(part))
            } else {
                p.glob.matches(path) || p.glob.matches(&format!("{}/", path))
            }
        })
    }
}
