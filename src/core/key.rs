//! Translation key derivation.
//!
//! Keys look like `components.home_screen.text_3`: a prefix derived from the
//! file path, then the node kind and a per-file ordinal.

use std::path::{Component, Path};
use std::sync::LazyLock;

use regex::Regex;

use super::catalog::KeyCatalog;

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());
static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]").unwrap());
static SOURCE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[cm]?[jt]sx?$").unwrap());

/// Which rule produced a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    Text,
    Plural,
}

impl KeyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyKind::Text => "text",
            KeyKind::Plural => "plural",
        }
    }
}

/// Derive the dotted key prefix for a file path relative to the source root.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use localise::core::key::key_prefix;
///
/// assert_eq!(key_prefix(Path::new("components/HomeScreen.tsx")), "components.home_screen");
/// assert_eq!(key_prefix(Path::new("app/(tabs)/index.tsx")), "app._tabs_.index");
/// ```
pub fn key_prefix(relative_path: &Path) -> String {
    let segments: Vec<String> = relative_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let last = segments.len().saturating_sub(1);
    let parts: Vec<String> = segments
        .iter()
        .enumerate()
        .map(|(idx, segment)| {
            let segment = if idx == last {
                SOURCE_EXTENSION.replace(segment, "").into_owned()
            } else {
                segment.clone()
            };
            normalize_segment(&segment)
        })
        .filter(|s| !s.is_empty())
        .collect();

    if parts.is_empty() {
        "unknown".to_string()
    } else {
        parts.join(".")
    }
}

fn normalize_segment(segment: &str) -> String {
    let snake = CAMEL_BOUNDARY.replace_all(segment, "${1}_${2}");
    NON_ALPHANUMERIC
        .replace_all(&snake, "_")
        .to_lowercase()
}

/// Hands out keys for one file.
///
/// Ordinals are counted separately per [`KeyKind`] and only advance when a
/// key is actually minted. A key already present in the catalog is skipped so
/// a new text never overwrites an existing entry.
#[derive(Debug)]
pub struct KeyMinter {
    prefix: String,
    next_text: usize,
    next_plural: usize,
}

impl KeyMinter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next_text: 1,
            next_plural: 1,
        }
    }

    pub fn mint(&mut self, kind: KeyKind, catalog: &KeyCatalog) -> String {
        let counter = match kind {
            KeyKind::Text => &mut self.next_text,
            KeyKind::Plural => &mut self.next_plural,
        };
        loop {
            let key = format!("{}.{}_{}", self.prefix, kind.as_str(), counter);
            *counter += 1;
            if !catalog.has(&key) {
                return key;
            }
        }
    }
}
