//! Source-locale key catalog with a reverse index for deduplication.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;

use super::parsers::json::{Catalog, read_catalog, write_catalog};

/// In-memory source catalog.
///
/// `by_text` maps normalized (trimmed) text to the first key that stored it,
/// so a text seen again, in this run or a later one, reuses its key.
#[derive(Debug, Default, Clone)]
pub struct KeyCatalog {
    entries: Catalog,
    by_text: HashMap<String, String>,
}

fn normalize(text: &str) -> &str {
    text.trim()
}

impl KeyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a previously persisted mapping, seeding the
    /// reverse index. When two keys share a text the first one wins.
    pub fn load(entries: Catalog) -> Self {
        let mut by_text = HashMap::with_capacity(entries.len());
        for (key, text) in &entries {
            let normalized = normalize(text);
            if normalized.is_empty() {
                continue;
            }
            by_text
                .entry(normalized.to_string())
                .or_insert_with(|| key.clone());
        }
        Self { entries, by_text }
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        Ok(Self::load(read_catalog(path)?))
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        write_catalog(path, &self.entries)
    }

    pub fn lookup_by_text(&self, text: &str) -> Option<&str> {
        self.by_text.get(normalize(text)).map(String::as_str)
    }

    /// Record `key → text`. An existing key keeps its template; returns
    /// whether the entry was added.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) -> bool {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return false;
        }
        let text = text.into();
        let normalized = normalize(&text).to_string();
        if !normalized.is_empty() {
            self.by_text.entry(normalized).or_insert_with(|| key.clone());
        }
        self.entries.insert(key, text);
        true
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn serialize(&self) -> &Catalog {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_and_lookup() {
        let mut catalog = KeyCatalog::new();
        assert!(catalog.insert("home.text_1", "Welcome"));

        assert!(catalog.has("home.text_1"));
        assert_eq!(catalog.lookup_by_text("  Welcome "), Some("home.text_1"));
        assert_eq!(catalog.lookup_by_text("Goodbye"), None);
    }

    #[test]
    fn test_insert_never_overwrites() {
        let mut catalog = KeyCatalog::new();
        catalog.insert("home.text_1", "Welcome");

        assert!(!catalog.insert("home.text_1", "Changed"));
        assert_eq!(catalog.get("home.text_1"), Some("Welcome"));
        assert_eq!(catalog.lookup_by_text("Changed"), None);
    }

    #[test]
    fn test_load_seeds_reverse_index() {
        let mut entries = Catalog::new();
        entries.insert("a.text_1".to_string(), "Save".to_string());
        entries.insert("b.text_1".to_string(), "Save".to_string());
        entries.insert("b.text_2".to_string(), "Cancel".to_string());

        let catalog = KeyCatalog::load(entries);

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.lookup_by_text("Save"), Some("a.text_1"));
        assert_eq!(catalog.lookup_by_text("Cancel"), Some("b.text_2"));
    }

    #[test]
    fn test_serialize_preserves_insertion_order() {
        let mut catalog = KeyCatalog::new();
        catalog.insert("z.text_1", "Z");
        catalog.insert("a.text_1", "A");

        let keys: Vec<&String> = catalog.serialize().keys().collect();
        assert_eq!(keys, vec!["z.text_1", "a.text_1"]);
    }
}
