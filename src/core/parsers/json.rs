//! Reading and writing per-locale catalog files (`<locale>.json`).
//!
//! Catalogs are flat objects keyed by dotted translation keys. Nested objects
//! written by hand are flattened on read; they are written back flat.

use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Key → template mapping for one locale, in file order.
pub type Catalog = IndexMap<String, String>;

/// Read a catalog file. A missing file yields an empty catalog.
pub fn read_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Ok(Catalog::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {:?}", path))?;
    parse_catalog(&content).with_context(|| format!("Failed to parse JSON file: {:?}", path))
}

pub fn parse_catalog(content: &str) -> Result<Catalog> {
    if content.trim().is_empty() {
        return Ok(Catalog::new());
    }

    let json: Value = serde_json::from_str(content)?;
    let Value::Object(map) = json else {
        bail!("Root of a catalog must be a JSON object");
    };

    let mut catalog = Catalog::new();
    flatten_json(&map, String::new(), &mut catalog);
    Ok(catalog)
}

fn flatten_json(map: &Map<String, Value>, prefix: String, result: &mut Catalog) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::String(s) => {
                result.insert(path, s.clone());
            }
            Value::Object(nested) => flatten_json(nested, path, result),
            Value::Null => {
                result.insert(path, String::new());
            }
            other => {
                tracing::warn!(key = %path, value = %other, "ignoring non-string catalog value");
            }
        }
    }
}

/// Write a catalog with 2-space indentation and a trailing newline,
/// creating parent directories as needed.
pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(catalog).context("Failed to serialize JSON")?;
    fs::write(path, format!("{}\n", content))
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(())
}

/// Locales that have a catalog file in `dir`, sorted.
pub fn list_locales(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut locales = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {:?}", dir))?
    {
        let path = entry?.path();
        if path.is_file()
            && path.extension().and_then(|e| e.to_str()) == Some("json")
            && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
        {
            locales.push(stem.to_string());
        }
    }
    locales.sort();
    Ok(locales)
}
