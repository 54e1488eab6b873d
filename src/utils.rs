//! Common utility functions shared across the codebase.

use std::path::{Component, Path};

/// Checks if the text contains at least one Unicode alphabetic character.
///
/// Returns false for empty strings, pure numbers, or pure symbols.
///
/// # Examples
///
/// ```
/// use localise::utils::contains_alphabetic;
///
/// assert!(contains_alphabetic("Hello"));
/// assert!(contains_alphabetic("你好"));
/// assert!(contains_alphabetic("Hello123"));
/// assert!(!contains_alphabetic("123"));
/// assert!(!contains_alphabetic("---"));
/// assert!(!contains_alphabetic("$100"));
/// assert!(!contains_alphabetic(""));
/// ```
pub fn contains_alphabetic(text: &str) -> bool {
    text.chars().any(|c| c.is_alphabetic())
}

/// Collapse JSX text the way JSX renders it: every line is trimmed, blank
/// lines are dropped and the remaining lines are joined with a single space.
pub fn normalize_jsx_text(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render `path` with forward slashes regardless of platform.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Compute an ES module specifier pointing from `from_dir` to `to`.
///
/// Both paths must be relative to the same root. The result always starts
/// with `./` or `../` so bundlers resolve it as a relative import.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use localise::utils::relative_module_path;
///
/// assert_eq!(relative_module_path(Path::new("app"), Path::new("translations")), "../translations");
/// assert_eq!(relative_module_path(Path::new(""), Path::new("translations")), "./translations");
/// ```
pub fn relative_module_path(from_dir: &Path, to: &Path) -> String {
    let from: Vec<String> = normal_parts(from_dir);
    let to: Vec<String> = normal_parts(to);

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    for _ in common..from.len() {
        parts.push("..".to_string());
    }
    parts.extend(to[common..].iter().cloned());

    let joined = parts.join("/");
    if joined.starts_with("..") {
        joined
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        format!("./{}", joined)
    }
}

fn normal_parts(path: &Path) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::ParentDir => {
                parts.pop();
            }
            _ => {}
        }
    }
    parts
}

/// 1-based line number of a byte offset in `source`.
pub fn line_of_offset(source: &str, offset: usize) -> usize {
    let end = offset.min(source.len());
    source.as_bytes()[..end].iter().filter(|b| **b == b'\n').count() + 1
}
