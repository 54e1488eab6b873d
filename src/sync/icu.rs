//! Cleanup of machine-translated ICU plural templates.
//!
//! Translation backends translate the structural words of an ICU expression
//! along with the text (`{compte, pluriel, un {...} autre {...}}`). The
//! structure is parsed and its argument, kind and selectors are mapped back
//! to the canonical tokens; branch text is left as translated.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::icu::PluralExpr;

static PLURAL_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bplur(?:al|iel|ale)\b").unwrap());
static OPTIONAL_PLURAL_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\bitem\s*)?\(\s?s\s?\)").unwrap());

const COUNT_WORDS: &[&str] = &[
    "count", "compte", "cuenta", "anzahl", "conteggio", "contagem", "zahl",
];
const KIND_WORDS: &[&str] = &["plural", "pluriel", "plurale"];
const ONE_WORDS: &[&str] = &["one", "eins", "un", "une", "uno", "una", "ein", "eine", "um"];
const OTHER_WORDS: &[&str] = &[
    "other", "andere", "anderer", "autre", "autres", "otros", "otro", "otra", "sonstiges",
    "altri", "altro", "outro", "outros",
];

/// Normalize a translated value. Values without a plural marker are
/// returned unchanged.
pub fn normalize_plural_tokens(value: &str) -> String {
    if !PLURAL_MARKER.is_match(value) {
        return value.to_string();
    }

    let structured = match PluralExpr::find(value) {
        Some(located) if is_one_of(&located.expr.kind, KIND_WORDS) => {
            let mut expr = located.expr;
            if is_one_of(&expr.arg, COUNT_WORDS) {
                expr.arg = "count".to_string();
            }
            expr.kind = "plural".to_string();
            for branch in &mut expr.branches {
                if is_one_of(&branch.selector, ONE_WORDS) {
                    branch.selector = "one".to_string();
                } else if is_one_of(&branch.selector, OTHER_WORDS) {
                    branch.selector = "other".to_string();
                }
            }
            format!("{}{}{}", located.before, expr, located.after)
        }
        _ => value.to_string(),
    };

    strip_optional_plural_suffix(&structured)
}

/// Drop `(s)` suffixes, which the plural branches make redundant. `item(s)`
/// is kept as written.
fn strip_optional_plural_suffix(value: &str) -> String {
    OPTIONAL_PLURAL_SUFFIX
        .replace_all(value, |caps: &Captures| {
            if caps.get(1).is_some() {
                caps[0].to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

fn is_one_of(word: &str, candidates: &[&str]) -> bool {
    let lower = word.to_lowercase();
    candidates.iter().any(|c| *c == lower)
}
