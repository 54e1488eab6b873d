//! Key lookup against a locale snapshot.

use std::{fmt, sync::Arc, sync::LazyLock};

use regex::{Captures, Regex};

use super::store::LocaleSnapshot;
use crate::icu::PluralExpr;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z_$][A-Za-z0-9_$]*)\s*\}\}").unwrap());

/// The argument name plural templates are keyed on when their own variable
/// is not supplied.
const COUNT_ARG: &str = "count";

/// An interpolation argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Str(String),
    Int(i64),
    Float(f64),
}

impl ArgValue {
    fn as_number(&self) -> Option<f64> {
        match self {
            ArgValue::Int(n) => Some(*n as f64),
            ArgValue::Float(n) => Some(*n),
            ArgValue::Str(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Str(s) => f.write_str(s),
            ArgValue::Int(n) => write!(f, "{}", n),
            ArgValue::Float(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Str(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Str(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Int(value)
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        ArgValue::Int(value.into())
    }
}

impl From<usize> for ArgValue {
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or(ArgValue::Float(value as f64), ArgValue::Int)
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Float(value)
    }
}

/// Resolve `key` in `translations`.
///
/// A key without a (non-empty) template resolves to itself. Plural templates
/// pick their branch from the numeric argument, then every `{{name}}` with a
/// matching argument is replaced. Lookup never fails.
pub fn lookup(
    translations: &crate::core::parsers::json::Catalog,
    key: &str,
    args: &[(&str, ArgValue)],
) -> String {
    let template = match translations.get(key) {
        Some(template) if !template.is_empty() => template.as_str(),
        _ => key,
    };

    let selected = select_plural(template, args);
    let template = selected.as_deref().unwrap_or(template);
    if args.is_empty() {
        return template.to_string();
    }

    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            match args.iter().find(|(name, _)| *name == &caps[1]) {
                Some((_, value)) => value.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn select_plural(template: &str, args: &[(&str, ArgValue)]) -> Option<String> {
    let located = PluralExpr::find(template)?;
    let expr = &located.expr;
    if expr.kind != "plural" {
        return None;
    }

    let value = args
        .iter()
        .find(|(name, _)| *name == expr.arg)
        .or_else(|| args.iter().find(|(name, _)| *name == COUNT_ARG))
        .map(|(_, value)| value)?;
    let n = value.as_number()?;

    let exact = format!("={}", n);
    let body = expr
        .branch(&exact)
        .or_else(|| if n == 1.0 { expr.branch("one") } else { None })
        .or_else(|| expr.branch("other"))?;

    Some(format!(
        "{}{}{}",
        located.before,
        body.replace('#', &n.to_string()),
        located.after
    ))
}

/// Lookup handle bound to one snapshot. Later locale changes are not seen by
/// an existing handle; ask the store for a new one.
#[derive(Debug, Clone)]
pub struct Translator {
    snapshot: Arc<LocaleSnapshot>,
}

impl Translator {
    pub(crate) fn new(snapshot: Arc<LocaleSnapshot>) -> Self {
        Self { snapshot }
    }

    pub fn locale(&self) -> &str {
        &self.snapshot.locale
    }

    pub fn t(&self, key: &str) -> String {
        lookup(&self.snapshot.translations, key, &[])
    }

    pub fn t_with(&self, key: &str, args: &[(&str, ArgValue)]) -> String {
        lookup(&self.snapshot.translations, key, args)
    }
}
