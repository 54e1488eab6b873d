//! Minimal reader and writer for ICU plural expressions.
//!
//! Only the shape this tool produces is understood:
//!
//! ```text
//! {count, plural, one {1 item} other {# items}}
//! ```
//!
//! Branch bodies may contain balanced braces (e.g. `{{name}}` placeholders).

use std::fmt;

/// A parsed `{arg, kind, selector {body} ...}` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralExpr {
    pub arg: String,
    pub kind: String,
    pub branches: Vec<PluralBranch>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralBranch {
    pub selector: String,
    pub body: String,
}

/// A plural expression found inside a larger string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located<'a> {
    pub before: &'a str,
    pub expr: PluralExpr,
    pub after: &'a str,
}

impl PluralExpr {
    /// Build the canonical two-branch template stored for a detected ternary.
    pub fn one_other(arg: &str, one: &str, other: &str) -> Self {
        Self {
            arg: arg.to_string(),
            kind: "plural".to_string(),
            branches: vec![
                PluralBranch {
                    selector: "one".to_string(),
                    body: one.to_string(),
                },
                PluralBranch {
                    selector: "other".to_string(),
                    body: other.to_string(),
                },
            ],
        }
    }

    /// Find the first well-formed expression in `input`.
    pub fn find(input: &str) -> Option<Located<'_>> {
        let mut search_from = 0;
        while let Some(rel) = input[search_from..].find('{') {
            let open = search_from + rel;
            if let Some(close) = matching_brace(input, open)
                && let Some(expr) = parse_body(&input[open + 1..close])
            {
                return Some(Located {
                    before: &input[..open],
                    expr,
                    after: &input[close + 1..],
                });
            }
            search_from = open + 1;
        }
        None
    }

    /// Body of the branch with the given selector.
    pub fn branch(&self, selector: &str) -> Option<&str> {
        self.branches
            .iter()
            .find(|b| b.selector == selector)
            .map(|b| b.body.as_str())
    }
}

impl fmt::Display for PluralExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {},", self.arg, self.kind)?;
        for branch in &self.branches {
            write!(f, " {} {{{}}}", branch.selector, branch.body)?;
        }
        write!(f, "}}")
    }
}

/// Byte index of the `}` closing the `{` at `open`.
fn matching_brace(input: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, ch) in input[open..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + idx);
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_body(body: &str) -> Option<PluralExpr> {
    let (arg, rest) = body.split_once(',')?;
    let (kind, rest) = rest.split_once(',')?;
    let arg = arg.trim();
    let kind = kind.trim();
    if !is_word(arg) || !is_word(kind) {
        return None;
    }

    let mut branches = Vec::new();
    let mut cursor = 0;
    loop {
        let remaining = &rest[cursor..];
        let trimmed = remaining.trim_start();
        if trimmed.is_empty() {
            break;
        }
        cursor += remaining.len() - trimmed.len();

        let selector_len = trimmed.find(|c: char| c == '{' || c.is_whitespace())?;
        let selector = &trimmed[..selector_len];
        if selector.is_empty() || selector.contains('}') {
            return None;
        }
        cursor += selector_len;

        let after_selector = &rest[cursor..];
        let gap = after_selector.len() - after_selector.trim_start().len();
        cursor += gap;
        if !rest[cursor..].starts_with('{') {
            return None;
        }
        let close = matching_brace(rest, cursor)?;
        branches.push(PluralBranch {
            selector: selector.to_string(),
            body: rest[cursor + 1..close].to_string(),
        });
        cursor = close + 1;
    }

    if branches.is_empty() {
        return None;
    }

    Some(PluralExpr {
        arg: arg.to_string(),
        kind: kind.to_string(),
        branches,
    })
}

fn is_word(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn whole(input: &str) -> Option<PluralExpr> {
        PluralExpr::find(input)
            .filter(|l| l.before.trim().is_empty() && l.after.trim().is_empty())
            .map(|l| l.expr)
    }

    #[test]
    fn test_display_canonical_form() {
        let expr = PluralExpr::one_other("count", "1 item", "N items");
        assert_eq!(
            expr.to_string(),
            "{count, plural, one {1 item} other {N items}}"
        );
    }

    #[test]
    fn test_parse_canonical_form() {
        let expr = whole("{count, plural, one {1 item} other {N items}}").unwrap();
        assert_eq!(expr, PluralExpr::one_other("count", "1 item", "N items"));
    }

    #[test]
    fn test_parse_nested_placeholders() {
        let expr = whole("{n, plural, =0 {none} one {{{name}} has one} other {# left}}").unwrap();
        assert_eq!(expr.branches.len(), 3);
        assert_eq!(expr.branch("=0"), Some("none"));
        assert_eq!(expr.branch("one"), Some("{{name}} has one"));
    }

    #[test]
    fn test_find_with_surrounding_text() {
        let located = PluralExpr::find("[FR] {count, plural, one {x} other {y}}!").unwrap();
        assert_eq!(located.before, "[FR] ");
        assert_eq!(located.after, "!");
        assert_eq!(located.expr.arg, "count");
    }

    #[test]
    fn test_rejects_plain_text() {
        assert!(whole("Hello {{name}}").is_none());
        assert!(whole("{count, plural,}").is_none());
        assert!(whole("{count, plural, one {unclosed}").is_none());
        assert!(whole("before {count, plural, one {x}}").is_none());
    }
}
