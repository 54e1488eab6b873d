//! JSX text and template literal detection.

use super::candidate::{Arg, Match, TemplatePart};
use crate::utils::{contains_alphabetic, normalize_jsx_text};

pub fn match_text(value: &str) -> Option<Match> {
    let text = normalize_jsx_text(value);
    if text.is_empty() || !contains_alphabetic(&text) {
        return None;
    }
    Some(Match::text(text))
}

/// Each interpolated identifier becomes a `{{name}}` placeholder and an
/// argument `name: name`. Templates with any other kind of interpolation are
/// left alone. The whole literal is replaced, so edge whitespace stays in
/// the stored template.
pub fn match_template(parts: &[TemplatePart]) -> Option<Match> {
    let mut template = String::new();
    let mut literal = String::new();
    let mut args: Vec<Arg> = Vec::new();

    for part in parts {
        match part {
            TemplatePart::Literal(text) => {
                template.push_str(text);
                literal.push_str(text);
            }
            TemplatePart::Ident(name) => {
                template.push_str(&format!("{{{{{}}}}}", name));
                if !args.iter().any(|a| &a.name == name) {
                    args.push(Arg {
                        name: name.clone(),
                        expr: name.clone(),
                    });
                }
            }
            TemplatePart::Other => return None,
        }
    }

    if !contains_alphabetic(&literal) {
        return None;
    }

    let mut found = Match::text(template);
    found.args = args;
    Some(found)
}
