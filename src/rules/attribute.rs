//! String-valued JSX attribute detection.

use std::collections::HashSet;

use super::candidate::Match;
use crate::utils::contains_alphabetic;

pub fn match_attribute(name: &str, value: &str, excluded: &HashSet<String>) -> Option<Match> {
    if excluded.contains(name) {
        return None;
    }
    let text = value.trim();
    if text.is_empty() || !contains_alphabetic(text) {
        return None;
    }
    Some(Match::text(text))
}
