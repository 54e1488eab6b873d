//! Detection rules for translatable text.
//!
//! Each rule is a pure function over a [`Candidate`]; [`RuleSet::evaluate`]
//! dispatches to the rule for the candidate's shape.
//!
//! ## Module Structure
//!
//! - `candidate`: the tagged-variant view of syntax nodes and the `Match` result
//! - `text`: JSX text and template literals
//! - `attribute`: string-valued JSX attributes
//! - `plural`: equality ternaries with two string branches

pub mod attribute;
pub mod candidate;
pub mod plural;
pub mod text;

use std::collections::HashSet;

pub use candidate::{Arg, BinaryOp, Branch, Candidate, Match, Operand, TemplatePart, Test};

use crate::config::Config;

#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    excluded_attributes: HashSet<String>,
}

impl RuleSet {
    pub fn new(excluded_attributes: impl IntoIterator<Item = String>) -> Self {
        Self {
            excluded_attributes: excluded_attributes.into_iter().collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.excluded_attributes.iter().cloned())
    }

    pub fn is_excluded_attribute(&self, name: &str) -> bool {
        self.excluded_attributes.contains(name)
    }

    pub fn evaluate(&self, candidate: &Candidate) -> Option<Match> {
        match candidate {
            Candidate::Text { value } => text::match_text(value),
            Candidate::Attribute { name, value } => {
                attribute::match_attribute(name, value, &self.excluded_attributes)
            }
            Candidate::Template { parts } => text::match_template(parts),
            Candidate::Conditional {
                test,
                consequent,
                alternate,
            } => plural::match_plural(test, consequent, alternate),
        }
    }
}
