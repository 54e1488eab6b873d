//! Syntax-free view of the nodes the detection rules look at.
//!
//! The extraction visitor lowers swc nodes into these variants; rules only
//! ever see this shape, so they can be exercised without a parser.

use crate::core::key::KeyKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// Raw JSX text between tags, untrimmed.
    Text { value: String },
    /// A JSX attribute with a plain string value.
    Attribute { name: String, value: String },
    /// A template literal in a JSX expression slot.
    Template { parts: Vec<TemplatePart> },
    /// `test ? consequent : alternate`
    Conditional {
        test: Test,
        consequent: Branch,
        alternate: Branch,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Literal(String),
    Ident(String),
    /// Any interpolation that is not a bare identifier.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Test {
    Binary { op: BinaryOp, left: Operand },
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    StrictEq,
    Other,
}

/// Left-hand side of a comparison, carrying its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Ident(String),
    Member(String),
    Number(String),
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Branch {
    Str(String),
    Other,
}

/// A call argument `name: expr` in the rewritten `t(key, { ... })`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    pub name: String,
    pub expr: String,
}

/// What a rule decided for a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub kind: KeyKind,
    /// Catalog template (source-locale text).
    pub template: String,
    pub args: Vec<Arg>,
}

impl Match {
    pub fn text(template: impl Into<String>) -> Self {
        Self {
            kind: KeyKind::Text,
            template: template.into(),
            args: Vec::new(),
        }
    }
}
