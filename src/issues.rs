//! Issue types reported by `replace` and `check`.
//!
//! Issues are non-fatal: the pass that found them has already skipped the
//! offending file or call and carried on.

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    UnknownKey,
    ParseError,
    WriteError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::UnknownKey => write!(f, "unknown-key"),
            Rule::ParseError => write!(f, "parse-error"),
            Rule::WriteError => write!(f, "write-error"),
        }
    }
}

// ============================================================
// Issues
// ============================================================

/// A source file that could not be parsed and was left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

/// A rewritten file that could not be saved. Its new keys were not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteErrorIssue {
    pub file_path: String,
    pub error: String,
}

/// `t("key")` where `key` is missing from the source catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKeyIssue {
    pub file_path: String,
    pub line: usize,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    ParseError(ParseErrorIssue),
    UnknownKey(UnknownKeyIssue),
    WriteError(WriteErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::ParseError(_) | Issue::WriteError(_) => Severity::Error,
            Issue::UnknownKey(_) => Severity::Warning,
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::ParseError(_) => Rule::ParseError,
            Issue::UnknownKey(_) => Rule::UnknownKey,
            Issue::WriteError(_) => Rule::WriteError,
        }
    }

    pub fn file_path(&self) -> &str {
        match self {
            Issue::ParseError(issue) => &issue.file_path,
            Issue::UnknownKey(issue) => &issue.file_path,
            Issue::WriteError(issue) => &issue.file_path,
        }
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            Issue::ParseError(_) | Issue::WriteError(_) => None,
            Issue::UnknownKey(issue) => Some(issue.line),
        }
    }

    pub fn message(&self) -> String {
        match self {
            Issue::ParseError(issue) => format!("Failed to parse: {}", issue.error),
            Issue::UnknownKey(issue) => {
                format!("Key \"{}\" is not in the source catalog", issue.key)
            }
            Issue::WriteError(issue) => format!("Failed to write: {}", issue.error),
        }
    }
}
