//! Report formatting and printing utilities.
//!
//! Separate from core logic so the engine can be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{
    CommandResult, CommandSummary, InjectSummary, ReplaceSummary, TranslateSummary,
};
use crate::{
    core::{check::CheckReport, inject::InjectOutcome},
    issues::{Issue, Severity},
    sync::{LocaleOutcome, SyncReport},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}

pub fn print(result: &CommandResult, verbose: bool) {
    print_to(result, verbose, &mut io::stdout().lock());
}

pub fn print_to<W: Write>(result: &CommandResult, verbose: bool, writer: &mut W) {
    match &result.summary {
        CommandSummary::Replace(summary) => {
            report_issues_to(&result.issues, verbose, writer);
            print_replace(summary, writer);
        }
        CommandSummary::Translate(summary) => print_translate(summary, writer),
        CommandSummary::Inject(summary) => print_inject(summary, writer),
        CommandSummary::Check(report) => {
            report_issues_to(&result.issues, true, writer);
            print_check(report, &result.issues, writer);
        }
        CommandSummary::Aborted(message) => {
            let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), message);
        }
    }
}

/// Print issues one per block, `severity: message  rule` then `--> path:line`.
///
/// Parse errors are collapsed into a single warning unless `verbose`.
pub fn report_issues_to<W: Write>(issues: &[Issue], verbose: bool, writer: &mut W) {
    let mut hidden_parse_errors = 0;
    for issue in issues {
        if matches!(issue, Issue::ParseError(_)) && !verbose {
            hidden_parse_errors += 1;
            continue;
        }
        print_issue(issue, writer);
    }

    if hidden_parse_errors > 0 {
        let _ = writeln!(
            writer,
            "{} {} could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            plural(hidden_parse_errors, "file", "files"),
            "-v".cyan()
        );
    }
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity = match issue.severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };
    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity,
        issue.message(),
        issue.rule().to_string().dimmed().cyan()
    );
    match issue.line() {
        Some(line) => {
            let _ = writeln!(writer, "  {} {}:{}", "-->".blue(), issue.file_path(), line);
        }
        None => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), issue.file_path());
        }
    }
    let _ = writeln!(writer);
}

fn print_replace<W: Write>(summary: &ReplaceSummary, writer: &mut W) {
    let report = &summary.report;
    if report.updated_files.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Scanned {} - nothing to replace",
                plural(report.files_scanned, "file", "files")
            )
            .green()
        );
    } else {
        let verb = if summary.dry_run {
            "Would replace".yellow().bold()
        } else {
            "Replaced".green().bold()
        };
        let _ = writeln!(
            writer,
            "{} {} in {} ({} added):",
            verb,
            plural(report.replacements, "string", "strings"),
            plural(report.updated_files.len(), "file", "files"),
            plural(report.new_keys, "key", "keys")
        );
        for file in &report.updated_files {
            let _ = writeln!(writer, "  - {}", file);
        }
        if summary.dry_run {
            let _ = writeln!(writer, "Run without {} to write these changes.", "--dry-run".cyan());
        }
    }

    if let Some(outcome) = &summary.injection {
        print_injection(outcome, false, writer);
    }
    if let Some(error) = &summary.injection_error {
        let _ = writeln!(
            writer,
            "{} entry file not updated: {}",
            "warning:".bold().yellow(),
            error
        );
    }
}

fn print_translate<W: Write>(summary: &TranslateSummary, writer: &mut W) {
    let report: &SyncReport = &summary.report;
    for locale in &report.locales {
        let name = locale.locale.bold();
        let _ = match &locale.outcome {
            LocaleOutcome::UpToDate => writeln!(
                writer,
                "{} {}: up to date",
                SUCCESS_MARK.green(),
                name
            ),
            LocaleOutcome::WouldTranslate { missing } => writeln!(
                writer,
                "{} {}: {} to translate",
                "~".yellow(),
                name,
                plural(*missing, "key", "keys")
            ),
            LocaleOutcome::Translated { translated, failed: 0 } => writeln!(
                writer,
                "{} {}: translated {}",
                SUCCESS_MARK.green(),
                name,
                plural(*translated, "key", "keys")
            ),
            LocaleOutcome::Translated { translated, failed } => writeln!(
                writer,
                "{} {}: translated {}, {} failed",
                FAILURE_MARK.yellow(),
                name,
                plural(*translated, "key", "keys"),
                failed
            ),
            LocaleOutcome::Failed { reason } => writeln!(
                writer,
                "{} {}: {}",
                FAILURE_MARK.red(),
                name,
                reason
            ),
        };
    }

    if summary.dry_run {
        let _ = writeln!(writer, "Run without {} to translate.", "--dry-run".cyan());
    }
    if let Some(outcome) = &report.injection {
        print_injection(outcome, false, writer);
    }
    if let Some(error) = &report.injection_error {
        let _ = writeln!(
            writer,
            "{} entry file not updated: {}",
            "warning:".bold().yellow(),
            error
        );
    }
}

fn print_inject<W: Write>(summary: &InjectSummary, writer: &mut W) {
    print_injection(&summary.outcome, summary.dry_run, writer);
}

fn print_injection<W: Write>(outcome: &InjectOutcome, dry_run: bool, writer: &mut W) {
    let _ = match outcome {
        InjectOutcome::NoEntryFile => writeln!(
            writer,
            "{} no entry file found, locales not registered",
            "warning:".bold().yellow()
        ),
        InjectOutcome::Unchanged { entry } => writeln!(
            writer,
            "{} {} already registers every locale",
            SUCCESS_MARK.green(),
            entry.display()
        ),
        InjectOutcome::Updated { entry, locales } => writeln!(
            writer,
            "{} {} ({})",
            if dry_run {
                "Would update".yellow().bold()
            } else {
                "Updated".green().bold()
            },
            entry.display(),
            locales.join(", ")
        ),
    };
}

fn print_check<W: Write>(report: &CheckReport, issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} against {} - no issues found",
                plural(report.files_scanned, "file", "files"),
                plural(report.catalog_keys, "key", "keys")
            )
            .green()
        );
    } else {
        let errors = issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
            .count();
        let _ = writeln!(
            writer,
            "{} {} ({}, {})",
            FAILURE_MARK.red(),
            plural(issues.len(), "problem", "problems"),
            plural(errors, "error", "errors").red(),
            plural(issues.len() - errors, "warning", "warnings").yellow()
        );
    }

    if report.pending_replacements > 0 {
        let _ = writeln!(
            writer,
            "note: {} still hardcoded (run {})",
            plural(report.pending_replacements, "string is", "strings are"),
            "localise replace".cyan()
        );
    }
}

// ============================================================
// Tests
// ============================================================
