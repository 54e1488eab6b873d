//! Read-only verification pass over the source tree.

use std::fs;

use anyhow::Result;

use super::{
    catalog::KeyCatalog, context::ProjectContext, extract::visitor::CandidateCollector,
    parsers::jsx::parse_source,
};
use crate::{
    issues::{Issue, ParseErrorIssue, UnknownKeyIssue},
    utils::line_of_offset,
};

#[derive(Debug, Default)]
pub struct CheckReport {
    pub files_scanned: usize,
    pub catalog_keys: usize,
    /// Text occurrences `replace` would still rewrite.
    pub pending_replacements: usize,
    pub issues: Vec<Issue>,
}

/// Report `t("key")` calls missing from the source catalog and files that do
/// not parse. Nothing is written.
pub fn run_check(ctx: &ProjectContext) -> Result<CheckReport> {
    let catalog = KeyCatalog::read_from(&ctx.catalog_path(ctx.source_locale()))?;
    let rules = ctx.rule_set();
    let scan = ctx.scan()?;

    let mut report = CheckReport {
        files_scanned: scan.files.len(),
        catalog_keys: catalog.len(),
        ..Default::default()
    };

    for file in &scan.files {
        let shown = ctx.display_path(file);
        let parsed = match fs::read_to_string(file)
            .map_err(anyhow::Error::from)
            .and_then(|code| parse_source(&code, file))
        {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!("{}: {}", shown, e);
                report.issues.push(Issue::ParseError(ParseErrorIssue {
                    file_path: shown,
                    error: e.to_string(),
                }));
                continue;
            }
        };

        let collector = CandidateCollector::new(&parsed, &rules).collect();
        report.pending_replacements += collector.sites.len();
        for reference in collector.references.iter().filter(|r| !catalog.has(&r.key)) {
            report.issues.push(Issue::UnknownKey(UnknownKeyIssue {
                file_path: shown.clone(),
                line: line_of_offset(&parsed.code, reference.offset),
                key: reference.key.clone(),
            }));
        }
    }

    report.issues.sort_by(|a, b| {
        a.file_path()
            .cmp(b.file_path())
            .then_with(|| a.line().cmp(&b.line()))
    });
    Ok(report)
}
