use crate::{
    core::{check::CheckReport, extract::ExtractionReport, inject::InjectOutcome},
    issues::Issue,
    sync::SyncReport,
};

#[derive(Debug)]
pub struct ReplaceSummary {
    pub report: ExtractionReport,
    pub dry_run: bool,
    /// `None` under dry-run.
    pub injection: Option<InjectOutcome>,
    pub injection_error: Option<String>,
}

#[derive(Debug)]
pub struct TranslateSummary {
    pub report: SyncReport,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct InjectSummary {
    pub outcome: InjectOutcome,
    pub dry_run: bool,
}

#[derive(Debug)]
pub enum CommandSummary {
    Replace(ReplaceSummary),
    Translate(TranslateSummary),
    Inject(InjectSummary),
    Check(CheckReport),
    /// A precondition did not hold; nothing was done.
    Aborted(String),
}

/// Result of running a localise command
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    pub exit_on_errors: bool,
    /// Issues found while scanning sources, sorted by location.
    pub issues: Vec<Issue>,
}
