use anyhow::Result;

use super::{CommandResult, CommandSummary, helper::finish};
use crate::{
    cli::args::CheckCommand,
    core::{check::run_check, context::ProjectContext},
};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let mut report = run_check(&ctx)?;
    let issues = std::mem::take(&mut report.issues);

    let mut result = finish(CommandSummary::Check(report), issues, true);
    // Unknown keys are warnings elsewhere; here they fail the run.
    result.error_count += result.warning_count;
    Ok(result)
}
