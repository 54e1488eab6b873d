use anyhow::Result;

use super::{CommandSummary, ReplaceSummary, helper::finish};
use crate::{
    cli::args::ReplaceCommand,
    core::{context::ProjectContext, extract::run_extraction, parsers::json::list_locales},
};

pub fn replace(cmd: ReplaceCommand) -> Result<super::CommandResult> {
    let mut ctx = ProjectContext::new(&cmd.common)?;
    if let Some(style) = cmd.lookup_style {
        ctx.config.lookup_style = style;
    }

    let mut report = run_extraction(&ctx, cmd.dry_run)?;
    let issues = std::mem::take(&mut report.issues);

    let mut injection = None;
    let mut injection_error = None;
    if !cmd.dry_run {
        let locales: Vec<String> = list_locales(&ctx.translations_dir)?
            .into_iter()
            .filter(|locale| locale != ctx.source_locale())
            .collect();
        match ctx.injector().inject(&locales, false) {
            Ok(outcome) => injection = Some(outcome),
            Err(err) => {
                tracing::warn!("entry injection failed: {:#}", err);
                injection_error = Some(format!("{:#}", err));
            }
        }
    }

    Ok(finish(
        CommandSummary::Replace(ReplaceSummary {
            report,
            dry_run: cmd.dry_run,
            injection,
            injection_error,
        }),
        issues,
        false,
    ))
}
