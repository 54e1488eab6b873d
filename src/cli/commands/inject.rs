use anyhow::Result;

use super::{CommandResult, CommandSummary, InjectSummary, helper::{aborted, finish}};
use crate::{
    cli::args::InjectCommand,
    core::{context::ProjectContext, inject::InjectOutcome, parsers::json::list_locales},
};

pub fn inject(cmd: InjectCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;

    let mut locales = list_locales(&ctx.translations_dir)?;
    for locale in &cmd.lang {
        if !locales.contains(locale) {
            locales.push(locale.clone());
        }
    }
    locales.retain(|locale| locale != ctx.source_locale());

    let injector = ctx.injector();
    let outcome = injector.inject(&locales, cmd.dry_run)?;
    if outcome == InjectOutcome::NoEntryFile {
        return Ok(aborted(format!(
            "No entry file found (looked for {}). Set \"entryCandidates\" in .localiserc.json.",
            injector.entry_candidates.join(", ")
        )));
    }

    Ok(finish(
        CommandSummary::Inject(InjectSummary {
            outcome,
            dry_run: cmd.dry_run,
        }),
        Vec::new(),
        true,
    ))
}
