use anyhow::Result;

use super::{CommandResult, CommandSummary, TranslateSummary, helper::{aborted, finish}};
use crate::{
    cli::args::TranslateCommand,
    config::load_credentials,
    core::{context::ProjectContext, parsers::json::list_locales},
    sync::{HttpProvider, PseudoProvider, SyncMode, run_sync},
};

pub fn translate(cmd: TranslateCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;

    let targets = if cmd.lang.is_empty() {
        list_locales(&ctx.translations_dir)?
            .into_iter()
            .filter(|locale| locale != ctx.source_locale())
            .collect()
    } else {
        cmd.lang.clone()
    };
    if targets.is_empty() {
        return Ok(aborted(
            "No target locales. Pass --lang (e.g. --lang fr,de) or add <locale>.json catalogs.",
        ));
    }

    let http;
    let mode = if cmd.dry_run {
        SyncMode::DryRun
    } else if cmd.pseudo {
        SyncMode::Apply(&PseudoProvider)
    } else {
        match load_credentials(&ctx.root) {
            Ok(credentials) => {
                http = HttpProvider::new(credentials);
                SyncMode::Apply(&http)
            }
            Err(err) => return Ok(aborted(err.to_string())),
        }
    };

    let report = match run_sync(&ctx, &targets, mode) {
        Ok(report) => report,
        Err(err) => return Ok(aborted(err.to_string())),
    };

    Ok(finish(
        CommandSummary::Translate(TranslateSummary {
            report,
            dry_run: cmd.dry_run,
        }),
        Vec::new(),
        true,
    ))
}
