//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `replace`: Rewrite hardcoded text into `t(...)` calls and update the source catalog
//! - `translate`: Fill target-locale catalogs with the missing keys
//! - `inject`: Register every locale catalog in the application entry file
//! - `check`: Report unknown keys and unparsable files without writing

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::LookupStyle;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Replace(cmd)) => cmd.common.verbose,
            Some(Command::Translate(cmd)) => cmd.common.verbose,
            Some(Command::Inject(cmd)) => cmd.common.verbose,
            Some(Command::Check(cmd)) => cmd.common.verbose,
            None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project root (default: directory of the nearest .localiserc.json, or the working directory)
    #[arg(long, env = "LOCALISE_PROJECT_ROOT")]
    pub project_root: Option<PathBuf>,

    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Directory holding <locale>.json catalogs (overrides config file)
    #[arg(long)]
    pub translations_dir: Option<PathBuf>,

    /// Source locale (overrides config file)
    #[arg(long)]
    pub source_locale: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ReplaceCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Report what would change without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// How rewritten files obtain `t` (overrides config file)
    #[arg(long, value_enum)]
    pub lookup_style: Option<LookupStyle>,
}

#[derive(Debug, Args)]
pub struct TranslateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Target locales, comma separated (default: every catalog in the translations directory)
    #[arg(long, value_delimiter = ',')]
    pub lang: Vec<String>,

    /// Count missing keys per locale without calling the provider
    #[arg(long)]
    pub dry_run: bool,

    /// Pseudo-translate offline ("[FR] text") instead of calling the backend
    #[arg(long)]
    pub pseudo: bool,
}

#[derive(Debug, Args)]
pub struct InjectCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Extra locales to register, comma separated
    #[arg(long, value_delimiter = ',')]
    pub lang: Vec<String>,

    /// Report what would change without writing the entry file
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replace hardcoded text with t(...) calls and update the source catalog
    Replace(ReplaceCommand),
    /// Translate keys missing from target-locale catalogs
    Translate(TranslateCommand),
    /// Import every locale catalog in the entry file and register it with initLocalisation
    Inject(InjectCommand),
    /// Report t(...) keys missing from the source catalog and files that fail to parse
    Check(CheckCommand),
}
