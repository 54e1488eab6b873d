use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        ignore::IgnoreRules,
        inject::RootInjector,
        scanner::{ScanOptions, ScanResult, scan_files},
    },
    rules::RuleSet,
    utils::to_slash,
};

/// Resolved project settings shared by every command.
///
/// Priority for each setting: CLI argument > config file > default.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub config: Config,
    /// Directory containing the config file, or the working directory.
    pub root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub source_root: PathBuf,
    pub translations_dir: PathBuf,
    pub verbose: bool,
}

impl ProjectContext {
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let start = match &common_args.project_root {
            Some(root) => root.clone(),
            None => env::current_dir().context("Failed to read current directory")?,
        };

        let loaded = load_config(&start)?;
        match &loaded.path {
            Some(path) => tracing::debug!("using config {}", path.display()),
            None => tracing::debug!("no config file found, using defaults"),
        }

        let root = match (&common_args.project_root, &loaded.path) {
            (None, Some(path)) => path.parent().map(Path::to_path_buf).unwrap_or(start),
            _ => start,
        };

        let mut config = loaded.config;
        if let Some(locale) = &common_args.source_locale {
            config.source_locale = locale.clone();
        }

        let source_root = match &common_args.source_root {
            Some(dir) => dir.clone(),
            None => root.join(&config.source_root),
        };
        let translations_dir = match &common_args.translations_dir {
            Some(dir) => dir.clone(),
            None => root.join(&config.translations_dir),
        };

        Ok(Self {
            config,
            root,
            config_path: loaded.path,
            source_root,
            translations_dir,
            verbose: common_args.verbose,
        })
    }

    /// Context for `root` with paths taken from `config` as-is.
    pub fn from_config(root: impl Into<PathBuf>, config: Config) -> Self {
        let root = root.into();
        Self {
            source_root: root.join(&config.source_root),
            translations_dir: root.join(&config.translations_dir),
            config,
            root,
            config_path: None,
            verbose: false,
        }
    }

    pub fn source_locale(&self) -> &str {
        &self.config.source_locale
    }

    pub fn catalog_path(&self, locale: &str) -> PathBuf {
        self.translations_dir.join(format!("{}.json", locale))
    }

    pub fn rule_set(&self) -> RuleSet {
        RuleSet::from_config(&self.config)
    }

    pub fn injector(&self) -> RootInjector {
        RootInjector {
            project_root: self.root.clone(),
            entry_candidates: self.config.entry_candidates.clone(),
            translations_dir: self.translations_dir.clone(),
            source_locale: self.config.source_locale.clone(),
            sdk_module: self.config.sdk_module.clone(),
        }
    }

    pub fn ignore_rules(&self) -> Result<IgnoreRules> {
        IgnoreRules::load(&self.root)
    }

    pub fn scan(&self) -> Result<ScanResult> {
        let ignore_rules = self.ignore_rules()?;
        let result = scan_files(&ScanOptions {
            project_root: &self.root,
            source_root: &self.source_root,
            includes: &self.config.includes,
            ignores: &self.config.ignores,
            ignore_rules: &ignore_rules,
        });
        if result.skipped_count > 0 {
            tracing::warn!("{} path(s) skipped due to access errors", result.skipped_count);
        }
        Ok(result)
    }

    /// `path` relative to the project root with `/` separators.
    pub fn display_path(&self, path: &Path) -> String {
        to_slash(path.strip_prefix(&self.root).unwrap_or(path))
    }
}
