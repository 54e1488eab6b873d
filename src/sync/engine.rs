//! Catalog reconciliation: fill target-locale catalogs with the keys the
//! source catalog has and they lack.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use thiserror::Error;

use super::{
    icu::normalize_plural_tokens,
    provider::{TranslationProvider, TranslationRequest},
};
use crate::core::{
    context::ProjectContext,
    inject::InjectOutcome,
    parsers::json::{Catalog, read_catalog, write_catalog},
};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("source catalog not found: {0} (run `localise replace` first)")]
    SourceCatalogMissing(PathBuf),
    #[error("failed to load catalog {path}: {message}")]
    Catalog { path: PathBuf, message: String },
}

#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub translations_dir: PathBuf,
    pub source_locale: String,
    /// Pause between two consecutive provider requests.
    pub request_delay: Duration,
    pub batch_size: usize,
}

impl SyncOptions {
    pub fn from_context(ctx: &ProjectContext) -> Self {
        Self {
            translations_dir: ctx.translations_dir.clone(),
            source_locale: ctx.source_locale().to_string(),
            request_delay: Duration::from_millis(ctx.config.request_delay_ms),
            batch_size: ctx.config.batch_size,
        }
    }

    fn catalog_path(&self, locale: &str) -> PathBuf {
        self.translations_dir.join(format!("{}.json", locale))
    }
}

#[derive(Clone, Copy)]
pub enum SyncMode<'a> {
    /// Count missing keys only. No requests, no writes.
    DryRun,
    Apply(&'a dyn TranslationProvider),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleOutcome {
    UpToDate,
    WouldTranslate { missing: usize },
    Translated { translated: usize, failed: usize },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleReport {
    pub locale: String,
    pub outcome: LocaleOutcome,
}

impl LocaleReport {
    /// The catalog of this locale was written during the run.
    pub fn is_updated(&self) -> bool {
        matches!(self.outcome, LocaleOutcome::Translated { translated, .. } if translated > 0)
    }
}

#[derive(Debug, Default)]
pub struct SyncReport {
    pub locales: Vec<LocaleReport>,
    pub injection: Option<InjectOutcome>,
    pub injection_error: Option<String>,
}

impl SyncReport {
    pub fn updated_locales(&self) -> Vec<String> {
        self.locales
            .iter()
            .filter(|report| report.is_updated())
            .map(|report| report.locale.clone())
            .collect()
    }

    pub fn has_failures(&self) -> bool {
        self.locales.iter().any(|report| match &report.outcome {
            LocaleOutcome::Failed { .. } => true,
            LocaleOutcome::Translated { failed, .. } => *failed > 0,
            _ => false,
        })
    }
}

/// Keys of `source` whose entry in `target` is absent or empty, in source order.
pub fn missing_keys(source: &Catalog, target: &Catalog) -> Catalog {
    source
        .iter()
        .filter(|(key, _)| target.get(*key).is_none_or(|value| value.trim().is_empty()))
        .map(|(key, text)| (key.clone(), text.clone()))
        .collect()
}

/// Merge `translated` into `target`, only for keys listed in `missing`.
/// Returns how many keys were filled; empty results are left out.
pub fn merge_translations(target: &mut Catalog, missing: &Catalog, translated: &Catalog) -> usize {
    let mut merged = 0;
    for key in missing.keys() {
        let Some(value) = translated.get(key) else {
            continue;
        };
        let value = normalize_plural_tokens(value);
        if value.trim().is_empty() {
            continue;
        }
        target.insert(key.clone(), value);
        merged += 1;
    }
    merged
}

/// Keeps provider requests apart by the configured delay.
struct Pacer {
    delay: Duration,
    sent: usize,
}

impl Pacer {
    fn wait(&mut self) {
        if self.sent > 0 && !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.sent += 1;
    }
}

/// Fill every target catalog from the source catalog.
///
/// Targets are processed in the given order with duplicates and the source
/// locale dropped. A failure in one locale is reported and the next locale
/// still runs.
pub fn sync_catalogs(
    options: &SyncOptions,
    targets: &[String],
    mode: SyncMode<'_>,
) -> Result<Vec<LocaleReport>, SyncError> {
    let source_path = options.catalog_path(&options.source_locale);
    if !source_path.is_file() {
        return Err(SyncError::SourceCatalogMissing(source_path));
    }
    let source = load(&source_path)?;

    let mut pacer = Pacer {
        delay: options.request_delay,
        sent: 0,
    };
    let mut seen = HashSet::new();
    let mut reports = Vec::new();

    for locale in targets {
        if *locale == options.source_locale {
            tracing::warn!("skipping {}: it is the source locale", locale);
            continue;
        }
        if !seen.insert(locale.as_str()) {
            continue;
        }

        let outcome = match sync_locale(options, &source, locale, mode, &mut pacer) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!("{}: {:#}", locale, err);
                LocaleOutcome::Failed {
                    reason: format!("{:#}", err),
                }
            }
        };
        reports.push(LocaleReport {
            locale: locale.clone(),
            outcome,
        });
    }

    Ok(reports)
}

fn sync_locale(
    options: &SyncOptions,
    source: &Catalog,
    locale: &str,
    mode: SyncMode<'_>,
    pacer: &mut Pacer,
) -> anyhow::Result<LocaleOutcome> {
    let path = options.catalog_path(locale);
    let mut target = read_catalog(&path)?;
    let missing = missing_keys(source, &target);

    if missing.is_empty() {
        tracing::debug!("{}: nothing to translate", locale);
        return Ok(LocaleOutcome::UpToDate);
    }

    let provider = match mode {
        SyncMode::DryRun => {
            return Ok(LocaleOutcome::WouldTranslate {
                missing: missing.len(),
            });
        }
        SyncMode::Apply(provider) => provider,
    };

    let mut translated = 0;
    let batch_size = options.batch_size.max(1);
    let keys: Vec<(&String, &String)> = missing.iter().collect();

    for chunk in keys.chunks(batch_size) {
        let batch: Catalog = chunk
            .iter()
            .map(|(key, text)| ((*key).clone(), (*text).clone()))
            .collect();

        pacer.wait();
        let request = TranslationRequest {
            keys: &batch,
            source_language: &options.source_locale,
            target_language: locale,
        };
        match provider.translate(&request) {
            Ok(result) => {
                let merged = merge_translations(&mut target, &batch, &result);
                if merged < batch.len() {
                    tracing::warn!(
                        "{}: {} key(s) came back missing or empty",
                        locale,
                        batch.len() - merged
                    );
                }
                translated += merged;
            }
            Err(err) => {
                tracing::warn!("{}: batch of {} key(s) failed: {}", locale, batch.len(), err);
            }
        }
    }

    if translated > 0 {
        write_catalog(&path, &target)?;
    }

    Ok(LocaleOutcome::Translated {
        translated,
        failed: missing.len() - translated,
    })
}

fn load(path: &Path) -> Result<Catalog, SyncError> {
    read_catalog(path).map_err(|err| SyncError::Catalog {
        path: path.to_path_buf(),
        message: format!("{:#}", err),
    })
}

/// Sync the project's catalogs, then register the updated locales in the
/// entry file.
pub fn run_sync(
    ctx: &ProjectContext,
    targets: &[String],
    mode: SyncMode<'_>,
) -> Result<SyncReport, SyncError> {
    let options = SyncOptions::from_context(ctx);
    let locales = sync_catalogs(&options, targets, mode)?;
    let mut report = SyncReport {
        locales,
        ..SyncReport::default()
    };

    let updated = report.updated_locales();
    if !updated.is_empty() {
        match ctx.injector().inject(&updated, false) {
            Ok(outcome) => report.injection = Some(outcome),
            Err(err) => {
                tracing::warn!("entry injection failed: {:#}", err);
                report.injection_error = Some(format!("{:#}", err));
            }
        }
    }

    Ok(report)
}
