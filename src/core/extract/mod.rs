//! Extraction and rewrite of translatable text.
//!
//! One file at a time: parse, collect candidate sites, assign keys against
//! the catalog, then splice `t(...)` calls and the needed imports into the
//! original text. Files are visited sequentially so key ordinals and catalog
//! order are deterministic.

pub mod visitor;

use std::{fs, io, path::Path};

use anyhow::Result;

use self::visitor::{CandidateCollector, HookSite, KeyReference, LOOKUP_FN, LOOKUP_HOOK, Slot};
use crate::{
    config::LookupStyle,
    core::{
        catalog::KeyCatalog,
        context::ProjectContext,
        edit::SourceEdits,
        imports::ModuleLayout,
        key::{KeyMinter, key_prefix},
        parsers::jsx::{ParsedSource, parse_source},
    },
    issues::{Issue, ParseErrorIssue, UnknownKeyIssue, WriteErrorIssue},
    rules::{Arg, RuleSet},
    utils::line_of_offset,
};

pub struct ExtractOptions<'a> {
    pub sdk_module: &'a str,
    pub lookup_style: LookupStyle,
    pub rules: &'a RuleSet,
}

/// Result of rewriting one file.
#[derive(Debug)]
pub struct FileRewrite {
    pub output: String,
    pub modified: bool,
    pub replacements: usize,
    pub new_keys: usize,
    /// Existing `t("...")` calls whose key is not in the catalog.
    pub unknown_keys: Vec<KeyReference>,
}

/// Rewrite one source text, extending `catalog` with every new key.
///
/// Re-running on the output with the same catalog yields no replacements
/// and byte-identical text.
pub fn rewrite_source(
    code: &str,
    path: &Path,
    prefix: &str,
    catalog: &mut KeyCatalog,
    options: &ExtractOptions<'_>,
) -> Result<FileRewrite> {
    let parsed = parse_source(code, path)?;
    let collector = CandidateCollector::new(&parsed, options.rules).collect();

    let unknown_keys: Vec<KeyReference> = collector
        .references
        .iter()
        .filter(|r| !catalog.has(&r.key))
        .cloned()
        .collect();

    let mut minter = KeyMinter::new(prefix);
    let mut edits = SourceEdits::new();
    let mut new_keys = 0;

    for site in &collector.sites {
        let found = &site.found;
        let key = match catalog.lookup_by_text(&found.template) {
            Some(existing) => existing.to_string(),
            None => {
                let key = minter.mint(found.kind, catalog);
                catalog.insert(key.clone(), found.template.clone());
                new_keys += 1;
                key
            }
        };

        let call = lookup_call(&key, &found.args)?;
        let replacement = match site.slot {
            Slot::JsxChild | Slot::AttributeValue => format!("{{{}}}", call),
            Slot::Expression => call,
        };
        tracing::debug!(file = %path.display(), %key, "replacing {:?}", &code[site.start..site.end]);
        edits.replace(site.start, site.end, replacement);
    }

    let replacements = collector.sites.len();
    if replacements > 0 {
        let layout = ModuleLayout::of(&parsed);
        match options.lookup_style {
            LookupStyle::Global => {
                ensure_import(&mut edits, &layout, options.sdk_module, LOOKUP_FN)?;
            }
            LookupStyle::Hook => match &collector.hook_site {
                Some(site) => {
                    ensure_import(&mut edits, &layout, options.sdk_module, LOOKUP_HOOK)?;
                    if !collector.has_hook_binding {
                        insert_hook_binding(&mut edits, &parsed, site);
                    }
                }
                None => {
                    tracing::warn!(
                        file = %path.display(),
                        "no function body for `const t = useT()`, importing `t` instead"
                    );
                    ensure_import(&mut edits, &layout, options.sdk_module, LOOKUP_FN)?;
                }
            },
        }
    }

    let output = edits.apply(code);
    let modified = output != code;
    Ok(FileRewrite {
        output,
        modified,
        replacements,
        new_keys,
        unknown_keys,
    })
}

/// `t("key")` or `t("key", { name: expr, ... })`.
fn lookup_call(key: &str, args: &[Arg]) -> Result<String> {
    let key = serde_json::to_string(key)?;
    if args.is_empty() {
        return Ok(format!("{}({})", LOOKUP_FN, key));
    }
    let props: Vec<String> = args
        .iter()
        .map(|arg| format!("{}: {}", arg.name, arg.expr))
        .collect();
    Ok(format!("{}({}, {{ {} }})", LOOKUP_FN, key, props.join(", ")))
}

/// Make sure `name` is imported from `module`, extending an existing named
/// import when there is one.
pub(crate) fn ensure_import(
    edits: &mut SourceEdits,
    layout: &ModuleLayout,
    module: &str,
    name: &str,
) -> Result<()> {
    if layout.imports_from(module).any(|i| i.imports_named(name)) {
        return Ok(());
    }

    if let Some(end) = layout
        .imports_from(module)
        .find_map(|i| i.last_named_end)
    {
        edits.insert(end, format!(", {}", name));
        return Ok(());
    }

    let statement = format!("import {{ {} }} from {};", name, serde_json::to_string(module)?);
    match layout.insertion_point() {
        Some(at) => edits.insert(at, format!("\n{}", statement)),
        None => edits.insert(0, format!("{}\n", statement)),
    }
    Ok(())
}

fn insert_hook_binding(edits: &mut SourceEdits, parsed: &ParsedSource, site: &HookSite) {
    let binding = format!("const {} = {}();", LOOKUP_FN, LOOKUP_HOOK);
    let Some(first) = site.first_stmt else {
        edits.insert(site.body_open, format!(" {} ", binding));
        return;
    };

    let line_start = parsed.code[..first].rfind('\n').map_or(0, |idx| idx + 1);
    let indent = &parsed.code[line_start..first];
    if indent.chars().all(char::is_whitespace) {
        edits.insert(first, format!("{}\n{}", binding, indent));
    } else {
        edits.insert(first, format!("{} ", binding));
    }
}

// ============================================================
// Project pass
// ============================================================

/// Outcome of running extraction over the whole source tree.
#[derive(Debug, Default)]
pub struct ExtractionReport {
    pub files_scanned: usize,
    /// Files rewritten (or that would be, under dry-run), relative to the project root.
    pub updated_files: Vec<String>,
    pub replacements: usize,
    pub new_keys: usize,
    pub issues: Vec<Issue>,
}

impl ExtractionReport {
    pub fn parse_error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i, Issue::ParseError(_)))
            .count()
    }
}

/// Rewrite every scanned file and persist the source catalog.
///
/// Under `dry_run` nothing is written. Files that fail to read, parse or
/// save are reported and skipped.
pub fn run_extraction(ctx: &ProjectContext, dry_run: bool) -> Result<ExtractionReport> {
    extract_with(ctx, dry_run, |path, contents| fs::write(path, contents))
}

/// `run_extraction` with the file writer supplied by the caller.
///
/// A file whose write fails keeps none of its new keys, so the persisted
/// catalog covers exactly the files that were saved.
fn extract_with<W>(ctx: &ProjectContext, dry_run: bool, mut write: W) -> Result<ExtractionReport>
where
    W: FnMut(&Path, &str) -> io::Result<()>,
{
    let catalog_path = ctx.catalog_path(ctx.source_locale());
    let mut catalog = KeyCatalog::read_from(&catalog_path)?;
    let rules = ctx.rule_set();
    let options = ExtractOptions {
        sdk_module: &ctx.config.sdk_module,
        lookup_style: ctx.config.lookup_style,
        rules: &rules,
    };

    let scan = ctx.scan()?;
    let mut report = ExtractionReport {
        files_scanned: scan.files.len(),
        ..Default::default()
    };

    for file in &scan.files {
        let shown = ctx.display_path(file);
        let code = match fs::read_to_string(file) {
            Ok(code) => code,
            Err(e) => {
                tracing::warn!("skipping {}: {}", shown, e);
                report.issues.push(Issue::ParseError(ParseErrorIssue {
                    file_path: shown,
                    error: e.to_string(),
                }));
                continue;
            }
        };

        let relative = file.strip_prefix(&ctx.source_root).unwrap_or(file);
        let prefix = key_prefix(relative);
        let saved = (!dry_run).then(|| catalog.clone());
        let rewrite = match rewrite_source(&code, file, &prefix, &mut catalog, &options) {
            Ok(rewrite) => rewrite,
            Err(e) => {
                tracing::warn!("skipping {}: failed to parse", shown);
                report.issues.push(Issue::ParseError(ParseErrorIssue {
                    file_path: shown,
                    error: e.to_string(),
                }));
                continue;
            }
        };

        for reference in &rewrite.unknown_keys {
            tracing::warn!("{}: unknown key \"{}\"", shown, reference.key);
            report.issues.push(Issue::UnknownKey(UnknownKeyIssue {
                file_path: shown.clone(),
                line: line_of_offset(&code, reference.offset),
                key: reference.key.clone(),
            }));
        }

        if rewrite.modified
            && !dry_run
            && let Err(e) = write(file, &rewrite.output)
        {
            tracing::warn!("skipping {}: {}", shown, e);
            if let Some(saved) = saved {
                catalog = saved;
            }
            report.issues.push(Issue::WriteError(WriteErrorIssue {
                file_path: shown,
                error: e.to_string(),
            }));
            continue;
        }

        report.replacements += rewrite.replacements;
        report.new_keys += rewrite.new_keys;
        if rewrite.modified {
            report.updated_files.push(shown);
        }
    }

    if !dry_run {
        catalog.write_to(&catalog_path)?;
    }

    Ok(report)
}
