//! Entry-file injection of locale catalogs.
//!
//! The application entry file must import every locale catalog and pass
//! them all to `initLocalisation(<sourceLocale>, { ... })`. Injection is a
//! text splice: existing locale imports are removed and re-emitted as one
//! sorted block right after the other imports, missing properties are
//! appended to the initializer call, and nothing else is touched. Running it
//! twice with the same locales gives byte-identical output.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use swc_common::Spanned;
use swc_ecma_ast::{CallExpr, Callee, Expr, Prop, PropName, PropOrSpread};
use swc_ecma_visit::{Visit, VisitWith};

use crate::{
    core::{
        edit::SourceEdits,
        imports::{ImportInfo, ModuleLayout},
        parsers::jsx::{ParsedSource, parse_source},
    },
    utils::relative_module_path,
};

pub const INIT_FN: &str = "initLocalisation";

#[derive(Debug, Clone)]
pub struct RootInjector {
    pub project_root: PathBuf,
    /// Entry files relative to the project root, in priority order.
    pub entry_candidates: Vec<String>,
    pub translations_dir: PathBuf,
    pub source_locale: String,
    pub sdk_module: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectOutcome {
    NoEntryFile,
    Unchanged { entry: PathBuf },
    Updated { entry: PathBuf, locales: Vec<String> },
}

impl RootInjector {
    /// First candidate that exists wins.
    pub fn find_entry_file(&self) -> Option<PathBuf> {
        self.entry_candidates
            .iter()
            .map(|candidate| self.project_root.join(candidate))
            .find(|path| path.is_file())
    }

    /// Ensure the entry file registers the source locale and every locale in
    /// `locales`. Under `dry_run` the file is not written.
    pub fn inject(&self, locales: &[String], dry_run: bool) -> Result<InjectOutcome> {
        let Some(entry) = self.find_entry_file() else {
            tracing::warn!(
                "no entry file found (looked for {})",
                self.entry_candidates.join(", ")
            );
            return Ok(InjectOutcome::NoEntryFile);
        };

        let code = fs::read_to_string(&entry)
            .with_context(|| format!("Failed to read file: {}", entry.display()))?;

        let entry_dir = entry
            .parent()
            .and_then(|dir| dir.strip_prefix(&self.project_root).ok())
            .unwrap_or(Path::new(""));
        let translations = self
            .translations_dir
            .strip_prefix(&self.project_root)
            .unwrap_or(&self.translations_dir);
        let module_dir = relative_module_path(entry_dir, translations);

        let mut requested: Vec<String> = vec![self.source_locale.clone()];
        requested.extend(locales.iter().cloned());

        let plan = InjectionPlan {
            module_dir: &module_dir,
            locales: &requested,
            default_locale: &self.source_locale,
            sdk_module: &self.sdk_module,
        };
        let injected = inject_into_source(&code, &entry, &plan)
            .with_context(|| format!("Failed to update entry file {}", entry.display()))?;

        if injected.output == code {
            return Ok(InjectOutcome::Unchanged { entry });
        }
        if !dry_run {
            fs::write(&entry, &injected.output)
                .with_context(|| format!("Failed to write file: {}", entry.display()))?;
        }
        Ok(InjectOutcome::Updated {
            entry,
            locales: injected.locales,
        })
    }
}

/// What to register in one entry source.
pub struct InjectionPlan<'a> {
    /// Module specifier of the translations directory as seen from the entry file.
    pub module_dir: &'a str,
    pub locales: &'a [String],
    pub default_locale: &'a str,
    pub sdk_module: &'a str,
}

pub struct Injected {
    pub output: String,
    /// Every locale registered after injection, sorted.
    pub locales: Vec<String>,
}

struct LocaleImport<'a> {
    locale: String,
    binding: String,
    import: &'a ImportInfo,
}

pub fn inject_into_source(code: &str, path: &Path, plan: &InjectionPlan<'_>) -> Result<Injected> {
    let parsed = parse_source(code, path)?;
    let layout = ModuleLayout::of(&parsed);
    let prefix = format!("{}/", plan.module_dir);

    let existing: Vec<LocaleImport<'_>> = layout
        .imports
        .iter()
        .filter_map(|import| {
            let file = import.source.strip_prefix(&prefix)?;
            let locale = file.strip_suffix(".json")?;
            if locale.contains('/') {
                return None;
            }
            Some(LocaleImport {
                locale: locale.to_string(),
                binding: import.default_local.clone()?,
                import,
            })
        })
        .collect();

    // Locale → binding.
    let mut registered: BTreeMap<String, String> = BTreeMap::new();
    for found in &existing {
        registered
            .entry(found.locale.clone())
            .or_insert_with(|| found.binding.clone());
    }
    for locale in plan.locales.iter().map(String::as_str).chain([plan.default_locale]) {
        registered
            .entry(locale.to_string())
            .or_insert_with(|| binding_for(locale));
    }

    let mut edits = SourceEdits::new();

    // Initializer import, at the top.
    let has_init_import = layout
        .imports_from(plan.sdk_module)
        .any(|i| i.imports_named(INIT_FN));
    let init_extends = layout
        .imports_from(plan.sdk_module)
        .find_map(|i| i.last_named_end);
    let top = layout.prologue_end;
    if !has_init_import {
        match init_extends {
            Some(end) => edits.insert(end, format!(", {}", INIT_FN)),
            None => {
                let statement = format!(
                    "import {{ {} }} from {};",
                    INIT_FN,
                    serde_json::to_string(plan.sdk_module)?
                );
                match top {
                    Some(at) => edits.insert(at, format!("\n{}", statement)),
                    None => edits.insert(0, format!("{}\n", statement)),
                }
            }
        }
    }

    // Old locale imports go; the sorted block goes after the last other import.
    for found in &existing {
        let end = found.import.end;
        let rest = &code[end..];
        let newline = if rest.starts_with("\r\n") {
            2
        } else if rest.starts_with('\n') {
            1
        } else {
            0
        };
        edits.delete(found.import.start, end + newline);
    }

    let anchor = layout
        .imports
        .iter()
        .filter(|i| !existing.iter().any(|e| std::ptr::eq(e.import, *i)))
        .map(|i| i.end)
        .next_back()
        .or(top);

    // Import block in module path order: `pt-BR.json` sorts before `pt.json`.
    let mut modules: Vec<(String, &str)> = registered
        .iter()
        .map(|(locale, binding)| (format!("{}{}.json", prefix, locale), binding.as_str()))
        .collect();
    modules.sort();
    let lines: Vec<String> = modules
        .iter()
        .map(|(module, binding)| -> Result<String> {
            Ok(format!("import {} from {};", binding, serde_json::to_string(module)?))
        })
        .collect::<Result<_>>()?;

    let init_call = InitCallFinder::find(&parsed);
    let call_statement = match &init_call {
        Some(call) => {
            add_missing_properties(&mut edits, call, &registered)?;
            None
        }
        None => Some(format!(
            "{}({}, {{ {} }});",
            INIT_FN,
            serde_json::to_string(plan.default_locale)?,
            registered
                .iter()
                .map(|(locale, binding)| property_for(locale, binding))
                .collect::<Result<Vec<_>>>()?
                .join(", ")
        )),
    };

    match anchor {
        Some(at) => {
            let mut text = format!("\n{}", lines.join("\n"));
            if let Some(call) = &call_statement {
                text.push_str(&format!("\n\n{}", call));
            }
            edits.insert(at, text);
        }
        None => {
            let mut text = format!("{}\n", lines.join("\n"));
            if let Some(call) = &call_statement {
                text.push_str(&format!("\n{}\n\n", call));
            }
            edits.insert(0, text);
        }
    }

    Ok(Injected {
        output: edits.apply(code),
        locales: registered.into_keys().collect(),
    })
}

fn add_missing_properties(
    edits: &mut SourceEdits,
    call: &InitCall,
    registered: &BTreeMap<String, String>,
) -> Result<()> {
    let missing: Vec<String> = registered
        .iter()
        .filter(|(locale, _)| !call.keys.iter().any(|k| k == *locale))
        .map(|(locale, binding)| property_for(locale, binding))
        .collect::<Result<_>>()?;
    if missing.is_empty() {
        return Ok(());
    }

    match &call.target {
        InitTarget::Object {
            last_prop_end: Some(end),
            ..
        } => edits.insert(*end, format!(", {}", missing.join(", "))),
        InitTarget::Object {
            start,
            end,
            last_prop_end: None,
        } => edits.replace(*start, *end, format!("{{ {} }}", missing.join(", "))),
        InitTarget::Missing { after_first_arg } => {
            edits.insert(*after_first_arg, format!(", {{ {} }}", missing.join(", ")))
        }
        InitTarget::Other => {
            tracing::warn!("{} is not called with an object literal, leaving it alone", INIT_FN)
        }
    }
    Ok(())
}

/// JS binding name for a locale default import: `zh-CN` → `zh_CN`.
fn binding_for(locale: &str) -> String {
    let mut binding: String = locale
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '$' { c } else { '_' })
        .collect();
    if binding.is_empty() || binding.starts_with(|c: char| c.is_ascii_digit()) {
        binding.insert(0, '_');
    }
    binding
}

fn property_for(locale: &str, binding: &str) -> Result<String> {
    let is_identifier = binding_for(locale) == locale;
    Ok(if is_identifier && binding == locale {
        locale.to_string()
    } else if is_identifier {
        format!("{}: {}", locale, binding)
    } else {
        format!("{}: {}", serde_json::to_string(locale)?, binding)
    })
}

// ============================================================
// initLocalisation(...) lookup
// ============================================================

enum InitTarget {
    Object {
        start: usize,
        end: usize,
        last_prop_end: Option<usize>,
    },
    Missing {
        after_first_arg: usize,
    },
    Other,
}

struct InitCall {
    /// Property names already passed in the locale map.
    keys: Vec<String>,
    target: InitTarget,
}

struct InitCallFinder<'a> {
    parsed: &'a ParsedSource,
    found: Option<InitCall>,
}

impl InitCallFinder<'_> {
    fn find(parsed: &ParsedSource) -> Option<InitCall> {
        let mut finder = InitCallFinder {
            parsed,
            found: None,
        };
        parsed.module.visit_with(&mut finder);
        finder.found
    }

    fn describe(&self, call: &CallExpr) -> InitCall {
        let Some(map) = call.args.get(1) else {
            let after_first_arg = call
                .args
                .first()
                .map(|arg| self.parsed.offset(arg.expr.span().hi))
                .unwrap_or_else(|| self.parsed.offset(call.span.hi) - 1);
            return InitCall {
                keys: Vec::new(),
                target: InitTarget::Missing { after_first_arg },
            };
        };

        let Expr::Object(object) = &*map.expr else {
            return InitCall {
                keys: Vec::new(),
                target: InitTarget::Other,
            };
        };

        let mut keys = Vec::new();
        let mut last_prop_end = None;
        for prop in &object.props {
            let hi = match prop {
                PropOrSpread::Spread(spread) => spread.expr.span().hi,
                PropOrSpread::Prop(prop) => {
                    match &**prop {
                        Prop::Shorthand(ident) => keys.push(ident.sym.to_string()),
                        Prop::KeyValue(kv) => match &kv.key {
                            PropName::Ident(ident) => keys.push(ident.sym.to_string()),
                            PropName::Str(s) => {
                                keys.push(s.value.to_string_lossy().to_string())
                            }
                            _ => {}
                        },
                        _ => {}
                    }
                    prop.span().hi
                }
            };
            last_prop_end = Some(self.parsed.offset(hi));
        }

        let (start, end) = self.parsed.range(object.span);
        InitCall {
            keys,
            target: InitTarget::Object {
                start,
                end,
                last_prop_end,
            },
        }
    }
}

impl Visit for InitCallFinder<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if self.found.is_some() {
            return;
        }
        if let Callee::Expr(callee) = &node.callee
            && let Expr::Ident(ident) = &**callee
            && ident.sym == INIT_FN
        {
            self.found = Some(self.describe(node));
            return;
        }
        node.visit_children_with(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn plan<'a>(locales: &'a [String]) -> InjectionPlan<'a> {
        InjectionPlan {
            module_dir: "../translations",
            locales,
            default_locale: "en",
            sdk_module: "localise-ai-sdk",
        }
    }

    fn locales(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    const LAYOUT: &str = r#"import { Stack } from "expo-router";

export default function Layout() {
  return <Stack />;
}
"#;

    #[test]
    fn test_inject_into_fresh_entry() {
        let requested = locales(&["en", "fr"]);
        let injected =
            inject_into_source(LAYOUT, Path::new("app/_layout.tsx"), &plan(&requested)).unwrap();

        assert_eq!(
            injected.output,
            r#"import { initLocalisation } from "localise-ai-sdk";
import { Stack } from "expo-router";
import en from "../translations/en.json";
import fr from "../translations/fr.json";

initLocalisation("en", { en, fr });

export default function Layout() {
  return <Stack />;
}
"#
        );
        assert_eq!(injected.locales, vec!["en", "fr"]);
    }

    #[test]
    fn test_inject_is_idempotent() {
        let requested = locales(&["fr", "en"]);
        let path = Path::new("app/_layout.tsx");
        let first = inject_into_source(LAYOUT, path, &plan(&requested)).unwrap();
        let second = inject_into_source(&first.output, path, &plan(&requested)).unwrap();

        assert_eq!(second.output, first.output);
    }

    #[test]
    fn test_inject_adds_new_locale_in_order() {
        let path = Path::new("app/_layout.tsx");
        let first = inject_into_source(LAYOUT, path, &plan(&locales(&["en", "fr"]))).unwrap();
        let second = inject_into_source(&first.output, path, &plan(&locales(&["de"]))).unwrap();

        assert_eq!(
            second.output,
            r#"import { initLocalisation } from "localise-ai-sdk";
import { Stack } from "expo-router";
import de from "../translations/de.json";
import en from "../translations/en.json";
import fr from "../translations/fr.json";

initLocalisation("en", { en, fr, de });

export default function Layout() {
  return <Stack />;
}
"#
        );
        assert_eq!(second.locales, vec!["de", "en", "fr"]);
    }

    #[test]
    fn test_inject_without_imports() {
        let code = "export default function App() {\n  return null;\n}\n";
        let requested = locales(&["en"]);
        let path = Path::new("App.tsx");
        let mut plan = plan(&requested);
        plan.module_dir = "./translations";

        let first = inject_into_source(code, path, &plan).unwrap();
        assert_eq!(
            first.output,
            r#"import { initLocalisation } from "localise-ai-sdk";
import en from "./translations/en.json";

initLocalisation("en", { en });

export default function App() {
  return null;
}
"#
        );

        let second = inject_into_source(&first.output, path, &plan).unwrap();
        assert_eq!(second.output, first.output);
    }

    #[test]
    fn test_inject_keeps_existing_call_and_custom_bindings() {
        let code = r#"import { initLocalisation, t } from "localise-ai-sdk";
import english from "../translations/en.json";

initLocalisation("en", { en: english });
"#;
        let requested = locales(&["zh-CN"]);
        let injected =
            inject_into_source(code, Path::new("app/_layout.tsx"), &plan(&requested)).unwrap();

        assert_eq!(
            injected.output,
            r#"import { initLocalisation, t } from "localise-ai-sdk";
import english from "../translations/en.json";
import zh_CN from "../translations/zh-CN.json";

initLocalisation("en", { en: english, "zh-CN": zh_CN });
"#
        );
    }

    #[test]
    fn test_inject_fills_empty_map() {
        let code = r#"import { initLocalisation } from "localise-ai-sdk";

initLocalisation("en", {});
"#;
        let requested = locales(&["en", "fr"]);
        let injected = inject_into_source(code, Path::new("App.tsx"), &plan(&requested)).unwrap();

        assert!(injected.output.contains(r#"initLocalisation("en", { en, fr });"#));
    }

    #[test]
    fn test_inject_sorts_imports_by_module_path() {
        let requested = locales(&["pt", "pt-BR"]);
        let injected = inject_into_source(
            "import { Stack } from \"expo-router\";\n",
            Path::new("app/_layout.tsx"),
            &plan(&requested),
        )
        .unwrap();

        assert_eq!(
            injected.output,
            r#"import { initLocalisation } from "localise-ai-sdk";
import { Stack } from "expo-router";
import en from "../translations/en.json";
import pt_BR from "../translations/pt-BR.json";
import pt from "../translations/pt.json";

initLocalisation("en", { en, pt, "pt-BR": pt_BR });
"#
        );
        assert_eq!(injected.locales, vec!["en", "pt", "pt-BR"]);
    }

    #[test]
    fn test_inject_adds_missing_init_import_once() {
        let code = r#"import en from "../translations/en.json";

initLocalisation("en", { en });
"#;
        let requested = locales(&["en"]);
        let path = Path::new("app/_layout.tsx");
        let first = inject_into_source(code, path, &plan(&requested)).unwrap();

        assert_eq!(
            first.output,
            r#"import { initLocalisation } from "localise-ai-sdk";
import en from "../translations/en.json";

initLocalisation("en", { en });
"#
        );
        assert_eq!(first.output.matches("initLocalisation(").count(), 1);

        let second = inject_into_source(&first.output, path, &plan(&requested)).unwrap();
        assert_eq!(second.output, first.output);
    }

    #[test]
    fn test_find_entry_file_priority() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("app")).unwrap();
        fs::write(dir.path().join("app/index.tsx"), "").unwrap();
        fs::write(dir.path().join("App.tsx"), "").unwrap();

        let injector = RootInjector {
            project_root: dir.path().to_path_buf(),
            entry_candidates: locales(&["app/_layout.tsx", "app/index.tsx", "App.tsx"]),
            translations_dir: dir.path().join("translations"),
            source_locale: "en".to_string(),
            sdk_module: "localise-ai-sdk".to_string(),
        };

        assert_eq!(
            injector.find_entry_file(),
            Some(dir.path().join("app/index.tsx"))
        );
    }

    #[test]
    fn test_inject_without_entry_file() {
        let dir = tempdir().unwrap();
        let injector = RootInjector {
            project_root: dir.path().to_path_buf(),
            entry_candidates: locales(&["App.tsx"]),
            translations_dir: dir.path().join("translations"),
            source_locale: "en".to_string(),
            sdk_module: "localise-ai-sdk".to_string(),
        };

        assert_eq!(
            injector.inject(&locales(&["fr"]), false).unwrap(),
            InjectOutcome::NoEntryFile
        );
    }

    #[test]
    fn test_inject_writes_entry_once() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("app")).unwrap();
        let entry = dir.path().join("app/_layout.tsx");
        fs::write(&entry, LAYOUT).unwrap();

        let injector = RootInjector {
            project_root: dir.path().to_path_buf(),
            entry_candidates: locales(&["app/_layout.tsx"]),
            translations_dir: dir.path().join("translations"),
            source_locale: "en".to_string(),
            sdk_module: "localise-ai-sdk".to_string(),
        };

        let dry = injector.inject(&locales(&["fr"]), true).unwrap();
        assert!(matches!(dry, InjectOutcome::Updated { .. }));
        assert_eq!(fs::read_to_string(&entry).unwrap(), LAYOUT);

        let applied = injector.inject(&locales(&["fr"]), false).unwrap();
        assert_eq!(
            applied,
            InjectOutcome::Updated {
                entry: entry.clone(),
                locales: locales(&["en", "fr"]),
            }
        );
        assert!(
            fs::read_to_string(&entry)
                .unwrap()
                .contains(r#"import fr from "../translations/fr.json";"#)
        );

        assert_eq!(
            injector.inject(&locales(&["fr"]), false).unwrap(),
            InjectOutcome::Unchanged { entry }
        );
    }
}
