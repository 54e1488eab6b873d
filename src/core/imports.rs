//! Top-level import layout of a parsed module.
//!
//! Rewrites that add imports need to know where the directive prologue
//! ends, where the import block ends and what an existing import already
//! brings in.

use swc_ecma_ast::{
    Expr, ImportDecl, ImportSpecifier, Lit, ModuleDecl, ModuleExportName, ModuleItem, Stmt,
};

use super::parsers::jsx::ParsedSource;

#[derive(Debug, Clone)]
pub struct ImportInfo {
    pub start: usize,
    pub end: usize,
    pub source: String,
    pub type_only: bool,
    /// Local name of the default specifier, if any.
    pub default_local: Option<String>,
    /// `(imported, local)` for each named specifier.
    pub named: Vec<(String, String)>,
    /// End offset of the last named specifier, for appending to `{ ... }`.
    pub last_named_end: Option<usize>,
}

impl ImportInfo {
    pub fn imports_named(&self, name: &str) -> bool {
        self.named.iter().any(|(imported, _)| imported == name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModuleLayout {
    /// End of the last leading `"use ..."` directive, if any.
    pub prologue_end: Option<usize>,
    /// All top-level imports in source order.
    pub imports: Vec<ImportInfo>,
}

impl ModuleLayout {
    pub fn of(parsed: &ParsedSource) -> Self {
        let mut layout = Self::default();
        let mut in_prologue = true;

        for item in &parsed.module.body {
            match item {
                ModuleItem::Stmt(Stmt::Expr(stmt))
                    if in_prologue && matches!(&*stmt.expr, Expr::Lit(Lit::Str(_))) =>
                {
                    layout.prologue_end = Some(parsed.offset(stmt.span.hi));
                }
                ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => {
                    in_prologue = false;
                    layout.imports.push(import_info(parsed, import));
                }
                _ => in_prologue = false,
            }
        }
        layout
    }

    /// Offset right after the last import, or after the directive prologue.
    /// `None` means the top of the file.
    pub fn insertion_point(&self) -> Option<usize> {
        self.imports
            .last()
            .map(|import| import.end)
            .or(self.prologue_end)
    }

    /// Value imports of `source`.
    pub fn imports_from<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a ImportInfo> {
        self.imports
            .iter()
            .filter(move |i| i.source == source && !i.type_only)
    }
}

fn import_info(parsed: &ParsedSource, import: &ImportDecl) -> ImportInfo {
    let (start, end) = parsed.range(import.span);
    let mut info = ImportInfo {
        start,
        end,
        source: import
            .src
            .value
            .as_str()
            .map(str::to_string)
            .unwrap_or_default(),
        type_only: import.type_only,
        default_local: None,
        named: Vec::new(),
        last_named_end: None,
    };

    for specifier in &import.specifiers {
        match specifier {
            ImportSpecifier::Named(named) => {
                let local = named.local.sym.to_string();
                let imported = match &named.imported {
                    Some(ModuleExportName::Ident(ident)) => ident.sym.to_string(),
                    Some(ModuleExportName::Str(s)) => s.value.to_string_lossy().to_string(),
                    None => local.clone(),
                };
                if !named.is_type_only {
                    info.named.push((imported, local));
                }
                info.last_named_end = Some(parsed.offset(named.span.hi));
            }
            ImportSpecifier::Default(default) => {
                info.default_local = Some(default.local.sym.to_string());
            }
            ImportSpecifier::Namespace(_) => {}
        }
    }
    info
}
