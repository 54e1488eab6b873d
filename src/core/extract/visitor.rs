//! Read-only pass that lowers swc nodes into rule candidates.
//!
//! The collector never mutates the tree. For every node a rule accepts it
//! records the byte range to replace and how the replacement must be
//! wrapped; matched nodes are not descended into, so sites never overlap.

use swc_common::Spanned;
use swc_ecma_ast::{
    BinaryOp as SwcBinaryOp, BlockStmt, BlockStmtOrExpr, CallExpr, Callee, ClassMethod, CondExpr,
    DefaultDecl, ExportDefaultDecl, Expr, FnDecl, JSXAttr, JSXAttrName, JSXAttrValue, JSXExpr,
    JSXExprContainer, JSXText, Lit, Pat, PropName, Tpl, VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::parsers::jsx::ParsedSource;
use crate::rules::{BinaryOp, Branch, Candidate, Match, Operand, RuleSet, TemplatePart, Test};

/// Name of the lookup function emitted into rewritten code.
pub const LOOKUP_FN: &str = "t";
/// Name of the hook returning the lookup function.
pub const LOOKUP_HOOK: &str = "useT";

/// How a replacement call is spliced into its surroundings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// JSX text becomes `{t(...)}`.
    JsxChild,
    /// A quoted attribute value becomes `{t(...)}`.
    AttributeValue,
    /// An expression becomes `t(...)`.
    Expression,
}

#[derive(Debug, Clone)]
pub struct Site {
    pub start: usize,
    pub end: usize,
    pub slot: Slot,
    pub found: Match,
}

/// An existing `t("literal")` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyReference {
    pub key: String,
    pub offset: usize,
}

/// Where `const t = useT();` goes: the first eligible function body.
#[derive(Debug, Clone)]
pub struct HookSite {
    /// Offset just after the body's `{`.
    pub body_open: usize,
    /// Offset of the first statement in the body.
    pub first_stmt: Option<usize>,
}

pub struct CandidateCollector<'a> {
    parsed: &'a ParsedSource,
    rules: &'a RuleSet,
    pub sites: Vec<Site>,
    pub references: Vec<KeyReference>,
    pub hook_site: Option<HookSite>,
    pub has_hook_binding: bool,
}

impl<'a> CandidateCollector<'a> {
    pub fn new(parsed: &'a ParsedSource, rules: &'a RuleSet) -> Self {
        Self {
            parsed,
            rules,
            sites: Vec::new(),
            references: Vec::new(),
            hook_site: None,
            has_hook_binding: false,
        }
    }

    pub fn collect(mut self) -> Self {
        self.parsed.module.visit_with(&mut self);
        self
    }

    fn push(&mut self, start: usize, end: usize, slot: Slot, found: Match) {
        self.sites.push(Site {
            start,
            end,
            slot,
            found,
        });
    }

    fn offer_hook_site(&mut self, body: &BlockStmt) {
        if self.hook_site.is_some() {
            return;
        }
        let (open, _) = self.parsed.range(body.span);
        self.hook_site = Some(HookSite {
            body_open: open + 1,
            first_stmt: body
                .stmts
                .first()
                .map(|stmt| self.parsed.offset(stmt.span().lo)),
        });
    }

    fn lower_template(&self, tpl: &Tpl) -> Option<Vec<TemplatePart>> {
        let mut parts = Vec::new();
        for (idx, quasi) in tpl.quasis.iter().enumerate() {
            let cooked = quasi.cooked.as_ref()?.as_str()?;
            if !cooked.is_empty() {
                parts.push(TemplatePart::Literal(cooked.to_string()));
            }
            if let Some(expr) = tpl.exprs.get(idx) {
                parts.push(match unwrap_parens(expr) {
                    Expr::Ident(ident) => TemplatePart::Ident(ident.sym.to_string()),
                    _ => TemplatePart::Other,
                });
            }
        }
        Some(parts)
    }

    fn lower_conditional(&self, node: &CondExpr) -> Candidate {
        let test = match unwrap_parens(&node.test) {
            Expr::Bin(bin) => {
                let op = match bin.op {
                    SwcBinaryOp::EqEq => BinaryOp::Eq,
                    SwcBinaryOp::EqEqEq => BinaryOp::StrictEq,
                    _ => BinaryOp::Other,
                };
                let source = self.parsed.snippet(bin.left.span()).to_string();
                let left = match &*bin.left {
                    Expr::Ident(_) => Operand::Ident(source),
                    Expr::Member(_) => Operand::Member(source),
                    Expr::Lit(Lit::Num(_)) => Operand::Number(source),
                    _ => Operand::Other(source),
                };
                Test::Binary { op, left }
            }
            _ => Test::Other,
        };

        Candidate::Conditional {
            test,
            consequent: lower_branch(&node.cons),
            alternate: lower_branch(&node.alt),
        }
    }
}

fn unwrap_parens(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_parens(&paren.expr),
        other => other,
    }
}

fn lower_branch(expr: &Expr) -> Branch {
    match unwrap_parens(expr) {
        Expr::Lit(Lit::Str(s)) => match s.value.as_str() {
            Some(value) => Branch::Str(value.to_string()),
            None => Branch::Other,
        },
        _ => Branch::Other,
    }
}

fn attr_name(name: &JSXAttrName) -> String {
    match name {
        JSXAttrName::Ident(ident) => ident.sym.to_string(),
        JSXAttrName::JSXNamespacedName(ns) => format!("{}:{}", ns.ns.sym, ns.name.sym),
    }
}

fn is_lookup_call(call: &CallExpr) -> bool {
    if let Callee::Expr(callee) = &call.callee
        && let Expr::Ident(id) = &**callee
    {
        return id.sym == LOOKUP_FN;
    }
    false
}

impl Visit for CandidateCollector<'_> {
    fn visit_jsx_text(&mut self, node: &JSXText) {
        let candidate = Candidate::Text {
            value: node.value.to_string(),
        };
        let Some(found) = self.rules.evaluate(&candidate) else {
            return;
        };

        let (start, end) = self.parsed.range(node.span);
        let raw = &self.parsed.code[start..end];
        let lead = raw.len() - raw.trim_start().len();
        let trail = raw.len() - raw.trim_end().len();
        self.push(start + lead, end - trail, Slot::JsxChild, found);
    }

    fn visit_jsx_attr(&mut self, node: &JSXAttr) {
        let name = attr_name(&node.name);
        if self.rules.is_excluded_attribute(&name) {
            return;
        }

        if let Some(JSXAttrValue::Str(s)) = &node.value
            && let Some(value) = s.value.as_str()
        {
            let candidate = Candidate::Attribute {
                name,
                value: value.to_string(),
            };
            if let Some(found) = self.rules.evaluate(&candidate) {
                let (start, end) = self.parsed.range(s.span);
                self.push(start, end, Slot::AttributeValue, found);
            }
            return;
        }

        node.visit_children_with(self);
    }

    fn visit_jsx_expr_container(&mut self, node: &JSXExprContainer) {
        if let JSXExpr::Expr(expr) = &node.expr
            && let Expr::Tpl(tpl) = unwrap_parens(expr)
            && let Some(parts) = self.lower_template(tpl)
            && let Some(found) = self.rules.evaluate(&Candidate::Template { parts })
        {
            let (start, end) = self.parsed.range(tpl.span);
            self.push(start, end, Slot::Expression, found);
            return;
        }

        node.visit_children_with(self);
    }

    fn visit_cond_expr(&mut self, node: &CondExpr) {
        let candidate = self.lower_conditional(node);
        if let Some(found) = self.rules.evaluate(&candidate) {
            let (start, end) = self.parsed.range(node.span);
            self.push(start, end, Slot::Expression, found);
            return;
        }

        node.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if is_lookup_call(node) {
            // Arguments of an existing lookup are keys, not UI text.
            if let Some(first) = node.args.first()
                && first.spread.is_none()
                && let Expr::Lit(Lit::Str(s)) = &*first.expr
                && let Some(key) = s.value.as_str()
            {
                self.references.push(KeyReference {
                    key: key.to_string(),
                    offset: self.parsed.offset(s.span.lo),
                });
            }
            return;
        }

        node.visit_children_with(self);
    }

    fn visit_fn_decl(&mut self, node: &FnDecl) {
        if let Some(body) = &node.function.body {
            self.offer_hook_site(body);
        }
        node.visit_children_with(self);
    }

    fn visit_export_default_decl(&mut self, node: &ExportDefaultDecl) {
        if let DefaultDecl::Fn(fn_expr) = &node.decl
            && let Some(body) = &fn_expr.function.body
        {
            self.offer_hook_site(body);
        }
        node.visit_children_with(self);
    }

    fn visit_class_method(&mut self, node: &ClassMethod) {
        if let PropName::Ident(ident) = &node.key
            && ident.sym == "render"
            && let Some(body) = &node.function.body
        {
            self.offer_hook_site(body);
        }
        node.visit_children_with(self);
    }

    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        if let Some(init) = &node.init {
            if let Expr::Arrow(arrow) = &**init
                && let BlockStmtOrExpr::BlockStmt(body) = &*arrow.body
            {
                self.offer_hook_site(body);
            }

            if let Pat::Ident(binding) = &node.name
                && binding.id.sym == LOOKUP_FN
                && let Expr::Call(call) = &**init
                && let Callee::Expr(callee) = &call.callee
                && let Expr::Ident(hook) = &**callee
                && hook.sym == LOOKUP_HOOK
            {
                self.has_hook_binding = true;
            }
        }
        node.visit_children_with(self);
    }
}
