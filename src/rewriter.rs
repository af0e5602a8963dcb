use std::path::PathBuf;

use swc_core::{
    common::Span,
    ecma::{
        ast::*,
        visit::{VisitMut, VisitMutWith},
    },
};

use crate::{
    builder::{build, const_decl},
    config::MatchPattern,
    error::Error,
    loader::load,
    shape::{classify_import, classify_require, require_source},
};

/// Replaces JSON imports and requires with the data they load.
///
/// The first failure stops all further rewriting; the failing declaration
/// keeps its original form. Retrieve it with [`InlineJsonImports::finish`].
pub struct InlineJsonImports {
    matcher: MatchPattern,
    filename: Option<PathBuf>,
    failure: Option<(Span, Error)>,
}

impl InlineJsonImports {
    pub fn new(matcher: MatchPattern, filename: Option<PathBuf>) -> Self {
        Self {
            matcher,
            filename,
            failure: None,
        }
    }

    /// The error that stopped the rewrite, with the span of its declaration.
    pub fn finish(self) -> Result<(), (Span, Error)> {
        match self.failure {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    fn fail(&mut self, span: Span, err: Error) {
        tracing::debug!(error = %err, "JSON inlining aborted");
        self.failure.get_or_insert((span, err));
    }

    // ---------- imports ----------

    /// `None` leaves the import as is; `Some` replaces it (possibly with nothing).
    fn rewrite_import(&self, decl: &ImportDecl) -> Result<Option<Vec<VarDecl>>, Error> {
        let module = decl.src.value.to_string();
        if !self.matcher.is_match(&module) {
            return Ok(None);
        }

        let shape = classify_import(decl);
        if !shape.is_match() {
            tracing::trace!(module = %module, "import shape not supported, skipping");
            return Ok(None);
        }

        let value = load(&module, self.filename.as_deref())?;
        let decls = build(&shape, &value, &module)?;
        tracing::debug!(
            module = %module,
            shape = shape.kind(),
            bindings = decls.len(),
            "inlined JSON import"
        );
        Ok(Some(decls.into_iter().map(const_decl).collect()))
    }

    // ---------- require() ----------

    /// `None` when no declarator qualifies, so the node stays untouched.
    fn rewrite_var_decl(&self, var: &VarDecl) -> Result<Option<Vec<VarDeclarator>>, Error> {
        let mut changed = false;
        let mut decls = Vec::with_capacity(var.decls.len());

        for declarator in &var.decls {
            let shape = classify_require(declarator, &self.matcher);
            let module = match require_source(declarator.init.as_deref()) {
                Some(module) if shape.is_match() => module,
                _ => {
                    decls.push(declarator.clone());
                    continue;
                }
            };

            let value = load(&module, self.filename.as_deref())?;
            let built = build(&shape, &value, &module)?;
            tracing::debug!(
                module = %module,
                shape = shape.kind(),
                bindings = built.len(),
                "inlined JSON require"
            );
            decls.extend(built);
            changed = true;
        }

        Ok(changed.then_some(decls))
    }
}

impl VisitMut for InlineJsonImports {
    fn visit_mut_module_items(&mut self, items: &mut Vec<ModuleItem>) {
        items.visit_mut_children_with(self);
        if self.failure.is_some() {
            return;
        }

        let mut out = Vec::with_capacity(items.len());
        for item in std::mem::take(items) {
            match item {
                ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) if self.failure.is_none() => {
                    match self.rewrite_import(&decl) {
                        Ok(Some(replacement)) => out.extend(
                            replacement
                                .into_iter()
                                .map(|var| ModuleItem::Stmt(Stmt::Decl(Decl::Var(Box::new(var))))),
                        ),
                        Ok(None) => out.push(ModuleItem::ModuleDecl(ModuleDecl::Import(decl))),
                        Err(err) => {
                            self.fail(decl.span, err);
                            out.push(ModuleItem::ModuleDecl(ModuleDecl::Import(decl)));
                        }
                    }
                }
                other => out.push(other),
            }
        }
        *items = out;
    }

    fn visit_mut_var_decl(&mut self, n: &mut VarDecl) {
        n.visit_mut_children_with(self);
        if self.failure.is_some() {
            return;
        }

        match self.rewrite_var_decl(n) {
            Ok(Some(decls)) => {
                *n = VarDecl {
                    span: n.span,
                    ctxt: n.ctxt,
                    kind: n.kind,
                    declare: n.declare,
                    decls,
                };
            }
            Ok(None) => {}
            Err(err) => self.fail(n.span, err),
        }
    }
}
