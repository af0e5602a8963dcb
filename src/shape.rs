//! Classification of import and require declarations.
//!
//! Every declaration maps to exactly one [`BindingShape`]. The builder matches
//! on the shape exhaustively and never inspects the original node again.

use swc_core::ecma::ast::*;

use crate::config::MatchPattern;

/// Property name a binding reads from the loaded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKey {
    /// `import {name} from` / `const {name} = require(..)`
    Ident(String),
    /// `import {"some key" as alias} from`
    Str(String),
}

impl SourceKey {
    pub fn as_str(&self) -> &str {
        match self {
            SourceKey::Ident(s) | SourceKey::Str(s) => s,
        }
    }
}

/// A `(sourceKey, localAlias)` pair.
#[derive(Debug, Clone)]
pub struct NamedBinding<'a> {
    pub key: SourceKey,
    pub local: &'a Ident,
}

#[derive(Debug, Clone)]
pub enum ArraySlot<'a> {
    Hole,
    Binding(&'a BindingIdent),
    /// Trailing `...rest`; the argument is checked by the builder.
    Rest(&'a Pat),
}

#[derive(Debug, Clone)]
pub enum BindingShape<'a> {
    /// `import data from './data.json'`
    DefaultOnly { local: &'a Ident },
    /// `import * as data from './data.json'`
    NamespaceOnly { local: &'a Ident },
    /// `import {a, b as c, "d e" as f} from './data.json'`
    FullyDestructured { named: Vec<NamedBinding<'a>> },
    /// `import data, * as ns from './data.json'`
    MixedNamespace {
        default: &'a Ident,
        namespace: &'a Ident,
    },
    /// `import data, {a, b as c} from './data.json'`
    MixedNamed {
        default: &'a Ident,
        named: Vec<NamedBinding<'a>>,
    },
    /// `const data = require('./data.json')`
    SimpleRequire { binding: &'a BindingIdent },
    /// `const {a, b: c} = require('./data.json')`
    DestructuredRequire {
        props: Vec<(String, &'a BindingIdent)>,
    },
    /// `const [a, , b, ...rest] = require('./data.json')`
    DestructuredArrayRequire { slots: Vec<ArraySlot<'a>> },
    NoMatch,
}

impl BindingShape<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            BindingShape::DefaultOnly { .. } => "default-only",
            BindingShape::NamespaceOnly { .. } => "namespace-only",
            BindingShape::FullyDestructured { .. } => "fully-destructured",
            BindingShape::MixedNamespace { .. } => "mixed-namespace",
            BindingShape::MixedNamed { .. } => "mixed-named",
            BindingShape::SimpleRequire { .. } => "simple-require",
            BindingShape::DestructuredRequire { .. } => "destructured-require",
            BindingShape::DestructuredArrayRequire { .. } => "destructured-array-require",
            BindingShape::NoMatch => "no-match",
        }
    }

    pub fn is_match(&self) -> bool {
        !matches!(self, BindingShape::NoMatch)
    }
}

// -----------------------------------------------------------------------------
// Imports
// -----------------------------------------------------------------------------

pub fn classify_import(decl: &ImportDecl) -> BindingShape<'_> {
    if decl.type_only || !matches!(decl.phase, ImportPhase::Evaluation) {
        return BindingShape::NoMatch;
    }

    let specifiers = decl.specifiers.as_slice();
    match specifiers {
        [ImportSpecifier::Default(def)] => {
            return BindingShape::DefaultOnly { local: &def.local };
        }
        [ImportSpecifier::Namespace(ns)] => {
            return BindingShape::NamespaceOnly { local: &ns.local };
        }
        [ImportSpecifier::Default(def), ImportSpecifier::Namespace(ns)] => {
            return BindingShape::MixedNamespace {
                default: &def.local,
                namespace: &ns.local,
            };
        }
        _ => {}
    }

    if let Some(named) = named_bindings(specifiers) {
        return BindingShape::FullyDestructured { named };
    }

    if let [ImportSpecifier::Default(def), rest @ ..] = specifiers {
        if let Some(named) = named_bindings(rest) {
            if !named.is_empty() {
                return BindingShape::MixedNamed {
                    default: &def.local,
                    named,
                };
            }
        }
    }

    BindingShape::NoMatch
}

/// All specifiers as named pairs, or `None` if any is not a plain named one.
fn named_bindings(specifiers: &[ImportSpecifier]) -> Option<Vec<NamedBinding<'_>>> {
    specifiers
        .iter()
        .map(|spec| match spec {
            ImportSpecifier::Named(named) if !named.is_type_only => {
                let key = match &named.imported {
                    Some(ModuleExportName::Ident(i)) => SourceKey::Ident(i.sym.to_string()),
                    Some(ModuleExportName::Str(s)) => SourceKey::Str(s.value.to_string()),
                    None => SourceKey::Ident(named.local.sym.to_string()),
                };
                Some(NamedBinding {
                    key,
                    local: &named.local,
                })
            }
            _ => None,
        })
        .collect()
}

// -----------------------------------------------------------------------------
// require() declarators
// -----------------------------------------------------------------------------

/// Module path of a `require("<literal>")` initializer.
pub fn require_source(init: Option<&Expr>) -> Option<String> {
    let Some(Expr::Call(call)) = init else {
        return None;
    };
    let Callee::Expr(callee) = &call.callee else {
        return None;
    };
    match &**callee {
        Expr::Ident(id) if id.sym.as_ref() == "require" => {}
        _ => return None,
    }
    match call.args.as_slice() {
        [ExprOrSpread { spread: None, expr }] => match &**expr {
            Expr::Lit(Lit::Str(s)) => Some(s.value.to_string()),
            _ => None,
        },
        _ => None,
    }
}

/// Classifies a declarator; `NoMatch` unless it is a `require` of a path the
/// matcher accepts.
pub fn classify_require<'a>(decl: &'a VarDeclarator, matcher: &MatchPattern) -> BindingShape<'a> {
    match require_source(decl.init.as_deref()) {
        Some(module) if matcher.is_match(&module) => classify_require_target(&decl.name),
        _ => BindingShape::NoMatch,
    }
}

fn classify_require_target(name: &Pat) -> BindingShape<'_> {
    match name {
        Pat::Ident(binding) => BindingShape::SimpleRequire { binding },
        Pat::Object(obj) => simple_object_props(obj)
            .map(|props| BindingShape::DestructuredRequire { props })
            .unwrap_or(BindingShape::NoMatch),
        Pat::Array(arr) => array_slots(arr)
            .map(|slots| BindingShape::DestructuredArrayRequire { slots })
            .unwrap_or(BindingShape::NoMatch),
        _ => BindingShape::NoMatch,
    }
}

fn simple_object_props(obj: &ObjectPat) -> Option<Vec<(String, &BindingIdent)>> {
    if obj.props.is_empty() {
        return None;
    }
    obj.props
        .iter()
        .map(|prop| match prop {
            // `{a}`
            ObjectPatProp::Assign(AssignPatProp {
                key, value: None, ..
            }) => Some((key.id.sym.to_string(), key)),
            // `{a: b}`
            ObjectPatProp::KeyValue(KeyValuePatProp {
                key: PropName::Ident(key),
                value,
            }) => match &**value {
                Pat::Ident(binding) => Some((key.sym.to_string(), binding)),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

fn array_slots(arr: &ArrayPat) -> Option<Vec<ArraySlot<'_>>> {
    let (last, init) = arr.elems.split_last()?;
    let last = match last {
        Some(Pat::Ident(binding)) => ArraySlot::Binding(binding),
        Some(rest @ Pat::Rest(_)) => ArraySlot::Rest(rest),
        _ => return None,
    };

    let mut slots = init
        .iter()
        .map(|el| match el {
            None => Some(ArraySlot::Hole),
            Some(Pat::Ident(binding)) => Some(ArraySlot::Binding(binding)),
            Some(_) => None,
        })
        .collect::<Option<Vec<_>>>()?;
    slots.push(last);
    Some(slots)
}
