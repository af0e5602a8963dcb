//! Replacement declarators for each [`BindingShape`].
//!
//! Nothing here touches the original tree: every function returns fresh
//! nodes, cloning identifiers out of the classified shape.

use serde_json::{Map, Value};
use swc_core::{
    common::{SyntaxContext, DUMMY_SP},
    ecma::ast::*,
};

use crate::{
    error::{DestructureError, Error},
    shape::{ArraySlot, BindingShape, NamedBinding, SourceKey},
};

// -----------------------------------------------------------------------------
// Node helpers
// -----------------------------------------------------------------------------

fn declarator(name: BindingIdent, init: Box<Expr>) -> VarDeclarator {
    VarDeclarator {
        span: DUMMY_SP,
        name: Pat::Ident(name),
        init: Some(init),
        definite: false,
    }
}

/// `const <decl>;`
pub fn const_decl(decl: VarDeclarator) -> VarDecl {
    VarDecl {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        kind: VarDeclKind::Const,
        declare: false,
        decls: vec![decl],
    }
}

fn str_lit(value: &str) -> Str {
    Str {
        span: DUMMY_SP,
        value: value.into(),
        raw: None,
    }
}

fn num_lit(value: f64) -> Box<Expr> {
    Box::new(Expr::Lit(Lit::Num(Number {
        span: DUMMY_SP,
        value,
        raw: None,
    })))
}

/// `1 / 0`
fn infinity() -> Box<Expr> {
    Box::new(Expr::Bin(BinExpr {
        span: DUMMY_SP,
        op: BinaryOp::Div,
        left: num_lit(1.0),
        right: num_lit(0.0),
    }))
}

/// Numbers keep their source text until here, so values past the f64 range
/// become infinities instead of failing the load.
fn number(n: &serde_json::Number) -> Box<Expr> {
    let value = n.to_string().parse::<f64>().unwrap_or(f64::NAN);
    let magnitude = if value.is_infinite() {
        infinity()
    } else {
        num_lit(value.abs())
    };
    if !value.is_sign_negative() {
        return magnitude;
    }
    let arg = if value.is_infinite() {
        Box::new(Expr::Paren(ParenExpr {
            span: DUMMY_SP,
            expr: magnitude,
        }))
    } else {
        magnitude
    };
    Box::new(Expr::Unary(UnaryExpr {
        span: DUMMY_SP,
        op: UnaryOp::Minus,
        arg,
    }))
}

/// `void 0`
fn undefined() -> Box<Expr> {
    Box::new(Expr::Unary(UnaryExpr {
        span: DUMMY_SP,
        op: UnaryOp::Void,
        arg: num_lit(0.0),
    }))
}

/// `<obj>.<key>` or `<obj>["<key>"]`
fn member(obj: &Ident, key: &SourceKey) -> Box<Expr> {
    let prop = match key {
        SourceKey::Ident(name) => MemberProp::Ident(IdentName::new(name.as_str().into(), DUMMY_SP)),
        SourceKey::Str(name) => MemberProp::Computed(ComputedPropName {
            span: DUMMY_SP,
            expr: Box::new(Expr::Lit(Lit::Str(str_lit(name)))),
        }),
    };
    Box::new(Expr::Member(MemberExpr {
        span: DUMMY_SP,
        obj: Box::new(Expr::Ident(obj.clone())),
        prop,
    }))
}

fn is_identifier_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if Ident::is_valid_start(c) => chars.all(Ident::is_valid_continue),
        _ => false,
    }
}

fn prop_name(key: &str) -> PropName {
    if key == "__proto__" {
        // A literal `__proto__:` would set the prototype instead of an own key.
        return PropName::Computed(ComputedPropName {
            span: DUMMY_SP,
            expr: Box::new(Expr::Lit(Lit::Str(str_lit(key)))),
        });
    }
    if is_identifier_name(key) {
        PropName::Ident(IdentName::new(key.into(), DUMMY_SP))
    } else {
        PropName::Str(str_lit(key))
    }
}

// -----------------------------------------------------------------------------
// Value embedding
// -----------------------------------------------------------------------------

/// Literal expression equal to `value`.
pub fn embed(value: &Value) -> Box<Expr> {
    match value {
        Value::Null => Box::new(Expr::Lit(Lit::Null(Null { span: DUMMY_SP }))),
        Value::Bool(b) => Box::new(Expr::Lit(Lit::Bool(Bool {
            span: DUMMY_SP,
            value: *b,
        }))),
        Value::Number(n) => number(n),
        Value::String(s) => Box::new(Expr::Lit(Lit::Str(str_lit(s)))),
        Value::Array(items) => Box::new(Expr::Array(ArrayLit {
            span: DUMMY_SP,
            elems: items
                .iter()
                .map(|item| {
                    Some(ExprOrSpread {
                        spread: None,
                        expr: embed(item),
                    })
                })
                .collect(),
        })),
        Value::Object(map) => Box::new(Expr::Object(ObjectLit {
            span: DUMMY_SP,
            props: map
                .iter()
                .map(|(key, value)| {
                    PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
                        key: prop_name(key),
                        value: embed(value),
                    })))
                })
                .collect(),
        })),
    }
}

fn embed_or_undefined(value: Option<&Value>) -> Box<Expr> {
    value.map(embed).unwrap_or_else(undefined)
}

// -----------------------------------------------------------------------------
// Shapes
// -----------------------------------------------------------------------------

fn as_object<'v>(value: &'v Value, module: &str) -> Result<&'v Map<String, Value>, Error> {
    value.as_object().ok_or_else(|| {
        DestructureError::NonObject {
            module: module.to_string(),
        }
        .into()
    })
}

fn named_declarators(named: &[NamedBinding<'_>], map: &Map<String, Value>) -> Vec<VarDeclarator> {
    named
        .iter()
        .map(|n| {
            declarator(
                n.local.clone().into(),
                embed_or_undefined(map.get(n.key.as_str())),
            )
        })
        .collect()
}

/// Value at `index` of an array or string, by UTF-16 unit for strings.
fn positional(value: &Value, index: usize) -> Option<Value> {
    match value {
        Value::Array(items) => items.get(index).cloned(),
        Value::String(s) => {
            let unit = s.encode_utf16().nth(index)?;
            Some(Value::String(String::from_utf16_lossy(&[unit])))
        }
        _ => None,
    }
}

/// Everything from `index` on, like `slice(index)`.
fn rest_from(value: &Value, index: usize) -> Value {
    match value {
        Value::String(s) => {
            let units: Vec<u16> = s.encode_utf16().skip(index).collect();
            Value::String(String::from_utf16_lossy(&units))
        }
        Value::Array(items) => Value::Array(items.iter().skip(index).cloned().collect()),
        _ => Value::Array(vec![]),
    }
}

/// Declarators implementing `shape` for the loaded `value`.
///
/// `module` is the path as written in the source; it only feeds error
/// messages.
pub fn build(shape: &BindingShape<'_>, value: &Value, module: &str) -> Result<Vec<VarDeclarator>, Error> {
    let decls = match shape {
        BindingShape::DefaultOnly { local } | BindingShape::NamespaceOnly { local } => {
            vec![declarator((*local).clone().into(), embed(value))]
        }

        BindingShape::FullyDestructured { named } => {
            let map = as_object(value, module)?;
            named_declarators(named, map)
        }

        BindingShape::MixedNamespace { default, namespace } => vec![
            declarator((*default).clone().into(), embed(value)),
            declarator(
                (*namespace).clone().into(),
                Box::new(Expr::Ident((*default).clone())),
            ),
        ],

        BindingShape::MixedNamed { default, named } => {
            as_object(value, module)?;
            let mut decls = vec![declarator((*default).clone().into(), embed(value))];
            decls.extend(
                named
                    .iter()
                    .map(|n| declarator(n.local.clone().into(), member(default, &n.key))),
            );
            decls
        }

        BindingShape::SimpleRequire { binding } => {
            vec![declarator((*binding).clone(), embed(value))]
        }

        BindingShape::DestructuredRequire { props } => {
            let map = as_object(value, module)?;
            props
                .iter()
                .map(|(key, binding)| {
                    declarator((*binding).clone(), embed_or_undefined(map.get(key)))
                })
                .collect()
        }

        BindingShape::DestructuredArrayRequire { slots } => {
            if !matches!(value, Value::Array(_) | Value::String(_)) {
                return Err(DestructureError::NonArrayOrString {
                    module: module.to_string(),
                }
                .into());
            }
            let mut decls = Vec::with_capacity(slots.len());
            for (index, slot) in slots.iter().enumerate() {
                match slot {
                    ArraySlot::Hole => {}
                    ArraySlot::Binding(binding) => decls.push(declarator(
                        (*binding).clone(),
                        embed_or_undefined(positional(value, index).as_ref()),
                    )),
                    ArraySlot::Rest(pat) => {
                        let Pat::Rest(RestPat { arg, .. }) = *pat else {
                            return Err(Error::UnsupportedShape {
                                module: module.to_string(),
                            });
                        };
                        let Pat::Ident(binding) = &**arg else {
                            return Err(Error::UnsupportedShape {
                                module: module.to_string(),
                            });
                        };
                        decls.push(declarator(binding.clone(), embed(&rest_from(value, index))));
                    }
                }
            }
            decls
        }

        BindingShape::NoMatch => vec![],
    };
    Ok(decls)
}
