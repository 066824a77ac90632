//! Named-type resolution.
//!
//! `Type`'s derived `PartialEq` already implements the type-equality rule
//! assignment checking needs — nominal on `Named` (compares the name
//! string) and structural on everything else, recursing into `Ptr`'s
//! referent — so no separate `types_equal` routine is needed; this module
//! only resolves names.

use ebc_par::ast::{Type, TypeEnv};
use ebc_util::{CompileError, CompileResult, Span};

/// Check every `Named(n)` reachable from a struct field or a variable's
/// declared type against `types`, enforcing that a type may only name a
/// type declared at or before itself (self-reference through a pointer, as
/// in a linked list's `next` field, is allowed; forward references to a
/// type declared later are not).
pub fn resolve_types(types: &TypeEnv) -> CompileResult<()> {
    for (index, (owner, def)) in types.iter().enumerate() {
        for field in &def.fields {
            check_named_ref(types, &field.ty, index, owner, &field.name, field.span)?;
        }
    }
    Ok(())
}

/// Check a `var`'s declared type names an existing struct; unlike struct
/// fields, global variables carry no declaration-order constraint.
pub fn resolve_var_type(types: &TypeEnv, ty: &Type, var_name: &str, span: Span) -> CompileResult<()> {
    check_named(types, ty, span, |n| {
        format!("undefined type '{n}' in declaration of variable '{var_name}'")
    })
}

fn check_named_ref(
    types: &TypeEnv,
    ty: &Type,
    decl_index: usize,
    owner: &str,
    field: &str,
    span: Span,
) -> CompileResult<()> {
    match ty {
        Type::Named(n) => match types.get_index_of(n.as_str()) {
            Some(idx) if idx <= decl_index => Ok(()),
            Some(_) => Err(CompileError::Name {
                span,
                message: format!(
                    "field '{field}' of '{owner}' references '{n}', which is declared later"
                ),
            }),
            None => Err(CompileError::Name {
                span,
                message: format!("field '{field}' of '{owner}' references undefined type '{n}'"),
            }),
        },
        Type::Ptr(inner) => check_named_ref(types, inner, decl_index, owner, field, span),
        Type::Int | Type::Struct(_) => Ok(()),
    }
}

fn check_named(
    types: &TypeEnv,
    ty: &Type,
    span: Span,
    message: impl Fn(&str) -> String,
) -> CompileResult<()> {
    match ty {
        Type::Named(n) => {
            if types.contains_key(n) {
                Ok(())
            } else {
                Err(CompileError::Name {
                    span,
                    message: message(n),
                })
            }
        }
        Type::Ptr(inner) => check_named(types, inner, span, message),
        Type::Int | Type::Struct(_) => Ok(()),
    }
}

/// The struct body a `Ptr`/`Named` type ultimately refers to.
pub fn struct_of<'a>(types: &'a TypeEnv, ty: &Type) -> Option<&'a ebc_par::ast::StructDef> {
    match ty {
        Type::Named(n) => types.get(n),
        _ => None,
    }
}
