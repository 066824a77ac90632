//! AST → target-C text. Emission is a pure function of the AST: the same
//! program always produces byte-identical output.

mod expr;
mod stmt;
mod types;

use ebc_par::ast::{Block, Expr, ExprKind, Program, StmtKind, StructDef, Type};
use ebc_runtime::{NamedType, PtrField, RootVar};

/// Emit a complete freestanding C translation unit for `program`.
///
/// Emission order matters: a `ptr to node` field is a by-value
/// `struct ptr_to_node` member (`types::field_type_name`), so every
/// `struct ptr_to_<n>` must be a complete type before any `struct <n>` that
/// embeds one is defined. A forward declaration of every named struct comes
/// first so the tagged-pointer structs (which hold a *pointer* to their
/// target, never by value) can name a type that isn't complete yet either.
pub fn emit(program: &Program) -> String {
    let ptr_targets = pointer_targets(program);
    let runtime_types = runtime_named_types(program, &ptr_targets);
    let roots = runtime_roots(program);

    let mut out = String::new();
    out.push_str("#include <stdio.h>\n#include <stdlib.h>\n\n");

    for name in program.types.keys() {
        out.push_str(&format!("struct {name};\n"));
    }
    out.push('\n');

    for target in &ptr_targets {
        out.push_str(&types::emit_ptr_struct(target));
        out.push('\n');
    }

    for (name, def) in &program.types {
        out.push_str(&types::emit_struct(name, def));
        out.push('\n');
    }

    out.push_str(&ebc_runtime::render(&runtime_types, &roots));
    out.push('\n');

    for (name, ty) in &program.vars {
        out.push_str(&types::emit_global_decl(name, ty));
    }
    out.push('\n');

    out.push_str("int main(void) {\n");
    stmt::emit_block(&program.body, 1, &mut out);
    out.push_str("    return 0;\n}\n");

    out
}

/// Build the runtime's per-type allocator and alias-visitor list, restricted
/// to `targets` (every named type that is ever pointed to or `malloc`'d) so
/// it never references a `struct ptr_to_<n>` emission skipped for a type
/// nothing ever points to.
fn runtime_named_types(program: &Program, targets: &[String]) -> Vec<NamedType> {
    targets
        .iter()
        .filter_map(|name| program.types.get(name).map(|def| NamedType {
            name: name.clone(),
            ptr_fields: ptr_fields_of(def),
        }))
        .collect()
}

fn ptr_fields_of(def: &StructDef) -> Vec<PtrField> {
    def.fields
        .iter()
        .filter_map(|f| match &f.ty {
            Type::Ptr(inner) => match inner.as_ref() {
                Type::Named(target) => Some(PtrField {
                    name: f.name.clone(),
                    points_to: target.clone(),
                }),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

fn runtime_roots(program: &Program) -> Vec<RootVar> {
    program
        .vars
        .iter()
        .filter_map(|(name, ty)| match ty {
            Type::Ptr(inner) => match inner.as_ref() {
                Type::Named(target) => Some(RootVar {
                    name: name.clone(),
                    points_to: target.clone(),
                }),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

/// Every named type that is ever pointed to or `malloc`'d, in first-seen
/// order, so each gets exactly one `struct ptr_to_<name>` definition and one
/// allocator — and a type nothing ever points to or allocates gets neither.
fn pointer_targets(program: &Program) -> Vec<String> {
    let mut seen = Vec::new();
    for def in program.types.values() {
        for field in &def.fields {
            if let Type::Ptr(inner) = &field.ty {
                if let Type::Named(n) = inner.as_ref() {
                    note(&mut seen, n);
                }
            }
        }
    }
    for ty in program.vars.values() {
        if let Type::Ptr(inner) = ty {
            if let Type::Named(n) = inner.as_ref() {
                note(&mut seen, n);
            }
        }
    }
    collect_malloc_targets(&program.body, &mut seen);
    seen
}

fn note(seen: &mut Vec<String>, name: &str) {
    if !seen.iter().any(|s| s == name) {
        seen.push(name.to_string());
    }
}

/// Walk every statement and expression reachable from `block` looking for
/// `malloc <n>`, so a type that's only ever allocated directly (e.g. as the
/// operand of `valid`, never stored in a declared pointer field or var)
/// still gets a `struct ptr_to_<n>` and allocator.
fn collect_malloc_targets(block: &Block, seen: &mut Vec<String>) {
    for stmt in &block.stmts {
        match &stmt.node {
            StmtKind::While(cond, body) => {
                collect_malloc_targets_expr(cond, seen);
                collect_malloc_targets(body, seen);
            }
            StmtKind::If(cond, then_block, else_block) => {
                collect_malloc_targets_expr(cond, seen);
                collect_malloc_targets(then_block, seen);
                if let Some(else_block) = else_block {
                    collect_malloc_targets(else_block, seen);
                }
            }
            StmtKind::Free(_) => {}
            StmtKind::Print(e) => collect_malloc_targets_expr(e, seen),
            StmtKind::Assign(_, e) => collect_malloc_targets_expr(e, seen),
        }
    }
}

fn collect_malloc_targets_expr(expr: &Expr, seen: &mut Vec<String>) {
    match &expr.node {
        ExprKind::Malloc(name) => note(seen, name),
        ExprKind::Valid(inner) => collect_malloc_targets_expr(inner, seen),
        ExprKind::BinOp(_, lhs, rhs) => {
            collect_malloc_targets_expr(lhs, seen);
            collect_malloc_targets_expr(rhs, seen);
        }
        ExprKind::IntLit(_) | ExprKind::RefExpr(_) => {}
    }
}
