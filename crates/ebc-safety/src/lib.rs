//! The pointer-dereference discipline: a flow-sensitive, single-pass walk
//! of the type-checked AST that rejects every dereference whose validity
//! isn't guaranteed by a preceding `valid` test with nothing in between
//! that could have invalidated the pointer.
//!
//! A variable is *guarded* once its safe start has been entered by an
//! `if valid v { ... }` and stays guarded only while that safe start
//! remains open. The open set of guarded names, `G`, is threaded through
//! the walk: reassigning a bare variable or freeing any pointer clears it
//! (its safe start has ended); a `while` body is walked against an empty
//! set, since a loop can re-enter without the guarding condition holding
//! again. Nested blocks (an `if`'s branches, a `while`'s body) get their
//! own clone of `G` on entry and their mutations never escape back to the
//! caller.
//!
//! Assigning through a `Field`/`Deref` target (`[@p].value = e;`) mutates
//! heap memory, not a pointer variable, so it leaves every guard intact;
//! only `Assign(Name(v), _)` invalidates guards, since that's the only
//! assignment shape that can change what a variable points to.

use ebc_par::ast::{Block, Expr, ExprKind, Program, Ref, RefKind, Stmt, StmtKind};
use ebc_util::{CompileError, CompileResult};
use rustc_hash::FxHashSet;

/// Check that every dereference in `program`'s body is guarded.
pub fn analyze(program: &Program) -> CompileResult<()> {
    walk_block(&program.body, FxHashSet::default())
}

fn walk_block(block: &Block, mut guarded: FxHashSet<String>) -> CompileResult<()> {
    for stmt in &block.stmts {
        walk_stmt(stmt, &mut guarded)?;
    }
    Ok(())
}

fn walk_stmt(stmt: &Stmt, guarded: &mut FxHashSet<String>) -> CompileResult<()> {
    match &stmt.node {
        StmtKind::Assign(target, value) => {
            check_ref(target, guarded)?;
            check_expr(value, guarded)?;
            if matches!(target.node, RefKind::Name(_)) {
                guarded.clear();
            }
            Ok(())
        }
        StmtKind::Free(r) => {
            check_ref(r, guarded)?;
            guarded.clear();
            Ok(())
        }
        StmtKind::Print(e) => check_expr(e, guarded),
        StmtKind::If(cond, then_block, else_block) => {
            check_expr(cond, guarded)?;
            match guard_target(cond) {
                Some(v) => {
                    let mut then_guarded = guarded.clone();
                    then_guarded.insert(v);
                    walk_block(then_block, then_guarded)?;
                }
                None => walk_block(then_block, guarded.clone())?,
            }
            if let Some(else_block) = else_block {
                walk_block(else_block, guarded.clone())?;
            }
            Ok(())
        }
        StmtKind::While(cond, body) => {
            check_expr(cond, guarded)?;
            walk_block(body, FxHashSet::default())
        }
    }
}

/// If `cond` is exactly `valid v` for a bare variable `v`, the name it
/// would guard in a `then`-branch.
fn guard_target(cond: &Expr) -> Option<String> {
    let ExprKind::Valid(inner) = &cond.node else {
        return None;
    };
    let ExprKind::RefExpr(r) = &inner.node else {
        return None;
    };
    match &r.node {
        RefKind::Name(v) => Some(v.clone()),
        _ => None,
    }
}

fn check_expr(expr: &Expr, guarded: &FxHashSet<String>) -> CompileResult<()> {
    match &expr.node {
        ExprKind::IntLit(_) | ExprKind::Malloc(_) => Ok(()),
        ExprKind::Valid(inner) => check_expr(inner, guarded),
        ExprKind::BinOp(_, lhs, rhs) => {
            check_expr(lhs, guarded)?;
            check_expr(rhs, guarded)
        }
        ExprKind::RefExpr(r) => check_ref(r, guarded),
    }
}

fn check_ref(r: &Ref, guarded: &FxHashSet<String>) -> CompileResult<()> {
    match &r.node {
        RefKind::Name(_) => Ok(()),
        RefKind::Field(inner, _) => check_ref(inner, guarded),
        RefKind::Deref(inner) => match &inner.node {
            RefKind::Name(v) => {
                if guarded.contains(v) {
                    Ok(())
                } else {
                    Err(CompileError::Safety {
                        span: r.span,
                        message: format!("dereference of possibly-invalid pointer {v}"),
                    })
                }
            }
            _ => Err(CompileError::Safety {
                span: r.span,
                message: "complex pointer dereference not supported".to_string(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ebc_lex::Lexer;
    use ebc_util::FileId;

    fn analyze_src(src: &str) -> CompileResult<()> {
        let tokens = Lexer::new(src, FileId::DUMMY).tokenize().unwrap();
        let program = ebc_par::parse(tokens).unwrap();
        analyze(&program)
    }

    #[test]
    fn guarded_dereference_then_free_is_accepted() {
        let src = r#"
            type node struct { int value; ptr to node next; };
            var ptr to node jim;
            { jim = malloc node;
              if valid jim { [@jim].value = (1 + 4); print [@jim].value; }
              free jim; }
        "#;
        analyze_src(src).unwrap();
    }

    #[test]
    fn unguarded_dereference_is_rejected() {
        let src = r#"
            type node struct { int v; };
            var ptr to node p;
            { p = malloc node; [@p].v = 1; }
        "#;
        let err = analyze_src(src).unwrap_err();
        assert!(matches!(err, CompileError::Safety { .. }));
        assert!(err.to_string().contains("possibly-invalid pointer p"));
    }

    #[test]
    fn assignment_inside_guard_ends_the_safe_start() {
        let src = r#"
            type node struct { int v; };
            var ptr to node p;
            var int x;
            { p = malloc node;
              if valid p { x = 1; [@p].v = 2; } }
        "#;
        assert!(matches!(analyze_src(src), Err(CompileError::Safety { .. })));
    }

    #[test]
    fn field_assignment_through_the_guarded_pointer_does_not_end_the_safe_start() {
        let src = r#"
            type node struct { int value; };
            var ptr to node jim;
            { jim = malloc node;
              if valid jim { [@jim].value = 1; [@jim].value = [@jim].value; } }
        "#;
        analyze_src(src).unwrap();
    }

    #[test]
    fn free_of_any_pointer_ends_the_safe_start() {
        let src = r#"
            type node struct { int v; };
            var ptr to node p; var ptr to node q;
            { p = malloc node; q = malloc node;
              if valid p { free q; [@p].v = 1; } }
        "#;
        assert!(matches!(analyze_src(src), Err(CompileError::Safety { .. })));
    }

    #[test]
    fn while_body_does_not_inherit_an_outer_guard() {
        let src = r#"
            type node struct { int v; };
            var ptr to node p;
            { p = malloc node;
              if valid p { while (1 > 0) { [@p].v = 1; } } }
        "#;
        assert!(matches!(analyze_src(src), Err(CompileError::Safety { .. })));
    }

    #[test]
    fn guard_does_not_leak_past_the_if_statement() {
        let src = r#"
            type node struct { int v; };
            var ptr to node p;
            { p = malloc node;
              if valid p { print 0; }
              print [@p].v; }
        "#;
        assert!(matches!(analyze_src(src), Err(CompileError::Safety { .. })));
    }

    #[test]
    fn else_branch_is_not_guarded() {
        let src = r#"
            type node struct { int v; };
            var ptr to node p;
            { p = malloc node;
              if valid p { print 0; } else { print [@p].v; } }
        "#;
        assert!(matches!(analyze_src(src), Err(CompileError::Safety { .. })));
    }

    #[test]
    fn guard_on_non_bare_condition_establishes_nothing() {
        let src = r#"
            type node struct { int v; };
            var ptr to node p;
            { p = malloc node;
              if (1 > 0) { print [@p].v; } }
        "#;
        assert!(matches!(analyze_src(src), Err(CompileError::Safety { .. })));
    }

    #[test]
    fn dereference_of_a_field_access_result_is_rejected_categorically() {
        let src = r#"
            type node struct { ptr to node next; int v; };
            var ptr to node p;
            { p = malloc node;
              if valid p { print [@[@p].next].v; } }
        "#;
        let err = analyze_src(src).unwrap_err();
        assert!(err.to_string().contains("complex pointer dereference"));
    }
}
