//! Bottom-up type checking of every statement and expression. Resolution
//! of named types happens first (see [`crate::types`]); this module
//! assumes every `Named(n)` it encounters already resolves.

use ebc_par::ast::{
    BinOp, Block, Expr, ExprKind, Program, Ref, RefKind, Stmt, StmtKind, Type, TypeEnv, VarEnv,
};
use ebc_util::{CompileError, CompileResult, Span};

use crate::types::{resolve_types, resolve_var_type, struct_of};

pub struct Checker<'a> {
    types: &'a TypeEnv,
    vars: &'a VarEnv,
}

/// Type-check a whole program: resolve every declared type and variable,
/// then check the body block.
pub fn check_program(program: &Program) -> CompileResult<()> {
    resolve_types(&program.types)?;
    for (name, ty) in &program.vars {
        resolve_var_type(&program.types, ty, name, Span::DUMMY)?;
    }
    let checker = Checker {
        types: &program.types,
        vars: &program.vars,
    };
    checker.check_block(&program.body)
}

impl<'a> Checker<'a> {
    fn check_block(&self, block: &Block) -> CompileResult<()> {
        for stmt in &block.stmts {
            self.check_stmt(stmt)?;
        }
        Ok(())
    }

    fn check_stmt(&self, stmt: &Stmt) -> CompileResult<()> {
        match &stmt.node {
            StmtKind::While(cond, body) => {
                self.require_int(cond, "while condition")?;
                self.check_block(body)
            }
            StmtKind::If(cond, then_block, else_block) => {
                self.require_int(cond, "if condition")?;
                self.check_block(then_block)?;
                if let Some(else_block) = else_block {
                    self.check_block(else_block)?;
                }
                Ok(())
            }
            StmtKind::Free(r) => {
                let ty = self.type_of_ref(r)?;
                self.require_ptr(&ty, r.span, "operand of 'free'")
            }
            StmtKind::Print(e) => self.require_int(e, "operand of 'print'"),
            StmtKind::Assign(target, value) => {
                let target_ty = self.type_of_ref(target)?;
                let value_ty = self.type_of_expr(value)?;
                if target_ty != value_ty {
                    return Err(CompileError::Type {
                        span: stmt.span,
                        message: format!(
                            "cannot assign {} to {}: expected {:?}, found {:?}",
                            describe(&value_ty),
                            describe(&target_ty),
                            target_ty,
                            value_ty
                        ),
                    });
                }
                Ok(())
            }
        }
    }

    fn type_of_expr(&self, expr: &Expr) -> CompileResult<Type> {
        match &expr.node {
            ExprKind::IntLit(_) => Ok(Type::Int),
            ExprKind::Malloc(type_name) => {
                if self.types.contains_key(type_name) {
                    Ok(Type::Ptr(Box::new(Type::Named(type_name.clone()))))
                } else {
                    Err(CompileError::Name {
                        span: expr.span,
                        message: format!("malloc of undefined type '{type_name}'"),
                    })
                }
            }
            ExprKind::Valid(inner) => {
                let ty = self.type_of_expr(inner)?;
                self.require_ptr(&ty, inner.span, "operand of 'valid'")?;
                Ok(Type::Int)
            }
            ExprKind::BinOp(op, lhs, rhs) => {
                let lhs_ty = self.type_of_expr(lhs)?;
                let rhs_ty = self.type_of_expr(rhs)?;
                if lhs_ty != Type::Int || rhs_ty != Type::Int {
                    return Err(CompileError::Type {
                        span: expr.span,
                        message: format!(
                            "operands of '{}' must both be int, found {:?} and {:?}",
                            op_symbol(op),
                            lhs_ty,
                            rhs_ty
                        ),
                    });
                }
                Ok(Type::Int)
            }
            ExprKind::RefExpr(r) => self.type_of_ref(r),
        }
    }

    fn type_of_ref(&self, r: &Ref) -> CompileResult<Type> {
        match &r.node {
            RefKind::Name(name) => self.vars.get(name).cloned().ok_or_else(|| CompileError::Name {
                span: r.span,
                message: format!("undefined variable '{name}'"),
            }),
            RefKind::Deref(inner) => {
                let inner_ty = self.type_of_ref(inner)?;
                match inner_ty {
                    Type::Ptr(referent) => Ok(*referent),
                    other => Err(CompileError::Type {
                        span: inner.span,
                        message: format!("cannot dereference non-pointer type {other:?}"),
                    }),
                }
            }
            RefKind::Field(inner, field_name) => {
                let inner_ty = self.type_of_ref(inner)?;
                let def = struct_of(self.types, &inner_ty).ok_or_else(|| CompileError::Type {
                    span: inner.span,
                    message: format!("field access on non-struct type {inner_ty:?}"),
                })?;
                def.field_type(field_name).cloned().ok_or_else(|| CompileError::Name {
                    span: r.span,
                    message: format!("no field '{field_name}' on struct"),
                })
            }
        }
    }

    fn require_int(&self, expr: &Expr, role: &str) -> CompileResult<()> {
        let ty = self.type_of_expr(expr)?;
        if ty == Type::Int {
            Ok(())
        } else {
            Err(CompileError::Type {
                span: expr.span,
                message: format!("{role} must be int, found {ty:?}"),
            })
        }
    }

    fn require_ptr(&self, ty: &Type, span: Span, role: &str) -> CompileResult<()> {
        match ty {
            Type::Ptr(_) => Ok(()),
            other => Err(CompileError::Type {
                span,
                message: format!("{role} must be a pointer, found {other:?}"),
            }),
        }
    }
}

fn op_symbol(op: &BinOp) -> &'static str {
    op.as_c_str()
}

fn describe(ty: &Type) -> &'static str {
    match ty {
        Type::Int => "int",
        Type::Ptr(_) => "pointer",
        Type::Named(_) => "named type",
        Type::Struct(_) => "struct",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ebc_lex::Lexer;
    use ebc_util::FileId;

    fn check_src(src: &str) -> CompileResult<()> {
        let tokens = Lexer::new(src, FileId::DUMMY).tokenize().unwrap();
        let program = ebc_par::parse(tokens).unwrap();
        check_program(&program)
    }

    #[test]
    fn scenario_a_type_checks() {
        let src = r#"
            type node struct { int value; ptr to node next; };
            var ptr to node jim;
            { jim = malloc node;
              if valid jim { [@jim].value = (1 + 4); print [@jim].value; }
              free jim; }
        "#;
        check_src(src).unwrap();
    }

    #[test]
    fn assigning_pointer_to_int_var_is_a_type_error() {
        let src = r#"
            type node struct { int v; };
            var int x;
            { x = malloc node; }
        "#;
        assert!(matches!(check_src(src), Err(CompileError::Type { .. })));
    }

    #[test]
    fn dereferencing_an_int_is_a_type_error() {
        let src = r#"
            var int x;
            { print [@x].v; }
        "#;
        assert!(matches!(check_src(src), Err(CompileError::Type { .. })));
    }

    #[test]
    fn printing_a_pointer_is_a_type_error() {
        let src = r#"
            type node struct { int v; };
            var ptr to node p;
            { p = malloc node; print p; }
        "#;
        let result = check_src(src);
        assert!(matches!(result, Err(CompileError::Type { .. })));
    }

    #[test]
    fn undefined_variable_is_a_name_error() {
        let src = "{ print x; }";
        assert!(matches!(check_src(src), Err(CompileError::Name { .. })));
    }

    #[test]
    fn unknown_field_is_a_name_error() {
        let src = r#"
            type node struct { int v; };
            var ptr to node p;
            { p = malloc node; print [@p].missing; }
        "#;
        assert!(matches!(check_src(src), Err(CompileError::Name { .. })));
    }
}
