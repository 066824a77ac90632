//! Expression and reference emission.

use ebc_par::ast::{Expr, ExprKind, Ref, RefKind};

pub fn emit_ref(r: &Ref) -> String {
    match &r.node {
        RefKind::Name(name) => name.clone(),
        // The safety analyzer guarantees every surviving `Deref` wraps a
        // bare name, so this always renders the `(*v.raw)` form the
        // dereference rule calls for.
        RefKind::Deref(inner) => format!("(*({}).raw)", emit_ref(inner)),
        RefKind::Field(inner, field) => format!("({}).{}", emit_ref(inner), field),
    }
}

pub fn emit_expr(e: &Expr) -> String {
    match &e.node {
        ExprKind::IntLit(n) => n.to_string(),
        ExprKind::Malloc(type_name) => format!("make_ptr_to_{type_name}()"),
        ExprKind::Valid(inner) => format!("({}).valid", emit_expr(inner)),
        ExprKind::BinOp(op, lhs, rhs) => {
            format!("({} {} {})", emit_expr(lhs), op.as_c_str(), emit_expr(rhs))
        }
        ExprKind::RefExpr(r) => emit_ref(r),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ebc_par::ast::{BinOp, Spanned};
    use ebc_util::Span;

    fn spanned<T>(node: T) -> Spanned<T> {
        Spanned::new(node, Span::DUMMY)
    }

    #[test]
    fn deref_of_bare_name_matches_the_dereference_rule() {
        let r = spanned(RefKind::Deref(Box::new(spanned(RefKind::Name("jim".into())))));
        assert_eq!(emit_ref(&r), "(*(jim).raw)");
    }

    #[test]
    fn field_access_wraps_its_base_in_parens() {
        let r = spanned(RefKind::Field(
            Box::new(spanned(RefKind::Deref(Box::new(spanned(RefKind::Name("jim".into())))))),
            "value".into(),
        ));
        assert_eq!(emit_ref(&r), "(*(jim).raw).value");
    }

    #[test]
    fn binop_emits_parenthesized_infix_form() {
        let e = spanned(ExprKind::BinOp(
            BinOp::Add,
            Box::new(spanned(ExprKind::IntLit(1))),
            Box::new(spanned(ExprKind::IntLit(4))),
        ));
        assert_eq!(emit_expr(&e), "(1 + 4)");
    }

    #[test]
    fn malloc_calls_the_named_allocator() {
        let e = spanned(ExprKind::Malloc("node".into()));
        assert_eq!(emit_expr(&e), "make_ptr_to_node()");
    }
}
