//! Expressions and references.
//!
//! ```text
//! Ref  ::= Ident | "@" Ref | "[" Ref "]" "." Ident
//! Expr ::= "(" Expr BinOp Expr ")"
//!        | "malloc" Ident
//!        | "valid" Expr
//!        | IntLit
//!        | Ref
//! ```
//!
//! Binary operators are never implicitly associated or precedence-ranked —
//! every application is wrapped in its own parentheses, so `parse_expr`
//! never needs a binding-power table the way a Pratt parser would for a
//! grammar that isn't fully parenthesized.

use ebc_lex::TokenKind;
use ebc_util::CompileResult;

use crate::ast::{BinOp, Expr, ExprKind, Ref, RefKind, Spanned};
use crate::Parser;

impl Parser {
    pub(crate) fn parse_ref(&mut self) -> CompileResult<Ref> {
        let span = self.current_span();
        match self.current().kind.clone() {
            TokenKind::At => {
                self.advance();
                let inner = self.parse_ref()?;
                Ok(Spanned::new(RefKind::Deref(Box::new(inner)), span))
            }
            TokenKind::LBracket => {
                self.advance();
                let inner = self.parse_ref()?;
                self.expect(TokenKind::RBracket)?;
                self.expect(TokenKind::Dot)?;
                let field = self.parse_ident()?;
                Ok(Spanned::new(RefKind::Field(Box::new(inner), field), span))
            }
            TokenKind::Ident(_) => {
                let name = self.parse_ident()?;
                Ok(Spanned::new(RefKind::Name(name), span))
            }
            _ => Err(self.unexpected("a reference ('@ref', '[ref].field', or a name)")),
        }
    }

    pub(crate) fn parse_expr(&mut self) -> CompileResult<Expr> {
        let span = self.current_span();
        match self.current().kind.clone() {
            TokenKind::LParen => {
                self.advance();
                let lhs = self.parse_expr()?;
                let op = self.parse_binop()?;
                let rhs = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(Spanned::new(
                    ExprKind::BinOp(op, Box::new(lhs), Box::new(rhs)),
                    span,
                ))
            }
            TokenKind::Malloc => {
                self.advance();
                let name = self.parse_ident()?;
                Ok(Spanned::new(ExprKind::Malloc(name), span))
            }
            TokenKind::Valid => {
                self.advance();
                let inner = self.parse_expr()?;
                Ok(Spanned::new(ExprKind::Valid(Box::new(inner)), span))
            }
            TokenKind::IntLit(_) => {
                let n = self.parse_int()?;
                Ok(Spanned::new(ExprKind::IntLit(n), span))
            }
            _ => {
                let r = self.parse_ref()?;
                Ok(Spanned::new(ExprKind::RefExpr(Box::new(r)), span))
            }
        }
    }

    fn parse_binop(&mut self) -> CompileResult<BinOp> {
        let op = match self.current().kind {
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Star => BinOp::Mul,
            TokenKind::Slash => BinOp::Div,
            TokenKind::Assign => BinOp::Eq,
            TokenKind::Gt => BinOp::Gt,
            TokenKind::Amp => BinOp::And,
            TokenKind::Pipe => BinOp::Or,
            _ => return Err(self.unexpected("a binary operator ('+ - * / = > & |')")),
        };
        self.advance();
        Ok(op)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests_support::parse_src;
    use crate::ast::{BinOp, ExprKind, RefKind, StmtKind};

    fn first_expr(src: &str) -> ExprKind {
        let body = parse_src(src).unwrap().body;
        match &body.stmts[0].node {
            StmtKind::Print(e) => e.node.clone(),
            other => panic!("expected Print, got {other:?}"),
        }
    }

    #[test]
    fn equality_is_a_binop_not_assignment() {
        // Expression-level `=` inside parens is equality, not assignment.
        match first_expr("{ print (a = b); }") {
            ExprKind::BinOp(BinOp::Eq, _, _) => {}
            other => panic!("expected equality BinOp, got {other:?}"),
        }
    }

    #[test]
    fn field_access_wraps_deref() {
        let body = parse_src("{ print [@jim].value; }").unwrap().body;
        let expr = match &body.stmts[0].node {
            StmtKind::Print(e) => &e.node,
            other => panic!("expected Print, got {other:?}"),
        };
        let r = match expr {
            ExprKind::RefExpr(r) => &r.node,
            other => panic!("expected RefExpr, got {other:?}"),
        };
        match r {
            RefKind::Field(inner, name) => {
                assert_eq!(name, "value");
                assert!(matches!(inner.node, RefKind::Deref(_)));
            }
            other => panic!("expected Field, got {other:?}"),
        }
    }

    #[test]
    fn malloc_expression() {
        let body = parse_src("{ p = malloc node; }").unwrap().body;
        match &body.stmts[0].node {
            StmtKind::Assign(_, e) => {
                assert!(matches!(&e.node, ExprKind::Malloc(name) if name == "node"));
            }
            other => panic!("expected Assign, got {other:?}"),
        }
    }

    #[test]
    fn unparenthesized_binop_is_a_parse_error() {
        assert!(parse_src("{ print 1 + 1; }").is_err());
    }
}
