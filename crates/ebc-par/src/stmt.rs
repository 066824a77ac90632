//! Blocks and statements.
//!
//! ```text
//! Block  ::= "{" Stmt* "}"
//! Stmt   ::= "while" Expr Block
//!          | "if" Expr Block ("else" Block)?
//!          | "free" Ref ";"
//!          | "print" Expr ";"
//!          | Ref "=" Expr ";"
//! ```

use ebc_lex::TokenKind;
use ebc_util::CompileResult;

use crate::ast::{Block, Spanned, StmtKind};
use crate::Parser;

impl Parser {
    pub(crate) fn parse_block(&mut self) -> CompileResult<Block> {
        self.expect(TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            stmts.push(self.parse_stmt()?);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(Block { stmts })
    }

    fn parse_stmt(&mut self) -> CompileResult<crate::ast::Stmt> {
        let span = self.current_span();
        let kind = match self.current().kind.clone() {
            TokenKind::While => {
                self.advance();
                let cond = self.parse_expr()?;
                let body = self.parse_block()?;
                StmtKind::While(cond, body)
            }
            TokenKind::If => {
                self.advance();
                let cond = self.parse_expr()?;
                let then_block = self.parse_block()?;
                let else_block = if self.check(&TokenKind::Else) {
                    self.advance();
                    Some(self.parse_block()?)
                } else {
                    None
                };
                StmtKind::If(cond, then_block, else_block)
            }
            TokenKind::Free => {
                self.advance();
                let r = self.parse_ref()?;
                self.expect(TokenKind::Semicolon)?;
                StmtKind::Free(r)
            }
            TokenKind::Print => {
                self.advance();
                let e = self.parse_expr()?;
                self.expect(TokenKind::Semicolon)?;
                StmtKind::Print(e)
            }
            _ => {
                // Only an assignment remains: `Ref "=" Expr ";"`.
                let target = self.parse_ref()?;
                self.expect(TokenKind::Assign)?;
                let value = self.parse_expr()?;
                self.expect(TokenKind::Semicolon)?;
                StmtKind::Assign(target, value)
            }
        };
        Ok(Spanned::new(kind, span))
    }
}
