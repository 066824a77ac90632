//! Parses the type-expression position used by field and `var` declarations:
//! `int`, `ptr to <name>`, or a bare `<name>` reference.

use ebc_lex::TokenKind;
use ebc_util::CompileResult;

use crate::ast::Type;
use crate::Parser;

impl Parser {
    pub(crate) fn parse_type_expr(&mut self) -> CompileResult<Type> {
        match self.current().kind.clone() {
            TokenKind::Int => {
                self.advance();
                Ok(Type::Int)
            }
            TokenKind::Ptr => {
                self.advance();
                self.expect(TokenKind::To)?;
                let name = self.parse_ident()?;
                Ok(Type::Ptr(Box::new(Type::Named(name))))
            }
            TokenKind::Ident(_) => {
                let name = self.parse_ident()?;
                Ok(Type::Named(name))
            }
            _ => Err(self.unexpected("a type ('int', 'ptr to <name>', or a type name)")),
        }
    }
}
