//! LL(1) recursive-descent parser for Eightebed.
//!
//! The grammar is bracket-heavy by design — field access is `[ref].name`,
//! dereference is `@ref`, every binary application is fully parenthesized —
//! so exactly one token of lookahead suffices everywhere and no operator
//! precedence table is needed. There is no error recovery: the first
//! unexpected token aborts the parse.

pub mod ast;
mod expr;
mod items;
mod stmt;
mod types;

use ebc_lex::{Token, TokenKind};
use ebc_util::{CompileError, CompileResult, Span};

pub use ast::Program;

/// Parse a complete Eightebed source file, already lexed, into a [`Program`].
pub fn parse(tokens: Vec<Token>) -> CompileResult<Program> {
    Parser::new(tokens).parse_program()
}

pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn current(&self) -> &Token {
        // The lexer always terminates the stream with `Eof`, so indexing
        // never runs past the end as long as callers stop advancing on it.
        self.tokens.get(self.pos).unwrap_or_else(|| self.tokens.last().unwrap())
    }

    fn current_span(&self) -> Span {
        self.current().span
    }

    fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        if !matches!(tok.kind, TokenKind::Eof) {
            self.pos += 1;
        }
        tok
    }

    /// Consume the current token if it matches `kind` exactly (works for
    /// every payload-free `TokenKind` variant — keywords and punctuation).
    fn expect(&mut self, kind: TokenKind) -> CompileResult<Span> {
        if self.current().kind == kind {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.current().kind == kind
    }

    fn unexpected(&self, expected: &str) -> CompileError {
        CompileError::Parse {
            span: self.current_span(),
            message: format!("expected {expected}, got {}", self.current().kind),
        }
    }

    fn parse_ident(&mut self) -> CompileResult<String> {
        match self.current().kind.clone() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("an identifier")),
        }
    }

    fn parse_int(&mut self) -> CompileResult<u64> {
        match self.current().kind.clone() {
            TokenKind::IntLit(n) => {
                self.advance();
                Ok(n)
            }
            _ => Err(self.unexpected("an integer literal")),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::tests_support::parse_src;
    use ebc_util::CompileError;

    #[test]
    fn scenario_a_allocate_guard_print_free() {
        let src = r#"
            type node struct { int value; ptr to node next; };
            var ptr to node jim;
            { jim = malloc node;
              if valid jim { [@jim].value = (1 + 4); print [@jim].value; }
              free jim; }
        "#;
        let program = parse_src(src).unwrap();
        assert_eq!(program.types.len(), 1);
        assert!(program.types.contains_key("node"));
        assert_eq!(program.vars.len(), 1);
        assert_eq!(program.body.stmts.len(), 3);
    }

    #[test]
    fn unexpected_token_aborts_with_position() {
        let err = parse_src("type node struct { int v }").unwrap_err();
        assert!(matches!(err, CompileError::Parse { .. }));
    }
}
