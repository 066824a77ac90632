//! Dispatches the cursor's current byte to a token.

use ebc_util::{CompileError, CompileResult, FileId, Span};

use crate::cursor::Cursor;
use crate::token::{keyword, Token, TokenKind};

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    file_id: FileId,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, file_id: FileId) -> Self {
        Self {
            cursor: Cursor::new(source),
            file_id,
        }
    }

    /// Tokenize the whole source, ending with a single `Eof` token.
    pub fn tokenize(mut self) -> CompileResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let is_eof = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if is_eof {
                return Ok(tokens);
            }
        }
    }

    fn span_here(&self) -> Span {
        Span::with_file(self.cursor.line(), self.cursor.column(), self.file_id)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.cursor.current(), b' ' | b'\t' | b'\n' | b'\r') {
            self.cursor.advance();
        }
    }

    fn next_token(&mut self) -> CompileResult<Token> {
        self.skip_whitespace();
        let span = self.span_here();

        if self.cursor.is_at_end() {
            return Ok(Token {
                kind: TokenKind::Eof,
                span,
            });
        }

        let c = self.cursor.current();
        let kind = match c {
            b'0'..=b'9' => self.lex_int(span)?,
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.lex_ident_or_keyword(),
            b'{' => self.single(TokenKind::LBrace),
            b'}' => self.single(TokenKind::RBrace),
            b'[' => self.single(TokenKind::LBracket),
            b']' => self.single(TokenKind::RBracket),
            b'(' => self.single(TokenKind::LParen),
            b')' => self.single(TokenKind::RParen),
            b';' => self.single(TokenKind::Semicolon),
            b'.' => self.single(TokenKind::Dot),
            b'@' => self.single(TokenKind::At),
            b'=' => self.single(TokenKind::Assign),
            b'+' => self.single(TokenKind::Plus),
            b'-' => self.single(TokenKind::Minus),
            b'*' => self.single(TokenKind::Star),
            b'/' => self.single(TokenKind::Slash),
            b'>' => self.single(TokenKind::Gt),
            b'&' => self.single(TokenKind::Amp),
            b'|' => self.single(TokenKind::Pipe),
            other => {
                return Err(CompileError::Lex {
                    span,
                    message: format!("unexpected character '{}'", other as char),
                });
            }
        };

        Ok(Token { kind, span })
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.cursor.advance();
        kind
    }

    fn lex_int(&mut self, span: Span) -> CompileResult<TokenKind> {
        let mut digits = String::new();
        while self.cursor.current().is_ascii_digit() {
            digits.push(self.cursor.current() as char);
            self.cursor.advance();
        }
        digits.parse().map(TokenKind::IntLit).map_err(|_| CompileError::Lex {
            span,
            message: format!("integer literal '{digits}' is out of range"),
        })
    }

    fn lex_ident_or_keyword(&mut self) -> TokenKind {
        let mut ident = String::new();
        while matches!(self.cursor.current(), b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_') {
            ident.push(self.cursor.current() as char);
            self.cursor.advance();
        }
        keyword(&ident).unwrap_or(TokenKind::Ident(ident))
    }
}
