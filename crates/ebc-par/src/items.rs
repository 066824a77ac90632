//! Top-level `type` and `var` declarations, and the program entry point.
//!
//! ```text
//! Program  ::= (TypeDecl | VarDecl)* Block
//! TypeDecl ::= "type" Ident "struct" "{" (TypeExpr Ident ";")* "}" ";"
//! VarDecl  ::= "var" TypeExpr Ident ";"
//! ```

use ebc_lex::TokenKind;
use ebc_util::{CompileError, CompileResult};

use crate::ast::{FieldDef, Program, StructDef, TypeEnv, VarEnv};
use crate::Parser;

impl Parser {
    pub(crate) fn parse_program(&mut self) -> CompileResult<Program> {
        let mut types = TypeEnv::new();
        let mut vars = VarEnv::new();

        loop {
            match &self.current().kind {
                TokenKind::Type => self.parse_type_decl(&mut types)?,
                TokenKind::Var => self.parse_var_decl(&mut types, &mut vars)?,
                TokenKind::LBrace => break,
                _ => return Err(self.unexpected("'type', 'var', or '{'")),
            }
        }

        let body = self.parse_block()?;
        self.expect(TokenKind::Eof)?;

        Ok(Program { types, vars, body })
    }

    fn parse_type_decl(&mut self, types: &mut TypeEnv) -> CompileResult<()> {
        let start = self.current_span();
        self.expect(TokenKind::Type)?;
        let name = self.parse_ident()?;
        if types.contains_key(&name) {
            return Err(CompileError::Name {
                span: start,
                message: format!("type '{name}' already declared"),
            });
        }
        self.expect(TokenKind::Struct)?;
        self.expect(TokenKind::LBrace)?;

        let mut fields: Vec<FieldDef> = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            let field_span = self.current_span();
            // The type-expression grammar (`int` | `ptr to <name>` | `<name>`)
            // has no production for an inline struct body, so nested struct
            // declarations (a Non-goal) are already excluded syntactically.
            let field_ty = self.parse_type_expr()?;
            let field_name = self.parse_ident()?;
            if fields.iter().any(|f| f.name == field_name) {
                return Err(CompileError::Name {
                    span: field_span,
                    message: format!("duplicate field '{field_name}' in struct '{name}'"),
                });
            }
            self.expect(TokenKind::Semicolon)?;
            fields.push(FieldDef {
                name: field_name,
                ty: field_ty,
                span: field_span,
            });
        }
        self.expect(TokenKind::RBrace)?;
        self.expect(TokenKind::Semicolon)?;

        types.insert(name, StructDef { fields });
        Ok(())
    }

    fn parse_var_decl(&mut self, _types: &TypeEnv, vars: &mut VarEnv) -> CompileResult<()> {
        let start = self.current_span();
        self.expect(TokenKind::Var)?;
        let ty = self.parse_type_expr()?;
        let name = self.parse_ident()?;
        if vars.contains_key(&name) {
            return Err(CompileError::Name {
                span: start,
                message: format!("variable '{name}' already declared"),
            });
        }
        self.expect(TokenKind::Semicolon)?;
        vars.insert(name, ty);
        Ok(())
    }
}
