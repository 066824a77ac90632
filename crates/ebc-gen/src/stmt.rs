//! Statement and block emission.

use ebc_par::ast::{Block, Stmt, StmtKind};

use crate::expr::{emit_expr, emit_ref};

fn indent(level: usize, out: &mut String) {
    for _ in 0..level {
        out.push_str("    ");
    }
}

pub fn emit_block(block: &Block, level: usize, out: &mut String) {
    for stmt in &block.stmts {
        emit_stmt(stmt, level, out);
    }
}

fn emit_stmt(stmt: &Stmt, level: usize, out: &mut String) {
    indent(level, out);
    match &stmt.node {
        StmtKind::Assign(target, value) => {
            out.push_str(&format!("{} = {};\n", emit_ref(target), emit_expr(value)));
        }
        StmtKind::Free(r) => {
            out.push_str(&format!("EB_FREE({});\n", emit_ref(r)));
        }
        StmtKind::Print(e) => {
            out.push_str(&format!("printf(\"%d\\n\", {});\n", emit_expr(e)));
        }
        StmtKind::While(cond, body) => {
            out.push_str(&format!("while ({}) {{\n", emit_expr(cond)));
            emit_block(body, level + 1, out);
            indent(level, out);
            out.push_str("}\n");
        }
        StmtKind::If(cond, then_block, else_block) => {
            out.push_str(&format!("if ({}) {{\n", emit_expr(cond)));
            emit_block(then_block, level + 1, out);
            indent(level, out);
            match else_block {
                Some(else_block) => {
                    out.push_str("} else {\n");
                    emit_block(else_block, level + 1, out);
                    indent(level, out);
                    out.push_str("}\n");
                }
                None => out.push_str("}\n"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ebc_lex::Lexer;
    use ebc_util::FileId;

    fn emit_body(src: &str) -> String {
        let tokens = Lexer::new(src, FileId::DUMMY).tokenize().unwrap();
        let program = ebc_par::parse(tokens).unwrap();
        let mut out = String::new();
        emit_block(&program.body, 0, &mut out);
        out
    }

    #[test]
    fn if_without_else_has_no_else_branch() {
        let out = emit_body("var int x; { if (1 > 0) { x = 1; } }");
        assert!(out.contains("if ((1 > 0)) {"));
        assert!(!out.contains("else"));
    }

    #[test]
    fn if_with_else_emits_both_branches() {
        let out = emit_body("var int x; { if (1 > 0) { x = 1; } else { x = 0; } }");
        assert!(out.contains("} else {"));
    }

    #[test]
    fn while_body_is_indented_one_level_deeper() {
        let out = emit_body("var int x; { while (1 > 0) { x = 1; } }");
        let while_line = out.lines().next().unwrap();
        let body_line = out.lines().nth(1).unwrap();
        assert_eq!(while_line, "while ((1 > 0)) {");
        assert_eq!(body_line, "    x = 1;");
    }
}
