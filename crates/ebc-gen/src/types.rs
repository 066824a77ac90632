//! Struct, pointer-struct, and global-variable declaration emission.

use ebc_par::ast::{StructDef, Type};

/// C spelling of a declared type, as it appears in a field or global
/// declaration (never as a pointer's own tagged-pointer wrapper, which
/// [`emit_ptr_struct`] generates separately).
fn field_type_name(ty: &Type) -> String {
    match ty {
        Type::Int => "int".to_string(),
        Type::Named(n) => format!("struct {n}"),
        Type::Ptr(inner) => match inner.as_ref() {
            Type::Named(n) => format!("struct ptr_to_{n}"),
            other => field_type_name(other),
        },
        Type::Struct(_) => unreachable!("a field's type is never an inline struct body"),
    }
}

pub fn emit_struct(name: &str, def: &StructDef) -> String {
    let mut out = format!("struct {name} {{\n");
    for field in &def.fields {
        out.push_str(&format!("    {} {};\n", field_type_name(&field.ty), field.name));
    }
    out.push_str("};\n");
    out
}

pub fn emit_ptr_struct(target: &str) -> String {
    format!(
        "struct ptr_to_{target} {{\n    struct {target} *raw;\n    int valid;\n}};\n"
    )
}

pub fn emit_global_decl(name: &str, ty: &Type) -> String {
    format!("{} {};\n", field_type_name(ty), name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ebc_par::ast::FieldDef;
    use ebc_util::Span;

    #[test]
    fn struct_preserves_field_order() {
        let def = StructDef {
            fields: vec![
                FieldDef { name: "value".into(), ty: Type::Int, span: Span::DUMMY },
                FieldDef {
                    name: "next".into(),
                    ty: Type::Ptr(Box::new(Type::Named("node".into()))),
                    span: Span::DUMMY,
                },
            ],
        };
        let out = emit_struct("node", &def);
        assert!(out.find("int value;").unwrap() < out.find("struct ptr_to_node next;").unwrap());
    }

    #[test]
    fn ptr_struct_has_raw_and_valid_fields() {
        let out = emit_ptr_struct("node");
        assert!(out.contains("struct node *raw;"));
        assert!(out.contains("int valid;"));
    }
}
