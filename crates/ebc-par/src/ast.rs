//! The Eightebed AST. All nodes are built during parsing and are immutable
//! thereafter; later phases only read them.

use ebc_util::Span;
use indexmap::IndexMap;

/// Wraps an AST node with the source position it starts at, so later phases
/// (the checker, the safety analyzer) can report positions without
/// re-deriving them from the token stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// A type.
///
/// `Struct` only ever appears as the body bound to a name in [`TypeEnv`];
/// every other occurrence of a struct-shaped type goes through `Named`
/// (invariant: no `Struct` transitively contains a `Struct`, and any
/// `Ptr`'s referent is a `Named` that resolves to a `Struct`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    Int,
    Struct(StructDef),
    Ptr(Box<Type>),
    Named(String),
}

/// One field of a struct declaration, keeping the span it was declared at
/// so the checker can point at it when a referenced type doesn't resolve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub ty: Type,
    pub span: Span,
}

/// Fields are declared in order and unique within the struct; no field may
/// itself be `Struct` (only `Int`, `Ptr`, or `Named`).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct StructDef {
    pub fields: Vec<FieldDef>,
}

impl StructDef {
    pub fn field_type(&self, name: &str) -> Option<&Type> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.ty)
    }
}

/// Type-name to struct-body mapping; insertion-ordered, names unique,
/// forward references disallowed.
pub type TypeEnv = IndexMap<String, StructDef>;

/// Variable-name to type mapping; insertion-ordered, names unique
/// program-wide, populated only by top-level `var` declarations.
pub type VarEnv = IndexMap<String, Type>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Gt,
    And,
    Or,
}

impl BinOp {
    /// The target-C spelling of this operator: identical symbol, except
    /// expression-context `=` becomes `==`.
    pub fn as_c_str(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::Gt => ">",
            BinOp::And => "&",
            BinOp::Or => "|",
        }
    }
}

/// An lvalue reference: a variable name, a dereference, or a field access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefKind {
    Name(String),
    Deref(Box<Ref>),
    Field(Box<Ref>, String),
}

pub type Ref = Spanned<RefKind>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprKind {
    BinOp(BinOp, Box<Expr>, Box<Expr>),
    Malloc(String),
    Valid(Box<Expr>),
    IntLit(u64),
    RefExpr(Box<Ref>),
}

pub type Expr = Spanned<ExprKind>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StmtKind {
    While(Expr, Block),
    If(Expr, Block, Option<Block>),
    Free(Ref),
    Print(Expr),
    Assign(Ref, Expr),
}

pub type Stmt = Spanned<StmtKind>;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    pub types: TypeEnv,
    pub vars: VarEnv,
    pub body: Block,
}
