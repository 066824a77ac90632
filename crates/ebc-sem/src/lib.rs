//! Name resolution and type checking: the phase between parsing and the
//! pointer-safety analyzer. Everything here is read-only over the AST —
//! no node is rewritten, only validated.

mod checker;
mod types;

pub use checker::check_program;
pub use types::{resolve_types, resolve_var_type, struct_of};
