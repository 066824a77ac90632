//! Shared infrastructure for the Eightebed compiler: source spans, the file
//! registry, and the error taxonomy every phase reports through.

pub mod error;
pub mod span;

pub use error::{CompileError, CompileResult};
pub use span::{FileId, SourceFile, SourceMap, Span};
