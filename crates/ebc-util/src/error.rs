//! The compiler's error taxonomy.
//!
//! Every phase returns `Result<T, CompileError>`. Eightebed aborts on the
//! first error in any phase — no subsequent phase runs — so a plain
//! `Result` is the right shape here, not a diagnostic bag that accumulates
//! errors across a whole compilation unit.

use crate::span::{FileId, Span};
use thiserror::Error;

/// One error kind per compiler phase, plus I/O.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("lex error: {message}")]
    Lex { span: Span, message: String },

    #[error("parse error: {message}")]
    Parse { span: Span, message: String },

    #[error("name error: {message}")]
    Name { span: Span, message: String },

    #[error("type error: {message}")]
    Type { span: Span, message: String },

    #[error("safety error: {message}")]
    Safety { span: Span, message: String },

    #[error("io error: {message}")]
    Io { message: String },
}

impl CompileError {
    fn span(&self) -> Option<Span> {
        match self {
            CompileError::Lex { span, .. }
            | CompileError::Parse { span, .. }
            | CompileError::Name { span, .. }
            | CompileError::Type { span, .. }
            | CompileError::Safety { span, .. } => Some(*span),
            CompileError::Io { .. } => None,
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            CompileError::Lex { .. } => "lex error",
            CompileError::Parse { .. } => "parse error",
            CompileError::Name { .. } => "name error",
            CompileError::Type { .. } => "type error",
            CompileError::Safety { .. } => "safety error",
            CompileError::Io { .. } => "io error",
        }
    }

    fn message(&self) -> &str {
        match self {
            CompileError::Lex { message, .. }
            | CompileError::Parse { message, .. }
            | CompileError::Name { message, .. }
            | CompileError::Type { message, .. }
            | CompileError::Safety { message, .. }
            | CompileError::Io { message } => message,
        }
    }

    /// Process exit code: 1 for compiler-phase errors, 2 for I/O.
    pub fn exit_code(&self) -> i32 {
        match self {
            CompileError::Io { .. } => 2,
            _ => 1,
        }
    }

    /// Render as `<file>:<line>:<col>: <kind>: <message>`, or (for
    /// position-less I/O failures) `<kind>: <message>`.
    pub fn display_with_file<'a>(&'a self, file_name: impl Fn(FileId) -> &'a str) -> String {
        match self.span() {
            Some(span) => format!(
                "{}:{}: {}: {}",
                file_name(span.file_id),
                span,
                self.kind_name(),
                self.message()
            ),
            None => format!("{}: {}", self.kind_name(), self.message()),
        }
    }
}

impl CompileError {
    pub fn io(message: impl Into<String>) -> Self {
        CompileError::Io {
            message: message.into(),
        }
    }
}

pub type CompileResult<T> = std::result::Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_has_no_position() {
        let err = CompileError::io("could not read source");
        assert_eq!(err.exit_code(), 2);
        assert_eq!(
            err.display_with_file(|_| "unused"),
            "io error: could not read source"
        );
    }

    #[test]
    fn safety_error_renders_with_position() {
        let err = CompileError::Safety {
            span: Span::new(4, 7),
            message: "dereference of possibly-invalid pointer p".into(),
        };
        assert_eq!(err.exit_code(), 1);
        assert_eq!(
            err.display_with_file(|_| "jim.eb"),
            "jim.eb:4:7: safety error: dereference of possibly-invalid pointer p"
        );
    }
}
