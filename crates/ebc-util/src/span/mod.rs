//! Source location tracking.
//!
//! A [`Span`] identifies a single point in a source file by 1-based line
//! and column, the position every diagnostic reports. Eightebed programs
//! are small enough that byte offsets are tracked only incidentally;
//! line/column is what every error message and every `SourceMap` lookup
//! actually uses.

mod source_map;

pub use source_map::{SourceFile, SourceMap};

/// Identifies one loaded source file.
///
/// Eightebed only ever compiles a single file per invocation, but carrying
/// a `FileId` keeps `Span` self-contained and lets diagnostics name the file
/// without threading a path through every phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FileId(pub usize);

impl FileId {
    pub const DUMMY: FileId = FileId(0);
}

/// A 1-based source location.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub line: u32,
    pub column: u32,
    pub file_id: FileId,
}

impl Span {
    pub const DUMMY: Span = Span {
        line: 0,
        column: 0,
        file_id: FileId::DUMMY,
    };

    #[inline]
    pub fn new(line: u32, column: u32) -> Self {
        Self {
            line,
            column,
            file_id: FileId::DUMMY,
        }
    }

    #[inline]
    pub fn with_file(line: u32, column: u32, file_id: FileId) -> Self {
        Self {
            line,
            column,
            file_id,
        }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
