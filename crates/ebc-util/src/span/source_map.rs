//! A minimal registry of loaded source files, keyed by [`FileId`].
//!
//! Trimmed to what a single-file batch compiler needs: a name for
//! diagnostics and the raw text (the lexer tracks its own line/column as
//! it scans, so the map never needs to reconstruct spans from byte
//! offsets).

use super::FileId;

/// One source file as loaded from disk (or stdin).
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub contents: String,
}

/// Registry of source files for an invocation of the compiler.
#[derive(Debug, Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Register a file, returning its [`FileId`].
    pub fn add_file(&mut self, name: impl Into<String>, contents: impl Into<String>) -> FileId {
        let id = FileId(self.files.len());
        self.files.push(SourceFile {
            name: name.into(),
            contents: contents.into(),
        });
        id
    }

    pub fn get(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.0)
    }

    /// The display name used in `<file>:<line>:<col>:` diagnostics.
    pub fn name(&self, id: FileId) -> &str {
        self.get(id).map(|f| f.name.as_str()).unwrap_or("<unknown>")
    }
}
