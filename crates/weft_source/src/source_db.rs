//! Registry of source files and span-to-line resolution.

use crate::file_id::FileId;
use crate::span::Span;
use std::path::PathBuf;

/// One registered source file with its line-start table.
#[derive(Debug)]
pub struct SourceFile {
    /// The id handed out at registration.
    pub id: FileId,
    /// The path (or synthetic name) shown in messages.
    pub path: PathBuf,
    /// The file text.
    pub content: String,
    line_starts: Vec<u32>,
}

impl SourceFile {
    fn new(id: FileId, path: PathBuf, content: String) -> Self {
        let mut line_starts = vec![0u32];
        line_starts.extend(
            content
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| (i + 1) as u32),
        );
        Self {
            id,
            path,
            content,
            line_starts,
        }
    }

    /// Returns the 1-based line containing `offset`.
    pub fn line_of(&self, offset: u32) -> u32 {
        match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx as u32 + 1,
            Err(idx) => idx as u32,
        }
    }
}

/// All source files of a compilation session.
#[derive(Debug, Default)]
pub struct SourceDb {
    files: Vec<SourceFile>,
}

impl SourceDb {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Registers in-memory text under `name`.
    pub fn add_source(&mut self, name: impl Into<PathBuf>, content: String) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        self.files.push(SourceFile::new(id, name.into(), content));
        id
    }

    /// Returns the file for `id`, if it was registered here.
    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.as_raw() as usize)
    }

    /// Renders `span` as `path:line`.
    ///
    /// Dummy spans and spans from unknown files render as `<internal>`, the
    /// same placeholder the compiler uses for synthesized constructs.
    pub fn fileline(&self, span: Span) -> String {
        if span.is_dummy() {
            return "<internal>".to_string();
        }
        match self.file(span.file) {
            Some(file) => format!("{}:{}", file.path.display(), file.line_of(span.start)),
            None => "<internal>".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fileline_of_second_line() {
        let mut db = SourceDb::new();
        let f = db.add_source("top.v", "module top;\n  wire a;\nendmodule\n".to_string());
        assert_eq!(db.fileline(Span::new(f, 14, 20)), "top.v:2");
        assert_eq!(db.fileline(Span::new(f, 0, 6)), "top.v:1");
    }

    #[test]
    fn line_start_offset_belongs_to_its_line() {
        let mut db = SourceDb::new();
        let f = db.add_source("a.v", "x\ny\n".to_string());
        assert_eq!(db.file(f).unwrap().line_of(2), 2);
    }

    #[test]
    fn dummy_and_unknown_render_internal() {
        let db = SourceDb::new();
        assert_eq!(db.fileline(Span::DUMMY), "<internal>");
        assert_eq!(db.fileline(Span::new(FileId::from_raw(9), 0, 1)), "<internal>");
    }
}
