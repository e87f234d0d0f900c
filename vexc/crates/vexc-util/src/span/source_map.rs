//! Registry of source files, for recovering "the original source text of
//! that line (best-effort)" as spec.md's `Diagnostic` record requires.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::FileId;

/// One loaded source file: its path and its content, pre-split into lines
/// so diagnostic rendering can index by breadcrumb in O(1).
#[derive(Clone)]
pub struct SourceFile {
    id: FileId,
    path: String,
    content: Arc<str>,
    line_starts: Arc<[usize]>,
}

impl SourceFile {
    pub fn new(id: FileId, path: impl Into<String>, content: impl Into<Arc<str>>) -> Self {
        let content = content.into();
        let line_starts = Self::compute_line_starts(&content);
        Self {
            id,
            path: path.into(),
            content,
            line_starts,
        }
    }

    fn compute_line_starts(content: &str) -> Arc<[usize]> {
        let mut starts = vec![0];
        for (i, ch) in content.char_indices() {
            if ch == '\n' {
                starts.push(i + 1);
            }
        }
        starts.into()
    }

    pub fn id(&self) -> FileId {
        self.id
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Best-effort recovery of the text of a 1-based source line. Returns
    /// `None` for an out-of-range line rather than panicking, since
    /// diagnostics must never crash the organizer (spec.md §7).
    pub fn line_text(&self, line: u32) -> Option<&str> {
        if line == 0 {
            return None;
        }
        let idx = (line - 1) as usize;
        let start = *self.line_starts.get(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&e| e.saturating_sub(1))
            .unwrap_or(self.content.len());
        self.content.get(start..end.max(start))
    }
}

/// Holds every [`SourceFile`] loaded during a compilation, entry file and
/// transitive imports alike, indexed by [`FileId`].
///
/// Diagnostics carry the file they belong to as a plain path `String`
/// (spec.md's `Diagnostic` record has no `FileId` field), so lookups also
/// need to go by path rather than only by the id handed back from
/// `add_file`.
#[derive(Clone, Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
    by_path: FxHashMap<String, FileId>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self { files: Vec::new(), by_path: FxHashMap::default() }
    }

    pub fn add_file(&mut self, path: impl Into<String>, content: impl Into<Arc<str>>) -> FileId {
        let path = path.into();
        let id = FileId(self.files.len());
        self.files.push(SourceFile::new(id, path.clone(), content));
        self.by_path.insert(path, id);
        id
    }

    pub fn get(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.0)
    }

    pub fn line_text(&self, id: FileId, line: u32) -> Option<&str> {
        self.get(id).and_then(|f| f.line_text(line))
    }

    /// The `FileId` a file was registered under, looked up by the same path
    /// string a `Diagnostic.file` carries.
    pub fn file_id_for_path(&self, path: &str) -> Option<FileId> {
        self.by_path.get(path).copied()
    }

    /// Best-effort recovery by path rather than `FileId`, for diagnostic
    /// rendering where only the path string is at hand.
    pub fn line_text_for_path(&self, path: &str, line: u32) -> Option<&str> {
        self.file_id_for_path(path).and_then(|id| self.line_text(id, line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_individual_lines() {
        let mut map = SourceMap::new();
        let id = map.add_file("a.vx", "class A {\n  x\n}\n");
        assert_eq!(map.line_text(id, 1), Some("class A {"));
        assert_eq!(map.line_text(id, 2), Some("  x"));
        assert_eq!(map.line_text(id, 3), Some("}"));
    }

    #[test]
    fn out_of_range_line_is_none_not_panic() {
        let mut map = SourceMap::new();
        let id = map.add_file("a.vx", "one line\n");
        assert_eq!(map.line_text(id, 0), None);
        assert_eq!(map.line_text(id, 99), None);
    }

    #[test]
    fn looks_up_by_path_not_just_by_id() {
        let mut map = SourceMap::new();
        map.add_file("a.vx", "class A {\n}\n");
        assert_eq!(map.line_text_for_path("a.vx", 1), Some("class A {"));
        assert_eq!(map.line_text_for_path("missing.vx", 1), None);
    }
}
