//! Source location tracking.
//!
//! Unlike a conventional parser, the organizer this workspace implements
//! keeps moving and splicing whole [`Line`](crate is lex-agnostic here)
//! records between owners (global → class → function → directives/uses).
//! Byte offsets into the original buffer stop being meaningful the moment a
//! line is spliced elsewhere, but the 1-based source line number — the
//! "breadcrumb" — must survive every rewrite intact, since it is the only
//! thing diagnostics can use to recover the offending source text. `Span`
//! here is therefore just a file + line pair, not a byte range.

mod source_map;

pub use source_map::{SourceFile, SourceMap};

/// Identifies one source file within a compilation (the entry file plus
/// every transitively imported file).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub usize);

impl FileId {
    pub const DUMMY: FileId = FileId(usize::MAX);
}

impl Default for FileId {
    fn default() -> Self {
        Self::DUMMY
    }
}

/// A source location: which file, which 1-based line.
///
/// `line == 0` is used for diagnostics spec.md describes as having no
/// associated line (e.g. the missing-`Main` diagnostic).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub file: FileId,
    pub line: u32,
}

impl Span {
    pub const DUMMY: Span = Span {
        file: FileId::DUMMY,
        line: 0,
    };

    pub fn new(file: FileId, line: u32) -> Self {
        Self { file, line }
    }

    /// A span with no known line, used for diagnostics that spec.md defines
    /// as file-less/line-less (the missing-`Main` diagnostic uses line -1,
    /// represented here as line 0 with no valid file).
    pub fn unknown() -> Self {
        Self::DUMMY
    }
}
