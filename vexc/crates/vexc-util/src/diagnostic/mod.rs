//! Diagnostic collection and rendering.
//!
//! The organizer never raises: every malformed construct it finds becomes a
//! [`Diagnostic`] appended to a [`Handler`], and the pass that found it
//! recovers with the most forgiving local fix (treat an unclosed block as
//! running to EOF, treat a malformed header as absent, etc. — spec.md §7).
//! Only two conditions are fatal: a file that cannot be opened, and a
//! missing `Main.main` at the very end of the pipeline.

mod builder;

pub use builder::DiagnosticBuilder;

use crate::span::{SourceMap, Span};
use std::cell::RefCell;
use std::fmt;

/// Diagnostic category. spec.md §7 currently specifies exactly one:
/// `SYNTAX`. Kept as an enum (rather than a bare string) so a future
/// category can be added without changing every call site.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Syntax,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Syntax => write!(f, "SYNTAX"),
        }
    }
}

/// One diagnostic record, matching spec.md §3's `Diagnostic` data model
/// field for field: source file path, category, 1-based line number (or
/// unknown), best-effort original source text, cause, and suggestion.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub file: String,
    pub category: Category,
    /// `None` represents spec.md's "0/-1 when unknown" line number.
    pub line: Option<u32>,
    pub source_text: Option<String>,
    pub cause: String,
    pub suggestion: String,
}

impl Diagnostic {
    pub fn syntax(file: impl Into<String>, line: Option<u32>, cause: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            category: Category::Syntax,
            line,
            source_text: None,
            cause: cause.into(),
            suggestion: String::new(),
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = suggestion.into();
        self
    }

    pub fn with_source_text(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    /// Fill in `source_text` from a `SourceMap`, when the line is known and
    /// present. Recovery is best-effort: a line that can't be found simply
    /// leaves `source_text` empty rather than failing the diagnostic.
    pub fn recover_source_text(mut self, map: &SourceMap, span: Span) -> Self {
        if let Some(line) = self.line {
            if let Some(text) = map.line_text(span.file, line) {
                self.source_text = Some(text.to_string());
            }
        }
        self
    }

    /// Same recovery as [`Self::recover_source_text`], but keyed by `self.file`
    /// (a path, as every pass that emits a `Diagnostic` already has on hand)
    /// rather than requiring the caller to already know its `FileId`.
    pub fn recover_source_text_by_path(mut self, map: &SourceMap) -> Self {
        if let Some(line) = self.line {
            if let Some(text) = map.line_text_for_path(&self.file, line) {
                self.source_text = Some(text.to_string());
            }
        }
        self
    }

    /// Render the five-line block spec.md §7 specifies: file, category,
    /// line number, original source line, cause, and suggestion.
    pub fn render(&self) -> String {
        let line = self
            .line
            .map(|l| l.to_string())
            .unwrap_or_else(|| "-1".to_string());
        let source = self.source_text.as_deref().unwrap_or("<source unavailable>");
        format!(
            "file: {}\ncategory: {}\nline: {}\nsource: {}\ncause: {}\nsuggestion: {}\n",
            self.file, self.category, line, source, self.cause, self.suggestion
        )
    }
}

/// Accumulates diagnostics across every pipeline stage for one compilation.
///
/// Uses interior mutability (`RefCell`) because most passes only hold a
/// shared reference to the owning `Program`/`Class` while they also need to
/// report diagnostics — mirroring how `&self` reporting works in this
/// toolchain's other front ends.
#[derive(Default)]
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn render_all(&self) -> String {
        self.diagnostics
            .borrow()
            .iter()
            .map(Diagnostic::render)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Same as [`Self::render_all`], but fills in each diagnostic's original
    /// source line from `map` first, for any diagnostic a pass didn't already
    /// attach `source_text` to directly.
    pub fn render_all_with(&self, map: &SourceMap) -> String {
        self.diagnostics
            .borrow()
            .iter()
            .map(|d| {
                if d.source_text.is_some() {
                    d.render()
                } else {
                    d.clone().recover_source_text_by_path(map).render()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
