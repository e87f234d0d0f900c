//! Line assembly (spec.md §4.3).
//!
//! Groups the flat, normalized lexeme stream into `Line` records split on
//! `Char('\n')`, discarding the terminator itself. A Line made up of nothing
//! but a breadcrumb is empty and dropped.

use crate::lexeme::Lexeme;

/// An ordered run of lexemes between two newlines, with the newline itself
/// discarded. `breadcrumb` is the source line number the organizer should
/// blame this Line's content on in diagnostics, if one was present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub breadcrumb: Option<u32>,
    pub lexemes: Vec<Lexeme>,
    pub is_declaration: bool,
}

impl Line {
    pub fn first(&self) -> Option<&Lexeme> {
        self.lexemes.first()
    }

    pub fn is_empty(&self) -> bool {
        self.lexemes.is_empty()
    }
}

pub fn assemble(lexemes: Vec<Lexeme>) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut breadcrumb = None;
    let mut current = Vec::new();

    for lexeme in lexemes {
        match lexeme {
            Lexeme::Breadcrumb(n) => {
                if breadcrumb.is_none() {
                    breadcrumb = Some(n);
                }
            }
            Lexeme::Char('\n') => {
                if !current.is_empty() {
                    lines.push(Line {
                        breadcrumb: breadcrumb.take(),
                        lexemes: std::mem::take(&mut current),
                        is_declaration: false,
                    });
                } else {
                    breadcrumb = None;
                }
            }
            other => current.push(other),
        }
    }

    if !current.is_empty() {
        lines.push(Line {
            breadcrumb,
            lexemes: current,
            is_declaration: false,
        });
    }

    lines
}
