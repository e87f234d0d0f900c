//! Fluent construction of [`super::Diagnostic`] values.
//!
//! Most call sites only need [`super::Diagnostic::syntax`], but passes that
//! attach both a cause and a remediation in separate steps (the class and
//! function header parsers do this fairly often) read better with the
//! builder.

use super::{Category, Diagnostic};

pub struct DiagnosticBuilder {
    file: String,
    line: Option<u32>,
    cause: String,
    suggestion: String,
    source_text: Option<String>,
}

impl DiagnosticBuilder {
    pub fn syntax(file: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: None,
            cause: cause.into(),
            suggestion: String::new(),
            source_text: None,
        }
    }

    pub fn line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = suggestion.into();
        self
    }

    pub fn source_text(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    pub fn build(self) -> Diagnostic {
        Diagnostic {
            file: self.file,
            category: Category::Syntax,
            line: self.line,
            source_text: self.source_text,
            cause: self.cause,
            suggestion: self.suggestion,
        }
    }
}
