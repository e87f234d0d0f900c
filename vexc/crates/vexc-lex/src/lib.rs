//! Lexical front end: file loading, tokenizing, normalizing, and line
//! assembly (spec.md §2 stages 1–4).

pub mod cursor;
pub mod lexeme;
pub mod line;
pub mod normalize;
pub mod source;
pub mod tokenizer;

pub use lexeme::{is_break_char, Lexeme, BREAK_ALPHABET};
pub use line::{assemble, Line};
pub use normalize::normalize;
pub use tokenizer::tokenize;

use std::path::Path;

use vexc_util::SourceLoadError;

/// Runs stages 1–4 against a file on disk and returns its assembled Lines.
pub fn lex_file(path: &Path) -> Result<Vec<Line>, SourceLoadError> {
    let text = source::load(path)?;
    Ok(lex_str(&text))
}

/// Runs stages 2–4 against source text already in memory, used by the
/// import resolver once it has loaded the imported file's text.
pub fn lex_str(text: &str) -> Vec<Line> {
    assemble(normalize(tokenize(text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_str_produces_organizer_ready_lines() {
        let lines = lex_str("class Main {\n  public static void main() {\n  }\n}\n");
        assert!(!lines.is_empty());
        assert_eq!(lines[0].lexemes[0].as_word(), Some("class"));
    }
}
