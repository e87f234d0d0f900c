//! Line-continuation and statement-terminator normalization (spec.md §4.2).
//!
//! Two independent linear passes over the flat lexeme stream, run in order:
//! fold `\`-newline continuations first, then collapse `;` into the
//! newline-equivalent statement terminator it is.

use crate::lexeme::Lexeme;

/// Removes every `\`-then-newline continuation, keeping the breadcrumb that
/// immediately follows intact so diagnostics on the continued line stay
/// accurate.
pub fn fold_continuations(lexemes: Vec<Lexeme>) -> Vec<Lexeme> {
    let mut out = Vec::with_capacity(lexemes.len());
    let mut i = 0;
    while i < lexemes.len() {
        if let (Lexeme::Word(w), Some(Lexeme::Char('\n'))) =
            (&lexemes[i], lexemes.get(i + 1))
        {
            if let Some(stripped) = w.strip_suffix('\\') {
                if !stripped.is_empty() {
                    out.push(Lexeme::Word(stripped.to_string()));
                }
                i += 2;
                continue;
            }
        }
        out.push(lexemes[i].clone());
        i += 1;
    }
    out
}

/// `;` at end-of-line is dropped outright; `;` elsewhere becomes a newline,
/// since the two are statement-terminator equivalents everywhere but here.
pub fn normalize_terminators(lexemes: Vec<Lexeme>) -> Vec<Lexeme> {
    let mut out = Vec::with_capacity(lexemes.len());
    let mut i = 0;
    while i < lexemes.len() {
        match (&lexemes[i], lexemes.get(i + 1)) {
            (Lexeme::Char(';'), Some(Lexeme::Char('\n'))) => {
                i += 2;
            }
            (Lexeme::Char(';'), _) => {
                out.push(Lexeme::Char('\n'));
                i += 1;
            }
            _ => {
                out.push(lexemes[i].clone());
                i += 1;
            }
        }
    }
    out
}

pub fn normalize(lexemes: Vec<Lexeme>) -> Vec<Lexeme> {
    normalize_terminators(fold_continuations(lexemes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    #[test]
    fn backslash_newline_is_folded() {
        let lexemes = tokenize("foo \\\nbar\n");
        let folded = fold_continuations(lexemes);
        let text: Vec<String> = folded
            .iter()
            .filter(|l| !l.is_breadcrumb())
            .map(|l| l.text())
            .collect();
        assert_eq!(text, vec!["foo", "bar", "\n"]);
    }

    #[test]
    fn running_normalizer_twice_is_a_no_op() {
        let lexemes = normalize(tokenize("a \\\nb; c;\n"));
        let again = normalize(lexemes.clone());
        assert_eq!(lexemes, again);
    }

    #[test]
    fn trailing_semicolon_before_newline_is_dropped() {
        let lexemes = tokenize("return 0;\n");
        let normalized = normalize_terminators(lexemes);
        let text: Vec<String> = normalized
            .iter()
            .filter(|l| !l.is_breadcrumb())
            .map(|l| l.text())
            .collect();
        assert_eq!(text, vec!["return", "0", "\n"]);
    }

    #[test]
    fn mid_line_semicolon_becomes_newline() {
        let lexemes = tokenize("a; b\n");
        let normalized = normalize_terminators(lexemes);
        let text: Vec<String> = normalized
            .iter()
            .filter(|l| !l.is_breadcrumb())
            .map(|l| l.text())
            .collect();
        assert_eq!(text, vec!["a", "\n", "b", "\n"]);
    }
}
