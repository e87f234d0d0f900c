//! The Lexeme data model (spec.md §3).
//!
//! A lexeme is one of:
//! - a single character drawn from the fixed break-character alphabet,
//! - a maximal run of non-break characters (an identifier, a numeric
//!   literal digit-run, or a quoted literal kept inclusive of its
//!   delimiters), or
//! - one of the two synthetic families the tokenizer injects: a positional
//!   breadcrumb `` `<N> `` and the always-followed-by-a-fresh-line `{`/`}`.

/// The fixed set of single characters that terminate the lexeme currently
/// being accumulated. Listed exactly as spec.md §3 enumerates them.
pub const BREAK_ALPHABET: &[char] = &[
    '\n', '*', '$', '#', '.', ',', '[', ']', '<', '>', '&', '|', '\t', ' ', '~', '^', '(', ')',
    '@', '%', '/', '=', '+', '-', ';', '\'', '"', '{', '}', ':',
];

pub fn is_break_char(c: char) -> bool {
    BREAK_ALPHABET.contains(&c)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lexeme {
    /// A single break-alphabet character, kept as its own lexeme (e.g.
    /// `(`, `}`, `+`, `.`, `;`). Newlines are represented this way too.
    Char(char),
    /// A maximal run of non-break characters, or a quoted literal (string
    /// or character literal) kept inclusive of its opening/closing quotes.
    Word(String),
    /// A synthetic positional marker: the 1-based source line that the
    /// following lexemes belong to.
    Breadcrumb(u32),
}

impl Lexeme {
    pub fn is_newline(&self) -> bool {
        matches!(self, Lexeme::Char('\n'))
    }

    pub fn is_breadcrumb(&self) -> bool {
        matches!(self, Lexeme::Breadcrumb(_))
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Lexeme::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_word(&self) -> Option<&str> {
        match self {
            Lexeme::Word(w) => Some(w),
            _ => None,
        }
    }

    /// The textual content of this lexeme, the way later passes that
    /// pattern-match on literal keywords (`class`, `public`, `use`, ...)
    /// want to see it.
    pub fn text(&self) -> String {
        match self {
            Lexeme::Char(c) => c.to_string(),
            Lexeme::Word(w) => w.clone(),
            Lexeme::Breadcrumb(n) => format!("`{n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn break_alphabet_matches_spec_listing() {
        assert!(is_break_char('\n'));
        assert!(is_break_char(' '));
        assert!(is_break_char('{'));
        assert!(is_break_char('}'));
        assert!(is_break_char(':'));
        assert!(!is_break_char('a'));
        assert!(!is_break_char('_'));
        assert!(!is_break_char('7'));
    }
}
