//! The name numberer (spec.md §4.11, stage 13).
//!
//! Walks a Function's body (after operator rewriting) and coalesces runs of
//! `<id> . <id>` into a single dotted-name lexeme, and a leading `$` into its
//! following lexeme. Every coalesced name that isn't a built-in keyword and
//! doesn't look like a numeric, string, or character literal is assigned a
//! dense per-function ordinal `#<N>`, reused on every later occurrence of the
//! same name within that function.
//!
//! `a.b.c` is numbered as a single name distinct from `a` and from `a.b` —
//! whatever consumes this output downstream has to already know that, since
//! nothing here preserves the original chain structure.

use vexc_util::{FxHashMap, Symbol};
use vexc_lex::Lexeme;
use vexc_par::Function;
use Lexeme::{Char, Word};

const KEYWORD_BUILTINS: &[&str] = &[
    "int", "bool", "float", "short", "long", "double", "char", "void", "if", "while", "for",
    "switch", "case", "return",
];

fn is_numeric_literal(text: &str) -> bool {
    !text.is_empty() && text.split('.').all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

fn is_quoted_literal(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() < 2 {
        return false;
    }
    (text.starts_with('"') && text.ends_with('"')) || (text.starts_with('\'') && text.ends_with('\''))
}

fn is_literal(text: &str) -> bool {
    is_quoted_literal(text) || is_numeric_literal(text)
}

fn coalesce_dotted_chains(tokens: &[Lexeme]) -> Vec<Lexeme> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if let Word(w) = &tokens[i] {
            let mut chain = w.clone();
            let mut j = i + 1;
            while tokens.get(j) == Some(&Char('.')) {
                if let Some(Word(next)) = tokens.get(j + 1) {
                    chain.push('.');
                    chain.push_str(next);
                    j += 2;
                } else {
                    break;
                }
            }
            out.push(Word(chain));
            i = j;
        } else {
            out.push(tokens[i].clone());
            i += 1;
        }
    }
    out
}

fn coalesce_dollar(tokens: &[Lexeme]) -> Vec<Lexeme> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i] == Char('$') {
            if let Some(next) = tokens.get(i + 1) {
                out.push(Word(format!("${}", next.text())));
                i += 2;
                continue;
            }
        }
        out.push(tokens[i].clone());
        i += 1;
    }
    out
}

struct Numberer {
    ordinals: FxHashMap<Symbol, u32>,
    next: u32,
}

impl Numberer {
    fn new() -> Self {
        Self { ordinals: FxHashMap::default(), next: 0 }
    }

    // Interned so that repeat occurrences of the same dotted name within a
    // (potentially large) function body compare as u32s rather than walking
    // the string on every lookup.
    fn ordinal_for(&mut self, name: &str) -> u32 {
        let sym = Symbol::intern(name);
        if let Some(&n) = self.ordinals.get(&sym) {
            return n;
        }
        let n = self.next;
        self.next += 1;
        self.ordinals.insert(sym, n);
        n
    }

    fn rewrite_line(&mut self, tokens: &[Lexeme]) -> Vec<Lexeme> {
        let merged = coalesce_dollar(&coalesce_dotted_chains(tokens));
        merged
            .into_iter()
            .map(|tok| match &tok {
                Word(text) => {
                    if KEYWORD_BUILTINS.contains(&text.as_str()) || is_literal(text) {
                        tok
                    } else {
                        let n = self.ordinal_for(text);
                        Word(format!("#{n}"))
                    }
                }
                _ => tok,
            })
            .collect()
    }
}

pub fn number(function: &mut Function) {
    let mut numberer = Numberer::new();
    for line in function.body.lines.iter_mut() {
        line.lexemes = numberer.rewrite_line(&line.lexemes);
    }
}
