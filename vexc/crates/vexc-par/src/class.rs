//! Class extractor (spec.md §4.4).
//!
//! Scans every Line looking for a class header, regardless of whether that
//! Line also falls inside an already-extracted outer class's brace span —
//! a textually nested class header matches just as well as a top-level
//! one, which is what lets spec.md §4.5's subclass nester later find every
//! nested class already present in the flat list it receives. A `bool`
//! per-line consumed mask (spec.md's `global_scope` bit array) tracks which
//! Lines ended up inside some class's span, purely to compute the residual
//! list handed to later passes.

use vexc_lex::{Lexeme, Line};
use vexc_util::{Diagnostic, Handler};

use crate::types::{Access, Block, Class};

const CLASS_KEYWORDS: &[&str] = &["public", "private", "protected", "static", "class", "extends"];

fn word_at(toks: &[Lexeme], idx: usize) -> Option<&str> {
    match toks.get(idx) {
        Some(Lexeme::Word(w)) => Some(w.as_str()),
        _ => None,
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && !CLASS_KEYWORDS.contains(&s)
        && s.chars().next().map_or(false, |c| c.is_alphabetic() || c == '_')
        && s.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn brace_count(line: &Line) -> (i32, i32) {
    let mut opens = 0;
    let mut closes = 0;
    for lexeme in &line.lexemes {
        match lexeme {
            Lexeme::Char('{') => opens += 1,
            Lexeme::Char('}') => closes += 1,
            _ => {}
        }
    }
    (opens, closes)
}

fn is_class_header_start(line: &Line) -> bool {
    matches!(
        line.first().and_then(|l| l.as_word()),
        Some("public" | "private" | "protected" | "static" | "class")
    )
}

fn diag(handler: &Handler, file: &str, line: Option<u32>, cause: impl Into<String>) {
    handler.emit(Diagnostic::syntax(file, line, cause));
}

/// Attempts to parse a class header starting at `lines[start]` and, on
/// success, locate the matching closing `}` line by a brace-depth scan.
/// Returns the constructed `Class` and the index of its closing line.
fn try_extract_class(lines: &[Line], start: usize, file: &str, handler: &Handler) -> Option<(Class, usize)> {
    let header = &lines[start];
    let toks = &header.lexemes;
    let mut idx = 0;

    let mut access = Access::Private;
    match word_at(toks, idx) {
        Some("public") => {
            access = Access::Public;
            idx += 1;
        }
        Some("private") => {
            access = Access::Private;
            idx += 1;
        }
        _ => {}
    }

    if word_at(toks, idx) == Some("static") {
        diag(handler, file, header.breadcrumb, "`static` is not permitted on a class");
        return None;
    }
    if word_at(toks, idx) == Some("protected") {
        diag(handler, file, header.breadcrumb, "`protected` is not permitted on a class");
        return None;
    }
    if matches!(word_at(toks, idx), Some("public" | "private")) {
        diag(handler, file, header.breadcrumb, "conflicting access specifiers on class header");
        return None;
    }
    if word_at(toks, idx) != Some("class") {
        diag(handler, file, header.breadcrumb, "expected `class` keyword in class header");
        return None;
    }
    idx += 1;

    let name = match word_at(toks, idx) {
        Some(n) if is_identifier(n) => {
            idx += 1;
            n.to_string()
        }
        _ => {
            diag(handler, file, header.breadcrumb, "missing class name");
            return None;
        }
    };

    let mut parents = Vec::new();
    if word_at(toks, idx) == Some("extends") {
        idx += 1;
        loop {
            match word_at(toks, idx) {
                Some(p) if is_identifier(p) => {
                    parents.push(p.to_string());
                    idx += 1;
                }
                _ => {
                    diag(handler, file, header.breadcrumb, "missing parent class name after `extends`");
                    return None;
                }
            }
            if toks.get(idx) == Some(&Lexeme::Char(',')) {
                idx += 1;
                continue;
            }
            break;
        }
    }

    if idx + 1 != toks.len() || toks.get(idx) != Some(&Lexeme::Char('{')) {
        diag(
            handler,
            file,
            header.breadcrumb,
            "expected `{` as the last token of the class header",
        );
        return None;
    }

    let mut depth = 1i32;
    let mut end = lines.len() - 1;
    let mut balanced = false;
    for (j, line) in lines.iter().enumerate().skip(start + 1) {
        let (opens, closes) = brace_count(line);
        depth += opens - closes;
        if depth <= 0 {
            end = j;
            balanced = true;
            break;
        }
    }
    if !balanced {
        diag(
            handler,
            file,
            header.breadcrumb,
            "unbalanced `{`/`}` in class body, treated as extending to end of file",
        );
    }

    let mut class = Class::new(name, file.to_string(), header.breadcrumb);
    class.access = access;
    class.parents = parents;
    class.end_breadcrumb = lines[end].breadcrumb;
    class.body_start = start;
    class.body_end = end;
    class.body = Block::new(lines[start + 1..=end].to_vec());
    Some((class, end))
}

/// Runs the extractor over a flat Line list, returning every Class found
/// (top-level and textually nested alike, in file order) plus the
/// residual Lines that belonged to no class (imports, directives, or
/// malformed lines destined for a later diagnostic).
pub fn extract_classes(lines: Vec<Line>, file: &str, handler: &Handler) -> (Vec<Class>, Vec<Line>) {
    let n = lines.len();
    let mut consumed = vec![false; n];
    let mut classes = Vec::new();
    let mut i = 0;
    while i < n {
        if is_class_header_start(&lines[i]) {
            if let Some((class, end)) = try_extract_class(&lines, i, file, handler) {
                for slot in consumed.iter_mut().take(end + 1).skip(i) {
                    *slot = true;
                }
                classes.push(class);
                // Keep scanning from the very next line rather than past
                // `end`: a textually nested class header inside this span
                // still matches independently, which is how spec.md §4.5's
                // subclass nester later finds it already present in the
                // flat list.
            }
        }
        i += 1;
    }

    let residual = lines
        .into_iter()
        .zip(consumed)
        .filter(|(_, used)| !used)
        .map(|(line, _)| line)
        .collect();

    (classes, residual)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vexc_lex::lex_str;

    #[test]
    fn minimal_class_is_extracted() {
        let lines = lex_str("class Main {\n void main() {\n return 0\n }\n}\n");
        let handler = Handler::new();
        let (classes, residual) = extract_classes(lines, "main.vex", &handler);
        assert!(!handler.has_errors());
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].name, "Main");
        assert!(residual.is_empty());
    }

    #[test]
    fn inheritance_and_nested_subclass_are_both_extracted() {
        let lines = lex_str("public class A extends B, C {\n private class D {\n }\n}\n");
        let handler = Handler::new();
        let (classes, _residual) = extract_classes(lines, "a.vex", &handler);
        assert!(!handler.has_errors());
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0].name, "A");
        assert_eq!(classes[0].parents, vec!["B".to_string(), "C".to_string()]);
        assert_eq!(classes[0].access, Access::Public);
        assert_eq!(classes[1].name, "D");
        assert_eq!(classes[1].access, Access::Private);
    }

    #[test]
    fn static_on_class_is_rejected() {
        let lines = lex_str("static class A {\n}\n");
        let handler = Handler::new();
        let (classes, _) = extract_classes(lines, "a.vex", &handler);
        assert!(classes.is_empty());
        assert!(handler.has_errors());
    }

    #[test]
    fn protected_on_class_is_always_forbidden() {
        let lines = lex_str("protected class A {\n}\n");
        let handler = Handler::new();
        let (classes, residual) = extract_classes(lines, "a.vex", &handler);
        assert!(classes.is_empty());
        assert!(handler.has_errors());
        assert!(!residual.is_empty());
    }

    #[test]
    fn unbalanced_class_body_consumes_to_eof_with_diagnostic() {
        let lines = lex_str("class A {\n void f() {\n");
        let handler = Handler::new();
        let (classes, _) = extract_classes(lines, "a.vex", &handler);
        assert_eq!(classes.len(), 1);
        assert!(handler.has_errors());
    }

    #[test]
    fn missing_class_name_is_diagnosed() {
        let lines = lex_str("class {\n}\n");
        let handler = Handler::new();
        let (classes, _) = extract_classes(lines, "a.vex", &handler);
        assert!(classes.is_empty());
        assert!(handler.has_errors());
    }
}
