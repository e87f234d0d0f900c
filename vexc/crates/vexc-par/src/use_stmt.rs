//! Use harvester (spec.md §4.9): pulls `use <dotted.path> [as <alias>]`
//! lines out of each Class's body into its `uses` table, recursing into
//! subclasses.

use vexc_lex::{Lexeme, Line};
use vexc_util::{Diagnostic, Handler, IndexVec};

use crate::types::{Class, ClassId, Use};

fn is_use_line(line: &Line) -> bool {
    line.first().and_then(|l| l.as_word()) == Some("use")
}

/// Parses a dotted identifier chain starting at `toks[*idx]`, advancing
/// `idx` past it. Returns `None` (leaving `idx` unchanged) if `toks[*idx]`
/// isn't a word.
fn parse_dotted_path(toks: &[Lexeme], idx: &mut usize) -> Option<Vec<String>> {
    let mut components = Vec::new();
    let start = *idx;
    loop {
        match toks.get(*idx) {
            Some(Lexeme::Word(w)) => {
                components.push(w.clone());
                *idx += 1;
            }
            _ => break,
        }
        if toks.get(*idx) == Some(&Lexeme::Char('.')) {
            *idx += 1;
            continue;
        }
        break;
    }
    if components.is_empty() {
        *idx = start;
        return None;
    }
    Some(components)
}

fn parse_use_line(line: &Line, file: &str, handler: &Handler) -> Option<Use> {
    let toks = &line.lexemes;
    let mut idx = 1; // skip the leading `use` word
    let Some(path) = parse_dotted_path(toks, &mut idx) else {
        handler.emit(Diagnostic::syntax(file, line.breadcrumb, "malformed `use` path"));
        return None;
    };

    let alias = if toks.get(idx).and_then(|t| t.as_word()) == Some("as") {
        idx += 1;
        match parse_dotted_path(toks, &mut idx) {
            Some(a) => a,
            None => {
                handler.emit(Diagnostic::syntax(file, line.breadcrumb, "missing alias after `as`"));
                return None;
            }
        }
    } else {
        vec![path.last().cloned().expect("path is non-empty")]
    };

    if idx != toks.len() {
        handler.emit(Diagnostic::syntax(file, line.breadcrumb, "trailing tokens after `use` statement"));
        return None;
    }

    Some(Use {
        path,
        alias,
        breadcrumb: line.breadcrumb,
    })
}

fn harvest_one_class(class: &mut Class, handler: &Handler) {
    let lines = std::mem::take(&mut class.body.lines);
    let mut residual = Vec::new();
    let mut uses = Vec::new();
    for line in lines {
        if is_use_line(&line) {
            if let Some(use_) = parse_use_line(&line, &class.file, handler) {
                uses.push(use_);
            }
        } else {
            residual.push(line);
        }
    }
    class.uses = uses;
    class.body.lines = residual;
}

pub fn harvest_uses(arena: &mut IndexVec<ClassId, Class>, top_level: &[ClassId], handler: &Handler) {
    let mut stack: Vec<ClassId> = top_level.to_vec();
    while let Some(id) = stack.pop() {
        harvest_one_class(&mut arena[id], handler);
        stack.extend(arena[id].subclasses.clone());
    }
}
