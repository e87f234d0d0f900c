//! Intra-class organizer (spec.md §4.7): partitions one Class's body into
//! Function records (with an optional paired `$`-prefixed test function),
//! recursing into subclasses. Directive and use-alias lines are left where
//! they are — harvested by the later, dedicated passes.

use vexc_lex::{Lexeme, Line};
use vexc_util::{Diagnostic, Handler, IndexVec};

use crate::types::{Access, Block, Class, ClassId, Function};

fn word_at(toks: &[Lexeme], idx: usize) -> Option<&str> {
    match toks.get(idx) {
        Some(Lexeme::Word(w)) => Some(w.as_str()),
        _ => None,
    }
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

fn is_sole_close_brace(line: &Line) -> bool {
    line.lexemes.len() == 1 && line.lexemes[0] == Lexeme::Char('}')
}

fn diag(handler: &Handler, file: &str, line: Option<u32>, cause: impl Into<String>) {
    handler.emit(Diagnostic::syntax(file, line, cause));
}

fn is_function_header(line: &Line) -> bool {
    line.lexemes.last() == Some(&Lexeme::Char('{')) && line.first() != Some(&Lexeme::Char('$'))
}

/// Balanced-brace scan starting at depth 1 across `lines[from..]`. Returns
/// the index of the line that closes the block, or `lines.len() - 1` with
/// `false` if the block never balances (treated as extending to EOF).
fn scan_to_close(lines: &[Line], from: usize) -> (usize, bool) {
    let mut depth = 1i32;
    for (j, line) in lines.iter().enumerate().skip(from) {
        let (opens, closes) = brace_count(line);
        depth += opens - closes;
        if depth <= 0 {
            return (j, true);
        }
    }
    (lines.len() - 1, false)
}

fn strip_trailing_close(mut lines: Vec<Line>) -> Vec<Line> {
    if lines.last().map(is_sole_close_brace) == Some(true) {
        lines.pop();
    }
    lines
}

fn try_extract_function(lines: &[Line], start: usize, file: &str, handler: &Handler) -> Option<(Function, usize)> {
    let header = &lines[start];
    let toks = &header.lexemes;
    if toks.len() < 3 {
        diag(handler, file, header.breadcrumb, "malformed function header");
        return None;
    }
    let close_idx = toks.len() - 2;
    if toks.get(close_idx) != Some(&Lexeme::Char(')')) {
        diag(handler, file, header.breadcrumb, "missing `)` before `{` in function header");
        return None;
    }

    let mut depth = 1i32;
    let mut open_idx = None;
    for k in (0..close_idx).rev() {
        match toks[k] {
            Lexeme::Char(')') => depth += 1,
            Lexeme::Char('(') => {
                depth -= 1;
                if depth == 0 {
                    open_idx = Some(k);
                    break;
                }
            }
            _ => {}
        }
    }
    let open_idx = match open_idx {
        Some(i) => i,
        None => {
            diag(handler, file, header.breadcrumb, "missing `(` before parameter list");
            return None;
        }
    };
    if open_idx == 0 {
        diag(handler, file, header.breadcrumb, "missing function name");
        return None;
    }
    let name_idx = open_idx - 1;
    let name = match word_at(toks, name_idx) {
        Some(n) => n.to_string(),
        None => {
            diag(handler, file, header.breadcrumb, "missing function name");
            return None;
        }
    };

    let params = toks[open_idx + 1..close_idx].to_vec();

    let mut idx = 0;
    let mut access = Access::Private;
    if matches!(word_at(toks, idx), Some("public" | "private" | "protected")) {
        access = match word_at(toks, idx) {
            Some("public") => Access::Public,
            Some("protected") => Access::Protected,
            _ => Access::Private,
        };
        idx += 1;
    }
    let mut is_static = false;
    if word_at(toks, idx) == Some("static") {
        is_static = true;
        idx += 1;
    }
    let return_type = if idx < name_idx {
        toks[idx..name_idx].to_vec()
    } else {
        Vec::new()
    };

    let (body_end, balanced) = scan_to_close(lines, start + 1);
    if !balanced {
        diag(handler, file, header.breadcrumb, "unclosed function body, treated as extending to end of file");
    }

    let mut function = Function::new(name, header.breadcrumb);
    function.access = access;
    function.is_static = is_static;
    function.params = params;
    function.return_type = return_type;
    function.body = Block::new(strip_trailing_close(lines[start + 1..=body_end].to_vec()));

    let mut consumed_through = body_end;

    if let Some(candidate) = lines.get(body_end + 1) {
        if candidate.lexemes == [Lexeme::Char('$'), Lexeme::Char('{')] {
            let (test_end, test_balanced) = scan_to_close(lines, body_end + 2);
            if !test_balanced {
                diag(
                    handler,
                    file,
                    candidate.breadcrumb,
                    "unclosed paired test-function body, treated as extending to end of file",
                );
            }
            let mut test_fn = Function::new(format!("${}", function.name), candidate.breadcrumb);
            test_fn.return_type = vec![Lexeme::Word("bool".to_string())];
            test_fn.params = function.params.clone();
            test_fn.body = Block::new(strip_trailing_close(
                lines.get(body_end + 2..=test_end).unwrap_or(&[]).to_vec(),
            ));
            function.test_fn = Some(Box::new(test_fn));
            consumed_through = test_end;
        }
    }

    Some((function, consumed_through))
}

pub fn extract_functions(lines: Vec<Line>, file: &str, handler: &Handler) -> (Vec<Function>, Vec<Line>) {
    let n = lines.len();
    let mut functions = Vec::new();
    let mut residual = Vec::new();
    let mut i = 0;
    while i < n {
        if is_function_header(&lines[i]) {
            if let Some((function, end)) = try_extract_function(&lines, i, file, handler) {
                functions.push(function);
                i = end + 1;
                continue;
            }
        }
        residual.push(lines[i].clone());
        i += 1;
    }
    (functions, residual)
}

fn organize_one_class(class: &mut Class, handler: &Handler) {
    let lines = strip_trailing_close(std::mem::take(&mut class.body.lines));
    let (functions, residual) = extract_functions(lines, &class.file, handler);
    class.functions = functions;
    class.body.lines = residual;
}

/// Recurses depth-first over every Class reachable from `top_level`,
/// organizing each one's body into Functions (spec.md §4.7: "recurses into
/// subclasses last").
pub fn organize_classes(arena: &mut IndexVec<ClassId, Class>, top_level: &[ClassId], handler: &Handler) {
    let mut stack: Vec<ClassId> = top_level.to_vec();
    while let Some(id) = stack.pop() {
        organize_one_class(&mut arena[id], handler);
        stack.extend(arena[id].subclasses.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vexc_lex::lex_str;

    #[test]
    fn simple_function_is_extracted() {
        let lines = strip_trailing_close(lex_str("void main ( ) {\n return 0\n }\n}\n"));
        let handler = Handler::new();
        let (functions, residual) = extract_functions(lines, "a.vex", &handler);
        assert!(!handler.has_errors());
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].name, "main");
        assert!(functions[0].params.is_empty());
        assert!(residual.is_empty());
    }

    #[test]
    fn paired_test_function_is_collected() {
        let src = "bool isValid ( int x ) {\n return x\n }\n$ {\n return x\n }\n}\n";
        let lines = strip_trailing_close(lex_str(src));
        let handler = Handler::new();
        let (functions, _residual) = extract_functions(lines, "a.vex", &handler);
        assert_eq!(functions.len(), 1);
        let test_fn = functions[0].test_fn.as_ref().unwrap();
        assert_eq!(test_fn.name, "$isValid");
        assert_eq!(test_fn.return_type, vec![Lexeme::Word("bool".to_string())]);
    }

    #[test]
    fn missing_close_paren_is_diagnosed() {
        let lines = strip_trailing_close(lex_str("void main ( {\n}\n}\n"));
        let handler = Handler::new();
        let (functions, _residual) = extract_functions(lines, "a.vex", &handler);
        assert!(functions.is_empty());
        assert!(handler.has_errors());
    }
}
