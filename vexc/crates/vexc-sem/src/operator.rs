//! The operator rewriter (spec.md §4.10, stage 12).
//!
//! Three sub-passes over a Function's body, in order:
//!
//! a. compound-assignment expansion (`x += y` becomes `x = x + (y)`),
//! b. declaration splitting (`int x = 5` becomes a declaration Line and a
//!    plain assignment Line), and
//! c. operator canonicalization: two-character operators are coalesced,
//!    leading `~`/`!` and negating `-` are rewritten, `[...]` accessors
//!    become `.splice(...)`/`.getElement(...)` calls, and the remaining
//!    binary operators are rewritten into left-associative method-call
//!    chains by precedence (a small precedence-climbing parser, since the
//!    method-call form this produces is exactly what precedence climbing
//!    already builds one fold at a time).
//!
//! A multi-line array-literal tail (an unmatched `[` that isn't itself an
//! accessor) is folded back onto a single Line first, since everything
//! downstream of tokenizing works one Line at a time.

use vexc_lex::{Line, Lexeme};
use vexc_par::Function;
use Lexeme::{Char, Word};

pub fn rewrite(function: &mut Function) {
    let lines = std::mem::take(&mut function.body.lines);
    let lines = join_unbalanced_brackets(lines);
    let lines = expand_compound_assignments(lines);
    let lines = split_declarations(lines);
    let lines = lines
        .into_iter()
        .map(|mut line| {
            line.lexemes = canonicalize(&line.lexemes);
            line
        })
        .collect();
    function.body.lines = lines;
}

// --- multi-line array literal joining -------------------------------------

fn bracket_balance(tokens: &[Lexeme]) -> i32 {
    tokens.iter().fold(0, |acc, t| match t {
        Char('[') => acc + 1,
        Char(']') => acc - 1,
        _ => acc,
    })
}

fn join_unbalanced_brackets(lines: Vec<Line>) -> Vec<Line> {
    let mut out = Vec::with_capacity(lines.len());
    let mut iter = lines.into_iter();
    while let Some(mut line) = iter.next() {
        while bracket_balance(&line.lexemes) > 0 {
            match iter.next() {
                Some(next) => line.lexemes.extend(next.lexemes),
                None => break,
            }
        }
        out.push(line);
    }
    out
}

// --- (a) compound assignment expansion ------------------------------------

const COMPOUND_OPS: &str = "+-*/%|&^";

fn expand_compound_assignment(tokens: &[Lexeme]) -> Option<Vec<Lexeme>> {
    for j in 0..tokens.len() {
        if tokens[j] != Char('=') {
            continue;
        }
        if j == 0 {
            continue;
        }
        let Char(op) = tokens[j - 1] else { continue };
        if !COMPOUND_OPS.contains(op) {
            continue;
        }
        let twin = (op == '|' || op == '&') && j >= 2 && tokens[j - 2] == Char(op);
        let op_start = if twin { j - 2 } else { j - 1 };
        let lhs = &tokens[..op_start];
        let rhs = &tokens[j + 1..];

        let mut out = lhs.to_vec();
        out.push(Char('='));
        out.extend_from_slice(lhs);
        out.push(Char(op));
        if twin {
            out.push(Char(op));
        }
        out.push(Char('('));
        out.extend_from_slice(rhs);
        out.push(Char(')'));
        return Some(out);
    }
    None
}

fn expand_compound_assignments(lines: Vec<Line>) -> Vec<Line> {
    lines
        .into_iter()
        .map(|mut line| {
            if let Some(rewritten) = expand_compound_assignment(&line.lexemes) {
                line.lexemes = rewritten;
            }
            line
        })
        .collect()
}

// --- (b) declaration splitting ---------------------------------------------

fn is_comparison_char(t: Option<&Lexeme>) -> bool {
    matches!(t, Some(Char('=')) | Some(Char('!')) | Some(Char('<')) | Some(Char('>')))
}

/// The index of the `=` that separates a declaration or assignment's
/// left- and right-hand sides, ignoring anything inside parens and the
/// first or second `=` of `==`, `!=`, `<=`, `>=`.
fn find_assignment_eq(tokens: &[Lexeme]) -> Option<usize> {
    let mut depth = 0i32;
    for (i, t) in tokens.iter().enumerate() {
        match t {
            Char('(') => depth += 1,
            Char(')') => depth -= 1,
            Char('=') if depth == 0 => {
                let prev = if i == 0 { None } else { tokens.get(i - 1) };
                let next_is_eq = tokens.get(i + 1) == Some(&Char('='));
                if !is_comparison_char(prev) && !next_is_eq {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn is_operator_char(c: char) -> bool {
    "+-*/%&|^~!<>=".contains(c)
}

fn looks_like_declaration(tokens: &[Lexeme], eq_idx: usize) -> bool {
    for i in 0..eq_idx {
        match &tokens[i] {
            Char('*') => {
                let next_is_op = matches!(tokens.get(i + 1), Some(Char(c)) if is_operator_char(*c));
                if !next_is_op {
                    return true;
                }
            }
            Char(']') => {
                let next = tokens.get(i + 1);
                let next_is_bracket_or_eq = matches!(next, Some(Char('[')) | Some(Char('=')));
                if !next_is_bracket_or_eq {
                    return true;
                }
            }
            _ => {}
        }
    }
    for i in 0..eq_idx.saturating_sub(1) {
        if matches!(tokens[i], Word(_)) && matches!(tokens[i + 1], Word(_)) {
            return true;
        }
    }
    false
}

fn declaration_name(tokens: &[Lexeme], eq_idx: usize) -> Option<Lexeme> {
    tokens[..eq_idx].iter().rev().find(|t| matches!(t, Word(_))).cloned()
}

fn split_declaration(line: &Line) -> Option<(Line, Line)> {
    let eq_idx = find_assignment_eq(&line.lexemes)?;
    if !looks_like_declaration(&line.lexemes, eq_idx) {
        return None;
    }
    let name = declaration_name(&line.lexemes, eq_idx)?;

    let mut decl_lexemes = line.lexemes[..eq_idx].to_vec();
    decl_lexemes.push(Char('='));
    let decl = Line {
        breadcrumb: line.breadcrumb,
        lexemes: decl_lexemes,
        is_declaration: true,
    };

    let mut assign_lexemes = vec![name];
    assign_lexemes.extend_from_slice(&line.lexemes[eq_idx..]);
    let assign = Line {
        breadcrumb: line.breadcrumb,
        lexemes: assign_lexemes,
        is_declaration: false,
    };

    Some((decl, assign))
}

fn split_declarations(lines: Vec<Line>) -> Vec<Line> {
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        match split_declaration(&line) {
            Some((decl, assign)) => {
                out.push(decl);
                out.push(assign);
            }
            None => out.push(line),
        }
    }
    out
}

// --- (c) operator canonicalization ------------------------------------------

const OPERATOR_WORDS: &[&str] = &["==", "!=", "<=", ">=", "<<", ">>", "<<=", ">>=", "&&", "||"];

fn coalesce_operators(tokens: &[Lexeme]) -> Vec<Lexeme> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if let (Some(Char(a)), Some(Char(b)), Some(Char('='))) =
            (tokens.get(i), tokens.get(i + 1), tokens.get(i + 2))
        {
            if (*a == '<' && *b == '<') || (*a == '>' && *b == '>') {
                out.push(Word(format!("{a}{b}=")));
                i += 3;
                continue;
            }
        }
        if let (Some(Char(a)), Some(Char(b))) = (tokens.get(i), tokens.get(i + 1)) {
            let pair = match (a, b) {
                ('=', '=') | ('!', '=') | ('<', '=') | ('>', '=') | ('<', '<') | ('>', '>')
                | ('&', '&') | ('|', '|') => Some(format!("{a}{b}")),
                _ => None,
            };
            if let Some(s) = pair {
                out.push(Word(s));
                i += 2;
                continue;
            }
        }
        out.push(tokens[i].clone());
        i += 1;
    }
    out
}

fn is_operator_token(t: &Lexeme) -> bool {
    match t {
        Char(c) => "+-*/%|&^~!<>".contains(*c),
        Word(w) => OPERATOR_WORDS.contains(&w.as_str()),
        _ => false,
    }
}

fn ends_operand(t: Option<&Lexeme>) -> bool {
    match t {
        Some(Word(w)) => !OPERATOR_WORDS.contains(&w.as_str()),
        Some(Char(')')) | Some(Char(']')) => true,
        _ => false,
    }
}

/// Leading `~`/`!` becomes binary by synthesizing a `0` left operand, so the
/// precedence climber below can treat every `~`/`!` it sees as an ordinary
/// binary operator (spec.md §4.10's `not`/`logicalNot` precedence-10 entry).
fn insert_unary_zero(tokens: &[Lexeme]) -> Vec<Lexeme> {
    let mut out = Vec::with_capacity(tokens.len() + 1);
    for (i, t) in tokens.iter().enumerate() {
        if matches!(t, Char('~') | Char('!')) {
            let prev = if i == 0 { None } else { tokens.get(i - 1) };
            if !ends_operand(prev) {
                out.push(Word("0".to_string()));
            }
        }
        out.push(t.clone());
    }
    out
}

fn take_negation_operand(tokens: &[Lexeme], start: usize) -> (Vec<Lexeme>, usize) {
    let mut depth = 0i32;
    let mut i = start;
    while i < tokens.len() {
        match &tokens[i] {
            Char('(') | Char('[') => depth += 1,
            Char(')') | Char(']') if depth > 0 => depth -= 1,
            Char(')') | Char(']') | Char('}') | Char('=') if depth == 0 => break,
            t if depth == 0 && is_operator_token(t) => break,
            _ => {}
        }
        i += 1;
    }
    (tokens[start..i].to_vec(), i)
}

/// A `-` preceded by an operator, `=`, `[`, `(`, `,`, `:`, or nothing (start
/// of line) negates rather than subtracts: wrap its operand in
/// `(...).negate()`.
fn wrap_negations(tokens: &[Lexeme]) -> Vec<Lexeme> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i] == Char('-') {
            let prev = if i == 0 { None } else { tokens.get(i - 1) };
            let is_negation = i == 0
                || matches!(
                    prev,
                    Some(Char('=')) | Some(Char('[')) | Some(Char('(')) | Some(Char(',')) | Some(Char(':'))
                )
                || prev.is_some_and(is_operator_token);
            if is_negation {
                let (operand, new_i) = take_negation_operand(tokens, i + 1);
                out.push(Char('('));
                out.extend(operand);
                out.push(Char(')'));
                out.push(Char('.'));
                out.push(Word("negate".to_string()));
                out.push(Char('('));
                out.push(Char(')'));
                i = new_i;
                continue;
            }
        }
        out.push(tokens[i].clone());
        i += 1;
    }
    out
}

fn find_matching_close(tokens: &[Lexeme], open_idx: usize, open_c: char, close_c: char) -> usize {
    let mut depth = 0i32;
    let mut i = open_idx;
    while i < tokens.len() {
        match &tokens[i] {
            Char(c) if *c == open_c => depth += 1,
            Char(c) if *c == close_c => {
                depth -= 1;
                if depth == 0 {
                    return i;
                }
            }
            _ => {}
        }
        i += 1;
    }
    tokens.len().saturating_sub(1)
}

fn top_level_colon(tokens: &[Lexeme]) -> Option<usize> {
    let mut depth = 0i32;
    for (i, t) in tokens.iter().enumerate() {
        match t {
            Char('(') | Char('[') => depth += 1,
            Char(')') | Char(']') => depth -= 1,
            Char(':') if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

fn split_top_level_commas(tokens: &[Lexeme]) -> Vec<Vec<Lexeme>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    let mut depth = 0i32;
    for t in tokens {
        match t {
            Char('(') | Char('[') => {
                depth += 1;
                current.push(t.clone());
            }
            Char(')') | Char(']') => {
                depth -= 1;
                current.push(t.clone());
            }
            Char(',') if depth == 0 => segments.push(std::mem::take(&mut current)),
            _ => current.push(t.clone()),
        }
    }
    segments.push(current);
    segments
}

fn rewrite_segments(tokens: &[Lexeme]) -> Vec<Lexeme> {
    if tokens.is_empty() {
        return Vec::new();
    }
    let segments = split_top_level_commas(tokens);
    let mut out = Vec::new();
    for (idx, seg) in segments.iter().enumerate() {
        if idx > 0 {
            out.push(Char(','));
        }
        out.extend(rewrite_full_expr(seg));
    }
    out
}

fn rewrite_full_expr(tokens: &[Lexeme]) -> Vec<Lexeme> {
    if tokens.is_empty() {
        return Vec::new();
    }
    let (mut out, pos) = parse_expr(tokens, 0, 0);
    out.extend_from_slice(&tokens[pos..]);
    out
}

fn binop_info(tokens: &[Lexeme], pos: usize) -> Option<(u8, &'static str)> {
    match tokens.get(pos)? {
        Word(w) => match w.as_str() {
            "||" => Some((0, "logicalOr")),
            "&&" => Some((1, "logicalAnd")),
            "==" => Some((5, "equals")),
            "!=" => Some((5, "doesNotEqual")),
            ">=" => Some((6, "isGreaterThanOrEqualTo")),
            "<=" => Some((6, "isLessThanOrEqualTo")),
            "<<" => Some((7, "leftShift")),
            ">>" => Some((7, "rightShift")),
            _ => None,
        },
        Char(c) => match c {
            '|' => Some((2, "or")),
            '^' => Some((3, "xor")),
            '&' => Some((4, "and")),
            '>' => Some((6, "isGreaterThan")),
            '<' => Some((6, "isLessThan")),
            '+' => Some((8, "plus")),
            '-' => Some((8, "minus")),
            '%' => Some((9, "mod")),
            '*' => Some((9, "times")),
            '/' => Some((9, "dividedBy")),
            '~' => Some((10, "not")),
            '!' => Some((10, "logicalNot")),
            _ => None,
        },
        _ => None,
    }
}

fn compose_call(lhs: Vec<Lexeme>, method: &str, rhs: Vec<Lexeme>) -> Vec<Lexeme> {
    let mut out = lhs;
    out.push(Char('.'));
    out.push(Word(method.to_string()));
    out.push(Char('('));
    out.extend(rhs);
    out.push(Char(')'));
    out
}

fn parse_expr(tokens: &[Lexeme], pos: usize, min_prec: u8) -> (Vec<Lexeme>, usize) {
    let (mut lhs, mut pos) = parse_atom(tokens, pos);
    while let Some((prec, method)) = binop_info(tokens, pos) {
        if prec < min_prec {
            break;
        }
        let (rhs, new_pos) = parse_expr(tokens, pos + 1, prec + 1);
        pos = new_pos;
        lhs = compose_call(lhs, method, rhs);
    }
    (lhs, pos)
}

/// One operand: a parenthesized group or a single token, followed by any
/// run of postfix `(...)` calls, `[...]` accessors, and `.name` member
/// access (the dotted chain itself is left alone here — coalescing it into
/// one lexeme is the name numberer's job, stage 13).
fn parse_atom(tokens: &[Lexeme], pos: usize) -> (Vec<Lexeme>, usize) {
    let mut out = Vec::new();
    let mut pos = pos;
    if pos >= tokens.len() {
        return (out, pos);
    }

    if tokens[pos] == Char('(') {
        let close = find_matching_close(tokens, pos, '(', ')');
        let inner = &tokens[pos + 1..close];
        out.push(Char('('));
        out.extend(rewrite_segments(inner));
        out.push(Char(')'));
        pos = close + 1;
    } else {
        out.push(tokens[pos].clone());
        pos += 1;
    }

    loop {
        match tokens.get(pos) {
            Some(Char('(')) => {
                let close = find_matching_close(tokens, pos, '(', ')');
                let inner = &tokens[pos + 1..close];
                out.push(Char('('));
                out.extend(rewrite_segments(inner));
                out.push(Char(')'));
                pos = close + 1;
            }
            Some(Char('[')) => {
                let close = find_matching_close(tokens, pos, '[', ']');
                let inner = &tokens[pos + 1..close];
                if inner.is_empty() {
                    // An array-type marker, not an accessor; leave it alone.
                    break;
                }
                if let Some(colon_idx) = top_level_colon(inner) {
                    let lo = &inner[..colon_idx];
                    let hi = &inner[colon_idx + 1..];
                    let lo_out = if lo.is_empty() { vec![Word("0".to_string())] } else { rewrite_segments(lo) };
                    let hi_out = if hi.is_empty() { vec![Word("0".to_string())] } else { rewrite_segments(hi) };
                    out.push(Char('.'));
                    out.push(Word("splice".to_string()));
                    out.push(Char('('));
                    out.extend(lo_out);
                    out.push(Char(','));
                    out.extend(hi_out);
                    out.push(Char(')'));
                } else {
                    out.push(Char('.'));
                    out.push(Word("getElement".to_string()));
                    out.push(Char('('));
                    out.extend(rewrite_segments(inner));
                    out.push(Char(')'));
                }
                pos = close + 1;
            }
            Some(Char('.')) => {
                if let Some(Word(_)) = tokens.get(pos + 1) {
                    out.push(Char('.'));
                    out.push(tokens[pos + 1].clone());
                    pos += 2;
                } else {
                    break;
                }
            }
            _ => break,
        }
    }

    (out, pos)
}

/// Runs the whole canonicalization sub-pass over one Line's tokens: coalesce
/// two-character operators, rewrite unary `~`/`!`/`-`, then repeatedly pull
/// the next maximal expression out of the remaining tokens (so a leading
/// keyword like `return` or `if` is left as its own atom instead of being
/// swallowed into the expression that follows it).
fn canonicalize(tokens: &[Lexeme]) -> Vec<Lexeme> {
    let tokens = coalesce_operators(tokens);
    let tokens = insert_unary_zero(&tokens);
    let tokens = wrap_negations(&tokens);

    let mut out = Vec::with_capacity(tokens.len());
    let mut pos = 0;
    while pos < tokens.len() {
        let (seg, new_pos) = parse_expr(&tokens, pos, 0);
        if new_pos == pos {
            out.push(tokens[pos].clone());
            pos += 1;
            continue;
        }
        out.extend(seg);
        pos = new_pos;
    }
    out
}
