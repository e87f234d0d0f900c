//! Directive harvester (spec.md §4.8): pulls every `#`-prefixed Line out of
//! the global residual, every Class body, and every Function body
//! (including paired test functions), recursing into subclasses.

use vexc_lex::Line;
use vexc_util::IndexVec;

use crate::types::{Class, ClassId, Directive, Function};

fn is_directive_line(line: &Line) -> bool {
    line.first().and_then(|l| l.as_char()) == Some('#')
}

fn pull_directives(lines: Vec<Line>) -> (Vec<Directive>, Vec<Line>) {
    let mut directives = Vec::new();
    let mut residual = Vec::new();
    for line in lines {
        if is_directive_line(&line) {
            directives.push(Directive { line });
        } else {
            residual.push(line);
        }
    }
    (directives, residual)
}

fn harvest_function(function: &mut Function) {
    let lines = std::mem::take(&mut function.body.lines);
    let (directives, residual) = pull_directives(lines);
    function.directives = directives;
    function.body.lines = residual;
    if let Some(test_fn) = function.test_fn.as_mut() {
        harvest_function(test_fn);
    }
}

fn harvest_class(class: &mut Class) {
    let lines = std::mem::take(&mut class.body.lines);
    let (directives, residual) = pull_directives(lines);
    class.directives = directives;
    class.body.lines = residual;
    for function in &mut class.functions {
        harvest_function(function);
    }
}

/// Harvests the global residual list in place and every reachable Class.
pub fn harvest_directives(
    globals: Vec<Line>,
    arena: &mut IndexVec<ClassId, Class>,
    top_level: &[ClassId],
) -> (Vec<Directive>, Vec<Line>) {
    let mut stack: Vec<ClassId> = top_level.to_vec();
    while let Some(id) = stack.pop() {
        harvest_class(&mut arena[id]);
        stack.extend(arena[id].subclasses.clone());
    }
    pull_directives(globals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vexc_lex::lex_str;

    #[test]
    fn global_directives_are_pulled_out() {
        let lines = lex_str("# pragma once\nimport .x\n");
        let (directives, residual) = pull_directives(lines);
        assert_eq!(directives.len(), 1);
        assert_eq!(residual.len(), 1);
    }

    #[test]
    fn function_directives_are_harvested_from_body() {
        let mut function = Function::new("f".to_string(), Some(1));
        function.body.lines = lex_str("# inline\nreturn 0\n");
        harvest_function(&mut function);
        assert_eq!(function.directives.len(), 1);
        assert_eq!(function.body.lines.len(), 1);
    }
}
