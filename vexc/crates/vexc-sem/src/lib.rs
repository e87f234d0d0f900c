//! vexc-sem - the rewriter.
//!
//! Runs over the `Program` vexc-par assembles, mutating each Function's body
//! in place: operator rewriting (stage 12 of the front-end pipeline) and
//! name numbering (stage 13). Neither pass produces diagnostics — by the
//! time a Function exists, its body is already a well-formed Line stream;
//! these two passes are pure token-shape transforms over it.

pub mod numbering;
pub mod operator;

use vexc_par::{Function, Program};

/// Runs stages 12 and 13 over every Function reachable from `program`,
/// recursing through subclasses and through the paired test function a `$`
/// function attaches to its subject.
pub fn rewrite_program(program: &mut Program) {
    let mut stack: Vec<_> = program.top_level.clone();
    while let Some(id) = stack.pop() {
        let class = &mut program.classes[id];
        stack.extend(class.subclasses.iter().copied());
        for function in class.functions.iter_mut() {
            rewrite_function(function);
        }
    }
}

fn rewrite_function(function: &mut Function) {
    operator::rewrite(function);
    numbering::number(function);
    if let Some(test_fn) = function.test_fn.as_mut() {
        rewrite_function(test_fn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vexc_util::Handler;

    #[test]
    fn minimal_class_return_statement_is_untouched() {
        let handler = Handler::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.vex");
        std::fs::write(&path, "class Main {\n void main() {\n return 0\n }\n}\n").unwrap();
        let (mut program, main_ok, _sources) = vexc_par::build_program(&path, &handler);
        assert!(main_ok);
        rewrite_program(&mut program);

        let main_class = &program.classes[program.top_level[0]];
        let main_fn = &main_class.functions[0];
        assert_eq!(main_fn.body.lines.len(), 1);
        let tokens: Vec<_> = main_fn.body.lines[0].lexemes.iter().map(|l| l.text()).collect();
        assert_eq!(tokens, vec!["return".to_string(), "0".to_string()]);
    }
}
