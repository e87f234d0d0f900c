//! Top-level driver for stages 5–12: runs the whole organizer over one
//! entry file and returns the assembled `Program`.

use std::path::Path;

use vexc_util::{Diagnostic, FxHashSet, Handler, IndexVec, SourceMap};

use crate::directive::harvest_directives;
use crate::function::organize_classes;
use crate::main_locator::locate_main;
use crate::pipeline::organize_file;
use crate::types::{ClassId, Program};
use crate::use_stmt::harvest_uses;

/// Runs stages 5–12 against `entry`: class extraction, subclass nesting,
/// import resolution, intra-class function organization, directive and use
/// harvesting, and the Main locator. Stage 13 (name numbering) and the
/// operator rewriter (stage 13 in spec.md's list too — both live in
/// `vexc-sem`) run afterward, over the `Program` this returns.
///
/// Also returns the `SourceMap` covering the entry file and every file
/// transitively pulled in by an `import`, so callers can recover each
/// diagnostic's original source line (spec.md §3, §7) before rendering —
/// see `Handler::render_all_with`.
pub fn build_program(entry: &Path, handler: &Handler) -> (Program, bool, SourceMap) {
    let mut arena: IndexVec<ClassId, _> = IndexVec::new();
    let mut visited = FxHashSet::default();
    let mut sources = SourceMap::new();

    let result = organize_file(entry, &mut arena, &mut visited, &mut sources, handler);
    let Some(result) = result else {
        return (Program::new(), false, sources);
    };

    organize_classes(&mut arena, &result.top_level, handler);

    let (directives, residual_globals) = harvest_directives(result.globals, &mut arena, &result.top_level);

    harvest_uses(&mut arena, &result.top_level, handler);

    for line in &residual_globals {
        handler.emit(Diagnostic::syntax(
            entry.display().to_string(),
            line.breadcrumb,
            "a top-level line must be a class, an `import`, or a `#` directive",
        ));
    }

    let main_ok = locate_main(&arena, &result.top_level, handler);

    let program = Program {
        classes: arena,
        top_level: result.top_level,
        globals: residual_globals,
        directives,
    };

    (program, main_ok, sources)
}
