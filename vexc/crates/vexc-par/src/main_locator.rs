//! Main locator (spec.md §4.12): asserts that a top-level Class named
//! `Main` exists with a Function named `main`. Diagnostic-only; the
//! organizer has already built the full Program by the time this runs.

use vexc_util::{Diagnostic, Handler, IndexVec};

use crate::types::{Class, ClassId};

pub fn locate_main(arena: &IndexVec<ClassId, Class>, top_level: &[ClassId], handler: &Handler) -> bool {
    let found = top_level.iter().any(|&id| {
        let class = &arena[id];
        class.name == "Main" && class.functions.iter().any(|f| f.name == "main")
    });

    if !found {
        handler.emit(Diagnostic::syntax(
            "*",
            None,
            "no top-level class `Main` with a function `main` was found",
        ));
    }

    found
}
