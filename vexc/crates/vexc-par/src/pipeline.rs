//! Stages 1–7: load a file, extract its classes, nest its subclasses, and
//! recursively fold in its imports. This is the only module that recurses
//! across file boundaries, so the import-visited set and the shared class
//! arena are threaded through it explicitly (spec.md §5, §9 — "no
//! process-wide state required").

use std::path::Path;

use vexc_lex::Line;
use vexc_util::{Diagnostic, FxHashSet, Handler, IndexVec, SourceMap};

use crate::class::extract_classes;
use crate::import::{self, parse_import_line};
use crate::subclass::nest_subclasses;
use crate::types::{Class, ClassId};

/// The result of resolving one file through stages 1–7: the `ClassId`s of
/// its top-level classes (already pushed into `arena`) and whatever global
/// Lines belonged to no class and weren't consumed as an import.
pub struct FileResult {
    pub top_level: Vec<ClassId>,
    pub globals: Vec<Line>,
}

/// Pushes `classes` into `arena` in order, remapping each class's locally
/// numbered `subclasses` (set by [`nest_subclasses`]) into arena-relative
/// `ClassId`s. Returns the `ClassId` assigned to each input index.
fn commit_to_arena(classes: Vec<Class>, arena: &mut IndexVec<ClassId, Class>) -> Vec<ClassId> {
    let base = arena.len() as u32;
    let n = classes.len();
    let mut ids = Vec::with_capacity(n);
    for mut class in classes {
        class.subclasses = class
            .subclasses
            .into_iter()
            .map(|local| ClassId(base + local as u32))
            .collect();
        ids.push(arena.push(class));
    }
    ids
}

/// Runs stages 1–7 against `path`, recursively resolving any `import`
/// lines it contains. `visited` guarantees each file is opened at most
/// once across the whole recursive invocation (spec.md §3, §4.6).
/// Every file actually opened is registered into `sources` under the same
/// path string its diagnostics carry, so a diagnostic raised against any
/// line of it can later recover that line's original text (spec.md §3, §7).
pub fn organize_file(
    path: &Path,
    arena: &mut IndexVec<ClassId, Class>,
    visited: &mut FxHashSet<String>,
    sources: &mut SourceMap,
    handler: &Handler,
) -> Option<FileResult> {
    let key = import::normalize_path(path);
    if visited.contains(&key) {
        return None;
    }
    visited.insert(key);

    let file = path.display().to_string();
    let text = match vexc_lex::source::load(path) {
        Ok(text) => text,
        Err(err) => {
            handler.emit(Diagnostic::syntax(
                "*",
                None,
                format!("could not open source file `{file}`: {err}"),
            ));
            return None;
        }
    };
    sources.add_file(file.clone(), text.clone());
    let lines = vexc_lex::lex_str(&text);

    let (mut classes, residual) = extract_classes(lines, &file, handler);
    let local_top_level = nest_subclasses(&mut classes);
    let ids = commit_to_arena(classes, arena);
    let mut top_level: Vec<ClassId> = local_top_level.into_iter().map(|i| ids[i]).collect();

    let mut globals = Vec::new();
    for line in residual {
        if !import::is_import_line(&line) {
            globals.push(line);
            continue;
        }
        let Some((ascents, components)) = parse_import_line(&line) else {
            handler.emit(Diagnostic::syntax(
                &file,
                line.breadcrumb,
                "malformed import path",
            ));
            continue;
        };
        let imported_path = import::resolve_import_path(path, ascents, &components);
        if let Some(result) = organize_file(&imported_path, arena, visited, sources, handler) {
            let wrapper = wrap_in_synthetic_classes(&file, &components, result.top_level, arena);
            top_level.push(wrapper);
        }
        // Already-visited imports (cycle guard) simply drop the line: its
        // classes already live in the arena from the first visit.
    }

    Some(FileResult { top_level, globals })
}

/// Wraps `inner` (an imported file's top-level classes) in a chain of
/// synthetic Classes named after `components`, outermost first. The
/// innermost wrapper adopts `inner` as its subclasses; the chain itself is
/// a straight line of single-child wrappers.
fn wrap_in_synthetic_classes(
    importer_file: &str,
    components: &[String],
    inner: Vec<ClassId>,
    arena: &mut IndexVec<ClassId, Class>,
) -> ClassId {
    let mut next_child: Option<ClassId> = None;
    for (i, name) in components.iter().enumerate().rev() {
        let mut wrapper = Class::new(name.clone(), importer_file.to_string(), None);
        wrapper.is_global = false;
        let is_innermost = i == components.len() - 1;
        wrapper.access = import::wrapper_access(is_innermost);
        wrapper.subclasses = if is_innermost {
            inner.clone()
        } else {
            vec![next_child.expect("non-innermost wrapper always has a child")]
        };
        let id = arena.push(wrapper);
        next_child = Some(id);
    }
    next_child.expect("components is never empty for a parsed import line")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(dir: &std::path::Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn import_cycle_terminates_and_opens_each_file_once() {
        let dir = tempfile::tempdir().unwrap();
        write_temp(dir.path(), "a.vex", "import .b\nclass A {\n}\n");
        let b_path = write_temp(dir.path(), "b.vex", "import .a\nclass B {\n}\n");
        let a_path = dir.path().join("a.vex");

        let mut arena = IndexVec::new();
        let mut visited = vexc_util::FxHashSet::default();
        let mut sources = vexc_util::SourceMap::new();
        let handler = Handler::new();

        let result = organize_file(&a_path, &mut arena, &mut visited, &mut sources, &handler).unwrap();

        // a.vex, b.vex each counted exactly once.
        assert_eq!(visited.len(), 2);
        // a's own class A plus one synthetic wrapper for `import .b`.
        assert_eq!(result.top_level.len(), 2);
        assert_eq!(
            sources.line_text_for_path(&a_path.display().to_string(), 1),
            Some("import .b")
        );
        assert_eq!(
            sources.line_text_for_path(&b_path.display().to_string(), 2),
            Some("class B {")
        );
        assert!(result.globals.is_empty());
        let _ = b_path;
    }

    #[test]
    fn synthetic_wrapper_chain_matches_path_components() {
        let dir = tempfile::tempdir().unwrap();
        write_temp(dir.path(), "util.vex", "class Helper {\n}\n");
        let main_path = write_temp(dir.path(), "main.vex", "import .util\nclass Main {\n}\n");

        let mut arena = IndexVec::new();
        let mut visited = vexc_util::FxHashSet::default();
        let mut sources = vexc_util::SourceMap::new();
        let handler = Handler::new();
        let result = organize_file(&main_path, &mut arena, &mut visited, &mut sources, &handler).unwrap();

        assert_eq!(result.top_level.len(), 2);
        let wrapper_id = result.top_level[1];
        let wrapper = &arena[wrapper_id];
        assert_eq!(wrapper.name, "util");
        assert_eq!(wrapper.access, crate::types::Access::Public);
        assert_eq!(wrapper.subclasses.len(), 1);
        assert_eq!(arena[wrapper.subclasses[0]].name, "Helper");
    }
}
