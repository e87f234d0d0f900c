//! Import resolver (spec.md §4.6): parsing and path-joining only. The
//! recursive re-invocation of stages 1–6 against the resolved path, and the
//! merge into the importer's class arena, live in `pipeline.rs` — keeping
//! the recursion in one place avoids a parsing module calling back into the
//! driver that calls it.

use std::path::{Component, Path, PathBuf};

use vexc_lex::{Lexeme, Line};

use crate::types::Access;

pub const IMPORT_EXTENSION: &str = "vex";

pub fn is_import_line(line: &Line) -> bool {
    line.first().and_then(|l| l.as_word()) == Some("import")
}

/// Parses the tail of an `import` Line into (ascents, dotted path
/// components). `ascents` is 0 for a single leading `.` (current
/// directory), 1 for two leading dots, and so on. Returns `None` for any
/// malformed path: a missing component run, or a `.` that doesn't sit
/// exactly between the leading-dot run and an alternating word/dot
/// sequence — spec.md §9 leaves mid-path dot semantics undefined and
/// directs implementations to reject them.
pub fn parse_import_line(line: &Line) -> Option<(usize, Vec<String>)> {
    let toks = &line.lexemes;
    if toks.first().and_then(|t| t.as_word()) != Some("import") {
        return None;
    }
    let mut idx = 1;
    let mut dots = 0usize;
    while toks.get(idx) == Some(&Lexeme::Char('.')) {
        dots += 1;
        idx += 1;
    }

    let mut components = Vec::new();
    loop {
        match toks.get(idx) {
            Some(Lexeme::Word(w)) => {
                components.push(w.clone());
                idx += 1;
            }
            _ => break,
        }
        if toks.get(idx) == Some(&Lexeme::Char('.')) {
            idx += 1;
            continue;
        }
        break;
    }

    if idx != toks.len() || components.is_empty() {
        return None;
    }

    let ascents = dots.saturating_sub(1);
    Some((ascents, components))
}

/// Joins `ascents` parent-directory hops from the importing file's
/// directory, then the dotted path components, producing a path with the
/// fixed import extension appended.
pub fn resolve_import_path(importer_path: &Path, ascents: usize, components: &[String]) -> PathBuf {
    let mut dir = importer_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    for _ in 0..ascents {
        dir = dir.parent().map(Path::to_path_buf).unwrap_or(dir);
    }
    let mut path = dir;
    for component in components {
        path.push(component);
    }
    path.set_extension(IMPORT_EXTENSION);
    path
}

/// A best-effort lexical normalization (no filesystem access) to an
/// absolute-or-canonical form prefixed by `./`, used both as the on-disk
/// path to read and as the cycle-detection key.
pub fn normalize_path(path: &Path) -> String {
    let mut buf = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                buf.pop();
            }
            Component::CurDir => {}
            other => buf.push(other.as_os_str()),
        }
    }
    let rendered = buf.to_string_lossy().replace('\\', "/");
    if rendered.starts_with('/') || rendered.starts_with("./") {
        rendered
    } else {
        format!("./{rendered}")
    }
}

/// The access specifier for one link in the synthetic wrapper chain:
/// the innermost (last path component) is `public`, everything enclosing
/// it is `protected` (spec.md §4.6).
pub fn wrapper_access(is_innermost: bool) -> Access {
    if is_innermost {
        Access::Public
    } else {
        Access::Protected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vexc_lex::lex_str;

    fn import_line(src: &str) -> Line {
        lex_str(src).into_iter().next().unwrap()
    }

    #[test]
    fn single_leading_dot_is_current_directory() {
        let line = import_line("import .foo.bar\n");
        let (ascents, components) = parse_import_line(&line).unwrap();
        assert_eq!(ascents, 0);
        assert_eq!(components, vec!["foo".to_string(), "bar".to_string()]);
    }

    #[test]
    fn extra_leading_dots_ascend() {
        let line = import_line("import ...foo\n");
        let (ascents, components) = parse_import_line(&line).unwrap();
        assert_eq!(ascents, 2);
        assert_eq!(components, vec!["foo".to_string()]);
    }

    #[test]
    fn malformed_mid_path_dot_is_rejected() {
        let line = import_line("import .foo..bar\n");
        assert!(parse_import_line(&line).is_none());
    }

    #[test]
    fn resolves_relative_to_importer_directory() {
        let path = resolve_import_path(Path::new("/proj/src/main.vex"), 0, &["foo".to_string(), "bar".to_string()]);
        assert_eq!(path, PathBuf::from("/proj/src/foo/bar.vex"));
    }

    #[test]
    fn ascents_climb_out_of_importer_directory() {
        let path = resolve_import_path(Path::new("/proj/src/main.vex"), 1, &["foo".to_string()]);
        assert_eq!(path, PathBuf::from("/proj/foo.vex"));
    }
}
