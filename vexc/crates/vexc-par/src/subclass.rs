//! Subclass nester (spec.md §4.5).
//!
//! The class extractor hands back every class in file order, nested ones
//! included, each still carrying the full literal text of any class
//! textually inside it. This pass figures out the enclosure relationships
//! from each class's position in the flat `Line` list the extractor
//! scanned, assigns each nested class to its innermost enclosing parent,
//! and splices the nested class's lines back out of the parent's body so
//! they aren't processed twice by later passes.
//!
//! Enclosure is tested by flat-list *position* (`body_start`/`body_end`),
//! not by breadcrumb value: several class headers and closing braces can
//! share one physical source line (e.g. `class A { class B { } }` on a
//! single line), in which case their breadcrumbs are all equal and a
//! breadcrumb-range test can't tell them apart. Positions in the flat list
//! are always unique and strictly increasing in scan order, so they don't
//! have that problem.

use crate::types::Class;

/// Returns the indices (into the input order) that remained top-level, and
/// mutates `classes` in place: each adopted class's lines are removed from
/// its parent's body, and `subclasses` lists are populated with the
/// *indices* of the input order (callers remap these to arena `ClassId`s
/// once the classes are pushed into the `Program`'s arena, since index `i`
/// here is exactly the order classes will be pushed in).
pub fn nest_subclasses(classes: &mut [Class]) -> Vec<usize> {
    let n = classes.len();
    let mut parent_of: Vec<Option<usize>> = vec![None; n];

    for i in 0..n {
        let start_i = classes[i].body_start;
        for j in (0..i).rev() {
            let sj = classes[j].body_start;
            let ej = classes[j].body_end;
            if start_i > sj && start_i <= ej {
                parent_of[i] = Some(j);
                break;
            }
        }
    }

    for i in 0..n {
        if let Some(parent) = parent_of[i] {
            classes[parent].subclasses.push(i);
            splice_child_lines(classes, parent, i);
        }
    }

    (0..n).filter(|i| parent_of[*i].is_none()).collect()
}

fn splice_child_lines(classes: &mut [Class], parent: usize, child: usize) {
    let parent_body_start = classes[parent].body_start;
    let child_body_start = classes[child].body_start;
    let child_len = classes[child].body.lines.len();

    // The child's header line sits at this offset into `parent.body.lines`
    // (which begins right after the parent's own header/opening-brace
    // line, at flat-list index `parent_body_start + 1`).
    let pos = child_body_start - parent_body_start - 1;
    let parent_lines = &mut classes[parent].body.lines;
    if pos > parent_lines.len() {
        return;
    }
    // +1 for the child's own header line, which lives in the parent's body
    // as a literal Line but not in the child's own `body.lines` (our
    // realization parses the header into Class fields rather than keeping
    // it as a Line, unlike spec.md's simpler single-Line-list Block).
    let remove = (child_len + 1).min(parent_lines.len().saturating_sub(pos));
    parent_lines.drain(pos..pos + remove);
}
