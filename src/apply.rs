//! # Edit applier (L6)
//!
//! Walks the original buffer and a validated [`EditPlan`] in lockstep,
//! producing the new buffer plus a change map the diff emitter (L7) uses to
//! find context windows and classify rows.

use crate::line::{Line, Terminator};
use crate::plan::{EditKind, EditPlan};

/// One edited region, in both the original and the new buffer's line
/// numbering (both half-open, 1-indexed). A pure insertion has an empty
/// `orig` range at the insertion point; a pure delete has an empty `new`
/// range at the same point in the new buffer.
#[derive(Debug, Clone)]
pub struct ChangeRegion {
    pub orig_start: usize,
    pub orig_end: usize,
    pub new_start: usize,
    pub new_end: usize,
    pub kind: EditKind,
}

/// Picks the terminator new content should use at a given edit site: the
/// style of whichever neighboring original line is closest, falling back to
/// LF when there's no neighbor to copy from (an edit touching an empty
/// file). Mid-buffer correctness (only the final line of a file may lack a
/// terminator) is restored afterward in [`apply_plan`]'s fixup pass, so this
/// only needs to pick a reasonable style, not guarantee placement.
fn inherited_terminator(lines: &[Line], orig_start_idx: usize, orig_end_idx: usize) -> Terminator {
    if orig_end_idx > orig_start_idx {
        return lines[orig_end_idx - 1].terminator;
    }
    if orig_start_idx > 0 {
        return lines[orig_start_idx - 1].terminator;
    }
    if orig_start_idx < lines.len() {
        return lines[orig_start_idx].terminator;
    }
    Terminator::Lf
}

/// Applies `plan` to `lines`, returning the new buffer and the list of
/// changed regions in buffer order.
pub fn apply_plan(lines: &[Line], plan: &EditPlan) -> (Vec<Line>, Vec<ChangeRegion>) {
    let mut new_lines: Vec<Line> = Vec::with_capacity(lines.len());
    let mut changes = Vec::with_capacity(plan.edits.len());
    let mut cursor = 0usize;

    for edit in &plan.edits {
        let s0 = edit.start - 1;
        let e0 = edit.end - 1;

        new_lines.extend(lines[cursor..s0].iter().cloned());

        let term = inherited_terminator(lines, s0, e0);
        let new_start = new_lines.len() + 1;
        for content in &edit.lines {
            new_lines.push(Line::new(content.clone(), term));
        }
        let new_end = new_lines.len() + 1;

        changes.push(ChangeRegion {
            orig_start: edit.start,
            orig_end: edit.end,
            new_start,
            new_end,
            kind: edit.kind,
        });

        cursor = e0;
    }

    new_lines.extend(lines[cursor..].iter().cloned());

    // Only the final line of a buffer may lack a terminator.
    let last = new_lines.len().saturating_sub(1);
    for (i, line) in new_lines.iter_mut().enumerate() {
        if i != last && line.terminator == Terminator::None {
            line.terminator = Terminator::Lf;
        }
    }

    (new_lines, changes)
}
