//! `hashline-tools edit` (spec §6): applies a batch of anchor-validated
//! edits and prints the post-edit confirmation, or performs a raw `write`.

use crate::anchor::Anchor;
use crate::apply::apply_plan;
use crate::diff::{first_change_line, render_diff};
use crate::edit::EditOp;
use crate::error::EngineError;
use crate::line::Line;
use crate::plan::{build_plan, resolve_all, EditKind, PendingEdit};
use std::path::Path;

/// Converts one decoded [`EditOp`] into the interval form [`build_plan`]
/// expects, per spec §4.5 step 3. `index` is the op's position in the
/// original batch, used only as a last-resort sort tie-break.
fn to_pending(op: &EditOp, total: usize, index: usize) -> Result<PendingEdit, EngineError> {
    match op {
        EditOp::Replace { pos, end, lines } => {
            let (start, stop) = match end {
                Some(e) => {
                    if e.line < pos.line {
                        return Err(EngineError::InvalidEditShape(format!(
                            "replace: end anchor (line {}) precedes pos anchor (line {})",
                            e.line, pos.line
                        )));
                    }
                    (pos.line, e.line + 1)
                }
                None => (pos.line, pos.line + 1),
            };
            Ok(PendingEdit {
                start,
                end: stop,
                kind: EditKind::Replace,
                lines: lines.clone(),
                is_append: false,
                original_index: index,
            })
        }
        EditOp::Delete { pos, end } => {
            let (start, stop) = match end {
                Some(e) => {
                    if e.line < pos.line {
                        return Err(EngineError::InvalidEditShape(format!(
                            "delete: end anchor (line {}) precedes pos anchor (line {})",
                            e.line, pos.line
                        )));
                    }
                    (pos.line, e.line + 1)
                }
                None => (pos.line, pos.line + 1),
            };
            Ok(PendingEdit {
                start,
                end: stop,
                kind: EditKind::Delete,
                lines: Vec::new(),
                is_append: false,
                original_index: index,
            })
        }
        EditOp::Append { pos, lines } => {
            let point = match pos {
                Some(p) => p.line + 1,
                None => total + 1,
            };
            Ok(PendingEdit {
                start: point,
                end: point,
                kind: EditKind::Insert,
                lines: lines.clone(),
                is_append: true,
                original_index: index,
            })
        }
        EditOp::Prepend { pos, lines } => {
            let point = match pos {
                Some(p) => p.line,
                None => 1,
            };
            Ok(PendingEdit {
                start: point,
                end: point,
                kind: EditKind::Insert,
                lines: lines.clone(),
                is_append: false,
                original_index: index,
            })
        }
        EditOp::Write { .. } => unreachable!("write ops are handled before conversion"),
    }
}

fn anchors_in(op: &EditOp) -> Vec<&Anchor> {
    match op {
        EditOp::Replace { pos, end, .. } | EditOp::Delete { pos, end } => {
            let mut v = vec![pos];
            if let Some(e) = end {
                v.push(e);
            }
            v
        }
        EditOp::Append { pos, .. } | EditOp::Prepend { pos, .. } => pos.iter().collect(),
        EditOp::Write { .. } => Vec::new(),
    }
}

/// Runs the full `edit` verb: decode, validate, plan, apply, write, render.
pub fn run(path: &Path, batch_json: &str) -> Result<String, EngineError> {
    let ops = crate::edit::parse_batch(batch_json)
        .map_err(|e| EngineError::InvalidEditShape(e.to_string()))?;

    if ops.is_empty() {
        return Err(EngineError::EmptyEditBatch);
    }

    let has_write = ops.iter().any(|op| matches!(op, EditOp::Write { .. }));
    if has_write {
        if ops.len() != 1 {
            return Err(EngineError::InvalidEditShape(
                "a `write` op must be the sole element of an edit batch".to_string(),
            ));
        }
        let EditOp::Write { content } = &ops[0] else {
            unreachable!()
        };
        crate::buffer::write_bytes(path, content.as_bytes())?;
        let lines = crate::line::split_lines(content.as_bytes())?;
        return Ok(format!("File written ({} lines).\n", lines.len()));
    }

    let lines = crate::buffer::read(path)?;

    let anchors: Vec<&Anchor> = ops.iter().flat_map(anchors_in).collect();
    resolve_all(&lines, &anchors)?;

    let pending = ops
        .iter()
        .enumerate()
        .map(|(i, op)| to_pending(op, lines.len(), i))
        .collect::<Result<Vec<_>, _>>()?;

    let plan = build_plan(&lines, pending)?;
    let (new_lines, changes): (Vec<Line>, _) = apply_plan(&lines, &plan);

    crate::buffer::write(path, &new_lines)?;

    let diff = render_diff(&lines, &new_lines, &changes);
    let header = format!(
        "Edit applied successfully (first change at line {}).",
        first_change_line(&changes)
    );
    Ok(format!(
        "{header}\n{diff}Note: Lines after edited regions have stale hashes. Use hashread to refresh.\n"
    ))
}
