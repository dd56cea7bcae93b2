//! # Edit plan (L5)
//!
//! Resolves a batch of [`EditOp`]s against the current buffer into a
//! normalized, ordered [`EditPlan`] of non-overlapping, half-open target
//! intervals (spec §3, §4.5). Every anchor is re-validated against the
//! buffer's *current* hashes before anything is scheduled — a stale anchor
//! fails the whole batch before a single line is touched.

use crate::anchor::Anchor;
use crate::error::{EngineError, NeighborSnippet};
use crate::hash::cumulative_hashes;
use crate::line::Line;

/// How the applier (L6) should classify the lines an edit occupies, for the
/// diff emitter's change-region bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Insert,
    Delete,
    Replace,
}

/// One fully-resolved edit: a half-open `[start, end)` interval over
/// 1-indexed line numbers in the *original* buffer, plus the lines that
/// should appear there instead. `start == end` for a pure insertion.
#[derive(Debug, Clone)]
pub struct ResolvedEdit {
    pub start: usize,
    pub end: usize,
    pub kind: EditKind,
    pub lines: Vec<String>,
    /// Index of this edit within the original request batch, used only as
    /// a final, stable tie-break among edits that land at the same point.
    pub original_index: usize,
}

/// A validated, ordered batch of edits ready for the applier.
#[derive(Debug)]
pub struct EditPlan {
    pub edits: Vec<ResolvedEdit>,
}

fn neighbors(lines: &[Line], hashes: &[String], line: usize, radius: usize) -> Vec<NeighborSnippet> {
    let total = lines.len();
    let lo = line.saturating_sub(radius).max(1);
    let hi = (line + radius).min(total);
    (lo..=hi)
        .map(|n| NeighborSnippet {
            line: n,
            hash: hashes[n - 1].clone(),
            content: lines[n - 1].content.clone(),
        })
        .collect()
}

/// Validates `anchor` against the buffer: the line must exist and its
/// current hash must match. On success returns nothing (the anchor was
/// only ever a claim to be checked); on failure returns the specific
/// [`EngineError`] spec §4.5 step 2 calls for.
fn resolve_anchor(lines: &[Line], hashes: &[String], anchor: &Anchor) -> Result<(), EngineError> {
    let total = lines.len();
    if anchor.line == 0 || anchor.line > total {
        return Err(EngineError::AnchorOutOfRange {
            line: anchor.line,
            total,
        });
    }
    let current = &hashes[anchor.line - 1];
    if *current != anchor.hash {
        return Err(EngineError::HashMismatch {
            anchor: anchor.clone(),
            current_hash: current.clone(),
            neighbors: neighbors(lines, hashes, anchor.line, 2),
        });
    }
    Ok(())
}

/// Builds and validates an [`EditPlan`] from a batch of already-decoded,
/// non-`write` edit ops. `resolved` pairs each input op with its computed
/// interval, insertion-vs-replace classification, and append/prepend
/// distinction (needed only for the same-point tie-break).
pub(crate) struct PendingEdit {
    pub start: usize,
    pub end: usize,
    pub kind: EditKind,
    pub lines: Vec<String>,
    /// `true` for an append, `false` for a prepend; irrelevant for non-insertions.
    pub is_append: bool,
    pub original_index: usize,
}

pub fn build_plan(lines: &[Line], pending: Vec<PendingEdit>) -> Result<EditPlan, EngineError> {
    if pending.is_empty() {
        return Err(EngineError::EmptyEditBatch);
    }

    let mut sortable: Vec<(usize, u8, usize, PendingEdit)> = pending
        .into_iter()
        .map(|p| {
            let group = if p.start == p.end {
                // insertion: append sorts before prepend at a shared point (S6)
                if p.is_append { 0 } else { 2 }
            } else {
                // replace/delete range
                1
            };
            (p.start, group, p.original_index, p)
        })
        .collect();

    sortable.sort_by(|a, b| (a.0, a.1, a.2).cmp(&(b.0, b.1, b.2)));

    // Overlap detection (spec §4.5 step 5).
    let ranged: Vec<&PendingEdit> = sortable.iter().map(|(_, _, _, p)| p).collect();
    for i in 0..ranged.len() {
        for j in (i + 1)..ranged.len() {
            let a = ranged[i];
            let b = ranged[j];
            let a_is_insert = a.start == a.end;
            let b_is_insert = b.start == b.end;

            if a_is_insert && b_is_insert {
                // Two insertions at the same point concatenate; anywhere
                // else they can't conflict since neither occupies lines.
                continue;
            }

            if a_is_insert != b_is_insert {
                let (point, range) = if a_is_insert { (a, b) } else { (b, a) };
                if point.start > range.start && point.start < range.end {
                    return Err(EngineError::OverlappingEdits(format!(
                        "insertion at line {} falls inside replace/delete range [{}, {})",
                        point.start, range.start, range.end
                    )));
                }
                continue;
            }

            // Both are replace/delete ranges.
            if a.start < b.end && b.start < a.end {
                return Err(EngineError::OverlappingEdits(format!(
                    "edit ranges [{}, {}) and [{}, {}) overlap",
                    a.start, a.end, b.start, b.end
                )));
            }
        }
    }

    let edits = sortable
        .into_iter()
        .map(|(_, _, _, p)| ResolvedEdit {
            start: p.start,
            end: p.end,
            kind: p.kind,
            lines: p.lines,
            original_index: p.original_index,
        })
        .collect();

    Ok(EditPlan { edits })
}

/// Resolves every anchor cited by `op` against `lines`' current hashes.
/// Exposed separately from [`build_plan`] so callers (the `edit` command)
/// can resolve+classify each [`crate::edit::EditOp`] before assembling the
/// batch-wide plan.
pub fn resolve_all(lines: &[Line], anchors: &[&Anchor]) -> Result<(), EngineError> {
    let hashes = cumulative_hashes(lines);
    for a in anchors {
        resolve_anchor(lines, &hashes, a)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::split_lines;

    fn pending(start: usize, end: usize, kind: EditKind, lines: &[&str], is_append: bool, idx: usize) -> PendingEdit {
        PendingEdit {
            start,
            end,
            kind,
            lines: lines.iter().map(|s| s.to_string()).collect(),
            is_append,
            original_index: idx,
        }
    }

    #[test]
    fn empty_batch_is_rejected() {
        let buf = split_lines(b"a\n").unwrap();
        assert!(matches!(
            build_plan(&buf, Vec::new()),
            Err(EngineError::EmptyEditBatch)
        ));
    }

    #[test]
    fn append_after_k_precedes_prepend_before_k_plus_1() {
        // S6: append(pos=3) and prepend(pos=4) both resolve to the
        // insertion point between original lines 3 and 4; append's
        // content must come first.
        let buf = split_lines(b"1\n2\n3\n4\n5\n").unwrap();
        let plan = build_plan(
            &buf,
            vec![
                pending(4, 4, EditKind::Insert, &["A"], true, 0),
                pending(4, 4, EditKind::Insert, &["P"], false, 1),
            ],
        )
        .unwrap();
        assert_eq!(plan.edits[0].lines, vec!["A".to_string()]);
        assert_eq!(plan.edits[1].lines, vec!["P".to_string()]);
    }

    #[test]
    fn overlapping_replace_ranges_are_rejected() {
        let buf = split_lines(b"1\n2\n3\n4\n5\n").unwrap();
        let result = build_plan(
            &buf,
            vec![
                pending(2, 5, EditKind::Replace, &["X"], false, 0),
                pending(3, 4, EditKind::Delete, &[], false, 1),
            ],
        );
        assert!(matches!(result, Err(EngineError::OverlappingEdits(_))));
    }

    #[test]
    fn insertion_strictly_inside_replace_range_is_overlap() {
        let buf = split_lines(b"1\n2\n3\n4\n5\n").unwrap();
        let result = build_plan(
            &buf,
            vec![
                pending(2, 5, EditKind::Replace, &["X"], false, 0),
                pending(3, 3, EditKind::Insert, &["Y"], true, 1),
            ],
        );
        assert!(matches!(result, Err(EngineError::OverlappingEdits(_))));
    }

    #[test]
    fn insertion_at_replace_boundary_is_allowed() {
        let buf = split_lines(b"1\n2\n3\n4\n5\n").unwrap();
        let plan = build_plan(
            &buf,
            vec![
                pending(2, 5, EditKind::Replace, &["X"], false, 0),
                pending(2, 2, EditKind::Insert, &["Y"], false, 1),
                pending(5, 5, EditKind::Insert, &["Z"], true, 2),
            ],
        )
        .unwrap();
        assert_eq!(plan.edits.len(), 3);
    }

    #[test]
    fn same_point_insertions_preserve_request_order_when_same_side() {
        let buf = split_lines(b"1\n2\n3\n").unwrap();
        let plan = build_plan(
            &buf,
            vec![
                pending(2, 2, EditKind::Insert, &["first"], true, 0),
                pending(2, 2, EditKind::Insert, &["second"], true, 1),
            ],
        )
        .unwrap();
        assert_eq!(plan.edits[0].lines, vec!["first".to_string()]);
        assert_eq!(plan.edits[1].lines, vec!["second".to_string()]);
    }

    #[test]
    fn resolve_all_detects_hash_mismatch() {
        let buf = split_lines(b"a\nb\nc\n").unwrap();
        let stale = Anchor { line: 2, hash: "ZZ".to_string() };
        let result = resolve_all(&buf, &[&stale]);
        assert!(matches!(result, Err(EngineError::HashMismatch { .. })));
    }

    #[test]
    fn resolve_all_detects_out_of_range() {
        let buf = split_lines(b"a\nb\n").unwrap();
        let oob = Anchor { line: 10, hash: "AA".to_string() };
        let result = resolve_all(&buf, &[&oob]);
        assert!(matches!(
            result,
            Err(EngineError::AnchorOutOfRange { line: 10, total: 2 })
        ));
    }
}
