//! # Diff emitter (L7)
//!
//! Renders the post-edit confirmation shown back to the caller: a
//! `<diff>...</diff>` envelope with ±5 lines of context around each changed
//! region, using fresh hashes so the caller can chain another edit off the
//! response without re-reading the file. Nearby hunks merge; far-apart ones
//! are separated by a `...` gap marker. Deleted rows carry the reserved
//! marker hash and their *original* line numbers, since they no longer
//! exist in the new buffer to have a hash of their own.
//!
//! Modeled on the context-window/gap-collapsing shape of the teacher's
//! `generate_custom_diff`, stripped of its terminal coloring — this output
//! is read by an agent, not a human terminal.

use crate::apply::ChangeRegion;
use crate::hash::{cumulative_hashes, DELETED_HASH};
use crate::line::Line;
use crate::plan::EditKind;

const CONTEXT_LINES: usize = 5;
const GAP_THRESHOLD: usize = 10;

struct Hunk {
    lo: usize,
    hi: usize,
}

fn change_window(change: &ChangeRegion, new_total: usize) -> (usize, usize) {
    let (ref_lo, ref_hi) = if change.new_end > change.new_start {
        (change.new_start, change.new_end - 1)
    } else {
        (change.new_start, change.new_start)
    };
    let lo = ref_lo.saturating_sub(CONTEXT_LINES).max(1);
    let hi = ref_hi.saturating_add(CONTEXT_LINES).min(new_total);
    (lo, hi)
}

fn merge_hunks(changes: &[ChangeRegion], new_total: usize) -> Vec<Hunk> {
    let mut hunks: Vec<Hunk> = Vec::new();
    for change in changes {
        let (lo, hi) = change_window(change, new_total);
        match hunks.last_mut() {
            Some(last) if lo <= last.hi.saturating_add(GAP_THRESHOLD + 1) => {
                last.hi = last.hi.max(hi);
            }
            _ => hunks.push(Hunk { lo, hi }),
        }
    }
    hunks
}

/// Renders the `<diff>...</diff>` body (without the surrounding success
/// header or trailing note, which `commands::edit` assembles around this).
pub fn render_diff(original: &[Line], new_lines: &[Line], changes: &[ChangeRegion]) -> String {
    let new_total = new_lines.len();
    let new_hashes = cumulative_hashes(new_lines);
    let hunks = merge_hunks(changes, new_total);

    // Index changes by the new-buffer line range they occupy (for `+`
    // rows) and by the point a deletion sits at (to splice in `-` rows).
    let mut changed_ranges: Vec<(usize, usize)> = Vec::new();
    let mut deletions_at: std::collections::BTreeMap<usize, Vec<(usize, usize)>> =
        std::collections::BTreeMap::new();
    for c in changes {
        if c.new_end > c.new_start {
            changed_ranges.push((c.new_start, c.new_end));
        }
        if c.orig_end > c.orig_start && c.new_end == c.new_start {
            deletions_at
                .entry(c.new_start)
                .or_default()
                .push((c.orig_start, c.orig_end));
        }
    }
    let is_changed = |n: usize| changed_ranges.iter().any(|(s, e)| n >= *s && n < *e);

    let mut out = String::new();
    out.push_str("<diff>\n");

    for (hi_idx, hunk) in hunks.iter().enumerate() {
        if hi_idx > 0 {
            out.push_str("...\n");
        }
        for n in hunk.lo..=(hunk.hi + 1) {
            if let Some(dels) = deletions_at.get(&n) {
                for (orig_start, orig_end) in dels {
                    for orig_line in *orig_start..*orig_end {
                        out.push_str(&format!(
                            "-{}#{}:{}\n",
                            orig_line,
                            DELETED_HASH,
                            original[orig_line - 1].content
                        ));
                    }
                }
            }
            if n <= new_total {
                let marker = if is_changed(n) { '+' } else { ' ' };
                out.push_str(&format!(
                    "{}{}#{}:{}\n",
                    marker,
                    n,
                    new_hashes[n - 1],
                    new_lines[n - 1].content
                ));
            }
        }
    }

    out.push_str("</diff>\n");
    out
}

/// The 1-indexed new-buffer line number of the first changed region, used
/// in the success header shown above the diff.
pub fn first_change_line(changes: &[ChangeRegion]) -> usize {
    changes.first().map(|c| c.new_start.max(1)).unwrap_or(1)
}
