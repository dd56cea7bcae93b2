//! # Listing renderer (L3)
//!
//! Renders a hash-anchored listing of a line buffer: one
//! `"<N>#<HH>:<content>\n"` row per line, honoring an `offset`/`limit`
//! window (spec §4.3). Hashes are always computed over the full buffer —
//! windowing changes what's printed, never what's hashed.

use crate::hash::cumulative_hashes;
use crate::line::Line;

/// Default `--limit` when the caller doesn't specify one.
pub const DEFAULT_LIMIT: usize = 2000;

/// Renders `lines[offset..offset+limit]` (clamped) as a hash-anchored
/// listing. `offset` is 0-indexed; the rendered line numbers are 1-indexed.
pub fn render_listing(lines: &[Line], offset: usize, limit: usize) -> String {
    let hashes = cumulative_hashes(lines);
    let total = lines.len();
    let start = offset.min(total);
    let end = start.saturating_add(limit).min(total);

    let mut out = String::new();
    for i in start..end {
        out.push_str(&format!(
            "{}#{}:{}\n",
            i + 1,
            hashes[i],
            lines[i].content
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::split_lines;

    #[test]
    fn renders_one_row_per_line() {
        let lines = split_lines(b"a\nb\nc\n").unwrap();
        let out = render_listing(&lines, 0, DEFAULT_LIMIT);
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("1#"));
        assert!(rows[0].ends_with(":a"));
        assert!(rows[2].starts_with("3#"));
    }

    #[test]
    fn offset_and_limit_clamp_to_bounds() {
        let lines = split_lines(b"a\nb\nc\nd\ne\n").unwrap();
        let out = render_listing(&lines, 3, 10);
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("4#"));

        // offset past the end yields nothing, not an error
        assert_eq!(render_listing(&lines, 100, 10), "");
    }

    #[test]
    fn limit_windows_without_weakening_hashes() {
        let lines = split_lines(b"a\nb\nc\nd\n").unwrap();
        let full = render_listing(&lines, 0, DEFAULT_LIMIT);
        let windowed = render_listing(&lines, 2, 1);
        let full_row_3 = full.lines().nth(2).unwrap();
        let windowed_row = windowed.lines().next().unwrap();
        assert_eq!(full_row_3, windowed_row);
    }

    #[test]
    fn no_trailing_whitespace_trimming() {
        let lines = split_lines(b"a   \nb\n").unwrap();
        let out = render_listing(&lines, 0, DEFAULT_LIMIT);
        assert!(out.lines().next().unwrap().ends_with("a   "));
    }
}
