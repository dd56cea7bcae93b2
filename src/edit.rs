//! # Edit operation data model (spec §3, §6)
//!
//! The JSON shape of one element of an edit batch. `op` discriminates
//! between the four line-level kinds (`replace`, `append`, `prepend`,
//! `delete`) and the file-level `write`, which bypasses anchor validation
//! entirely and rewrites the file unconditionally (spec §4.8).

use crate::anchor::Anchor;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    Replace {
        pos: Anchor,
        #[serde(default)]
        end: Option<Anchor>,
        lines: Vec<String>,
    },
    Append {
        #[serde(default)]
        pos: Option<Anchor>,
        lines: Vec<String>,
    },
    Prepend {
        #[serde(default)]
        pos: Option<Anchor>,
        lines: Vec<String>,
    },
    Delete {
        pos: Anchor,
        #[serde(default)]
        end: Option<Anchor>,
    },
    Write {
        content: String,
    },
}

/// Decodes the `--edits` JSON array into an ordered list of [`EditOp`].
/// Each op's original position in the array is its tie-break priority in
/// plan resolution (spec §4.5 step 4), so callers must preserve this order.
pub fn parse_batch(json: &str) -> serde_json::Result<Vec<EditOp>> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_replace_single_line() {
        let ops = parse_batch(r#"[{"op":"replace","pos":"8#RT","lines":["x"]}]"#).unwrap();
        assert_eq!(
            ops,
            vec![EditOp::Replace {
                pos: Anchor { line: 8, hash: "RT".to_string() },
                end: None,
                lines: vec!["x".to_string()],
            }]
        );
    }

    #[test]
    fn parses_replace_range() {
        let ops =
            parse_batch(r#"[{"op":"replace","pos":"6#ZT","end":"10#NV","lines":["x"]}]"#)
                .unwrap();
        assert!(matches!(&ops[0], EditOp::Replace { end: Some(_), .. }));
    }

    #[test]
    fn parses_append_without_pos_as_eof() {
        let ops = parse_batch(r#"[{"op":"append","lines":["y","z"]}]"#).unwrap();
        assert_eq!(
            ops,
            vec![EditOp::Append { pos: None, lines: vec!["y".to_string(), "z".to_string()] }]
        );
    }

    #[test]
    fn parses_prepend_without_pos_as_bof() {
        let ops = parse_batch(r#"[{"op":"prepend","lines":["y"]}]"#).unwrap();
        assert_eq!(ops, vec![EditOp::Prepend { pos: None, lines: vec!["y".to_string()] }]);
    }

    #[test]
    fn parses_delete_range() {
        let ops = parse_batch(r#"[{"op":"delete","pos":"6#ZT","end":"10#NV"}]"#).unwrap();
        assert!(matches!(&ops[0], EditOp::Delete { end: Some(_), .. }));
    }

    #[test]
    fn parses_write() {
        let ops = parse_batch(r#"[{"op":"write","content":"a\nb\n"}]"#).unwrap();
        assert_eq!(ops, vec![EditOp::Write { content: "a\nb\n".to_string() }]);
    }

    #[test]
    fn rejects_unknown_op() {
        assert!(parse_batch(r#"[{"op":"frobnicate"}]"#).is_err());
    }

    #[test]
    fn rejects_missing_required_field() {
        assert!(parse_batch(r#"[{"op":"replace","pos":"8#RT"}]"#).is_err());
    }

    #[test]
    fn empty_batch_parses_to_empty_vec() {
        assert_eq!(parse_batch("[]").unwrap(), Vec::new());
    }
}
