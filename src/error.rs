//! Error kinds for the hashline engine.
//!
//! One variant per failure mode in the engine, rather than a single
//! catch-all error type — `main` needs to tell these apart to pick an exit
//! code, and `HashMismatch`/`AnchorOutOfRange` carry diagnostic detail the
//! caller (an LLM agent) needs in order to re-plan without a full re-read.

use crate::anchor::Anchor;

/// A single "here's what line N actually looks like now" diagnostic line,
/// used to help a caller re-orient after a `HashMismatch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborSnippet {
    pub line: usize,
    pub hash: String,
    pub content: String,
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid anchor syntax: '{0}' (expected \"<line>#<hash>\")")]
    InvalidAnchorSyntax(String),

    #[error("anchor out of range: line {line} does not exist (file has {total} lines)")]
    AnchorOutOfRange { line: usize, total: usize },

    #[error(
        "hash mismatch at {anchor}: the file view is stale (current hash is {current_hash})\n{}",
        format_neighbors(.neighbors)
    )]
    HashMismatch {
        anchor: Anchor,
        current_hash: String,
        neighbors: Vec<NeighborSnippet>,
    },

    #[error("overlapping edits: {0}")]
    OverlappingEdits(String),

    #[error("invalid edit shape: {0}")]
    InvalidEditShape(String),

    #[error("edit batch is empty")]
    EmptyEditBatch,

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("input is not valid UTF-8: {0}")]
    EncodingError(#[from] std::str::Utf8Error),
}

fn format_neighbors(neighbors: &[NeighborSnippet]) -> String {
    neighbors
        .iter()
        .map(|n| format!("  {}#{}: {}", n.line, n.hash, n.content))
        .collect::<Vec<_>>()
        .join("\n")
}

impl EngineError {
    /// Maps an error kind to the process exit code defined by the CLI surface.
    pub fn exit_code(&self) -> i32 {
        match self {
            EngineError::InvalidAnchorSyntax(_)
            | EngineError::InvalidEditShape(_)
            | EngineError::EmptyEditBatch => 2,
            EngineError::AnchorOutOfRange { .. }
            | EngineError::HashMismatch { .. }
            | EngineError::OverlappingEdits(_) => 3,
            EngineError::IoError(_) | EngineError::EncodingError(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_match_spec() {
        assert_eq!(EngineError::EmptyEditBatch.exit_code(), 2);
        assert_eq!(
            EngineError::AnchorOutOfRange { line: 5, total: 3 }.exit_code(),
            3
        );
        assert_eq!(
            EngineError::IoError(std::io::Error::other("boom")).exit_code(),
            4
        );
    }

    #[test]
    fn hash_mismatch_message_includes_anchor_and_neighbors() {
        let err = EngineError::HashMismatch {
            anchor: Anchor {
                line: 3,
                hash: "AB".to_string(),
            },
            current_hash: "ZZ".to_string(),
            neighbors: vec![NeighborSnippet {
                line: 2,
                hash: "11".to_string(),
                content: "foo".to_string(),
            }],
        };
        let msg = err.to_string();
        assert!(msg.contains("3#AB"));
        assert!(msg.contains("ZZ"));
        assert!(msg.contains("2#11: foo"));
    }
}
