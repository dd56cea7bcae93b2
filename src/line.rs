//! # Line splitter (L1)
//!
//! Splits raw file bytes into a sequence of [`Line`]s that round-trip
//! exactly: concatenating `content + terminator` for every line reproduces
//! the input byte-for-byte. See spec §4.1.

use crate::error::EngineError;
use std::fmt;

/// How a line ends. `None` only ever appears on the last line of a buffer,
/// and only when the source bytes didn't end in a newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    Lf,
    CrLf,
    None,
}

impl Terminator {
    pub fn as_str(self) -> &'static str {
        match self {
            Terminator::Lf => "\n",
            Terminator::CrLf => "\r\n",
            Terminator::None => "",
        }
    }
}

impl fmt::Display for Terminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single logical line: content without any line-break character, plus
/// the terminator that followed it in the source bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub content: String,
    pub terminator: Terminator,
}

impl Line {
    pub fn new(content: impl Into<String>, terminator: Terminator) -> Self {
        Self {
            content: content.into(),
            terminator,
        }
    }

    /// Reconstructs this line's original bytes (content + terminator).
    pub fn to_raw(&self) -> String {
        format!("{}{}", self.content, self.terminator)
    }
}

/// Splits UTF-8 bytes into lines, recognizing `\n` and `\r\n` as terminators.
/// A bare `\r` not followed by `\n` is treated as ordinary content.
///
/// Empty input yields an empty sequence. A trailing terminator produces a
/// final line with empty content and a real terminator; a file with no
/// trailing terminator produces a final line with [`Terminator::None`].
pub fn split_lines(bytes: &[u8]) -> Result<Vec<Line>, EngineError> {
    let text = std::str::from_utf8(bytes)?;

    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut lines = Vec::new();
    let mut start = 0usize;
    let bytes_t = text.as_bytes();
    let len = bytes_t.len();
    let mut i = 0usize;

    while i < len {
        if bytes_t[i] == b'\n' {
            let (content, terminator) = if i > start && bytes_t[i - 1] == b'\r' {
                (&text[start..i - 1], Terminator::CrLf)
            } else {
                (&text[start..i], Terminator::Lf)
            };
            lines.push(Line::new(content, terminator));
            i += 1;
            start = i;
        } else {
            i += 1;
        }
    }

    if start < len {
        lines.push(Line::new(&text[start..len], Terminator::None));
    }

    Ok(lines)
}

/// Joins lines back into raw bytes, the inverse of [`split_lines`].
pub fn join_lines(lines: &[Line]) -> String {
    lines.iter().map(Line::to_raw).collect()
}
