//! File buffer I/O: reads a file into [`Line`]s and writes one back
//! atomically. Grounded on the teacher's write path in `file_state.rs`
//! (`apply_and_write_patch`), which writes through a temp file so a crash
//! mid-write never leaves a half-written file in place.

use crate::error::EngineError;
use crate::line::{join_lines, split_lines, Line};
use std::fs;
use std::path::Path;

/// Reads `path` and splits it into lines (spec §4.1).
pub fn read(path: &Path) -> Result<Vec<Line>, EngineError> {
    let bytes = fs::read(path)?;
    split_lines(&bytes)
}

/// Writes `lines` to `path` by writing to a temp file in the same directory
/// and renaming over the target, so a reader never observes a partial file.
pub fn write(path: &Path, lines: &[Line]) -> Result<(), EngineError> {
    let content = join_lines(lines);
    write_bytes(path, content.as_bytes())
}

/// Writes raw `content` bytes to `path` atomically, used by the `write` op
/// (spec §4.8), which bypasses the line model entirely.
pub fn write_bytes(path: &Path, content: &[u8]) -> Result<(), EngineError> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    std::io::Write::write_all(&mut tmp, content)?;
    tmp.persist(path).map_err(|e| EngineError::from(e.error))?;
    Ok(())
}
