//! `hashline-tools read` (spec §6): prints a hash-anchored listing.

use crate::error::EngineError;
use crate::listing::render_listing;
use std::path::Path;

pub fn run(path: &Path, offset: usize, limit: usize) -> Result<String, EngineError> {
    let lines = crate::buffer::read(path)?;
    Ok(render_listing(&lines, offset, limit))
}
