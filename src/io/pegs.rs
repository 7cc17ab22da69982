//! Peg layout files

use crate::io::error::{Result, StrandError, WithPath};
use crate::spatial::Peg;
use std::fs;
use std::path::Path;

/// Save a peg layout as a JSON array
///
/// # Errors
///
/// Returns an error if the file cannot be written
pub fn save_pegs(path: &Path, pegs: &[Peg]) -> Result<()> {
    let json = serde_json::to_string_pretty(pegs).map_err(|source| StrandError::Serialization {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).with_path(path, "write pegs")
}

/// Load a peg layout saved with [`save_pegs`]
///
/// Peg ids are renumbered by position, so the file order defines peg identity.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not hold a peg array
pub fn load_pegs(path: &Path) -> Result<Vec<Peg>> {
    let json = fs::read_to_string(path).with_path(path, "read pegs")?;
    let pegs: Vec<Peg> = serde_json::from_str(&json).map_err(|source| {
        StrandError::Serialization {
            path: path.to_path_buf(),
            source,
        }
    })?;
    Ok(pegs
        .into_iter()
        .enumerate()
        .map(|(id, peg)| Peg::new(id, peg.x, peg.y))
        .collect())
}
