use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Read the index file: one log path per line, surrounding whitespace trimmed.
///
/// Order is preserved and paths are returned as-is; existence is checked
/// later when each log is opened. Blank lines stay in the list as empty
/// paths.
pub fn read_index<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read index file '{}'", path.display()))?;
    Ok(parse_index(&content))
}

/// Split index content into trimmed entries
pub fn parse_index(content: &str) -> Vec<String> {
    content.lines().map(|line| line.trim().to_string()).collect()
}
