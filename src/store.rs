//! JSON file persistence.
//!
//! The output collections live as plain JSON files inside the site root.
//! Reads are tolerant (an absent or unparsable file is simply not there);
//! writes are full overwrites, pretty-printed with stable two-space
//! indentation so the files diff cleanly between runs.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// Read a JSON file. Absent files and files that fail to parse both yield
/// `None`; a parse failure is warned to stderr since it usually means the
/// file was hand-edited.
pub fn load_value(path: &Path) -> Option<Value> {
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(_) => return None,
    };
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            eprintln!("warning: failed to parse {}: {}", path.display(), e);
            None
        }
    }
}

/// Load the index collection, enforcing its structural precondition: an
/// absent or unparsable file starts as an empty collection, but a file
/// holding valid JSON of any other shape aborts the run before anything
/// gets written.
pub fn load_index(path: &Path) -> Result<Vec<Value>> {
    match load_value(path) {
        None => Ok(Vec::new()),
        Some(Value::Array(entries)) => Ok(entries),
        Some(_) => bail!("{} must be a JSON array", path.display()),
    }
}

/// Write a value as pretty-printed JSON, creating parent directories as
/// needed. serde_json leaves non-ASCII characters unescaped, which the
/// site's Hebrew content depends on.
pub fn save_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
