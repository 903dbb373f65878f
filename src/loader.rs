//! Source dump discovery and tolerant parsing.
//!
//! Walks the site root for files matching the Q&A source glob and parses
//! each one. Problems with individual files or records never abort a run:
//! an unreadable or malformed file is skipped as a whole, and every element
//! of a parsed file is classified through [`RecordOutcome`] so the skip
//! policy stays auditable. Matching files are visited in lexicographic path
//! order, which makes repeated runs over an unchanged file set produce the
//! same record ordering.

use anyhow::{bail, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde_json::Value;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::models::RawRecord;

/// How one element of a source file was classified.
#[derive(Debug)]
pub enum RecordOutcome {
    Accepted(RawRecord),
    SkippedEmptyId,
    SkippedWrongShape,
}

/// One parsed source file: accepted records in file order plus skip counts.
#[derive(Debug)]
pub struct SourceFile {
    /// Path relative to the site root, forward slashes.
    pub rel_path: String,
    pub records: Vec<RawRecord>,
    pub skipped_wrong_shape: usize,
    pub skipped_empty_id: usize,
}

/// Aggregate result of scanning the source glob.
#[derive(Debug, Default)]
pub struct Scan {
    pub files: Vec<SourceFile>,
    /// Files matching the glob that could not be read, parsed, or whose
    /// top-level value was neither an array nor an object.
    pub files_skipped: usize,
}

impl Scan {
    pub fn records_accepted(&self) -> usize {
        self.files.iter().map(|f| f.records.len()).sum()
    }

    pub fn records_skipped_wrong_shape(&self) -> usize {
        self.files.iter().map(|f| f.skipped_wrong_shape).sum()
    }

    pub fn records_skipped_empty_id(&self) -> usize {
        self.files.iter().map(|f| f.skipped_empty_id).sum()
    }
}

/// Scan the root for source dumps and parse them.
pub fn scan(config: &Config) -> Result<Scan> {
    if !config.root.exists() {
        bail!("site root does not exist: {}", config.root.display());
    }

    let include = build_globset(&[config.source_glob.clone()])?;
    let exclude = build_globset(&[
        "**/.git/**".to_string(),
        "**/target/**".to_string(),
        "**/node_modules/**".to_string(),
    ])?;

    let mut paths: Vec<(String, PathBuf)> = Vec::new();
    for entry in WalkDir::new(&config.root) {
        // Unreadable directory entries fall under the per-source tolerance
        // policy: skip, keep walking.
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(&config.root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().replace('\\', "/");

        if exclude.is_match(&rel_str) {
            continue;
        }
        if !include.is_match(&rel_str) {
            continue;
        }
        paths.push((rel_str, entry.into_path()));
    }

    // Sort for deterministic ordering
    paths.sort();

    let mut scan = Scan::default();
    for (rel_path, path) in paths {
        let Some(elements) = load_source_file(&path) else {
            scan.files_skipped += 1;
            continue;
        };

        let mut file = SourceFile {
            rel_path,
            records: Vec::new(),
            skipped_wrong_shape: 0,
            skipped_empty_id: 0,
        };
        for element in elements {
            match classify(element) {
                RecordOutcome::Accepted(record) => file.records.push(record),
                RecordOutcome::SkippedEmptyId => file.skipped_empty_id += 1,
                RecordOutcome::SkippedWrongShape => file.skipped_wrong_shape += 1,
            }
        }
        scan.files.push(file);
    }

    Ok(scan)
}

/// Parse one source file into its element sequence. A single top-level
/// object is promoted to a one-element sequence. `None` means the file is
/// skipped entirely.
fn load_source_file(path: &Path) -> Option<Vec<Value>> {
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("warning: failed to read {}: {}", path.display(), e);
            return None;
        }
    };
    let value: Value = match serde_json::from_str(&text) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("warning: failed to parse {}: {}", path.display(), e);
            return None;
        }
    };
    match value {
        Value::Array(elements) => Some(elements),
        Value::Object(_) => Some(vec![value]),
        _ => None,
    }
}

/// Classify one element of a source file.
pub fn classify(element: Value) -> RecordOutcome {
    if !element.is_object() {
        return RecordOutcome::SkippedWrongShape;
    }
    let record: RawRecord = match serde_json::from_value(element) {
        Ok(r) => r,
        Err(_) => return RecordOutcome::SkippedWrongShape,
    };
    if record.id_str().is_empty() {
        return RecordOutcome::SkippedEmptyId;
    }
    RecordOutcome::Accepted(record)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
