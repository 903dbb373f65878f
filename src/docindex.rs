//! Document-folder indexing.
//!
//! Scans the responsa document tree for HTML and PDF files and appends index
//! entries for files the index does not know yet, keyed by the root-relative
//! `file` path. Entry numbers continue sequentially from the largest number
//! already present, and the index is kept ordered by number. HTML pages get
//! a real title and summary via [`crate::extract`]; PDFs fall back to the
//! file stem.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Local};
use serde_json::Value;
use walkdir::WalkDir;

use crate::config::Config;
use crate::extract;
use crate::models::DocEntry;
use crate::normalize;
use crate::store;

/// Category labels for document entries.
pub const DOC_CATEGORY_HE: &str = "אחר";
pub const DOC_CATEGORY_EN: &str = "Other";

pub fn run_docindex(config: &Config, dry_run: bool) -> Result<()> {
    if !config.docs_dir.is_dir() {
        println!(
            "no document directory at {}; nothing to index",
            config.docs_dir.display()
        );
        return Ok(());
    }

    // Same structural precondition as the merge: a damaged index aborts
    // before anything is written.
    let mut index = store::load_index(&config.index_path)?;

    let known_files: HashSet<String> = index
        .iter()
        .filter_map(|entry| entry.get("file").and_then(Value::as_str))
        .map(str::to_string)
        .collect();

    let mut next_number = index
        .iter()
        .filter_map(|entry| entry.get("number").and_then(Value::as_i64))
        .max()
        .unwrap_or(0)
        + 1;

    // Sort for deterministic ordering
    let mut paths: Vec<PathBuf> = WalkDir::new(&config.docs_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect();
    paths.sort();

    println!("docs {}", config.docs_dir.display());

    let mut new_entries: Vec<DocEntry> = Vec::new();
    for path in paths {
        let Some(kind) = doc_kind(&path) else { continue };
        let rel = rel_posix(&config.root, &path);
        if known_files.contains(&rel) {
            continue;
        }

        let entry = match doc_entry(&path, rel, kind, next_number) {
            Ok(entry) => entry,
            Err(e) => {
                eprintln!("warning: skipping {}: {}", path.display(), e);
                continue;
            }
        };
        println!("  found: {}", entry.title_he);
        next_number += 1;
        new_entries.push(entry);
    }

    println!("  new entries: {}", new_entries.len());

    if new_entries.is_empty() {
        println!("ok");
        return Ok(());
    }
    if dry_run {
        println!("  (dry run, nothing written)");
        return Ok(());
    }

    for entry in &new_entries {
        index.push(serde_json::to_value(entry)?);
    }

    // Keep the index ordered by number; merged Q&A entries carry their own
    // numbers and slot in accordingly. The sort is stable.
    index.sort_by_key(|entry| entry.get("number").and_then(Value::as_i64).unwrap_or(0));

    store::save_pretty(&config.index_path, &index)?;

    println!("  index total: {}", index.len());
    println!("ok");
    Ok(())
}

/// Document type by extension; anything unsupported is ignored.
fn doc_kind(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "html" | "htm" => Some("html"),
        "pdf" => Some("pdf"),
        _ => None,
    }
}

/// Root-relative path with forward slashes, as recorded in `file` fields.
fn rel_posix(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}

fn doc_entry(path: &Path, rel: String, kind: &str, number: i64) -> Result<DocEntry> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (title, summary) = if kind == "html" {
        match std::fs::read(path) {
            Ok(bytes) => {
                let html = String::from_utf8_lossy(&bytes);
                let meta = extract::extract_html_metadata(&html);
                (meta.title.unwrap_or_else(|| stem.clone()), meta.summary)
            }
            Err(_) => (stem.clone(), String::new()),
        }
    } else {
        (stem.clone(), String::new())
    };

    let modified = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .with_context(|| format!("failed to stat {}", path.display()))?;
    let modified: DateTime<Local> = modified.into();

    Ok(DocEntry {
        title_he: title.clone(),
        title_en: title,
        summary_he: summary.clone(),
        summary_en: summary,
        category: normalize::CATEGORY.to_string(),
        category_he: DOC_CATEGORY_HE.to_string(),
        category_en: DOC_CATEGORY_EN.to_string(),
        date: modified.format("%d/%m/%Y").to_string(),
        year: modified.year(),
        file: rel,
        kind: kind.to_string(),
        number,
    })
}
