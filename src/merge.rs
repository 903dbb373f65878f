//! The merge run: reconcile freshly scanned Q&A dumps against the persisted
//! index and rebuild the raw archive.
//!
//! This is the only stateful operation in the crate. The index is strictly
//! append-only (existing entries are never moved, altered, or removed) and
//! the `(src, source_id)` pair is the sole dedup invariant. The archive is
//! not merged at all: it is rebuilt wholesale from whatever the scan
//! produced, duplicates included.

use std::collections::HashSet;

use anyhow::Result;
use chrono::{Datelike, Utc};
use serde_json::Value;

use crate::config::Config;
use crate::loader;
use crate::normalize;
use crate::store;

/// Key under which the archive file stores the flat record list.
pub const ARCHIVE_KEY: &str = "questions";

pub fn run_merge(config: &Config, dry_run: bool) -> Result<()> {
    // Integrity check first: a structurally damaged index aborts the run
    // before any scanning or writing happens.
    let mut index = store::load_index(&config.index_path)?;

    // Seed dedup keys from entries that carry full provenance. Entries
    // predating this pipeline contribute nothing and are never duplicates.
    let mut seen: HashSet<(String, String)> = index
        .iter()
        .filter_map(|entry| {
            let src = key_field(entry, "src");
            let source_id = key_field(entry, "source_id");
            if src.is_empty() || source_id.is_empty() {
                None
            } else {
                Some((src, source_id))
            }
        })
        .collect();

    let scan = loader::scan(config)?;
    let processing_year = Utc::now().year();

    let mut all_records: Vec<Value> = Vec::new();
    let mut new_entries: Vec<Value> = Vec::new();

    for file in &scan.files {
        for record in &file.records {
            // Every accepted record feeds the archive, dedup or not.
            all_records.push(serde_json::to_value(record)?);

            let key = (file.rel_path.clone(), record.id_str());
            if seen.contains(&key) {
                continue;
            }
            let entry = normalize::to_index_entry(record, &file.rel_path, processing_year);
            new_entries.push(serde_json::to_value(&entry)?);
            seen.insert(key);
        }
    }

    let accepted = scan.records_accepted();
    println!("merge {}", config.source_glob);
    println!("  files scanned: {}", scan.files.len());
    if scan.files_skipped > 0 {
        println!("  files skipped: {}", scan.files_skipped);
    }
    println!("  records accepted: {}", accepted);
    if scan.records_skipped_wrong_shape() > 0 {
        println!(
            "  records skipped (bad shape): {}",
            scan.records_skipped_wrong_shape()
        );
    }
    if scan.records_skipped_empty_id() > 0 {
        println!(
            "  records skipped (empty id): {}",
            scan.records_skipped_empty_id()
        );
    }
    println!("  already indexed: {}", accepted - new_entries.len());
    println!("  new entries: {}", new_entries.len());

    if dry_run {
        println!("  (dry run, nothing written)");
        return Ok(());
    }

    index.extend(new_entries);

    // Archive first, index second; the two writes are independent and a
    // re-run heals a crash between them.
    let mut archive = serde_json::Map::new();
    archive.insert(ARCHIVE_KEY.to_string(), Value::Array(all_records));
    store::save_pretty(&config.archive_path, &Value::Object(archive))?;
    store::save_pretty(&config.index_path, &index)?;

    println!("  index total: {}", index.len());
    println!("ok");
    Ok(())
}

/// Entry field rendered the way dedup keys expect: strings as-is, numbers
/// stringified, anything else empty.
fn key_field(entry: &Value, field: &str) -> String {
    match entry.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
