//! Read-only health overview of the site data files.
//!
//! Never writes and never fails on damaged data; a malformed index is
//! reported as such rather than aborting, so `status` stays usable for
//! diagnosing exactly that situation.

use anyhow::Result;
use serde_json::Value;

use crate::config::Config;
use crate::loader;
use crate::merge;
use crate::store;

pub fn run_status(config: &Config) -> Result<()> {
    let index = describe_collection(store::load_value(&config.index_path).as_ref());
    let archive = describe_collection(
        store::load_value(&config.archive_path)
            .as_ref()
            .and_then(|v| v.get(merge::ARCHIVE_KEY)),
    );

    let source_files = loader::scan(config)
        .map(|scan| scan.files.len() + scan.files_skipped)
        .unwrap_or(0);

    println!("Responsa Ingest — Status");
    println!("========================");
    println!();
    println!("  Root:       {}", config.root.display());
    println!("  Index:      {} — {}", config.index_path.display(), index);
    println!("  Archive:    {} — {}", config.archive_path.display(), archive);
    println!(
        "  Q&A dumps:  {} file{} matching {}",
        source_files,
        if source_files == 1 { "" } else { "s" },
        config.source_glob
    );
    println!(
        "  Documents:  {}",
        if config.docs_dir.is_dir() {
            "present"
        } else {
            "missing"
        }
    );

    Ok(())
}

fn describe_collection(value: Option<&Value>) -> String {
    match value {
        None => "missing".to_string(),
        Some(Value::Array(entries)) => {
            format!(
                "{} entr{}",
                entries.len(),
                if entries.len() == 1 { "y" } else { "ies" }
            )
        }
        Some(_) => "INVALID (not a JSON array)".to_string(),
    }
}
