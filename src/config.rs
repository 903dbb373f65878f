//! Run configuration.
//!
//! There is no config file and no environment lookup: every path the
//! pipelines touch derives from a single site root chosen by the caller,
//! so a run is fully described by one [`Config`] value.

use std::path::PathBuf;

/// File locations for one run, all relative to the site root.
#[derive(Debug, Clone)]
pub struct Config {
    /// Site root. Source paths are recorded relative to this.
    pub root: PathBuf,
    /// Index collection consumed by the site front end.
    pub index_path: PathBuf,
    /// Consolidated archive of raw Q&A records.
    pub archive_path: PathBuf,
    /// Root-relative glob selecting Q&A source dumps.
    pub source_glob: String,
    /// Document tree scanned by the `docs` command.
    pub docs_dir: PathBuf,
}

impl Config {
    /// Build the standard layout under a site root.
    pub fn from_root(root: PathBuf) -> Self {
        Self {
            index_path: root.join("responsa.json"),
            archive_path: root.join("qa_db.json"),
            source_glob: "miyodea/qa/*.json".to_string(),
            docs_dir: root.join("responsa"),
            root,
        }
    }
}
