//! # Responsa Ingest
//!
//! Data-file maintenance for a responsa site. Two pipelines keep the site's
//! JSON collections current:
//!
//! ```text
//! miyodea/qa/*.json ──▶ Loader ──▶ Merge (dedup) ──▶ responsa.json (append)
//!                                      │
//!                                      └────────────▶ qa_db.json (rebuild)
//!
//! responsa/**.{html,pdf} ──▶ Extract ──▶ Docindex ──▶ responsa.json (append)
//! ```
//!
//! The merge is idempotent: `(src, source_id)` is the dedup key, existing
//! index entries are never touched, and re-running over an unchanged file
//! set adds nothing. The archive has no persistent identity; it is rebuilt
//! from scratch on every run.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Path layout under the site root |
//! | [`models`] | Raw records and index entry shapes |
//! | [`loader`] | Source dump discovery and tolerant parsing |
//! | [`normalize`] | Raw record → canonical index entry |
//! | [`merge`] | The dedup merge and archive rebuild |
//! | [`extract`] | HTML title/summary extraction |
//! | [`docindex`] | Document-folder indexing |
//! | [`status`] | Read-only data-file overview |
//! | [`store`] | JSON file persistence |

pub mod config;
pub mod docindex;
pub mod extract;
pub mod loader;
pub mod merge;
pub mod models;
pub mod normalize;
pub mod status;
pub mod store;
