//! # Responsa Ingest CLI (`responsa`)
//!
//! Keeps a responsa site's JSON data files current. Run from the site root
//! (or point `--root` at it); a bare invocation runs the Q&A merge once and
//! exits zero on success.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `responsa` / `responsa merge` | Merge Mi Yodeya Q&A dumps into the index, rebuild the archive |
//! | `responsa docs` | Index new HTML/PDF documents from the responsa folder |
//! | `responsa status` | Read-only summary of the data files |
//!
//! ## Examples
//!
//! ```bash
//! # Merge new Q&A dumps, from the site root
//! responsa
//!
//! # Same, from elsewhere, without writing anything
//! responsa merge --root /srv/site --dry-run
//!
//! # Pick up newly uploaded documents
//! responsa docs --root /srv/site
//! ```

mod config;
mod docindex;
mod extract;
mod loader;
mod merge;
mod models;
mod normalize;
mod status;
mod store;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Responsa Ingest merges external Q&A dumps and indexes document folders
/// for a responsa site.
///
/// All paths derive from the site root: `responsa.json` (the index the front
/// end reads), `qa_db.json` (the raw Q&A archive), `miyodea/qa/` (source
/// dumps) and `responsa/` (the document tree).
#[derive(Parser)]
#[command(
    name = "responsa",
    about = "Data-file maintenance for a responsa site",
    version
)]
struct Cli {
    /// Site root holding responsa.json and the source folders.
    ///
    /// Defaults to the current directory.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Merge Mi Yodeya Q&A dumps into the index and rebuild the archive.
    ///
    /// This is the default when no subcommand is given. New entries are
    /// appended to responsa.json, deduplicated by (source path, record id);
    /// qa_db.json is rebuilt from scratch. Re-running over an unchanged
    /// file set is a no-op for the index.
    Merge {
        /// Report what the run would do without writing any file.
        #[arg(long)]
        dry_run: bool,
    },

    /// Index new HTML/PDF documents from the responsa folder.
    ///
    /// Scans the document tree, extracts titles and summaries from HTML,
    /// and appends entries for files the index does not know yet, numbered
    /// sequentially after the largest existing number.
    Docs {
        /// Report what the run would do without writing any file.
        #[arg(long)]
        dry_run: bool,
    },

    /// Show a read-only summary of the data files.
    Status,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    let config = config::Config::from_root(root);

    match cli.command.unwrap_or(Commands::Merge { dry_run: false }) {
        Commands::Merge { dry_run } => merge::run_merge(&config, dry_run)?,
        Commands::Docs { dry_run } => docindex::run_docindex(&config, dry_run)?,
        Commands::Status => status::run_status(&config)?,
    }

    Ok(())
}
