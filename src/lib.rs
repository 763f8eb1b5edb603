//! # codebak Library
//!
//! Snapshots the source of a front-end project into one text file, and can
//! read such a snapshot back.
//!
//! The snapshot holds a fixed manifest of component files plus every
//! `.tsx`, `.ts`, `.js`, `.jsx` and `.mjs` file under `hooks/`, `types/` and
//! `lib/`. Each file becomes a record:
//!
//! ```text
//! === /abs/path/hooks/useFoo.ts ===
//!
//! export const x = 1;
//!
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use codebak::{Config, run_backup};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let summary = run_backup(Config::new(".", "code_backup.txt")).await?;
//!     println!("{} files", summary.files);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod filewalker;
#[cfg(feature = "restore")]
pub mod restore;
pub mod utils;
pub mod writer;

pub use cli::Config;
pub use filewalker::{Selection, collect_files};
#[cfg(feature = "restore")]
pub use restore::{Record, parse_backup, restore_backup};
pub use writer::BackupWriter;

use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::BufWriter;

/// Outcome of a successful backup run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupSummary {
    pub files: usize,
    pub output_path: PathBuf,
}

impl std::fmt::Display for BackupSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Backed up {} files → {}",
            self.files,
            self.output_path.display()
        )
    }
}

/// Collects the project's files and writes them into a single backup file.
///
/// Discovery is lenient: missing manifest files or scan directories add
/// nothing. Writing is strict: the first file that cannot be read as UTF-8
/// text aborts the run.
pub async fn run_backup(config: Config) -> Result<BackupSummary> {
    let entries = collect_files(&config.project_root, &config.selection)?;

    let file = File::create(&config.output_path)
        .await
        .with_context(|| format!("Failed to create output: {}", config.output_path.display()))?;
    let mut backup = BackupWriter::new(BufWriter::new(file));

    for entry in &entries {
        backup.write_entry(entry).await?;
    }

    backup.flush().await?;
    info!(
        "Wrote {} records to {}",
        backup.written(),
        config.output_path.display()
    );

    Ok(BackupSummary {
        files: backup.written(),
        output_path: config.output_path,
    })
}
