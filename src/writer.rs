use anyhow::{Context, Result};
use log::debug;
use std::path::Path;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

/// Marker text placed before and after a file path in a record header.
pub const MARKER: &str = "===";

/// Renders the header line for a record, including its trailing blank line.
pub fn record_header(path: &Path) -> String {
    format!("{MARKER} {} {MARKER}\n\n", path.display())
}

/// Streams backup records into an output sink.
pub struct BackupWriter<W: AsyncWrite + Unpin> {
    writer: BufWriter<W>,
    written: usize,
}

impl<W: AsyncWrite + Unpin> BackupWriter<W> {
    pub fn new(writer: BufWriter<W>) -> Self {
        Self { writer, written: 0 }
    }

    /// Appends one record: header, blank line, file content, then a blank-line separator.
    ///
    /// The file must be readable UTF-8 text; anything else aborts the backup.
    pub async fn write_entry(&mut self, path: &Path) -> Result<()> {
        debug!("Writing file: {}", path.display());

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        if content.is_empty() {
            debug!("File '{}' is empty", path.display());
        }

        self.writer
            .write_all(record_header(path).as_bytes())
            .await
            .with_context(|| format!("Failed to write header for {}", path.display()))?;

        self.writer
            .write_all(content.as_bytes())
            .await
            .with_context(|| format!("Failed to write content of {}", path.display()))?;

        self.writer
            .write_all(b"\n\n")
            .await
            .with_context(|| format!("Failed to write separator after {}", path.display()))?;

        self.written += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub async fn flush(&mut self) -> Result<()> {
        self.writer.flush().await.context("Failed to flush output")
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}
