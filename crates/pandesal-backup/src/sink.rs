//! # Export Sinks
//!
//! Where finished export and backup files go.
//!
//! A sink only ever receives a complete file: every routine renders the
//! whole document in memory first, so a failure before delivery leaves
//! nothing behind.
//!
//! - [`DirectorySink`] writes into a directory on disk (the CLI's sink).
//! - [`MemorySink`] collects files in memory (tests, embedding hosts).

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use tracing::{debug, warn};

/// A finished file ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub name: String,
    pub mime_type: &'static str,
    pub contents: String,
}

impl ExportFile {
    pub fn new(name: impl Into<String>, mime_type: &'static str, contents: String) -> Self {
        ExportFile {
            name: name.into(),
            mime_type,
            contents,
        }
    }
}

/// Destination for finished files.
pub trait ExportSink: Send + Sync {
    /// Delivers `file` and returns where it landed.
    fn deliver(&self, file: ExportFile) -> impl Future<Output = io::Result<PathBuf>> + Send;
}

// =============================================================================
// Directory Sink
// =============================================================================

/// Writes files into a directory, creating it when missing.
///
/// Files are written to `<name>.part` and renamed into place, so a reader
/// never sees a half-written export.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectorySink { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for DirectorySink {
    async fn deliver(&self, file: ExportFile) -> io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let target = self.dir.join(&file.name);
        let partial = self.dir.join(format!("{}.part", file.name));

        if let Err(e) = tokio::fs::write(&partial, file.contents.as_bytes()).await {
            warn!(path = %partial.display(), error = %e, "Write failed, removing partial file");
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(e);
        }
        tokio::fs::rename(&partial, &target).await?;

        debug!(
            path = %target.display(),
            bytes = file.contents.len(),
            mime_type = file.mime_type,
            "Export file written"
        );
        Ok(target)
    }
}

// =============================================================================
// Memory Sink
// =============================================================================

/// Keeps delivered files in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Mutex<Vec<ExportFile>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies of every file delivered so far, oldest first.
    pub async fn files(&self) -> Vec<ExportFile> {
        self.files.lock().await.clone()
    }

    /// The most recently delivered file.
    pub async fn last(&self) -> Option<ExportFile> {
        self.files.lock().await.last().cloned()
    }
}

impl ExportSink for MemorySink {
    async fn deliver(&self, file: ExportFile) -> io::Result<PathBuf> {
        let location = PathBuf::from(&file.name);
        self.files.lock().await.push(file);
        Ok(location)
    }
}
