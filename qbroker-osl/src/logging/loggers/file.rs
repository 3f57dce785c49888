//! File-based activity logger implementation.
//!
//! This module provides a logger that appends activity logs to a file,
//! creating parent directories as needed and serializing concurrent
//! writers behind an internal lock.

// Layer 1: Standard library imports
use std::path::{Path, PathBuf};

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::Mutex;

// Layer 3: Internal module imports
use crate::logging::activity::{ActivityLog, ActivityLogger};
use crate::logging::config::LogFormat;
use crate::logging::error::LogError;
use crate::logging::formatter::LogFormatter;

/// File-based activity logger with async, append-only I/O.
///
/// Opens (or creates) the destination file in append mode so multiple
/// [`FileActivityLogger`] instances pointed at the same path never
/// truncate each other's entries, and serializes concurrent writers from
/// the same instance behind an internal mutex.
#[derive(Debug)]
pub struct FileActivityLogger {
    path: PathBuf,
    format: LogFormat,
    writer: Mutex<BufWriter<File>>,
}

impl FileActivityLogger {
    /// Opens `path` for appending, creating any missing parent directories
    /// and the file itself if it does not yet exist.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self, LogError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|source| LogError::Io {
                        operation: "create_dir_all".to_string(),
                        path: parent.display().to_string(),
                        source,
                    })?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|source| LogError::Io {
                operation: "open".to_string(),
                path: path.display().to_string(),
                source,
            })?;

        Ok(Self {
            path,
            format: LogFormat::Json,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    /// The path this logger writes to.
    pub fn file_path(&self) -> &Path {
        &self.path
    }

    /// Sets the output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

#[async_trait]
impl ActivityLogger for FileActivityLogger {
    async fn log_activity(&self, log: ActivityLog) -> Result<(), LogError> {
        let mut line = LogFormatter::new(self.format).format(&log);
        line.push('\n');

        let mut writer = self.writer.lock().await;
        writer
            .write_all(line.as_bytes())
            .await
            .map_err(|source| LogError::Io {
                operation: "write".to_string(),
                path: self.path.display().to_string(),
                source,
            })?;
        writer.flush().await.map_err(|source| LogError::Io {
            operation: "flush".to_string(),
            path: self.path.display().to_string(),
            source,
        })
    }

    async fn flush(&self) -> Result<(), LogError> {
        let mut writer = self.writer.lock().await;
        writer.flush().await.map_err(|source| LogError::Io {
            operation: "flush".to_string(),
            path: self.path.display().to_string(),
            source,
        })
    }
}
