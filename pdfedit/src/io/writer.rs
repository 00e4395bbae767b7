//! PDF writing and saving.
//!
//! By default the output path is created (or truncated) and written in place,
//! so a failure part-way leaves a partial file behind. With
//! [`WriteOptions::atomic`] the document is written to a temporary sibling and
//! renamed over the target only once complete.

use lopdf::Document;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::WriteOptions;
use crate::error::{PdfEditError, Result};
use crate::io::format_file_size;

/// Statistics about a write operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Whether compression was applied.
    pub compressed: bool,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a writer with default options (in-place, uncompressed).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer that writes via a temporary file and rename.
    pub fn atomic() -> Self {
        Self {
            options: WriteOptions {
                atomic: true,
                ..Default::default()
            },
        }
    }

    /// Options in effect.
    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    /// Save a PDF document to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output file cannot be created (missing directory, permissions)
    /// - Serialization or flushing fails (disk full, ...)
    /// - The final rename fails in atomic mode
    pub fn save(&self, doc: &mut Document, path: &Path) -> Result<WriteStatistics> {
        let start = Instant::now();

        if self.options.compress {
            doc.compress();
        }

        let write_path = if self.options.atomic {
            temp_path_for(path)
        } else {
            path.to_path_buf()
        };

        let result = self.write_to(doc, &write_path);

        if self.options.atomic {
            let renamed = result.and_then(|()| {
                std::fs::rename(&write_path, path).map_err(|e| PdfEditError::FailedToWrite {
                    path: path.to_path_buf(),
                    source: e,
                })
            });
            if renamed.is_err()
                && write_path.exists()
                && let Err(e) = std::fs::remove_file(&write_path)
            {
                warn!(path = %write_path.display(), error = %e, "could not remove temporary file");
            }
            renamed?;
        } else {
            result?;
        }

        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        debug!(path = %path.display(), bytes = file_size, "wrote PDF");

        Ok(WriteStatistics {
            write_time: start.elapsed(),
            file_size,
            output_path: path.to_path_buf(),
            compressed: self.options.compress,
        })
    }

    fn write_to(&self, doc: &mut Document, path: &Path) -> Result<()> {
        let file =
            std::fs::File::create(path).map_err(|e| PdfEditError::FailedToCreateOutput {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut writer = std::io::BufWriter::with_capacity(self.options.buffer_size, file);

        doc.save_to(&mut writer)
            .map_err(|e| PdfEditError::FailedToWrite {
                path: path.to_path_buf(),
                source: std::io::Error::other(e),
            })?;

        writer.flush().map_err(|e| PdfEditError::FailedToWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Check that the directory `path` would be written into exists.
///
/// A bare file name refers to the current directory and always passes.
///
/// # Errors
///
/// Returns an error if the parent directory is missing or read-only.
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };

    let metadata = std::fs::metadata(parent).map_err(|_| {
        PdfEditError::invalid_config(format!(
            "Output directory does not exist: {}",
            parent.display()
        ))
    })?;

    if !metadata.is_dir() {
        return Err(PdfEditError::invalid_config(format!(
            "Output location is not a directory: {}",
            parent.display()
        )));
    }

    if metadata.permissions().readonly() {
        return Err(PdfEditError::invalid_config(format!(
            "Output directory is not writable: {}",
            parent.display()
        )));
    }

    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
