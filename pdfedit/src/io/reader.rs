//! PDF reading and loading.

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::error::{PdfEditError, Result};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

impl LoadedPdf {
    fn new(document: Document, path: PathBuf, load_time: Duration) -> Self {
        let page_count = document.get_pages().len();
        let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        Self {
            document,
            path,
            page_count,
            load_time,
            file_size,
        }
    }
}

/// PDF reader that loads and verifies documents.
#[derive(Debug, Clone)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path does not exist or is not a file
    /// - The file is not a valid PDF
    /// - The PDF is encrypted
    /// - The document has no catalog
    pub fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let path_buf = path.to_path_buf();

        if !path.exists() {
            return Err(PdfEditError::file_not_found(path_buf));
        }
        if !path.is_file() {
            return Err(PdfEditError::not_a_file(path_buf));
        }

        let start = Instant::now();

        let doc = Document::load(path).map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("encrypt") || err_msg.contains("password") {
                PdfEditError::encrypted_pdf(path_buf.clone())
            } else {
                PdfEditError::failed_to_load_pdf(path_buf.clone(), err_msg)
            }
        })?;

        doc.catalog()
            .map_err(|e| PdfEditError::corrupted_pdf(path_buf.clone(), e.to_string()))?;

        let loaded = LoadedPdf::new(doc, path_buf, start.elapsed());
        debug!(
            path = %loaded.path.display(),
            pages = loaded.page_count,
            "loaded PDF"
        );

        Ok(loaded)
    }

    /// Load a document and report only its page count.
    ///
    /// Used for previews; the document is dropped before returning.
    pub fn page_count(&self, path: &Path) -> Result<usize> {
        Ok(self.load(path)?.page_count)
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}
