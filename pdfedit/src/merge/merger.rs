//! Core PDF merging implementation.
//!
//! Inputs are loaded one at a time, in order, and every page of each is
//! appended to a fresh output document. Each input is released as soon as its
//! pages have been copied.

use lopdf::Document;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use crate::error::{PdfEditError, Result};
use crate::io::{PdfReader, PdfWriter, WriteStatistics, format_file_size};
use crate::merge::pages::PageAssembler;

/// Statistics about a merge operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeStatistics {
    /// Number of input files merged.
    pub files_merged: usize,

    /// Page count contributed by each input, in input order.
    pub pages_per_file: Vec<usize>,

    /// Total number of pages in the merged document.
    pub total_pages: usize,

    /// Total size of input files.
    pub input_size: u64,

    /// Time spent loading inputs.
    pub load_time: Duration,

    /// Total time for the merge, excluding the final write.
    pub merge_time: Duration,

    /// Present once the merged document has been written.
    pub write: Option<WriteStatistics>,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// PDF merger that concatenates documents.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    reader: PdfReader,
    writer: PdfWriter,
}

impl Merger {
    /// Create a merger with default reader and writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a merger that persists through `writer`.
    pub fn with_writer(writer: PdfWriter) -> Self {
        Self {
            reader: PdfReader::new(),
            writer,
        }
    }

    /// Build the merged document in memory.
    ///
    /// Works for any number of inputs: one input yields a copy of it, none
    /// yields a document with zero pages.
    ///
    /// # Errors
    ///
    /// Returns the first load or page-copy failure; nothing after the failing
    /// input is read.
    pub fn merge_documents(&self, inputs: &[PathBuf]) -> Result<(Document, MergeStatistics)> {
        let merge_start = Instant::now();
        let mut load_time = Duration::ZERO;
        let mut input_size = 0;
        let mut pages_per_file = Vec::with_capacity(inputs.len());
        let mut assembler = PageAssembler::new();

        for (idx, path) in inputs.iter().enumerate() {
            debug!(
                "[{}/{}] appending {}",
                idx + 1,
                inputs.len(),
                path.display()
            );

            let loaded = self.reader.load(path)?;
            load_time += loaded.load_time;
            input_size += loaded.file_size;

            let appended = assembler
                .append_document(loaded.document)
                .map_err(|e| PdfEditError::corrupted_pdf(path.clone(), e.to_string()))?;
            pages_per_file.push(appended);
        }

        let document = assembler.finish();

        let statistics = MergeStatistics {
            files_merged: inputs.len(),
            total_pages: pages_per_file.iter().sum(),
            pages_per_file,
            input_size,
            load_time,
            merge_time: merge_start.elapsed(),
            write: None,
        };

        Ok((document, statistics))
    }

    /// Merge `inputs` and write the result to `output`, replacing any
    /// existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if any input cannot be loaded or the output cannot be
    /// written. A partially written output file is not removed.
    pub fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<MergeStatistics> {
        let (mut document, mut statistics) = self.merge_documents(inputs)?;

        let write = self.writer.save(&mut document, output)?;
        statistics.write = Some(write);

        info!(
            files = statistics.files_merged,
            pages = statistics.total_pages,
            output = %output.display(),
            "merged PDFs"
        );

        Ok(statistics)
    }
}

/// Merge `inputs` into `output` with default settings.
///
/// See [`Merger::merge`].
pub fn merge_files(inputs: &[PathBuf], output: &Path) -> Result<MergeStatistics> {
    Merger::new().merge(inputs, output)
}

/// Merge `inputs` into `output`, reporting only success or failure.
///
/// The cause of a failure is logged at error level.
pub fn merge_pdfs(inputs: &[PathBuf], output: &Path) -> bool {
    match merge_files(inputs, output) {
        Ok(_) => true,
        Err(e) => {
            error!(error = %e, "Error merging PDFs");
            false
        }
    }
}
