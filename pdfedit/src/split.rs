//! Splitting a PDF into page-range subsets.
//!
//! The source is loaded once. Each range produces its own output file,
//! `{prefix}_{n}.pdf` with `n` counting from 1 in range order. Ranges are
//! clipped to the source; a range that selects nothing still produces a valid
//! PDF with zero pages.
//!
//! # Examples
//!
//! ```no_run
//! use pdfedit::range::parse_ranges;
//! use pdfedit::split::Splitter;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ranges = parse_ranges("1-5,6-end")?;
//! let stats = Splitter::new().split(Path::new("doc.pdf"), &ranges, Path::new("out/doc"))?;
//! for output in &stats.outputs {
//!     println!("{} ({} pages)", output.path.display(), output.page_count);
//! }
//! # Ok(())
//! # }
//! ```

use lopdf::ObjectId;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use crate::error::{PdfEditError, Result};
use crate::io::{PdfReader, PdfWriter};
use crate::merge::PageAssembler;
use crate::range::PageRange;

/// Path of the output written for the range at 0-based `index`.
pub fn split_output_path(prefix: &Path, index: usize) -> PathBuf {
    let mut name = prefix.as_os_str().to_os_string();
    name.push(format!("_{}.pdf", index + 1));
    PathBuf::from(name)
}

/// One output file of a split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitOutput {
    /// Range that produced this file.
    pub range: PageRange,

    /// Where the file is (or would be) written.
    pub path: PathBuf,

    /// Pages the file contains after clipping.
    pub page_count: usize,
}

/// Statistics about a split operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitStatistics {
    /// Page count of the source document.
    pub source_pages: usize,

    /// Files written, in range order.
    pub outputs: Vec<SplitOutput>,

    /// Total bytes written across all outputs.
    pub bytes_written: u64,

    /// Time spent loading the source.
    pub load_time: Duration,

    /// Total time for the split, including writes.
    pub split_time: Duration,
}

/// Work out what a split would produce without touching the filesystem.
pub fn plan_split(ranges: &[PageRange], source_pages: usize, prefix: &Path) -> Vec<SplitOutput> {
    ranges
        .iter()
        .enumerate()
        .map(|(index, range)| SplitOutput {
            range: *range,
            path: split_output_path(prefix, index),
            page_count: range.page_count(source_pages),
        })
        .collect()
}

/// PDF splitter.
#[derive(Debug, Clone, Default)]
pub struct Splitter {
    reader: PdfReader,
    writer: PdfWriter,
}

impl Splitter {
    /// Create a splitter with default reader and writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a splitter that persists through `writer`.
    pub fn with_writer(writer: PdfWriter) -> Self {
        Self {
            reader: PdfReader::new(),
            writer,
        }
    }

    /// Split `input` into one file per range.
    ///
    /// # Errors
    ///
    /// Returns on the first failure. Files already written for earlier ranges
    /// are left in place.
    pub fn split(
        &self,
        input: &Path,
        ranges: &[PageRange],
        output_prefix: &Path,
    ) -> Result<SplitStatistics> {
        let split_start = Instant::now();

        let loaded = self.reader.load(input)?;
        let source = &loaded.document;
        let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();

        let plan = plan_split(ranges, page_ids.len(), output_prefix);
        let mut bytes_written = 0;

        for output in &plan {
            let selected = &page_ids[output.range.page_indices(page_ids.len())];

            let mut assembler = PageAssembler::above(source);
            assembler
                .append_pages(source, selected)
                .map_err(|e| PdfEditError::corrupted_pdf(loaded.path.clone(), e.to_string()))?;
            let mut document = assembler.finish();

            let write = self.writer.save(&mut document, &output.path)?;
            bytes_written += write.file_size;

            debug!(
                range = %output.range,
                pages = output.page_count,
                path = %output.path.display(),
                "wrote split output"
            );
        }

        info!(
            input = %input.display(),
            outputs = plan.len(),
            "split PDF"
        );

        Ok(SplitStatistics {
            source_pages: loaded.page_count,
            outputs: plan,
            bytes_written,
            load_time: loaded.load_time,
            split_time: split_start.elapsed(),
        })
    }
}

/// Split `input` with default settings. See [`Splitter::split`].
pub fn split_file(
    input: &Path,
    ranges: &[PageRange],
    output_prefix: &Path,
) -> Result<SplitStatistics> {
    Splitter::new().split(input, ranges, output_prefix)
}

/// Split `input`, reporting only success or failure.
///
/// The cause of a failure is logged at error level.
pub fn split_pdf(input: &Path, ranges: &[PageRange], output_prefix: &Path) -> bool {
    match split_file(input, ranges, output_prefix) {
        Ok(_) => true,
        Err(e) => {
            error!(error = %e, "Error splitting PDF");
            false
        }
    }
}
