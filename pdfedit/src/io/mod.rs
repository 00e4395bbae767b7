//! File I/O for pdfedit.
//!
//! Loading goes through [`PdfReader`], persisting through [`PdfWriter`]. Both
//! are synchronous; each document handle is owned by the caller and dropped
//! when it goes out of scope.
//!
//! # Examples
//!
//! ```no_run
//! use pdfedit::io::{PdfReader, PdfWriter};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let mut loaded = reader.load(Path::new("input.pdf"))?;
//!
//! let writer = PdfWriter::new();
//! writer.save(&mut loaded.document, Path::new("copy.pdf"))?;
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteStatistics};

/// Format a byte count as a human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
