//! pdfedit - Merge PDF files and split PDFs into page ranges.
//!
//! The library exposes two core operations:
//!
//! - [`merge_pdfs`]: concatenate every page of an ordered list of PDFs into
//!   one output document
//! - [`split_pdf`]: extract page ranges from one PDF into separately numbered
//!   output files
//!
//! Both return a plain success flag and log the cause of a failure. Callers
//! that need the cause use [`merge::merge_files`] and [`split::split_file`],
//! which return [`Result`] with the same behavior.
//!
//! # Examples
//!
//! ## Merge
//!
//! ```no_run
//! use std::path::{Path, PathBuf};
//!
//! let inputs = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! if pdfedit::merge_pdfs(&inputs, Path::new("merged.pdf")) {
//!     println!("PDFs merged successfully!");
//! }
//! ```
//!
//! ## Split
//!
//! ```no_run
//! use pdfedit::parse_ranges;
//! use std::path::Path;
//!
//! # fn example() -> pdfedit::Result<()> {
//! let ranges = parse_ranges("1-5,6-end")?;
//! // Writes doc_part_1.pdf and doc_part_2.pdf next to doc.pdf.
//! pdfedit::split_pdf(Path::new("doc.pdf"), &ranges, Path::new("doc_part"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Using Individual Components
//!
//! ```no_run
//! use pdfedit::io::{PdfReader, PdfWriter};
//! use pdfedit::merge::PageAssembler;
//! use std::path::Path;
//!
//! # fn example() -> pdfedit::Result<()> {
//! let loaded = PdfReader::new().load(Path::new("input.pdf"))?;
//! println!("PDF has {} pages", loaded.page_count);
//!
//! let mut assembler = PageAssembler::new();
//! assembler.append_document(loaded.document)?;
//! let mut document = assembler.finish();
//!
//! PdfWriter::new().save(&mut document, Path::new("copy.pdf"))?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod filelist;
pub mod io;
pub mod merge;
pub mod output;
pub mod range;
pub mod split;
pub mod utils;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::{MergeConfig, SplitConfig};
pub use error::{ErrorKind, PdfEditError, Result};
pub use filelist::FileList;
pub use merge::merge_pdfs;
pub use range::{PageRange, RangeEnd, parse_ranges};
pub use split::split_pdf;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
