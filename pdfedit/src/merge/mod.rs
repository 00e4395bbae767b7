//! PDF merging.
//!
//! - [`merger`]: load inputs in order and concatenate their pages
//! - [`pages`]: page-tree assembly shared with splitting
//! - [`outline`]: bookmarks carried over from each input

pub mod merger;
pub mod outline;
pub mod pages;

pub use merger::{MergeStatistics, Merger, merge_files, merge_pdfs};
pub use pages::PageAssembler;
