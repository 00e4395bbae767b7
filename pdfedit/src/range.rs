//! Page-range parsing.
//!
//! A range string is a comma-separated list of `<start>-<end>` tokens, where
//! `<start>` is a 1-based page number and `<end>` is either a page number or
//! the word `end` (any case) meaning "through the last page".
//!
//! Parsing is purely syntactic. `5-3` and overlapping ranges are accepted;
//! they are resolved against a document only when a split consumes them.
//!
//! # Examples
//!
//! ```
//! use pdfedit::range::{parse_ranges, RangeEnd};
//!
//! let ranges = parse_ranges("1-5,6-end").unwrap();
//! assert_eq!(ranges.len(), 2);
//! assert_eq!(ranges[1].end, RangeEnd::Last);
//! assert_eq!(ranges[1].page_indices(10), 5..10);
//! ```

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{PdfEditError, Result};

/// Keyword accepted in place of an end page number.
pub const END_KEYWORD: &str = "end";

/// Upper bound of a [`PageRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RangeEnd {
    /// A concrete 1-based page number.
    Page(u32),
    /// The last page of whatever document the range is applied to.
    Last,
}

impl RangeEnd {
    /// Resolve against a page count, giving an exclusive 0-based bound.
    fn clip(self, page_count: usize) -> usize {
        match self {
            Self::Page(page) => (page as usize).min(page_count),
            Self::Last => page_count,
        }
    }
}

/// An inclusive, 1-based span of pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PageRange {
    /// First page, always `>= 1`.
    pub start: u32,
    /// Last page, or [`RangeEnd::Last`].
    pub end: RangeEnd,
}

impl PageRange {
    /// Create a bounded range.
    ///
    /// # Errors
    ///
    /// Returns a format error if `start` is zero.
    pub fn new(start: u32, end: u32) -> Result<Self> {
        Self::with_end(start, RangeEnd::Page(end))
    }

    /// Create a range that runs to the last page.
    ///
    /// # Errors
    ///
    /// Returns a format error if `start` is zero.
    pub fn to_end(start: u32) -> Result<Self> {
        Self::with_end(start, RangeEnd::Last)
    }

    fn with_end(start: u32, end: RangeEnd) -> Result<Self> {
        if start == 0 {
            return Err(PdfEditError::invalid_range(
                format!("{start}-{}", EndDisplay(end)),
                "page numbers start at 1",
            ));
        }
        Ok(Self { start, end })
    }

    /// 0-based indices of the pages this range selects in a document with
    /// `page_count` pages.
    ///
    /// The range is clipped to the document; a start past the last page, or a
    /// start after the end, yields an empty range. A start of 0, which only a
    /// struct literal can produce, is read as 1.
    pub fn page_indices(&self, page_count: usize) -> Range<usize> {
        let first = (self.start as usize).saturating_sub(1).min(page_count);
        let last = self.end.clip(page_count);
        if first >= last { first..first } else { first..last }
    }

    /// Number of pages selected from a document with `page_count` pages.
    pub fn page_count(&self, page_count: usize) -> usize {
        self.page_indices(page_count).len()
    }
}

struct EndDisplay(RangeEnd);

impl fmt::Display for EndDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            RangeEnd::Page(page) => write!(f, "{page}"),
            RangeEnd::Last => f.write_str(END_KEYWORD),
        }
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, EndDisplay(self.end))
    }
}

impl FromStr for PageRange {
    type Err = PdfEditError;

    /// Parse a single `<start>-<end>` token.
    fn from_str(token: &str) -> Result<Self> {
        let mut parts = token.split('-');
        let (Some(start), Some(end), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(PdfEditError::invalid_range(
                token,
                "expected exactly one '-' between start and end",
            ));
        };

        let start: u32 = start.trim().parse().map_err(|_| {
            PdfEditError::invalid_range(token, format!("start page '{}' is not a number", start.trim()))
        })?;

        let end = end.trim();
        let end = if end.eq_ignore_ascii_case(END_KEYWORD) {
            RangeEnd::Last
        } else {
            let page: u32 = end.parse().map_err(|_| {
                PdfEditError::invalid_range(
                    token,
                    format!("end page '{end}' is neither a number nor '{END_KEYWORD}'"),
                )
            })?;
            if page == 0 {
                return Err(PdfEditError::invalid_range(token, "page numbers start at 1"));
            }
            RangeEnd::Page(page)
        };

        if start == 0 {
            return Err(PdfEditError::invalid_range(token, "page numbers start at 1"));
        }

        Ok(Self { start, end })
    }
}

/// Parse a comma-separated list of range tokens, preserving order.
///
/// # Errors
///
/// Returns [`PdfEditError::InvalidRangeFormat`] for the first malformed token.
/// An empty string or an empty token (`"1-2,"`) is malformed.
pub fn parse_ranges(input: &str) -> Result<Vec<PageRange>> {
    input.split(',').map(str::parse).collect()
}

/// Render ranges back into the comma-separated form accepted by
/// [`parse_ranges`].
pub fn format_ranges(ranges: &[PageRange]) -> String {
    ranges
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
