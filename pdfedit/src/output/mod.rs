//! User-facing output for pdfedit front ends.
//!
//! - [`formatter`]: quiet/verbose aware status lines
//! - summary helpers for merge and split results
//!
//! # Examples
//!
//! ```no_run
//! use pdfedit::output::{MERGE_SUCCESS_MESSAGE, OutputFormatter};
//!
//! let formatter = OutputFormatter::new(false, false);
//! formatter.info("Merging documents...");
//! formatter.success(MERGE_SUCCESS_MESSAGE);
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use std::path::Path;
use std::time::Duration;

use crate::io::format_file_size;
use crate::merge::MergeStatistics;
use crate::split::{SplitOutput, SplitStatistics};

/// Shown after a successful merge.
pub const MERGE_SUCCESS_MESSAGE: &str = "PDFs merged successfully!";

/// Shown after a successful split.
pub const SPLIT_SUCCESS_MESSAGE: &str = "PDF split successfully!";

fn seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_secs_f64())
}

fn pages(count: usize) -> String {
    if count == 1 {
        "1 page".to_string()
    } else {
        format!("{count} pages")
    }
}

/// Display the inputs of a merge and the page count each contributes.
///
/// `page_counts` pairs with `inputs`; it may be shorter when counting stopped
/// at a failure.
pub fn display_merge_plan(
    formatter: &OutputFormatter,
    inputs: &[impl AsRef<Path>],
    page_counts: &[usize],
    output: &Path,
) {
    for (index, input) in inputs.iter().enumerate() {
        let name = input.as_ref().display();
        match page_counts.get(index) {
            Some(count) => formatter.list_item(index + 1, &format!("{name} ({})", pages(*count))),
            None => formatter.list_item(index + 1, &name.to_string()),
        }
    }

    let total: usize = page_counts.iter().sum();
    formatter.info(&format!(
        "Would write {} to {}",
        pages(total),
        output.display()
    ));
}

/// Display the output files a split would produce.
pub fn display_split_plan(formatter: &OutputFormatter, source_pages: usize, plan: &[SplitOutput]) {
    formatter.info(&format!("Source has {}", pages(source_pages)));
    for (index, output) in plan.iter().enumerate() {
        formatter.list_item(
            index + 1,
            &format!(
                "{} -> {} ({})",
                output.range,
                output.path.display(),
                pages(output.page_count)
            ),
        );
    }
}

/// Display merge statistics.
///
/// One summary line normally; timings and sizes in verbose mode.
pub fn display_merge_statistics(formatter: &OutputFormatter, stats: &MergeStatistics) {
    formatter.info(&format!(
        "Merged {} file(s) into {} in {}",
        stats.files_merged,
        pages(stats.total_pages),
        seconds(stats.merge_time)
    ));

    if formatter.is_verbose() {
        formatter.section("Statistics");
        formatter.detail("Input files", &stats.files_merged.to_string());
        formatter.detail("Total pages", &stats.total_pages.to_string());
        formatter.detail("Input size", &stats.format_input_size());
        formatter.detail("Load time", &seconds(stats.load_time));
        formatter.detail("Merge time", &seconds(stats.merge_time));
        if let Some(write) = &stats.write {
            formatter.detail("Output size", &write.format_file_size());
            formatter.detail("Write time", &seconds(write.write_time));
            formatter.detail("Compression", if write.compressed { "Yes" } else { "No" });
        }
    }
}

/// Display split statistics.
pub fn display_split_statistics(formatter: &OutputFormatter, stats: &SplitStatistics) {
    formatter.info(&format!(
        "Wrote {} file(s) from a {} source in {}",
        stats.outputs.len(),
        pages(stats.source_pages),
        seconds(stats.split_time)
    ));

    if formatter.is_verbose() {
        formatter.section("Outputs");
        for output in &stats.outputs {
            formatter.detail(&output.path.display().to_string(), &pages(output.page_count));
        }
        formatter.detail("Bytes written", &format_file_size(stats.bytes_written));
        formatter.detail("Load time", &seconds(stats.load_time));
    }
}
