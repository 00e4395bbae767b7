//! CLI argument parsing for pdfedit.
//!
//! This module defines the command-line interface structure using `clap`.
//! It is also compiled into the build script to render the man page, so it
//! only depends on `clap` and the `pdfedit` library.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use pdfedit::config::{DEFAULT_RANGES, MergeConfig, OverwriteMode, SplitConfig, WriteOptions};
use pdfedit::error::Result;
use pdfedit::filelist::FileList;
use pdfedit::output::OutputFormatter;
use pdfedit::utils::collect_paths_for_patterns;

/// Merge PDF files and split PDFs into page ranges.
#[derive(Parser, Debug)]
#[command(name = "pdfedit")]
#[command(version)]
#[command(about = "Merge PDF files and split PDFs into page ranges", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,

    /// Output verbosity, shared by all subcommands.
    #[command(flatten)]
    pub output: OutputArgs,
}

/// pdfedit subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Concatenate PDF files, in order, into a single document
    ///
    /// Examples:
    ///   pdfedit merge a.pdf b.pdf -o combined.pdf
    ///   pdfedit merge chapter*.pdf -o book.pdf
    Merge(MergeArgs),

    /// Write page ranges of a PDF into separate numbered files
    ///
    /// Each range produces <DIR>/<PREFIX>_<n>.pdf, numbered from 1 in the
    /// order the ranges are given.
    ///
    /// Examples:
    ///   pdfedit split doc.pdf -r 1-5,6-end
    ///   pdfedit split doc.pdf -r 1-3 -d out -p intro
    Split(SplitArgs),
}

impl Command {
    /// Verb used in user-facing failure messages.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Merge(_) => "merge PDFs",
            Self::Split(_) => "split PDF",
        }
    }
}

/// Flags controlling how much is printed.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Verbose output - show statistics and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print the result as JSON on stdout instead of status lines
    #[arg(long, global = true)]
    pub json: bool,
}

impl OutputArgs {
    /// Formatter for human-readable status lines.
    ///
    /// JSON mode keeps stdout for the document and only lets warnings and
    /// errors through.
    pub fn formatter(&self) -> OutputFormatter {
        OutputFormatter::new(self.quiet || self.json, self.verbose && !self.json)
    }

    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "pdfedit=debug"
        } else if self.quiet {
            "off"
        } else {
            "warn"
        }
    }
}

/// Flags controlling how output files are written.
#[derive(Args, Debug, Clone, Default)]
pub struct WriteArgs {
    /// Never overwrite existing output files
    ///
    /// By default existing files are replaced silently.
    #[arg(long)]
    pub no_clobber: bool,

    /// Write each output to a temporary file and rename it into place
    ///
    /// A failed write then leaves no partial output behind.
    #[arg(long)]
    pub atomic: bool,

    /// Compress content streams in the output
    #[arg(long)]
    pub compress: bool,
}

impl WriteArgs {
    /// Overwrite policy selected by the flags.
    pub fn overwrite_mode(&self) -> OverwriteMode {
        if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Force
        }
    }

    /// Persistence options selected by the flags.
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            atomic: self.atomic,
            compress: self.compress,
            ..WriteOptions::default()
        }
    }
}

/// Arguments for `pdfedit merge`.
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Input PDF files or glob patterns, merged in the order given
    #[arg(value_name = "FILE", required_unless_present = "input_list")]
    pub inputs: Vec<String>,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Read more inputs from a file (one path per line, '#' starts a comment)
    ///
    /// Use '-' to read from stdin. Listed paths are appended after the
    /// inputs given on the command line.
    #[arg(long, value_name = "FILE")]
    pub input_list: Option<PathBuf>,

    /// Validate inputs and show the result without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub write: WriteArgs,
}

impl MergeArgs {
    /// Expand glob patterns among the command-line inputs.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid pattern or one matching nothing.
    pub fn expand_inputs(&self) -> Result<Vec<PathBuf>> {
        collect_paths_for_patterns(&self.inputs)
    }

    /// Build the merge configuration from already expanded `inputs`.
    ///
    /// Returns the configuration together with the inputs dropped as
    /// duplicates, in the order they were seen.
    pub fn to_config(&self, inputs: Vec<PathBuf>) -> (MergeConfig, Vec<PathBuf>) {
        let mut files = FileList::new();
        let duplicates = files.extend(inputs);

        let config = MergeConfig {
            inputs: files,
            output: self.output.clone(),
            overwrite_mode: self.write.overwrite_mode(),
            write: self.write.write_options(),
            dry_run: self.dry_run,
        };

        (config, duplicates)
    }
}

/// Arguments for `pdfedit split`.
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// PDF file to split
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Comma-separated page ranges, e.g. "1-5,7-10" or "3-end"
    #[arg(short, long, value_name = "RANGES", default_value = DEFAULT_RANGES)]
    pub ranges: String,

    /// Directory for the output files [default: the input's directory]
    #[arg(short = 'd', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// File-name prefix for the outputs [default: the input's file stem]
    #[arg(short, long, value_name = "NAME")]
    pub prefix: Option<String>,

    /// Validate the input and list the files that would be written
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub write: WriteArgs,
}

impl SplitArgs {
    /// Build the split configuration.
    ///
    /// # Errors
    ///
    /// Returns a format error if the range string is malformed. Nothing is
    /// read from disk.
    pub fn to_config(&self) -> Result<SplitConfig> {
        let mut config = SplitConfig::new(&self.input, &self.ranges)?;
        config.output_dir = self.output_dir.clone();
        config.stem = self.prefix.clone();
        config.overwrite_mode = self.write.overwrite_mode();
        config.write = self.write.write_options();
        config.dry_run = self.dry_run;
        Ok(config)
    }
}
