//! Configuration for merge and split runs.
//!
//! Front ends build a [`MergeConfig`] or [`SplitConfig`] from user input and
//! call `validate()` before handing paths to the core operations. The rules
//! enforced here (at least two inputs, no input doubling as output, ...) are
//! presentation-layer rules; the operations themselves accept any input.

use std::path::{Path, PathBuf};

use crate::error::{PdfEditError, Result};
use crate::filelist::FileList;
use crate::io::writer::ensure_output_dir;
use crate::range::{PageRange, parse_ranges};
use crate::split::split_output_path;

/// Minimum number of inputs a front end should accept for a merge.
pub const MIN_MERGE_INPUTS: usize = 2;

/// Range string used when the user supplies none.
pub const DEFAULT_RANGES: &str = "1-end";

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Replace existing files silently (default).
    #[default]
    Force,
    /// Never overwrite; fail if an output file exists.
    NoClobber,
}

impl OverwriteMode {
    /// Check a prospective output path against this mode.
    ///
    /// # Errors
    ///
    /// Returns [`PdfEditError::OutputExists`] in no-clobber mode when `path`
    /// already exists.
    pub fn check(&self, path: &Path) -> Result<()> {
        match self {
            Self::Force => Ok(()),
            Self::NoClobber if path.exists() => Err(PdfEditError::output_exists(path.to_path_buf())),
            Self::NoClobber => Ok(()),
        }
    }
}

/// Options controlling how output documents are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Write to a temporary sibling file and rename it into place on success.
    pub atomic: bool,

    /// Compress content streams before writing.
    pub compress: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: false,
            compress: false,
            buffer_size: 8192,
        }
    }
}

/// Complete configuration for a merge.
#[derive(Debug, Clone, Default)]
pub struct MergeConfig {
    /// Input PDF file paths, in merge order, without duplicates.
    pub inputs: FileList,

    /// Output PDF file path.
    pub output: PathBuf,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Persistence options.
    pub write: WriteOptions,

    /// Validate and report without writing.
    pub dry_run: bool,
}

impl MergeConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Fewer than [`MIN_MERGE_INPUTS`] inputs are listed
    /// - The output path is also an input
    /// - The output's directory is missing or read-only
    /// - The output exists and overwriting is disabled
    pub fn validate(&self) -> Result<()> {
        if self.inputs.len() < MIN_MERGE_INPUTS {
            return Err(PdfEditError::TooFewInputs {
                required: MIN_MERGE_INPUTS,
                found: self.inputs.len(),
            });
        }

        if self.output.as_os_str().is_empty() {
            return Err(PdfEditError::invalid_config("No output file specified"));
        }

        if self.inputs.contains(&self.output) {
            return Err(PdfEditError::invalid_config(format!(
                "Output file cannot be the same as an input file: {}",
                self.output.display()
            )));
        }

        ensure_output_dir(&self.output)?;

        if !self.dry_run {
            self.overwrite_mode.check(&self.output)?;
        }

        Ok(())
    }
}

/// Complete configuration for a split.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// The PDF to split.
    pub input: PathBuf,

    /// Ranges to extract, one output file each.
    pub ranges: Vec<PageRange>,

    /// Directory for the output files. Defaults to the input's directory.
    pub output_dir: Option<PathBuf>,

    /// File-name stem for the outputs. Defaults to the input's stem.
    pub stem: Option<String>,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Persistence options.
    pub write: WriteOptions,

    /// Validate and report without writing.
    pub dry_run: bool,
}

impl SplitConfig {
    /// Build a config from an input path and a raw range string.
    ///
    /// # Errors
    ///
    /// Returns a format error if `ranges` is malformed. Nothing is read from
    /// disk.
    pub fn new(input: impl Into<PathBuf>, ranges: &str) -> Result<Self> {
        Ok(Self {
            input: input.into(),
            ranges: parse_ranges(ranges)?,
            output_dir: None,
            stem: None,
            overwrite_mode: OverwriteMode::default(),
            write: WriteOptions::default(),
            dry_run: false,
        })
    }

    /// Path stem shared by all outputs, e.g. `out/report` for
    /// `out/report_1.pdf`, `out/report_2.pdf`, ...
    ///
    /// # Errors
    ///
    /// Returns an error if no stem was given and the input path has no file
    /// name to derive one from.
    pub fn output_prefix(&self) -> Result<PathBuf> {
        let stem = match &self.stem {
            Some(stem) => stem.clone(),
            None => self
                .input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    PdfEditError::invalid_config(format!(
                        "Cannot derive an output name from: {}",
                        self.input.display()
                    ))
                })?,
        };

        let dir = match &self.output_dir {
            Some(dir) => dir.clone(),
            None => self
                .input
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        };

        Ok(dir.join(stem))
    }

    /// Paths the split would write, in order.
    pub fn output_paths(&self) -> Result<Vec<PathBuf>> {
        let prefix = self.output_prefix()?;
        Ok((0..self.ranges.len())
            .map(|index| split_output_path(&prefix, index))
            .collect())
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input is selected or no ranges are given
    /// - The stem is empty or contains a path separator
    /// - The output directory does not exist
    /// - An output would overwrite the input, or exists under no-clobber
    pub fn validate(&self) -> Result<()> {
        if self.input.as_os_str().is_empty() {
            return Err(PdfEditError::NoInputSelected);
        }

        if self.ranges.is_empty() {
            return Err(PdfEditError::invalid_range("", "no page ranges given"));
        }

        if let Some(stem) = &self.stem
            && (stem.trim().is_empty() || stem.contains(['/', '\\']))
        {
            return Err(PdfEditError::invalid_config(format!(
                "Invalid output name: '{stem}'"
            )));
        }

        if let Some(dir) = &self.output_dir
            && !dir.is_dir()
        {
            return Err(PdfEditError::invalid_config(format!(
                "Output directory does not exist: {}",
                dir.display()
            )));
        }

        for path in self.output_paths()? {
            if path == self.input {
                return Err(PdfEditError::invalid_config(format!(
                    "Output file cannot be the same as the input file: {}",
                    path.display()
                )));
            }
            if !self.dry_run {
                self.overwrite_mode.check(&path)?;
            }
        }

        Ok(())
    }
}
