//! Error types for pdfedit.
//!
//! Every failure is classified into one of three kinds so that a front end can
//! pick the right message without inspecting individual variants:
//!
//! - **Format**: the page-range string is malformed. Detected before any file
//!   is opened.
//! - **I/O**: opening, parsing or writing a PDF failed (missing file,
//!   permission denied, corrupt structure, disk full, ...).
//! - **Usage**: a front-end precondition was violated (too few inputs,
//!   duplicate input, output already exists, ...).

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfedit operations.
pub type Result<T> = std::result::Result<T, PdfEditError>;

/// Message shown for any malformed page-range input.
pub const RANGE_FORMAT_MESSAGE: &str =
    "Invalid page range format. Please use format like '1-5,7-10'.";

/// Broad classification of a [`PdfEditError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed page-range input.
    Format,
    /// Failure reading or writing a PDF file.
    Io,
    /// Front-end precondition or configuration problem.
    Usage,
}

/// Main error type for pdfedit operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfEditError {
    /// A page-range token could not be parsed.
    #[error("Invalid page range '{token}': {reason}")]
    InvalidRangeFormat {
        /// The offending token, as typed.
        token: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input path exists but is not a regular file.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// The PDF codec could not load the file.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason reported by the codec.
        reason: String,
    },

    /// PDF loaded but its structure is unusable.
    #[error("Corrupted or invalid PDF: {}\n  Details: {details}", path.display())]
    CorruptedPdf {
        /// Path to the corrupted PDF.
        path: PathBuf,
        /// Details about the corruption.
        details: String,
    },

    /// PDF is encrypted and cannot be processed.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// Output file could not be created.
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Writing the output file failed part-way.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Fewer input files than a merge requires.
    #[error("Please select at least {required} PDF files to merge (got {found})")]
    TooFewInputs {
        /// Minimum number of inputs.
        required: usize,
        /// Number of inputs supplied.
        found: usize,
    },

    /// No input file was selected.
    #[error("Please select a PDF file to split")]
    NoInputSelected,

    /// Output file already exists and overwriting was refused.
    #[error(
        "Output file already exists: {}\n  Remove --no-clobber or choose a different output path",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to read the input list file.
    #[error("Failed to read input list file: {}\n  Reason: {source}", path.display())]
    FailedToReadInputList {
        /// Path to the input list file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Input list file contains an invalid entry.
    #[error(
        "Invalid entry in input list file: {} at line {line_number}\n  Details: {details}",
        path.display()
    )]
    InvalidInputList {
        /// Path to the input list file.
        path: PathBuf,
        /// Line number with the error.
        line_number: usize,
        /// Details about what's invalid.
        details: String,
    },

    /// A glob pattern could not be expanded.
    #[error("Invalid input pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern as given.
        pattern: String,
        /// Reason reported by the glob matcher.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl PdfEditError {
    /// Create an InvalidRangeFormat error.
    pub fn invalid_range(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRangeFormat {
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(path: PathBuf, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            path,
            details: details.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRangeFormat { .. } => ErrorKind::Format,
            Self::FileNotFound { .. }
            | Self::NotAFile { .. }
            | Self::FailedToLoadPdf { .. }
            | Self::CorruptedPdf { .. }
            | Self::EncryptedPdf { .. }
            | Self::FailedToCreateOutput { .. }
            | Self::FailedToWrite { .. }
            | Self::Io { .. }
            | Self::Other { .. } => ErrorKind::Io,
            Self::TooFewInputs { .. }
            | Self::NoInputSelected
            | Self::OutputExists { .. }
            | Self::FailedToReadInputList { .. }
            | Self::InvalidInputList { .. }
            | Self::InvalidPattern { .. }
            | Self::InvalidConfig { .. } => ErrorKind::Usage,
        }
    }

    /// True for malformed page-range input.
    pub fn is_format_error(&self) -> bool {
        self.kind() == ErrorKind::Format
    }

    /// Message intended for direct display to the user.
    ///
    /// I/O failures collapse into one generic line per operation; the detailed
    /// cause is only logged. `operation` is the verb shown to the user, e.g.
    /// `"merge PDFs"`.
    pub fn user_message(&self, operation: &str) -> String {
        match self.kind() {
            ErrorKind::Format => RANGE_FORMAT_MESSAGE.to_string(),
            ErrorKind::Io => format!("Failed to {operation}. Please try again."),
            ErrorKind::Usage => self.to_string(),
        }
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidRangeFormat { .. } => 1,
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::CorruptedPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::Io { .. } => 5,
            Self::FailedToReadInputList { .. } => 2,
            Self::TooFewInputs { .. }
            | Self::NoInputSelected
            | Self::InvalidInputList { .. }
            | Self::InvalidPattern { .. }
            | Self::InvalidConfig { .. }
            | Self::Other { .. } => 1,
        }
    }
}
