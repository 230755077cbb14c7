//! Error types for pagesmith.
//!
//! Every failure surfaced by the library is a [`PageSmithError`]. Errors fall
//! into two families:
//!
//! - **Precondition errors**: the operation was refused before any document
//!   was decoded (no input selected, nothing left to keep, bad position).
//! - **Collaborator errors**: decoding, serializing, rendering or delivering
//!   a document failed. These abort the running operation but leave the
//!   session state untouched so the user can retry.

use std::io;
use std::path::PathBuf;

use crate::compose::Operation;

/// Result type alias for pagesmith operations.
pub type Result<T> = std::result::Result<T, PageSmithError>;

/// Main error type for pagesmith operations.
#[derive(Debug, thiserror::Error)]
pub enum PageSmithError {
    /// An operation was triggered without any input file selected.
    #[error("No PDF selected for {operation}. Select a file first")]
    NoInputFile {
        /// Operation that was refused.
        operation: Operation,
    },

    /// A deletion was confirmed while every page was marked for removal.
    #[error("Select at least one page to keep")]
    NothingKept,

    /// A delete was confirmed before any document was loaded for review.
    #[error("No document is loaded for review")]
    NoReviewLoaded,

    /// A page index does not exist in the document.
    #[error("Page index {index} is out of range: document has {page_count} page(s)")]
    PageOutOfRange {
        /// Zero-based page index that was requested.
        index: usize,
        /// Number of pages in the document.
        page_count: usize,
    },

    /// A registry position does not exist.
    #[error("Position {position} is out of range: {len} file(s) selected")]
    PositionOutOfRange {
        /// Zero-based position that was requested.
        position: usize,
        /// Number of files in the registry.
        len: usize,
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
        /// Offending path.
        path: PathBuf,
    },

    /// Input file is not accessible (permission denied, etc.).
    #[error("Cannot access file: {}\n  Reason: {source}", path.display())]
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The codec could not decode a source file.
    #[error("Failed to load PDF: {name}\n  Reason: {reason}")]
    FailedToLoadPdf {
        /// Display name of the source file.
        name: String,
        /// Reason reported by the codec.
        reason: String,
    },

    /// Source file is encrypted.
    #[error(
        "PDF is encrypted and cannot be processed: {name}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools"
    )]
    EncryptedPdf {
        /// Display name of the source file.
        name: String,
    },

    /// Source file decoded but its structure is unusable.
    #[error("Corrupted or invalid PDF: {name}\n  Details: {details}")]
    CorruptedPdf {
        /// Display name of the source file.
        name: String,
        /// What is wrong with it.
        details: String,
    },

    /// Page tree manipulation failed while composing an output document.
    #[error("Failed to compose document: {reason}")]
    CompositionFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// The codec could not serialize a document.
    #[error("Failed to save PDF: {reason}")]
    FailedToSave {
        /// Reason reported by the codec.
        reason: String,
    },

    /// The rasterizer could not produce a page preview.
    #[error("Failed to render page {page}: {reason}")]
    RenderFailed {
        /// One-based page number.
        page: usize,
        /// Reason reported by the rasterizer.
        reason: String,
    },

    /// Output file already exists and overwriting is not allowed.
    #[error(
        "Output file already exists: {}\n  \
         Use --force to overwrite or choose a different output directory",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create an output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to an output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

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

impl From<lopdf::Error> for PageSmithError {
    fn from(err: lopdf::Error) -> Self {
        Self::composition_failed(err.to_string())
    }
}

impl PageSmithError {
    /// Create a NoInputFile error.
    pub fn no_input(operation: Operation) -> Self {
        Self::NoInputFile { operation }
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
    pub fn failed_to_load_pdf(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(name: impl Into<String>) -> Self {
        Self::EncryptedPdf { name: name.into() }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            name: name.into(),
            details: details.into(),
        }
    }

    /// Create a CompositionFailed error.
    pub fn composition_failed(reason: impl Into<String>) -> Self {
        Self::CompositionFailed {
            reason: reason.into(),
        }
    }

    /// Create a FailedToSave error.
    pub fn failed_to_save(reason: impl Into<String>) -> Self {
        Self::FailedToSave {
            reason: reason.into(),
        }
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

    /// Check if the operation was refused before it started.
    ///
    /// Precondition errors never touch the codec; the user fixes the
    /// selection and triggers the operation again.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NoInputFile { .. }
                | Self::NothingKept
                | Self::NoReviewLoaded
                | Self::PageOutOfRange { .. }
                | Self::PositionOutOfRange { .. }
        )
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoInputFile { .. } => 1,
            Self::NothingKept => 1,
            Self::NoReviewLoaded => 1,
            Self::PageOutOfRange { .. } => 1,
            Self::PositionOutOfRange { .. } => 1,
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FileNotAccessible { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::CorruptedPdf { .. } => 3,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::Io { .. } => 5,
            Self::CompositionFailed { .. } => 6,
            Self::FailedToSave { .. } => 6,
            Self::RenderFailed { .. } => 6,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Other { .. } => 1,
        }
    }
}
