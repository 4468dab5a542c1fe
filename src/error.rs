//! Error types for pdfmerge.
//!
//! Per-file failures (missing input, encryption, unreadable PDF) are
//! reported and skipped unless strict mode is on. The remaining variants
//! always end the run.

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfmerge operations.
pub type Result<T> = std::result::Result<T, PdfMergeError>;

/// Main error type for pdfmerge operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfMergeError {
    /// Input file was not found.
    #[error("Not found: {}", path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// PDF could not be opened or parsed.
    #[error("Failed to read {}: {reason}", path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason reported by the PDF library.
        reason: String,
    },

    /// PDF is encrypted and no password was supplied.
    #[error("Encrypted PDF requires password: {}", path.display())]
    PasswordRequired {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// PDF is encrypted and the supplied password did not open it.
    #[error("Could not decrypt {}: {reason}", path.display())]
    DecryptionFailed {
        /// Path to the encrypted PDF.
        path: PathBuf,
        /// Reason reported by the PDF library.
        reason: String,
    },

    /// No candidate files were left after collection and filtering.
    #[error("No PDF files found to merge.")]
    NoFilesToMerge,

    /// Every candidate was skipped or empty.
    #[error("No pages added. Check inputs.")]
    NoPagesAdded,

    /// Failed to create the output file.
    #[error("Failed to create output file {}: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write the output file.
    #[error("Failed to write output file {}: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Page tree manipulation failed.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },
}

impl PdfMergeError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a PasswordRequired error.
    pub fn password_required(path: impl Into<PathBuf>) -> Self {
        Self::PasswordRequired { path: path.into() }
    }

    /// Create a DecryptionFailed error.
    pub fn decryption_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DecryptionFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Check if this error only concerns a single input file.
    ///
    /// Recoverable errors are skipped in the default mode and abort the
    /// merge in strict mode.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. }
                | Self::FailedToLoadPdf { .. }
                | Self::PasswordRequired { .. }
                | Self::DecryptionFailed { .. }
                | Self::MergeFailed { .. }
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::PasswordRequired { .. } => 3,
            Self::DecryptionFailed { .. } => 3,
            Self::NoFilesToMerge => 1,
            Self::NoPagesAdded => 1,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::MergeFailed { .. } => 6,
            Self::InvalidConfig { .. } => 1,
        }
    }
}
