//! Configuration module for pdfmerge.
//!
//! This module holds the validated, normalized configuration that drives a
//! merge run. It is built from CLI arguments by [`crate::cli::Cli::to_config`]
//! but can also be constructed directly by library users.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{PdfMergeError, Result};

/// Where candidate files come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Explicit list of paths, merged in the given order.
    Files(Vec<PathBuf>),
    /// Directory scanned recursively for `.pdf` files.
    Directory(PathBuf),
}

impl InputSource {
    /// Whether candidates are discovered by scanning a directory.
    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }
}

/// Key used to order files discovered in directory mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Case-insensitive base name.
    #[default]
    Name,
    /// Last modification time.
    Mtime,
    /// File size in bytes.
    Size,
}

impl SortKey {
    /// All accepted key names, in CLI order.
    pub const VARIANTS: [&'static str; 3] = ["name", "mtime", "size"];

    /// Name of the key as accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Mtime => "mtime",
            Self::Size => "size",
        }
    }
}

impl FromStr for SortKey {
    type Err = PdfMergeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "mtime" => Ok(Self::Mtime),
            "size" => Ok(Self::Size),
            _ => Err(PdfMergeError::invalid_config(format!(
                "Invalid sort key: {s}. Must be one of: name, mtime, size"
            ))),
        }
    }
}

/// Complete configuration for a merge run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Explicit file list or directory to scan.
    pub source: InputSource,

    /// Output PDF file path. Always overwritten.
    pub output: PathBuf,

    /// Sort key for directory mode.
    pub sort: SortKey,

    /// Reverse the sort order (directory mode).
    pub reverse: bool,

    /// Password tried on every encrypted input.
    pub password: Option<String>,

    /// Abort on the first per-file failure instead of skipping it.
    pub strict: bool,

    /// Show debug output.
    pub verbose: bool,

    /// Suppress informational output.
    pub quiet: bool,
}

impl Config {
    /// Create a configuration with default options for the given source.
    pub fn new(source: InputSource, output: impl Into<PathBuf>) -> Self {
        Self {
            source,
            output: output.into(),
            sort: SortKey::default(),
            reverse: false,
            password: None,
            strict: false,
            verbose: false,
            quiet: false,
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output path is empty
    /// - The directory path is empty
    /// - Verbose and quiet modes are both enabled
    pub fn validate(&self) -> Result<()> {
        if self.output.as_os_str().is_empty() {
            return Err(PdfMergeError::invalid_config("Output path cannot be empty"));
        }

        if let InputSource::Directory(dir) = &self.source
            && dir.as_os_str().is_empty()
        {
            return Err(PdfMergeError::invalid_config(
                "Directory path cannot be empty",
            ));
        }

        if self.verbose && self.quiet {
            return Err(PdfMergeError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        Ok(())
    }

    /// Password to use for encrypted inputs, ignoring empty strings.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}
