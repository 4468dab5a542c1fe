//! PDF writing and saving operations.
//!
//! The merged document is serialized exactly once, at the end of a run.
//! Writes go through a buffered writer and land in a temporary file next to
//! the target that is renamed over it once complete.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::io::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # fn example(mut doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! writer.save(&mut doc, Path::new("output.pdf"))?;
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::ffi::OsString;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::error::{PdfMergeError, Result};

const BUFFER_SIZE: usize = 8192;

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Atomic PDF writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfWriter;

impl PdfWriter {
    /// Create a new PDF writer.
    pub fn new() -> Self {
        Self
    }

    /// Save a PDF document to a file, overwriting any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, the file
    /// cannot be created, or serialization fails.
    pub fn save(&self, doc: &mut Document, path: &Path) -> Result<()> {
        self.save_with_stats(doc, path).map(|_| ())
    }

    /// Save a PDF and return statistics about the operation.
    pub fn save_with_stats(&self, doc: &mut Document, path: &Path) -> Result<WriteStatistics> {
        let start = Instant::now();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| PdfMergeError::FailedToCreateOutput {
                path: path.to_path_buf(),
                source,
            })?;
        }

        let write_path = temp_path_for(path);

        if let Err(err) = self.write_file(doc, &write_path) {
            let _ = fs::remove_file(&write_path);
            return Err(err);
        }

        fs::rename(&write_path, path).map_err(|source| {
            let _ = fs::remove_file(&write_path);
            PdfMergeError::FailedToWrite {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let file_size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let write_time = start.elapsed();

        debug!(
            path = %path.display(),
            bytes = file_size,
            elapsed_ms = write_time.as_millis() as u64,
            "wrote output PDF"
        );

        Ok(WriteStatistics {
            write_time,
            file_size,
            output_path: path.to_path_buf(),
        })
    }

    fn write_file(&self, doc: &mut Document, write_path: &Path) -> Result<()> {
        let file =
            fs::File::create(write_path).map_err(|source| PdfMergeError::FailedToCreateOutput {
                path: write_path.to_path_buf(),
                source,
            })?;

        let mut writer = BufWriter::with_capacity(BUFFER_SIZE, file);

        doc.save_to(&mut writer)
            .map_err(|err| PdfMergeError::FailedToWrite {
                path: write_path.to_path_buf(),
                source: std::io::Error::other(err),
            })?;

        writer.flush().map_err(|source| PdfMergeError::FailedToWrite {
            path: write_path.to_path_buf(),
            source,
        })?;

        Ok(())
    }
}

/// Sibling temp file, e.g. `merged.pdf` -> `merged.pdf.tmp`.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Format file size as human-readable string.
fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
