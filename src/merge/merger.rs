//! The per-file merge loop and its bookkeeping.

use lopdf::Document;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::Config;
use crate::error::{PdfMergeError, Result};
use crate::io::{DocumentReader, PdfReader, SourceDocument};
use crate::merge::document::{OutputDocument, PageSink};
use crate::output::OutputFormatter;
use crate::walker::has_pdf_extension;

/// Options that change how individual inputs are handled.
#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    /// Password tried on every encrypted input.
    pub password: Option<String>,

    /// Abort the whole merge on the first per-file failure.
    pub strict: bool,
}

impl MergeOptions {
    /// Build merge options from a validated configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            password: config.password().map(str::to_string),
            strict: config.strict,
        }
    }
}

/// Why an input contributed no pages without failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Path does not end in `.pdf`. Skipped silently.
    NotPdf,

    /// Path does not exist.
    NotFound,
}

/// Result of processing one input file.
#[derive(Debug)]
pub enum FileOutcome {
    /// Every page of the file was appended.
    Added {
        /// Number of pages appended.
        pages: usize,
    },

    /// The file was skipped before it was opened.
    Skipped(SkipReason),

    /// The file could not be used.
    Failed(PdfMergeError),
}

/// An input that was reported and left out of the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// Path of the input.
    pub path: PathBuf,

    /// Message describing why it was left out.
    pub reason: String,
}

impl fmt::Display for SkippedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path.display(), self.reason)
    }
}

/// Statistics about a merge operation.
#[derive(Debug, Clone, Default)]
pub struct MergeStatistics {
    /// Total number of pages in the merged document.
    pub total_pages: usize,

    /// Number of inputs that contributed pages.
    pub files_merged: usize,

    /// Inputs that were reported and skipped.
    pub skipped: Vec<SkippedFile>,

    /// Total time taken for the merge loop.
    pub merge_time: Duration,
}

/// Result of a merge operation.
pub struct MergeResult {
    /// The merged PDF document, ready to be written.
    pub document: Document,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,
}

/// Sequential merge loop over an ordered list of inputs.
pub struct Merger<R = PdfReader> {
    reader: R,
    options: MergeOptions,
    formatter: OutputFormatter,
}

impl Merger<PdfReader> {
    /// Create a merger backed by the `lopdf` reader.
    pub fn new(options: MergeOptions, formatter: OutputFormatter) -> Self {
        Self::with_reader(PdfReader::new(), options, formatter)
    }
}

impl<R: DocumentReader> Merger<R> {
    /// Create a merger with a custom document reader.
    pub fn with_reader(reader: R, options: MergeOptions, formatter: OutputFormatter) -> Self {
        Self {
            reader,
            options,
            formatter,
        }
    }

    /// Process a single input: open it, unlock it if needed, and append its
    /// pages to `sink`.
    ///
    /// Nothing is printed here; [`Merger::merge_into`] reports the outcome.
    pub fn process_file<S>(&self, path: &Path, sink: &mut S) -> FileOutcome
    where
        S: PageSink<R::Document>,
    {
        if !has_pdf_extension(path) {
            return FileOutcome::Skipped(SkipReason::NotPdf);
        }
        if !path.exists() {
            return FileOutcome::Skipped(SkipReason::NotFound);
        }

        let mut doc = match self.reader.read(path) {
            Ok(doc) => doc,
            Err(err) => return FileOutcome::Failed(err),
        };

        if doc.is_encrypted() {
            let Some(password) = self.options.password.as_deref() else {
                return FileOutcome::Failed(PdfMergeError::password_required(path));
            };
            if let Err(reason) = doc.decrypt(password) {
                return FileOutcome::Failed(PdfMergeError::decryption_failed(path, reason));
            }
            debug!(path = %path.display(), "decrypted input");
        }

        match sink.append(doc) {
            Ok(pages) => FileOutcome::Added { pages },
            Err(err) => FileOutcome::Failed(err),
        }
    }

    /// Append the pages of every input, in order, to `sink`.
    ///
    /// # Errors
    ///
    /// Returns the per-file error that aborted the loop in strict mode, or
    /// [`PdfMergeError::NoPagesAdded`] if no input contributed a page.
    pub fn merge_into<S>(&self, inputs: &[PathBuf], sink: &mut S) -> Result<MergeStatistics>
    where
        S: PageSink<R::Document>,
    {
        let start = Instant::now();
        let mut stats = MergeStatistics::default();

        for path in inputs {
            match self.process_file(path, sink) {
                FileOutcome::Added { pages } => {
                    stats.total_pages += pages;
                    stats.files_merged += 1;
                    self.formatter
                        .success(&format!("Added {pages} pages from {}", path.display()));
                }
                FileOutcome::Skipped(SkipReason::NotPdf) => {
                    debug!(path = %path.display(), "ignoring non-PDF input");
                }
                FileOutcome::Skipped(SkipReason::NotFound) => {
                    let err = PdfMergeError::file_not_found(path);
                    self.formatter.warning(&err.to_string());
                    stats.skipped.push(SkippedFile {
                        path: path.clone(),
                        reason: err.to_string(),
                    });
                }
                FileOutcome::Failed(err) => {
                    self.report_failure(path, &err);
                    if self.options.strict || !err.is_recoverable() {
                        return Err(err);
                    }
                    stats.skipped.push(SkippedFile {
                        path: path.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        stats.merge_time = start.elapsed();

        if stats.total_pages == 0 {
            return Err(PdfMergeError::NoPagesAdded);
        }

        debug!(
            pages = stats.total_pages,
            files = stats.files_merged,
            skipped = stats.skipped.len(),
            elapsed_ms = stats.merge_time.as_millis() as u64,
            "merge loop finished"
        );

        Ok(stats)
    }

    fn report_failure(&self, path: &Path, err: &PdfMergeError) {
        match err {
            PdfMergeError::PasswordRequired { .. } => {
                self.formatter.warning(&format!(
                    "Encrypted PDF skipped (no password): {}",
                    path.display()
                ));
            }
            PdfMergeError::DecryptionFailed { .. } => {
                self.formatter.warning(&err.to_string());
            }
            PdfMergeError::FailedToLoadPdf { .. } => {
                self.formatter.error(&err.to_string());
                return;
            }
            _ => {}
        }

        let encryption = matches!(
            err,
            PdfMergeError::PasswordRequired { .. } | PdfMergeError::DecryptionFailed { .. }
        );
        if !encryption || self.options.strict {
            self.formatter
                .error(&format!("Failed to read {}: {err}", path.display()));
        }
    }
}

impl<R> Merger<R>
where
    R: DocumentReader,
    R::Document: Into<Document>,
{
    /// Merge `inputs` into a new in-memory document.
    ///
    /// # Errors
    ///
    /// See [`Merger::merge_into`].
    pub fn merge(&self, inputs: &[PathBuf]) -> Result<MergeResult> {
        let mut output = OutputDocument::new();
        let statistics = self.merge_into(inputs, &mut output)?;

        Ok(MergeResult {
            document: output.into_document(),
            statistics,
        })
    }
}
