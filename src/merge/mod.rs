//! PDF merging.
//!
//! [`Merger`] walks the candidates in order and moves the pages of every
//! usable input into an [`OutputDocument`]. [`merge_pdfs`] runs the merge and
//! writes the result once.

pub mod document;
pub mod merger;

pub use document::{OutputDocument, PageSink};
pub use merger::{
    FileOutcome, MergeOptions, MergeResult, MergeStatistics, Merger, SkipReason, SkippedFile,
};

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::io::PdfWriter;
use crate::output::OutputFormatter;

/// Merge `inputs` in order and write the result to `output`.
///
/// Nothing is written unless at least one page was added.
///
/// # Errors
///
/// Returns [`crate::PdfMergeError::NoPagesAdded`] when every input was
/// skipped, the per-file error that aborted a strict run, or a write error.
pub fn merge_pdfs(
    inputs: &[PathBuf],
    output: &Path,
    options: MergeOptions,
    formatter: &OutputFormatter,
) -> Result<MergeStatistics> {
    let merger = Merger::new(options, formatter.clone());
    let MergeResult {
        mut document,
        statistics,
    } = merger.merge(inputs)?;

    let write_stats = PdfWriter::new().save_with_stats(&mut document, output)?;

    formatter.debug(&format!(
        "Output size {} written in {:.2?}",
        write_stats.format_file_size(),
        write_stats.write_time
    ));
    formatter.done(&format!(
        "Wrote {} with {} pages.",
        output.display(),
        statistics.total_pages
    ));

    Ok(statistics)
}
