//! pdfmerge - Merge multiple PDFs into one.
//!
//! Inputs come either from an explicit, ordered list of files or from a
//! recursive scan of a directory. Directory results are sorted by name,
//! modification time or size. Each candidate is opened in turn and all of
//! its pages are appended to one output document, which is written once at
//! the end.
//!
//! Per-file problems (missing file, encrypted without password, unreadable
//! PDF) are reported and skipped. With `strict` set, all of them except a
//! missing file abort the merge.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::config::{Config, InputSource, SortKey};
//! use pdfmerge::output::OutputFormatter;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = Config::new(InputSource::Directory("./pdfs".into()), "merged.pdf");
//! config.sort = SortKey::Mtime;
//! config.reverse = true;
//!
//! let formatter = OutputFormatter::from_config(&config);
//! let stats = pdfmerge::run(&config, &formatter)?;
//! println!("Merged {} pages", stats.total_pages);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod output;
pub mod sort;
pub mod walker;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use error::{PdfMergeError, Result};
pub use merge::MergeStatistics;

use tracing::debug;

use crate::merge::{MergeOptions, merge_pdfs};
use crate::output::{OutputFormatter, display_merge_plan};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Collect, order and merge the inputs described by `config`.
///
/// # Errors
///
/// Returns [`PdfMergeError::NoFilesToMerge`] when no candidate is left after
/// collection, before any merge is attempted. Otherwise see
/// [`merge::merge_pdfs`].
pub fn run(config: &Config, formatter: &OutputFormatter) -> Result<MergeStatistics> {
    let mut files = walker::collect_candidates(&config.source);

    if config.source.is_directory() {
        files = sort::sort_files(files, config.sort, config.reverse);
    }

    debug!(
        candidates = files.len(),
        sort = config.sort.as_str(),
        reverse = config.reverse,
        "collected candidates"
    );

    if files.is_empty() {
        return Err(PdfMergeError::NoFilesToMerge);
    }

    display_merge_plan(formatter, &files);

    merge_pdfs(
        &files,
        &config.output,
        MergeOptions::from_config(config),
        formatter,
    )
}
