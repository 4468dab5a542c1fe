//! Console output for pdfmerge.
//!
//! User-facing status lines go through [`OutputFormatter`]. Diagnostics go
//! through `tracing`, set up by [`init_tracing`].

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use tracing::Level;

/// Install the stderr diagnostics subscriber.
///
/// Logs at `WARN` by default and at `DEBUG` when `verbose` is set. Calling
/// this more than once is harmless; later calls are ignored.
pub fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Print the ordered candidate list before merging.
pub fn display_merge_plan(formatter: &OutputFormatter, files: &[std::path::PathBuf]) {
    formatter.info("Files to merge in order:");
    for file in files {
        formatter.list_item(&file.display().to_string());
    }
}
