//! Candidate file collection.
//!
//! A path is a candidate when its name ends in `.pdf`, compared without
//! regard to case. Content is never inspected and existence is not checked
//! here.

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::config::InputSource;

/// Check whether a path ends in `.pdf`, ignoring case.
pub fn has_pdf_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .as_os_str()
        .to_string_lossy()
        .to_lowercase()
        .ends_with(".pdf")
}

/// Keep the entries of an explicit list that end in `.pdf`, in order.
pub fn filter_pdf_paths<T>(paths: T) -> Vec<PathBuf>
where
    T: IntoIterator,
    T::Item: Into<PathBuf>,
{
    paths
        .into_iter()
        .map(Into::into)
        .filter(|path: &PathBuf| has_pdf_extension(path))
        .collect()
}

/// Recursively find every `.pdf` file under `directory`.
///
/// Results are in traversal order. Unreadable entries are skipped, and a
/// missing directory yields an empty list. Symbolic links to directories
/// are listed neither as files nor descended into.
pub fn find_pdfs_in_dir<P: AsRef<Path>>(directory: P) -> Vec<PathBuf> {
    let directory = directory.as_ref();
    let mut pdfs = Vec::new();

    for entry in WalkDir::new(directory).min_depth(1).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        if entry.file_type().is_dir() || entry.path().is_dir() {
            continue;
        }

        if has_pdf_extension(entry.file_name()) {
            pdfs.push(entry.into_path());
        }
    }

    debug!(
        directory = %directory.display(),
        found = pdfs.len(),
        "directory scan complete"
    );

    pdfs
}

/// Produce the unsorted candidate list for an input source.
pub fn collect_candidates(source: &InputSource) -> Vec<PathBuf> {
    match source {
        InputSource::Files(files) => filter_pdf_paths(files.iter().cloned()),
        InputSource::Directory(dir) => find_pdfs_in_dir(dir),
    }
}
