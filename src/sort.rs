//! Ordering of files discovered in directory mode.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::warn;

use crate::config::SortKey;

/// Value a file is ordered by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue {
    Name(String),
    Mtime(SystemTime),
    Size(u64),
}

fn sort_value(path: &Path, key: SortKey) -> Option<SortValue> {
    match key {
        SortKey::Name => Some(SortValue::Name(base_name_lowercase(path))),
        SortKey::Mtime | SortKey::Size => match fs::metadata(path) {
            Ok(meta) if key == SortKey::Size => Some(SortValue::Size(meta.len())),
            Ok(meta) => match meta.modified() {
                Ok(modified) => Some(SortValue::Mtime(modified)),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "modification time unavailable");
                    None
                }
            },
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cannot read file metadata for sorting");
                None
            }
        },
    }
}

fn base_name_lowercase(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Sort candidate files by `key`, ascending unless `reverse` is set.
///
/// The sort is stable: files with equal keys keep their incoming order in
/// both directions. Files whose metadata cannot be read (for `mtime` and
/// `size`) are moved after all other files, in their incoming order; the
/// merge step later reports them as not found.
pub fn sort_files(files: Vec<PathBuf>, key: SortKey, reverse: bool) -> Vec<PathBuf> {
    let mut keyed: Vec<(Option<SortValue>, PathBuf)> = files
        .into_iter()
        .map(|path| (sort_value(&path, key), path))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| compare(a.as_ref(), b.as_ref(), reverse));

    keyed.into_iter().map(|(_, path)| path).collect()
}

fn compare(a: Option<&SortValue>, b: Option<&SortValue>, reverse: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if reverse => b.cmp(a),
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
