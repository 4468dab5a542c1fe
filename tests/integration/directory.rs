//! Integration tests for directory mode: discovery and ordering.

use pdfmerge::config::SortKey;
use pdfmerge::run;
use pdfmerge::walker::find_pdfs_in_dir;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{directory_config, page_labels, quiet, write_pdf};

fn populate(dir: &std::path::Path) {
    write_pdf(&dir.join("b.pdf"), 1, "b");
    write_pdf(&dir.join("A.pdf"), 1, "A");
    write_pdf(&dir.join("nested/deeper/c.pdf"), 1, "c");
    fs::write(dir.join("nested/readme.md"), b"# not a pdf").unwrap();
}

#[test]
fn test_name_sort_is_case_insensitive() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("input");
    populate(&input);
    let output = temp.path().join("merged.pdf");

    let stats = run(&directory_config(&input, &output), &quiet()).unwrap();

    assert_eq!(stats.total_pages, 3);
    assert_eq!(page_labels(&output), vec!["A-1", "b-1", "c-1"]);
}

#[test]
fn test_name_sort_reversed() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("input");
    populate(&input);
    let output = temp.path().join("merged.pdf");

    let mut config = directory_config(&input, &output);
    config.reverse = true;
    run(&config, &quiet()).unwrap();

    assert_eq!(page_labels(&output), vec!["c-1", "b-1", "A-1"]);
}

#[test]
fn test_size_sort() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("input");
    write_pdf(&input.join("big.pdf"), 6, "big");
    write_pdf(&input.join("small.pdf"), 1, "small");
    write_pdf(&input.join("medium.pdf"), 3, "medium");
    let output = temp.path().join("merged.pdf");

    let mut config = directory_config(&input, &output);
    config.sort = SortKey::Size;
    run(&config, &quiet()).unwrap();

    let labels = page_labels(&output);
    assert_eq!(labels.first().map(String::as_str), Some("small-1"));
    assert_eq!(labels.last().map(String::as_str), Some("big-6"));
}

#[test]
fn test_rerun_overwrites_output() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("input");
    write_pdf(&input.join("a.pdf"), 1, "a");
    let output = temp.path().join("elsewhere/merged.pdf");

    run(&directory_config(&input, &output), &quiet()).unwrap();
    run(&directory_config(&input, &output), &quiet()).unwrap();

    assert_eq!(page_labels(&output), vec!["a-1"]);
}

#[test]
fn test_discovery_is_idempotent_as_a_set() {
    let temp = TempDir::new().unwrap();
    populate(temp.path());

    let first: BTreeSet<PathBuf> = find_pdfs_in_dir(temp.path()).into_iter().collect();
    let second: BTreeSet<PathBuf> = find_pdfs_in_dir(temp.path()).into_iter().collect();

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
}
