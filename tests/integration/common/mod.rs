//! Shared helpers for the integration tests.
//!
//! Fixture PDFs are generated on the fly with `lopdf`. Page `n` of a
//! generated file shows the text `{label}-{n}`, which lets tests check page
//! order in the merged output.

#![allow(dead_code)]

use lopdf::{
    Document, EncryptionState, EncryptionVersion, Object, Permissions, Stream, StringFormat,
    dictionary,
};
use std::fs;
use std::path::{Path, PathBuf};

use pdfmerge::config::{Config, InputSource};
use pdfmerge::output::OutputFormatter;

/// Write a PDF with `pages` labelled pages to `path`, creating parent
/// directories as needed.
pub fn write_pdf(path: &Path, pages: u32, label: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for n in 1..=pages {
        let content = format!("BT /F1 12 Tf 72 720 Td ({label}-{n}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => resources_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(path).unwrap();
    path.to_path_buf()
}

/// Write a labelled PDF encrypted with `owner` and `user` passwords. An
/// empty `user` password leaves the file openable by anyone.
pub fn write_encrypted_pdf(
    path: &Path,
    pages: u32,
    label: &str,
    owner: &str,
    user: &str,
) -> PathBuf {
    write_pdf(path, pages, label);

    let mut doc = Document::load(path).unwrap();
    doc.trailer.set(
        "ID",
        Object::Array(vec![
            Object::String(vec![3u8; 16], StringFormat::Literal),
            Object::String(vec![5u8; 16], StringFormat::Literal),
        ]),
    );
    let state = EncryptionState::try_from(EncryptionVersion::V2 {
        document: &doc,
        owner_password: owner,
        user_password: user,
        key_length: 128,
        permissions: Permissions::all(),
    })
    .unwrap();
    doc.encrypt(&state).unwrap();

    doc.save(path).unwrap();
    path.to_path_buf()
}

/// Labels of every page in the PDF at `path`, in page order.
pub fn page_labels(path: &Path) -> Vec<String> {
    let doc = Document::load(path).unwrap();
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let content = doc.get_page_content(page_id).unwrap();
            let text = String::from_utf8_lossy(&content).into_owned();
            let start = text.find('(').unwrap();
            let end = text.rfind(')').unwrap();
            text[start + 1..end].to_string()
        })
        .collect()
}

/// Number of pages in the PDF at `path`.
pub fn page_count(path: &Path) -> usize {
    Document::load(path).unwrap().get_pages().len()
}

/// Config for an explicit file list.
pub fn files_config(inputs: Vec<PathBuf>, output: &Path) -> Config {
    Config::new(InputSource::Files(inputs), output)
}

/// Config for a directory scan.
pub fn directory_config(dir: &Path, output: &Path) -> Config {
    Config::new(InputSource::Directory(dir.to_path_buf()), output)
}

/// Formatter that keeps test output down to warnings and errors.
pub fn quiet() -> OutputFormatter {
    OutputFormatter::quiet()
}
