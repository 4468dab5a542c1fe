//! Helpers for unit tests: small generated PDFs with labelled pages.

use lopdf::{
    Document, EncryptionState, EncryptionVersion, Object, Permissions, Stream, StringFormat,
    dictionary,
};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Build a document whose page `n` shows the text `{label}-{n}`.
///
/// Every page carries its own `MediaBox` and `Resources`.
pub(crate) fn build_test_document(pages: u32, label: &str) -> Document {
    build(pages, label, false)
}

/// Like [`build_test_document`], but `MediaBox` and `Resources` live on the
/// `Pages` node and are only inherited by the pages.
pub(crate) fn build_inherited_document(pages: u32, label: &str) -> Document {
    build(pages, label, true)
}

fn build(pages: u32, label: &str, inherit: bool) -> Document {
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
    let media_box: Object = vec![0.into(), 0.into(), 595.into(), 842.into()].into();

    let mut kids: Vec<Object> = Vec::new();
    for n in 1..=pages {
        let content = format!("BT /F1 12 Tf 72 720 Td ({label}-{n}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        };
        if !inherit {
            page.set("MediaBox", media_box.clone());
            page.set("Resources", resources_id);
        }
        kids.push(doc.add_object(page).into());
    }

    let mut pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages as i64,
    };
    if inherit {
        pages_dict.set("MediaBox", media_box);
        pages_dict.set("Resources", resources_id);
    }
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Write a generated document with `pages` labelled pages to `path`.
pub(crate) fn write_test_pdf(path: &Path, pages: u32, label: &str) {
    let mut doc = build_test_document(pages, label);
    let mut file = File::create(path).unwrap();
    doc.save_to(&mut file).unwrap();
    file.flush().unwrap();
}

/// Write a labelled document encrypted with RC4 (128-bit key).
///
/// An empty `user` password gives a file anyone can open but whose
/// permissions are restricted by `owner`.
pub(crate) fn write_encrypted_pdf(path: &Path, pages: u32, label: &str, owner: &str, user: &str) {
    let mut doc = build_test_document(pages, label);
    doc.trailer.set(
        "ID",
        Object::Array(vec![
            Object::String(vec![7u8; 16], StringFormat::Literal),
            Object::String(vec![9u8; 16], StringFormat::Literal),
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

    let mut file = File::create(path).unwrap();
    doc.save_to(&mut file).unwrap();
    file.flush().unwrap();
}

/// Page labels of `doc` in page order.
pub(crate) fn page_labels(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let content = doc.get_page_content(page_id).unwrap();
            let text = String::from_utf8_lossy(&content);
            let start = text.find('(').unwrap();
            let end = text.rfind(')').unwrap();
            text[start + 1..end].to_string()
        })
        .collect()
}
