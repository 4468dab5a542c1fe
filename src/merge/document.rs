//! The accumulating output document.
//!
//! Pages from each successfully processed input are moved into an
//! [`OutputDocument`]. The final page tree is only built by
//! [`OutputDocument::into_document`], right before the single write.

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{PdfMergeError, Result};

/// Page attributes that may be inherited from ancestor `Pages` nodes.
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic `Parent` chains in damaged files.
const MAX_TREE_DEPTH: usize = 64;

const DEFAULT_VERSION: &str = "1.5";

/// Receives the pages of whole documents.
pub trait PageSink<D> {
    /// Append every page of `doc`, in document order.
    ///
    /// Returns the number of pages appended. On error nothing is appended.
    fn append(&mut self, doc: D) -> Result<usize>;

    /// Total number of pages appended so far.
    fn page_count(&self) -> usize;
}

/// In-memory merge target that grows one input document at a time.
#[derive(Debug, Default)]
pub struct OutputDocument {
    objects: BTreeMap<ObjectId, Object>,
    page_ids: Vec<ObjectId>,
    max_id: u32,
    version: Option<String>,
}

impl OutputDocument {
    /// Create an empty output document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Build the final document: one flat page tree holding every appended
    /// page in append order, with unreachable objects pruned.
    pub fn into_document(self) -> Document {
        let version = self.version.unwrap_or_else(|| DEFAULT_VERSION.to_string());
        let mut doc = Document::with_version(version);
        doc.objects = self.objects;
        doc.max_id = self.max_id;

        let pages_id = doc.new_object_id();
        let catalog_id = doc.new_object_id();

        for page_id in &self.page_ids {
            if let Some(Object::Dictionary(page)) = doc.objects.get_mut(page_id) {
                page.set("Parent", pages_id);
            }
        }

        let kids: Vec<Object> = self.page_ids.iter().map(|&id| id.into()).collect();
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.page_ids.len() as i64,
        };
        let catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        };

        doc.objects.insert(pages_id, Object::Dictionary(pages));
        doc.objects.insert(catalog_id, Object::Dictionary(catalog));
        doc.trailer.set("Root", catalog_id);

        let pruned = doc.prune_objects();
        doc.renumber_objects();

        debug!(
            pages = self.page_ids.len(),
            pruned = pruned.len(),
            objects = doc.objects.len(),
            "built output document"
        );

        doc
    }

    fn record_version(&mut self, version: &str) {
        let newer = match &self.version {
            Some(current) => parse_version(version) > parse_version(current),
            None => parse_version(version).is_some(),
        };
        if newer {
            self.version = Some(version.to_string());
        }
    }
}

impl<D: Into<Document>> PageSink<D> for OutputDocument {
    fn append(&mut self, doc: D) -> Result<usize> {
        let mut doc: Document = doc.into();

        // Fallible work happens on the source document only.
        for page_id in doc.get_pages().into_values() {
            inherit_page_attributes(&mut doc, page_id)?;
        }

        doc.renumber_objects_with(self.max_id + 1);
        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
        let page_count = page_ids.len();

        self.max_id = self.max_id.max(doc.max_id);
        self.record_version(&doc.version);
        self.objects.extend(doc.objects);
        self.page_ids.extend(page_ids);

        Ok(page_count)
    }

    fn page_count(&self) -> usize {
        self.page_ids.len()
    }
}

/// Copy attributes the page inherits from its ancestors onto the page
/// itself, so it keeps its look once re-parented.
fn inherit_page_attributes(doc: &mut Document, page_id: ObjectId) -> Result<()> {
    let page = doc.get_dictionary(page_id).map_err(|err| {
        PdfMergeError::merge_failed(format!("page {page_id:?} is not readable: {err}"))
    })?;

    let mut missing: Vec<&[u8]> = INHERITABLE_ATTRIBUTES
        .iter()
        .copied()
        .filter(|key| !page.has(key))
        .collect();
    let mut parent = parent_of(page);
    let mut inherited: Vec<(Vec<u8>, Object)> = Vec::new();
    let mut depth = 0;

    while let Some(parent_id) = parent {
        if missing.is_empty() || depth >= MAX_TREE_DEPTH {
            break;
        }

        let node = doc.get_dictionary(parent_id).map_err(|err| {
            PdfMergeError::merge_failed(format!("page tree node {parent_id:?} is not readable: {err}"))
        })?;

        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                inherited.push((key.to_vec(), value.clone()));
                false
            }
            Err(_) => true,
        });

        parent = parent_of(node);
        depth += 1;
    }

    if inherited.is_empty() {
        return Ok(());
    }

    let page = doc.get_dictionary_mut(page_id).map_err(|err| {
        PdfMergeError::merge_failed(format!("page {page_id:?} is not writable: {err}"))
    })?;
    for (key, value) in inherited {
        page.set(key, value);
    }

    Ok(())
}

fn parent_of(node: &Dictionary) -> Option<ObjectId> {
    node.get(b"Parent").and_then(Object::as_reference).ok()
}

/// Parse a `major.minor` PDF version.
fn parse_version(version: &str) -> Option<(u8, u8)> {
    let (major, minor) = version.trim().split_once('.')?;
    Some((major.parse().ok()?, minor.parse().ok()?))
}
