//! PDF reading.
//!
//! The merge loop sees input documents only through [`SourceDocument`] and
//! opens them through a [`DocumentReader`]. [`PdfReader`] is the `lopdf`
//! implementation used by the binary; it produces [`LoadedPdf`] values.
//!
//! `lopdf` treats encrypted files in two ways while loading:
//!
//! - with an empty user password, every object is decrypted on load but the
//!   `/Encrypt` entry stays in the trailer;
//! - otherwise only the encryption dictionary is parsed.
//!
//! Decrypting a [`LoadedPdf`] handles both, re-parsing the remaining objects
//! from the file bytes in the second case.

use lopdf::xref::XrefEntry;
use lopdf::{Document, Object, ObjectId};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::debug;

use crate::error::{PdfMergeError, Result};

/// A parsed input document.
pub trait SourceDocument {
    /// Whether the document is encrypted.
    fn is_encrypted(&self) -> bool;

    /// Try to decrypt the document in place with `password`.
    ///
    /// Returns the reason on failure. After success every page is readable.
    fn decrypt(&mut self, password: &str) -> std::result::Result<(), String>;

    /// Number of pages in the document.
    fn page_count(&self) -> usize;
}

/// Opens and parses input documents.
pub trait DocumentReader {
    /// Document type produced by this reader.
    type Document: SourceDocument;

    /// Open and parse the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfMergeError::FailedToLoadPdf`] if the file cannot be
    /// parsed, or [`PdfMergeError::PasswordRequired`] if the library refuses
    /// to open it without a password.
    fn read(&self, path: &Path) -> Result<Self::Document>;
}

/// A document loaded by [`PdfReader`].
#[derive(Debug)]
pub struct LoadedPdf {
    document: Document,
    /// File bytes, kept only for encrypted documents.
    source: Option<Vec<u8>>,
}

impl LoadedPdf {
    /// Parse a document from the bytes of a PDF file.
    ///
    /// # Errors
    ///
    /// Returns the `lopdf` error if the bytes are not a readable PDF.
    pub fn from_bytes(bytes: Vec<u8>) -> lopdf::Result<Self> {
        let document = Document::load_mem(&bytes)?;
        let source = document.is_encrypted().then_some(bytes);
        Ok(Self { document, source })
    }

    /// The underlying document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Unwrap into the underlying document.
    pub fn into_document(self) -> Document {
        self.document
    }

    fn decrypted_on_load(&self) -> bool {
        self.document.encryption_state.is_some()
    }

    /// Drop the `/Encrypt` entry of a document whose objects are already
    /// plain text.
    fn strip_encryption(&mut self) {
        if let Some(Object::Reference(id)) = self.document.trailer.remove(b"Encrypt") {
            self.document.objects.remove(&id);
        }
    }

    /// Parse every object listed in the cross-reference table that is not
    /// loaded yet, without decrypting it.
    fn load_remaining_objects(&mut self) -> std::result::Result<usize, String> {
        let Some(bytes) = self.source.as_deref() else {
            return Err("document bytes are not available".to_string());
        };
        let offset = bytes
            .windows(5)
            .position(|window| window == b"%PDF-")
            .unwrap_or(0);

        let mut index = Document::new();
        index.reference_table = self.document.reference_table.clone();
        let reader = lopdf::Reader {
            buffer: &bytes[offset..],
            document: index,
            encryption_state: None,
            raw_objects: BTreeMap::new(),
        };

        let ids: Vec<ObjectId> = self
            .document
            .reference_table
            .entries
            .iter()
            .filter_map(|(&number, entry)| match *entry {
                XrefEntry::Normal { generation, .. } => Some((number, generation)),
                _ => None,
            })
            .filter(|id| !self.document.objects.contains_key(id))
            .collect();

        let mut loaded = 0;
        for id in ids {
            match reader.get_object(id, &mut HashSet::new()) {
                Ok(object) => {
                    self.document.objects.insert(id, object);
                    loaded += 1;
                }
                Err(err) => debug!(object = ?id, error = %err, "skipping unreadable object"),
            }
        }

        Ok(loaded)
    }
}

impl From<LoadedPdf> for Document {
    fn from(loaded: LoadedPdf) -> Self {
        loaded.into_document()
    }
}

impl SourceDocument for LoadedPdf {
    fn is_encrypted(&self) -> bool {
        self.document.is_encrypted()
    }

    fn decrypt(&mut self, password: &str) -> std::result::Result<(), String> {
        self.document
            .authenticate_password(password)
            .map_err(|err| err.to_string())?;

        if self.decrypted_on_load() {
            self.strip_encryption();
        } else {
            let loaded = self.load_remaining_objects()?;
            debug!(objects = loaded, "parsed encrypted objects");
            self.document
                .decrypt(password)
                .map_err(|err| err.to_string())?;
        }
        self.source = None;

        if self.document.catalog().is_err() {
            return Err("document catalog is unreadable after decryption".to_string());
        }
        if self.document.get_pages().is_empty() {
            return Err("no pages are readable after decryption".to_string());
        }

        Ok(())
    }

    fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }
}

/// `lopdf`-backed document reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentReader for PdfReader {
    type Document = LoadedPdf;

    fn read(&self, path: &Path) -> Result<LoadedPdf> {
        let start = Instant::now();

        let bytes = fs::read(path)
            .map_err(|err| PdfMergeError::failed_to_load_pdf(path, err.to_string()))?;

        let loaded = LoadedPdf::from_bytes(bytes).map_err(|err| {
            let reason = err.to_string();
            let lowered = reason.to_lowercase();
            if lowered.contains("encrypt") || lowered.contains("password") {
                PdfMergeError::password_required(path)
            } else {
                PdfMergeError::failed_to_load_pdf(path, reason)
            }
        })?;

        debug!(
            path = %path.display(),
            version = %loaded.document().version,
            objects = loaded.document().objects.len(),
            encrypted = loaded.source.is_some() || loaded.decrypted_on_load(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "loaded PDF"
        );

        Ok(loaded)
    }
}
