use crate::error::{Result, SplitError};
use anyhow::Context;
use lopdf::{Document, Object, ObjectId};
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct PdfDocument {
    pub doc: Document,
    pub path: PathBuf,
}

impl PdfDocument {
    /// Open and validate a source PDF.
    ///
    /// Rejects missing files, non-`.pdf` paths, unparseable or encrypted
    /// documents and documents without pages.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.is_file() {
            return Err(SplitError::InputNotFound { path });
        }

        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            return Err(SplitError::NotPdf { path });
        }

        let doc = match Document::load(&path) {
            Ok(doc) => doc,
            Err(source) => return Err(SplitError::InvalidPdf { path, source }),
        };

        if doc.trailer.get(b"Encrypt").is_ok() {
            return Err(SplitError::Encrypted { path });
        }

        if doc.get_pages().is_empty() {
            return Err(SplitError::EmptyDocument { path });
        }

        debug!(path = %path.display(), pages = doc.get_pages().len(), "opened source PDF");

        Ok(PdfDocument { doc, path })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Get 1-indexed page object IDs
    pub fn page_ids(&self) -> Vec<(u32, ObjectId)> {
        let mut pages: Vec<_> = self.doc.get_pages().into_iter().collect();
        pages.sort_by_key(|(num, _)| *num);
        pages
    }

    /// Copy the zero-based, half-open page range into a new document.
    ///
    /// The source is cloned, so it is never mutated. The outline is dropped
    /// from the copy because its destinations point at pages that no longer
    /// exist there.
    pub fn extract_range(&self, pages: Range<u32>) -> Result<Document> {
        let total = self.page_count();
        if pages.start >= pages.end || pages.end > total {
            return Err(SplitError::PageRangeOutOfBounds {
                start: pages.start,
                end: pages.end,
                total,
            });
        }

        let mut new_doc = self.doc.clone();

        // get_pages() numbers pages from 1
        let pages_to_delete: Vec<u32> = self
            .page_ids()
            .into_iter()
            .map(|(num, _)| num)
            .filter(|num| !pages.contains(&(num - 1)))
            .collect();

        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
        }

        if let Ok(root_id) = new_doc.trailer.get(b"Root").and_then(Object::as_reference) {
            if let Ok(catalog) = new_doc.get_dictionary_mut(root_id) {
                catalog.remove(b"Outlines");
            }
        }
        new_doc.prune_objects();

        Ok(new_doc)
    }

    /// Serialize `doc` and write it to `path` without leaving a partial file.
    ///
    /// The bytes go to a hidden `.part` sibling first and are renamed into
    /// place; on any failure the sibling is removed.
    pub fn save<P: AsRef<Path>>(doc: &mut Document, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .with_context(|| format!("Failed to serialize PDF: {}", path.display()))?;

        let part = partial_path(path);
        let written = fs::write(&part, &bytes)
            .with_context(|| format!("Failed to write {}", part.display()))
            .and_then(|()| {
                fs::rename(&part, path)
                    .with_context(|| format!("Failed to save PDF: {}", path.display()))
            });

        if written.is_err() {
            let _ = fs::remove_file(&part);
        }
        written
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.part", name))
}
