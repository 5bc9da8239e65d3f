use crate::error::{Error, Result};
use lopdf::{Document, ObjectId};
use std::path::Path;

/// A source PDF loaded for page copying.
pub struct PdfDocument {
    pub doc: Document,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let doc = Document::load(path).map_err(|source| Error::DocumentLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(PdfDocument { doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Page object ids in page order; index 0 is the first page.
    pub fn page_ids(&self) -> Vec<ObjectId> {
        self.doc.get_pages().into_values().collect()
    }
}
