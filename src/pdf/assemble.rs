use std::collections::{HashMap, HashSet};

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::error::{Error, Result};
use crate::pdf::{EmbeddedImage, PdfDocument};

/// Page attributes that may be inherited from ancestors in the page tree.
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Assembles a new document out of pages copied from source documents and
/// pages built around embedded images.
///
/// Pages land in the output in the order they are appended;
/// [`finish`](DocumentBuilder::finish) builds the page tree and catalog and
/// returns the document ready to save.
pub struct DocumentBuilder {
    doc: Document,
    page_ids: Vec<ObjectId>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        DocumentBuilder {
            doc: Document::with_version("1.5"),
            page_ids: Vec::new(),
        }
    }

    /// Copy the pages at `indices` (zero-based) out of `source`, in the
    /// order given. A repeated index yields a separate page object per
    /// occurrence, sharing content and resources with the first copy.
    pub fn copy_pages(&mut self, source: &PdfDocument, indices: &[usize]) -> Result<()> {
        let pages = source.page_ids();
        let total = pages.len();
        // Every index is checked before anything is copied.
        if let Some(&bad) = indices.iter().find(|&&index| index >= total) {
            return Err(Error::PageOutOfRange {
                page: bad + 1,
                total,
            });
        }

        // Shared across the whole call so resources referenced by several
        // pages are copied once.
        let mut id_map: HashMap<ObjectId, ObjectId> = HashMap::new();
        let mut copied: HashMap<ObjectId, ObjectId> = HashMap::new();

        for &index in indices {
            let page_id = pages[index];
            let new_page_id = match copied.get(&page_id) {
                Some(&first_copy) => {
                    let duplicate = self.doc.get_object(first_copy)?.clone();
                    self.doc.add_object(duplicate)
                }
                None => {
                    let copy = self.copy_page(&source.doc, page_id, &mut id_map)?;
                    copied.insert(page_id, copy);
                    copy
                }
            };
            self.page_ids.push(new_page_id);
        }
        Ok(())
    }

    /// Add a page holding a single image, sized to the image's pixel
    /// dimensions, with the image drawn across the whole page.
    pub fn add_image_page(&mut self, image: EmbeddedImage) -> Result<()> {
        let (width, height) = (i64::from(image.width), i64::from(image.height));
        let xobject_id = self.doc.add_object(image.into_xobject());

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        width.into(),
                        0.into(),
                        0.into(),
                        height.into(),
                        0.into(),
                        0.into(),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), content.encode()?));

        let mut xobjects = Dictionary::new();
        xobjects.set("Im0", Object::Reference(xobject_id));
        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));
        let resources_id = self.doc.add_object(resources);

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set(
            "MediaBox",
            Object::Array(vec![0.into(), 0.into(), width.into(), height.into()]),
        );
        page.set("Contents", Object::Reference(content_id));
        page.set("Resources", Object::Reference(resources_id));
        let page_id = self.doc.add_object(page);
        self.page_ids.push(page_id);
        Ok(())
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Build the page tree and catalog and return the finished document.
    pub fn finish(mut self) -> Result<Document> {
        let pages_id = self.doc.new_object_id();
        for &page_id in &self.page_ids {
            let dict = self.doc.get_dictionary_mut(page_id)?;
            dict.set("Parent", Object::Reference(pages_id));
        }

        let kids: Vec<Object> = self
            .page_ids
            .iter()
            .map(|&id| Object::Reference(id))
            .collect();
        let mut pages = Dictionary::new();
        pages.set("Type", Object::Name(b"Pages".to_vec()));
        pages.set("Count", Object::Integer(self.page_ids.len() as i64));
        pages.set("Kids", Object::Array(kids));
        self.doc.objects.insert(pages_id, Object::Dictionary(pages));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = self.doc.add_object(catalog);
        self.doc.trailer.set("Root", Object::Reference(catalog_id));

        self.doc.renumber_objects();
        self.doc.compress();
        Ok(self.doc)
    }

    fn copy_page(
        &mut self,
        source: &Document,
        page_id: ObjectId,
        id_map: &mut HashMap<ObjectId, ObjectId>,
    ) -> Result<ObjectId> {
        let mut page_dict = source.get_dictionary(page_id)?.clone();
        // The copy hangs off a new page tree; the old parent stays behind.
        page_dict.remove(b"Parent");
        for key in INHERITABLE_ATTRIBUTES {
            if !page_dict.has(key) {
                if let Some(value) = inherited_attribute(source, page_id, key)? {
                    page_dict.set(key, value);
                }
            }
        }

        let mut referenced = HashSet::new();
        for (_, value) in page_dict.iter() {
            collect_references(source, value, &mut referenced);
        }

        let mut fresh: Vec<ObjectId> = referenced
            .into_iter()
            .filter(|id| !id_map.contains_key(id))
            .collect();
        fresh.sort_unstable();
        for &old_id in &fresh {
            id_map.insert(old_id, self.next_id());
        }
        for old_id in fresh {
            let mut object = source.get_object(old_id)?.clone();
            rewrite_references(&mut object, id_map);
            self.doc.objects.insert(id_map[&old_id], object);
        }

        let mut page = Object::Dictionary(page_dict);
        rewrite_references(&mut page, id_map);
        Ok(self.doc.add_object(page))
    }

    fn next_id(&mut self) -> ObjectId {
        self.doc.max_id += 1;
        (self.doc.max_id, 0)
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Look up an inheritable page attribute on the page or its ancestors.
fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Result<Option<Object>> {
    let mut current = page_id;
    // Bounded walk so a cyclic Parent chain cannot loop forever.
    for _ in 0..64 {
        let dict = doc.get_dictionary(current)?;
        if let Ok(value) = dict.get(key) {
            return Ok(Some(value.clone()));
        }
        match dict.get(b"Parent") {
            Ok(Object::Reference(parent)) => current = *parent,
            _ => return Ok(None),
        }
    }
    Ok(None)
}

/// Collect the object ids reachable from `object`. Parent links are never
/// followed, so the walk cannot climb back into the source page tree.
fn collect_references(doc: &Document, object: &Object, referenced: &mut HashSet<ObjectId>) {
    match object {
        Object::Reference(id) => {
            if !referenced.contains(id) {
                if let Ok(target) = doc.get_object(*id) {
                    referenced.insert(*id);
                    collect_references(doc, target, referenced);
                }
            }
        }
        Object::Array(items) => {
            for item in items {
                collect_references(doc, item, referenced);
            }
        }
        Object::Dictionary(dict) => collect_from_dictionary(doc, dict, referenced),
        Object::Stream(stream) => collect_from_dictionary(doc, &stream.dict, referenced),
        _ => {}
    }
}

fn collect_from_dictionary(doc: &Document, dict: &Dictionary, referenced: &mut HashSet<ObjectId>) {
    for (key, value) in dict.iter() {
        if key.as_slice() == b"Parent" {
            continue;
        }
        collect_references(doc, value, referenced);
    }
}

/// Rewrite references through `id_map`. References to objects that were not
/// copied become null so the output never dangles.
fn rewrite_references(object: &mut Object, id_map: &HashMap<ObjectId, ObjectId>) {
    match object {
        Object::Reference(id) => match id_map.get(id).copied() {
            Some(new_id) => *id = new_id,
            None => *object = Object::Null,
        },
        Object::Array(items) => {
            for item in items.iter_mut() {
                rewrite_references(item, id_map);
            }
        }
        Object::Dictionary(dict) => rewrite_dictionary(dict, id_map),
        Object::Stream(stream) => rewrite_dictionary(&mut stream.dict, id_map),
        _ => {}
    }
}

fn rewrite_dictionary(dict: &mut Dictionary, id_map: &HashMap<ObjectId, ObjectId>) {
    let keys: Vec<Vec<u8>> = dict.iter().map(|(key, _)| key.clone()).collect();
    for key in keys {
        if let Ok(value) = dict.get_mut(&key) {
            rewrite_references(value, id_map);
        }
    }
}
