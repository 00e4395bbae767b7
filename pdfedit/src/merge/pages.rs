//! Page-tree assembly.
//!
//! [`PageAssembler`] builds a fresh document with a flat page tree and copies
//! pages into it from one or more source documents. Pages keep their content
//! streams untouched; attributes they inherited from ancestor nodes of the
//! source tree are copied onto the page itself so they render the same
//! outside it.
//!
//! Only what a page needs is copied. Other pages and the source's catalog
//! and page tree are never pulled in through a reference; a reference that
//! would have needed them (a link to a page that was not selected, say) is
//! set to `null` when the document is finished.

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use tracing::debug;

use crate::error::{PdfEditError, Result};
use crate::merge::outline;
use crate::utils::{copy_references, prune_dangling_references};

/// Page attributes that may be inherited from ancestor `Pages` nodes.
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against malformed trees whose `Parent` links form a cycle.
const MAX_TREE_DEPTH: usize = 64;

/// Links an outline entry has to its place in the source outline.
const SIBLING_LINKS: [&[u8]; 3] = [b"Parent", b"Prev", b"Next"];

/// PDF version written into assembled documents.
const OUTPUT_VERSION: &str = "1.5";

/// Builds a new document one page at a time.
pub struct PageAssembler {
    document: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    outline_items: Vec<ObjectId>,
}

impl PageAssembler {
    /// Start an empty document for appending whole documents.
    pub fn new() -> Self {
        Self::with_reserved_ids(0)
    }

    /// Start an empty document that can take pages from `source` without
    /// renumbering it.
    ///
    /// The new document's own objects are allocated above `source.max_id`.
    pub fn above(source: &Document) -> Self {
        Self::with_reserved_ids(source.max_id)
    }

    fn with_reserved_ids(max_id: u32) -> Self {
        let mut document = Document::with_version(OUTPUT_VERSION);
        document.max_id = max_id;
        let pages_id = document.new_object_id();
        document
            .objects
            .insert(pages_id, Object::Dictionary(dictionary! { "Type" => "Pages" }));

        Self {
            document,
            pages_id,
            kids: Vec::new(),
            outline_items: Vec::new(),
        }
    }

    /// Pages appended so far.
    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Append every page of `source`, in order. Returns the number appended.
    ///
    /// `source` is renumbered above the objects already present, so any
    /// number of documents can be appended, including the same file twice.
    /// The top-level entries of `source`'s outline are carried over and
    /// follow those of earlier documents.
    pub fn append_document(&mut self, mut source: Document) -> Result<usize> {
        source.renumber_objects_with(self.document.max_id + 1);
        let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();
        self.append_pages(&source, &page_ids)?;
        self.append_outline(&source);
        Ok(page_ids.len())
    }

    /// Append specific pages of `source`, in the order given.
    ///
    /// The caller must ensure `source`'s object ids do not collide with this
    /// document's; see [`PageAssembler::above`] and
    /// [`PageAssembler::append_document`].
    pub fn append_pages(&mut self, source: &Document, page_ids: &[ObjectId]) -> Result<()> {
        let mut pages = Vec::with_capacity(page_ids.len());
        for &page_id in page_ids {
            let mut page = source
                .get_dictionary(page_id)
                .map_err(|e| {
                    PdfEditError::other(format!(
                        "Page object {} {} is unreadable: {e}",
                        page_id.0, page_id.1
                    ))
                })?
                .clone();

            for key in INHERITABLE_ATTRIBUTES {
                if !page.has(key)
                    && let Some(value) = inherited_attribute(source, &page, key)
                {
                    page.set(key, value);
                }
            }
            page.set("Parent", self.pages_id);
            pages.push((page_id, Object::Dictionary(page)));
        }

        // Every selected page is in place before any is walked, so links
        // between them (an annotation's /P, a /Dest) resolve to the copies.
        for (page_id, page) in &pages {
            self.document.objects.insert(*page_id, page.clone());
        }
        for (page_id, page) in &pages {
            copy_references(&mut self.document, source, page, belongs_to_page);
            self.kids.push(Object::Reference(*page_id));
        }

        self.document.max_id = self.document.max_id.max(source.max_id);
        Ok(())
    }

    /// Carry over the top-level outline entries of `source` and everything
    /// nested below them.
    ///
    /// Call after `source`'s pages have been appended so that destinations
    /// resolve to them.
    fn append_outline(&mut self, source: &Document) {
        for item_id in outline::top_level_items(source) {
            let Ok(item) = source.get_dictionary(item_id) else {
                continue;
            };
            let mut item = item.clone();
            for key in SIBLING_LINKS {
                item.remove(key);
            }

            let item = Object::Dictionary(item);
            self.document.objects.insert(item_id, item.clone());
            copy_references(&mut self.document, source, &item, belongs_to_page);
            self.outline_items.push(item_id);
        }

        self.document.max_id = self.document.max_id.max(source.max_id);
    }

    /// Close the page tree and return the finished document.
    pub fn finish(mut self) -> Document {
        let count = self.kids.len() as i64;
        let kids = std::mem::take(&mut self.kids);

        self.document.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let mut catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        };
        if let Some(outline_id) = outline::link_items(&mut self.document, &self.outline_items) {
            catalog.set("Outlines", outline_id);
        }
        let catalog_id = self.document.add_object(catalog);
        self.document.trailer.set("Root", catalog_id);

        let pruned = prune_dangling_references(&mut self.document);
        if pruned > 0 {
            debug!("Cleared {pruned} reference(s) to objects left out of the output");
        }

        self.document
    }
}

impl Default for PageAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a referenced object may be copied along with a page.
///
/// Pages, page-tree nodes, catalogs and outline roots are document
/// structure; a page reaches them only through links and back-pointers.
fn belongs_to_page(obj: &Object) -> bool {
    let kind = obj
        .as_dict()
        .and_then(|dict| dict.get(b"Type"))
        .and_then(Object::as_name);
    !matches!(kind, Ok(b"Page" | b"Pages" | b"Catalog" | b"Outlines"))
}

/// Look up `key` on the ancestors of `page` in `source`.
fn inherited_attribute(source: &Document, page: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    for _ in 0..MAX_TREE_DEPTH {
        let node = source.get_dictionary(parent?).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    None
}
