//! Sample documents for unit tests.

use lopdf::{Document, Object, Stream, dictionary};
use std::path::PathBuf;
use tempfile::TempDir;

/// A document with `pages` pages, each drawing the text `Page N`.
///
/// `Resources` and `MediaBox` live on the `Pages` node and are inherited by
/// every page.
pub(crate) fn sample_document(pages: usize) -> Document {
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

    let mut kids = Vec::with_capacity(pages);
    for number in 1..=pages {
        let content = format!("BT /F1 24 Tf 72 720 Td (Page {number}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "Resources" => resources_id,
            "MediaBox" => Object::Array(vec![0.into(), 0.into(), 612.into(), 792.into()]),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Save a [`sample_document`] into `dir` and return its path.
pub(crate) fn write_sample(dir: &TempDir, name: &str, pages: usize) -> PathBuf {
    let path = dir.path().join(name);
    sample_document(pages).save(&path).unwrap();
    path
}

/// The `Page N` label drawn on each page, in page order.
pub(crate) fn page_labels(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let content = doc.get_page_content(page_id).unwrap();
            let text = String::from_utf8_lossy(&content);
            let start = text.find('(').unwrap() + 1;
            let end = text[start..].find(')').unwrap() + start;
            text[start..end].to_string()
        })
        .collect()
}

/// A [`sample_document`] with one top-level outline entry per page, titled
/// `{prefix} N` and pointing at page N.
///
/// The first entry has a nested child that also points at page 1.
pub(crate) fn sample_document_with_outline(pages: usize, prefix: &str) -> Document {
    let mut doc = sample_document(pages);
    let page_ids: Vec<_> = doc.get_pages().into_values().collect();
    let outline_id = doc.new_object_id();

    let mut item_ids = Vec::with_capacity(pages);
    for (index, page_id) in page_ids.iter().enumerate() {
        let title = format!("{prefix} {}", index + 1);
        item_ids.push(doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
            "Parent" => outline_id,
            "Dest" => Object::Array(vec![Object::Reference(*page_id), "Fit".into()]),
        }));
    }

    if let Some(&first) = item_ids.first() {
        let child = doc.add_object(dictionary! {
            "Title" => Object::string_literal(format!("{prefix} 1.1")),
            "Parent" => first,
            "Dest" => Object::Array(vec![Object::Reference(page_ids[0]), "Fit".into()]),
        });
        if let Ok(Object::Dictionary(item)) = doc.get_object_mut(first) {
            item.set("First", child);
            item.set("Last", child);
            item.set("Count", 1);
        }
    }
    for pair in item_ids.windows(2) {
        if let Ok(Object::Dictionary(item)) = doc.get_object_mut(pair[0]) {
            item.set("Next", pair[1]);
        }
        if let Ok(Object::Dictionary(item)) = doc.get_object_mut(pair[1]) {
            item.set("Prev", pair[0]);
        }
    }

    let mut root = dictionary! { "Type" => "Outlines", "Count" => pages as i64 + 1 };
    if let (Some(&first), Some(&last)) = (item_ids.first(), item_ids.last()) {
        root.set("First", first);
        root.set("Last", last);
    }
    doc.objects.insert(outline_id, Object::Dictionary(root));
    doc.catalog_mut().unwrap().set("Outlines", outline_id);

    doc
}

/// A [`sample_document`] whose first page carries a link annotation to its
/// last page.
pub(crate) fn sample_document_with_link(pages: usize) -> Document {
    let mut doc = sample_document(pages);
    let page_ids: Vec<_> = doc.get_pages().into_values().collect();
    let (first, last) = (page_ids[0], page_ids[pages - 1]);

    let link_id = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => Object::Array(vec![72.into(), 700.into(), 200.into(), 740.into()]),
        "P" => first,
        "Dest" => Object::Array(vec![Object::Reference(last), "Fit".into()]),
    });
    if let Ok(Object::Dictionary(page)) = doc.get_object_mut(first) {
        page.set("Annots", Object::Array(vec![Object::Reference(link_id)]));
    }

    doc
}

/// Titles of the top-level outline entries, in order.
pub(crate) fn outline_titles(doc: &Document) -> Vec<String> {
    crate::merge::outline::top_level_items(doc)
        .into_iter()
        .map(|item_id| {
            let title = doc
                .get_dictionary(item_id)
                .unwrap()
                .get(b"Title")
                .and_then(Object::as_str)
                .unwrap();
            String::from_utf8_lossy(title).into_owned()
        })
        .collect()
}
