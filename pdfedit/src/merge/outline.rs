//! Document outline (bookmarks) carried through a merge.
//!
//! Each input's top-level outline entries are copied into the output
//! together with their nested entries, then chained under a single new
//! outline root in input order.

use std::collections::BTreeSet;

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};

/// The outline root dictionary named by `doc`'s catalog, if any.
fn outline_root(doc: &Document) -> Option<&Dictionary> {
    match doc.catalog().ok()?.get(b"Outlines").ok()? {
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

/// Check if a document has an outline.
pub fn has_outline(doc: &Document) -> bool {
    outline_root(doc).is_some()
}

/// Ids of the top-level outline entries of `doc`, in order.
///
/// Follows the root's `First` entry along the `Next` chain. A chain that
/// loops back on itself or points at a missing object ends there.
pub fn top_level_items(doc: &Document) -> Vec<ObjectId> {
    let mut items = Vec::new();
    let Some(root) = outline_root(doc) else {
        return items;
    };

    let mut seen = BTreeSet::new();
    let mut next = root.get(b"First").and_then(Object::as_reference).ok();
    while let Some(item_id) = next {
        if !seen.insert(item_id) {
            break;
        }
        let Ok(item) = doc.get_dictionary(item_id) else {
            break;
        };
        items.push(item_id);
        next = item.get(b"Next").and_then(Object::as_reference).ok();
    }

    items
}

/// Chain `item_ids` as siblings under a new outline root in `doc`.
///
/// Returns the root's id for the catalog's `Outlines` entry, or `None` when
/// there are no items.
pub fn link_items(doc: &mut Document, item_ids: &[ObjectId]) -> Option<ObjectId> {
    let (&first, &last) = (item_ids.first()?, item_ids.last()?);
    let outline_id = doc.new_object_id();

    // Visible entries: every top-level item, plus the descendants of the
    // open ones (a positive Count).
    let mut count = 0;
    for (index, &item_id) in item_ids.iter().enumerate() {
        let Ok(Object::Dictionary(item)) = doc.get_object_mut(item_id) else {
            continue;
        };
        item.set("Parent", outline_id);
        item.remove(b"Prev");
        item.remove(b"Next");
        if index > 0 {
            item.set("Prev", item_ids[index - 1]);
        }
        if let Some(&next) = item_ids.get(index + 1) {
            item.set("Next", next);
        }
        count += 1 + item.get(b"Count").and_then(Object::as_i64).unwrap_or(0).max(0);
    }

    doc.objects.insert(
        outline_id,
        Object::Dictionary(dictionary! {
            "Type" => "Outlines",
            "First" => first,
            "Last" => last,
            "Count" => count,
        }),
    );

    Some(outline_id)
}
