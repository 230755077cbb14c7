//! Page-level object graph operations on `lopdf` documents.
//!
//! This module handles:
//! - Resolving inherited page attributes onto a single page dictionary
//! - Deep-copying a page and everything it references into another document
//! - Appending copied pages to a document's page tree

use std::collections::{HashMap, HashSet};

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::{PageSmithError, Result};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

/// Object id of the page at zero-based `index`.
///
/// # Errors
///
/// Returns [`PageSmithError::PageOutOfRange`] if the document has no such page.
pub(crate) fn page_id(doc: &Document, index: usize) -> Result<ObjectId> {
    let pages = doc.get_pages();
    u32::try_from(index + 1)
        .ok()
        .and_then(|number| pages.get(&number).copied())
        .ok_or(PageSmithError::PageOutOfRange {
            index,
            page_count: pages.len(),
        })
}

/// Standalone copy of a page dictionary.
///
/// Inherited attributes are pulled down from the ancestors and the `Parent`
/// link is removed, so the dictionary no longer depends on the source page tree.
///
/// # Errors
///
/// Returns an error if `page_id` is not a dictionary.
pub(crate) fn flatten_page(doc: &Document, page_id: ObjectId) -> Result<Dictionary> {
    let mut page = doc.get_dictionary(page_id)?.clone();

    let mut visited = HashSet::new();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    while let Some(parent_id) = parent {
        if !visited.insert(parent_id) {
            break;
        }
        let Ok(node) = doc.get_dictionary(parent_id) else {
            break;
        };

        for key in INHERITABLE {
            if !page.has(key)
                && let Ok(value) = node.get(key)
            {
                page.set(key.to_vec(), value.clone());
            }
        }

        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    page.remove(b"Parent");
    Ok(page)
}

fn is_page_tree_node(object: &Object) -> bool {
    match object {
        Object::Dictionary(dict) => matches!(
            dict.get(b"Type").and_then(Object::as_name),
            Ok(b"Page" | b"Pages")
        ),
        _ => false,
    }
}

/// Copies pages from one document into another under fresh object ids.
///
/// Objects shared between pages copied by the same `PageCopier` are copied
/// once. References to page tree nodes other than the copied pages (link
/// destinations, article threads) are replaced with `null`, as are references
/// to objects missing from the source.
pub(crate) struct PageCopier<'a> {
    source: &'a Document,
    target: &'a mut Document,
    copied: HashMap<ObjectId, ObjectId>,
}

impl<'a> PageCopier<'a> {
    /// Create a copier from `source` into `target`.
    pub(crate) fn new(source: &'a Document, target: &'a mut Document) -> Self {
        Self {
            source,
            target,
            copied: HashMap::new(),
        }
    }

    /// Copy the page `page_id` and return its id in the target document.
    pub(crate) fn copy_page(&mut self, page_id: ObjectId) -> Result<ObjectId> {
        if let Some(existing) = self.copied.get(&page_id) {
            return Ok(*existing);
        }

        let page = flatten_page(self.source, page_id)?;
        let new_id = self.target.new_object_id();
        self.copied.insert(page_id, new_id);

        let copied = self.copy_dictionary(&page);
        self.target
            .objects
            .insert(new_id, Object::Dictionary(copied));

        tracing::trace!(?page_id, ?new_id, "page copied");
        Ok(new_id)
    }

    fn copy_object(&mut self, object: &Object) -> Object {
        match object {
            Object::Reference(id) => self.copy_reference(*id),
            Object::Dictionary(dict) => Object::Dictionary(self.copy_dictionary(dict)),
            Object::Array(items) => {
                Object::Array(items.iter().map(|item| self.copy_object(item)).collect())
            }
            Object::Stream(stream) => {
                let mut stream = stream.clone();
                stream.dict = self.copy_dictionary(&stream.dict);
                Object::Stream(stream)
            }
            other => other.clone(),
        }
    }

    fn copy_dictionary(&mut self, dict: &Dictionary) -> Dictionary {
        let mut copy = Dictionary::new();
        for (key, value) in dict.iter() {
            copy.set(key.clone(), self.copy_object(value));
        }
        copy
    }

    fn copy_reference(&mut self, id: ObjectId) -> Object {
        if let Some(new_id) = self.copied.get(&id) {
            return Object::Reference(*new_id);
        }

        let source = self.source;
        let Ok(object) = source.get_object(id) else {
            return Object::Null;
        };
        if is_page_tree_node(object) {
            return Object::Null;
        }

        let new_id = self.target.new_object_id();
        self.copied.insert(id, new_id);
        let copy = self.copy_object(object);
        self.target.objects.insert(new_id, copy);

        Object::Reference(new_id)
    }
}

/// Append `page_id` to the root page tree node of `doc`.
///
/// # Errors
///
/// Returns an error if the catalog, its `Pages` node, or the node's `Kids`
/// array is missing or malformed.
pub(crate) fn append_to_page_tree(doc: &mut Document, page_id: ObjectId) -> Result<()> {
    let pages_id = doc
        .catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| {
            PageSmithError::composition_failed(format!("Failed to get pages reference: {e}"))
        })?;

    let pages = doc.get_dictionary_mut(pages_id).map_err(|e| {
        PageSmithError::composition_failed(format!("Failed to get pages object: {e}"))
    })?;

    match pages.get_mut(b"Kids") {
        Ok(Object::Array(kids)) => kids.push(Object::Reference(page_id)),
        Ok(_) => return Err(PageSmithError::composition_failed("Kids is not an array")),
        Err(_) => {
            return Err(PageSmithError::composition_failed(
                "Pages dictionary missing Kids array",
            ));
        }
    }

    let count = pages.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
    pages.set("Count", Object::Integer(count + 1));

    doc.get_dictionary_mut(page_id)
        .map_err(|e| PageSmithError::composition_failed(format!("Failed to get page: {e}")))?
        .set("Parent", Object::Reference(pages_id));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Stream, dictionary};

    /// Two-level page tree: Resources on the intermediate node, MediaBox on the root.
    fn nested_document() -> (Document, Vec<ObjectId>) {
        let mut doc = Document::with_version("1.7");
        let root_id = doc.new_object_id();
        let node_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let mut page_ids = Vec::new();
        for width in [300, 400] {
            let content_id = doc.add_object(Stream::new(Dictionary::new(), b"BT ET".to_vec()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => node_id,
                "Contents" => content_id,
                "CropBox" => vec![0.into(), 0.into(), width.into(), 100.into()],
            });
            page_ids.push(page_id);
        }

        doc.objects.insert(
            node_id,
            dictionary! {
                "Type" => "Pages",
                "Parent" => root_id,
                "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
                "Count" => Object::Integer(2),
                "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
            }
            .into(),
        );
        doc.objects.insert(
            root_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(node_id)],
                "Count" => Object::Integer(2),
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }
            .into(),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => root_id,
        });
        doc.trailer.set("Root", catalog_id);

        (doc, page_ids)
    }

    fn empty_document() -> Document {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        doc.objects.insert(
            pages_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => Object::Integer(0),
            }
            .into(),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    #[test]
    fn test_page_id_bounds() {
        let (doc, page_ids) = nested_document();
        assert_eq!(page_id(&doc, 1).unwrap(), page_ids[1]);
        assert!(matches!(
            page_id(&doc, 2),
            Err(PageSmithError::PageOutOfRange {
                index: 2,
                page_count: 2
            })
        ));
    }

    #[test]
    fn test_flatten_page_pulls_inherited_attributes() {
        let (doc, page_ids) = nested_document();
        let page = flatten_page(&doc, page_ids[0]).unwrap();

        assert!(!page.has(b"Parent"));
        assert!(page.has(b"Resources"));
        assert!(page.has(b"MediaBox"));

        // Own attributes win over inherited ones.
        let crop = page.get(b"CropBox").unwrap().as_array().unwrap();
        assert_eq!(crop[2].as_i64().unwrap(), 300);
    }

    #[test]
    fn test_copy_and_append_pages() {
        let (source, page_ids) = nested_document();
        let mut target = empty_document();

        let copied: Vec<ObjectId> = {
            let mut copier = PageCopier::new(&source, &mut target);
            page_ids
                .iter()
                .rev()
                .map(|id| copier.copy_page(*id).unwrap())
                .collect()
        };
        for id in &copied {
            append_to_page_tree(&mut target, *id).unwrap();
        }

        let pages = target.get_pages();
        assert_eq!(pages.len(), 2);

        let first = target.get_dictionary(pages[&1]).unwrap();
        let crop = first.get(b"CropBox").unwrap().as_array().unwrap();
        assert_eq!(crop[2].as_i64().unwrap(), 400);
        assert!(first.get(b"Parent").unwrap().as_reference().is_ok());
    }

    #[test]
    fn test_shared_objects_copied_once() {
        let (source, page_ids) = nested_document();
        let mut target = empty_document();
        let before = target.objects.len();

        let mut copier = PageCopier::new(&source, &mut target);
        for id in &page_ids {
            copier.copy_page(*id).unwrap();
        }

        // 2 pages + 2 content streams + 1 shared font
        assert_eq!(target.objects.len(), before + 5);
    }

    #[test]
    fn test_references_to_other_pages_become_null() {
        let (mut source, page_ids) = nested_document();
        source
            .get_dictionary_mut(page_ids[0])
            .unwrap()
            .set("Dest", Object::Reference(page_ids[1]));
        let mut target = empty_document();

        let new_id = PageCopier::new(&source, &mut target)
            .copy_page(page_ids[0])
            .unwrap();

        let page = target.get_dictionary(new_id).unwrap();
        assert!(matches!(page.get(b"Dest"), Ok(Object::Null)));
    }

    #[test]
    fn test_append_without_kids_fails() {
        let mut doc = empty_document();
        let pages_id = doc
            .catalog()
            .unwrap()
            .get(b"Pages")
            .unwrap()
            .as_reference()
            .unwrap();
        doc.get_dictionary_mut(pages_id).unwrap().remove(b"Kids");
        let page_id = doc.add_object(dictionary! { "Type" => "Page" });

        let err = append_to_page_tree(&mut doc, page_id).unwrap_err();
        assert!(matches!(err, PageSmithError::CompositionFailed { .. }));
    }
}
