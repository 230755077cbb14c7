//! [`DocumentCodec`] implementation backed by `lopdf`.
//!
//! Decoding and serialization are CPU-bound, so both run on the blocking
//! thread pool. Page copying works on documents already in memory and runs
//! inline.

use std::sync::Arc;
use std::time::Instant;

use lopdf::{Document, Object, ObjectId, dictionary};
use tokio::task;

use super::pages::{PageCopier, append_to_page_tree, page_id};
use super::{DocumentCodec, SaveOptions};
use crate::error::{PageSmithError, Result};
use crate::source::SourceFile;

/// PDF version written into newly created documents.
const PDF_VERSION: &str = "1.7";

/// Decode `bytes` into a document with at least one page.
///
/// Runs synchronously; callers on the async runtime wrap it in
/// `spawn_blocking`.
pub(crate) fn decode(name: &str, bytes: &[u8]) -> Result<Document> {
    let doc = Document::load_mem(bytes).map_err(|e| {
        let message = e.to_string();
        let lowered = message.to_lowercase();
        if lowered.contains("encrypt") || lowered.contains("password") {
            PageSmithError::encrypted_pdf(name)
        } else {
            PageSmithError::failed_to_load_pdf(name, message)
        }
    })?;

    if doc.trailer.has(b"Encrypt") {
        return Err(PageSmithError::encrypted_pdf(name));
    }

    if doc.get_pages().is_empty() {
        return Err(PageSmithError::corrupted_pdf(name, "PDF has no pages"));
    }

    Ok(doc)
}

/// Codec over [`lopdf::Document`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfCodec;

impl LopdfCodec {
    /// Create a new codec.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentCodec for LopdfCodec {
    type Document = Document;
    type Page = ObjectId;

    fn create(&self) -> Result<Document> {
        let mut doc = Document::with_version(PDF_VERSION);

        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => Object::Integer(0),
        });
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        Ok(doc)
    }

    async fn load(&self, source: &SourceFile) -> Result<Document> {
        let name = source.name().to_string();
        let bytes: Arc<[u8]> = source.shared_bytes();

        let start = Instant::now();
        let doc = task::spawn_blocking(move || decode(&name, &bytes))
            .await
            .map_err(|e| PageSmithError::other(format!("Load task failed: {e}")))??;

        tracing::debug!(
            name = source.name(),
            pages = doc.get_pages().len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "document decoded"
        );
        Ok(doc)
    }

    fn page_count(&self, document: &Document) -> usize {
        document.get_pages().len()
    }

    fn copy_pages(
        &self,
        target: &mut Document,
        source: &Document,
        indices: &[usize],
    ) -> Result<Vec<ObjectId>> {
        let page_ids = indices
            .iter()
            .map(|index| page_id(source, *index))
            .collect::<Result<Vec<_>>>()?;

        let mut copier = PageCopier::new(source, target);
        let copied = page_ids
            .into_iter()
            .map(|id| copier.copy_page(id))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(count = copied.len(), "pages copied");
        Ok(copied)
    }

    fn add_page(&self, target: &mut Document, page: ObjectId) -> Result<()> {
        append_to_page_tree(target, page)
    }

    async fn save(&self, document: Document, options: SaveOptions) -> Result<Vec<u8>> {
        let start = Instant::now();

        let bytes = task::spawn_blocking(move || {
            let mut document = document;

            if options.prune_unused {
                document.prune_objects();
                document.renumber_objects();
            }
            if options.compress {
                document.compress();
            }

            let mut buffer = Vec::new();
            if options.use_object_streams {
                let save_options = lopdf::SaveOptions::builder()
                    .use_object_streams(true)
                    .use_xref_streams(true)
                    .build();
                document
                    .save_with_options(&mut buffer, save_options)
                    .map_err(|e| PageSmithError::failed_to_save(e.to_string()))?;
            } else {
                document
                    .save_to(&mut buffer)
                    .map_err(|e| PageSmithError::failed_to_save(e.to_string()))?;
            }

            Ok::<_, PageSmithError>(buffer)
        })
        .await
        .map_err(|e| PageSmithError::other(format!("Save task failed: {e}")))??;

        tracing::debug!(
            size = bytes.len(),
            compress = options.compress,
            object_streams = options.use_object_streams,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "document serialized"
        );
        Ok(bytes)
    }
}
