//! Document codec abstraction.
//!
//! The composition code never touches a PDF library directly. It drives a
//! [`DocumentCodec`], which decodes source bytes into documents, copies pages
//! between documents, and serializes the result. [`LopdfCodec`] is the
//! implementation backed by `lopdf`.

mod pages;
mod pdf;

pub use pdf::LopdfCodec;

pub(crate) use pages::{flatten_page, page_id};
pub(crate) use pdf::decode;

use crate::error::Result;
use crate::source::SourceFile;

/// Serialization flags passed to [`DocumentCodec::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaveOptions {
    /// Flate-compress content streams.
    pub compress: bool,

    /// Pack objects into object streams and write a cross-reference stream.
    pub use_object_streams: bool,

    /// Drop objects no longer reachable from the trailer before writing.
    pub prune_unused: bool,
}

impl SaveOptions {
    /// Write the document as is.
    pub fn plain() -> Self {
        Self::default()
    }

    /// Compress streams, classic cross-reference table.
    pub fn standard() -> Self {
        Self {
            compress: true,
            ..Self::default()
        }
    }

    /// Smallest output: compressed streams, object streams, no orphans.
    pub fn compact() -> Self {
        Self {
            compress: true,
            use_object_streams: true,
            prune_unused: true,
        }
    }
}

/// A PDF library as seen by the composition reducer.
///
/// Page indices are zero-based positions in document order. Every method that
/// can fail reports a collaborator error; the reducer never retries.
#[allow(async_fn_in_trait)]
pub trait DocumentCodec {
    /// Decoded, mutable document.
    type Document;

    /// A page copied into a target document but not yet attached to its page tree.
    type Page;

    /// Create an empty document with no pages.
    ///
    /// # Errors
    ///
    /// Returns an error if the document skeleton cannot be built.
    fn create(&self) -> Result<Self::Document>;

    /// Decode a source file.
    ///
    /// # Errors
    ///
    /// Returns [`FailedToLoadPdf`](crate::PageSmithError::FailedToLoadPdf),
    /// [`EncryptedPdf`](crate::PageSmithError::EncryptedPdf) or
    /// [`CorruptedPdf`](crate::PageSmithError::CorruptedPdf) when the bytes are
    /// not a usable document.
    async fn load(&self, source: &SourceFile) -> Result<Self::Document>;

    /// Number of pages in `document`.
    fn page_count(&self, document: &Self::Document) -> usize;

    /// Every page index of `document`, in document order.
    fn page_indices(&self, document: &Self::Document) -> Vec<usize> {
        (0..self.page_count(document)).collect()
    }

    /// Copy the pages at `indices` from `source` into `target`.
    ///
    /// The returned pages are in the same order as `indices`. They belong to
    /// `target` but only become part of its page sequence through
    /// [`add_page`](Self::add_page).
    ///
    /// # Errors
    ///
    /// Returns an error if an index does not exist in `source` or the page
    /// objects cannot be copied.
    fn copy_pages(
        &self,
        target: &mut Self::Document,
        source: &Self::Document,
        indices: &[usize],
    ) -> Result<Vec<Self::Page>>;

    /// Append a copied page to the end of `target`'s page sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if `target` has no usable page tree.
    fn add_page(&self, target: &mut Self::Document, page: Self::Page) -> Result<()>;

    /// Serialize `document` to bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FailedToSave`](crate::PageSmithError::FailedToSave) if the
    /// document cannot be written.
    async fn save(&self, document: Self::Document, options: SaveOptions) -> Result<Vec<u8>>;
}
