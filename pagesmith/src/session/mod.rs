//! Interactive session state.
//!
//! A [`Session`] owns everything the user manipulates between operations: the
//! file selections for merge, split and compress, the drag state of the merge
//! list, and the document under review for deletion with its page selection.
//! Gestures and toggles mutate this state synchronously; operations read it
//! and hand it to the [`Composer`].

pub mod gesture;
pub mod selection;

pub use gesture::{DragEvent, DragOutcome, DragState, ReorderEngine, SwipeTracker};
pub use selection::{PageMark, SelectionState};

use crate::codec::{DocumentCodec, SaveOptions};
use crate::compose::{Composer, CompositionPlan, Operation, OperationReport};
use crate::config::Config;
use crate::error::{PageSmithError, Result};
use crate::io::DeliverySink;
use crate::source::{SourceFile, SourceRegistry};

/// A decoded document under review, with its keep/discard selection.
#[derive(Debug)]
pub struct Review<D> {
    source: SourceFile,
    document: D,
    selection: SelectionState,
}

impl<D> Review<D> {
    /// Bundle a decoded document with its selection.
    pub fn new(source: SourceFile, document: D, selection: SelectionState) -> Self {
        Self {
            source,
            document,
            selection,
        }
    }

    /// File the document was decoded from.
    pub fn source(&self) -> &SourceFile {
        &self.source
    }

    /// The decoded document.
    pub fn document(&self) -> &D {
        &self.document
    }

    /// Current page selection.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }
}

/// State of one user session over a codec.
pub struct Session<C: DocumentCodec> {
    codec: C,
    save_options: SaveOptions,
    merge_files: SourceRegistry,
    split_files: SourceRegistry,
    compress_files: SourceRegistry,
    reorder: ReorderEngine,
    swipe: SwipeTracker,
    review: Option<Review<C::Document>>,
}

impl<C: DocumentCodec> Session<C> {
    /// Create a session with default settings.
    pub fn new(codec: C) -> Self {
        Self::with_config(codec, &Config::default())
    }

    /// Create a session using the output and gesture settings of `config`.
    pub fn with_config(codec: C, config: &Config) -> Self {
        Self {
            codec,
            save_options: config.save_options(),
            merge_files: SourceRegistry::new(),
            split_files: SourceRegistry::new(),
            compress_files: SourceRegistry::new(),
            reorder: ReorderEngine::new(),
            swipe: SwipeTracker::new(config.swipe_threshold),
            review: None,
        }
    }

    /// The codec this session drives.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    fn composer(&self) -> Composer<'_, C> {
        Composer::new(&self.codec, self.save_options)
    }

    // Selection of inputs

    /// Replace the files to merge.
    pub fn select_merge_files(&mut self, files: impl IntoIterator<Item = SourceFile>) {
        self.reorder.cancel();
        self.merge_files.add(files);
    }

    /// Replace the file to split.
    pub fn select_split_file(&mut self, file: SourceFile) {
        self.split_files.add([file]);
    }

    /// Replace the file to compress.
    pub fn select_compress_file(&mut self, file: SourceFile) {
        self.compress_files.add([file]);
    }

    /// Files to merge, in merge order.
    pub fn merge_files(&self) -> &SourceRegistry {
        &self.merge_files
    }

    // Merge list gestures

    /// Feed a drag event for the merge list.
    ///
    /// # Errors
    ///
    /// Returns [`PageSmithError::PositionOutOfRange`] for a drop outside the list.
    pub fn drag(&mut self, event: DragEvent) -> Result<DragOutcome> {
        self.reorder.handle(event, &mut self.merge_files)
    }

    /// Current drag state of the merge list.
    pub fn drag_state(&self) -> DragState {
        self.reorder.state()
    }

    // Delete review

    /// Decode `file` and start reviewing it with every page kept.
    ///
    /// The previous review is replaced only once the new document decoded.
    ///
    /// # Errors
    ///
    /// Returns the codec's decode error; the previous review stays in place.
    pub async fn load_review(&mut self, file: SourceFile) -> Result<&Review<C::Document>> {
        let document = self.codec.load(&file).await?;
        let page_count = self.codec.page_count(&document);
        tracing::debug!(name = file.name(), pages = page_count, "review loaded");

        self.swipe = SwipeTracker::new(self.swipe.threshold());
        let review = self
            .review
            .insert(Review::new(file, document, SelectionState::new(page_count)));
        Ok(review)
    }

    /// The document under review, if any.
    pub fn review(&self) -> Option<&Review<C::Document>> {
        self.review.as_ref()
    }

    /// Toggle page `index` of the document under review.
    ///
    /// # Errors
    ///
    /// Returns [`PageSmithError::NoReviewLoaded`] before a review is loaded, or
    /// [`PageSmithError::PageOutOfRange`] for an unknown page.
    pub fn toggle_page(&mut self, index: usize) -> Result<PageMark> {
        self.review
            .as_mut()
            .ok_or(PageSmithError::NoReviewLoaded)?
            .selection
            .toggle(index)
    }

    /// Record the start of a touch on page `index` at horizontal position `x`.
    pub fn touch_start(&mut self, index: usize, x: f32) {
        self.swipe.touch_start(index, x);
    }

    /// Finish a touch on page `index`; a leftward swipe toggles the page.
    ///
    /// Returns the page's new mark when the touch was a swipe.
    ///
    /// # Errors
    ///
    /// Same as [`toggle_page`](Self::toggle_page) when the swipe fires.
    pub fn touch_end(&mut self, index: usize, x: f32) -> Result<Option<PageMark>> {
        match self.swipe.touch_end(index, x) {
            Some(index) => self.toggle_page(index).map(Some),
            None => Ok(None),
        }
    }

    /// Kept page indices of the document under review, ascending.
    pub fn kept_pages(&self) -> Vec<usize> {
        self.review
            .as_ref()
            .map(|review| review.selection.kept_indices())
            .unwrap_or_default()
    }

    // Operations

    /// Merge the selected files into `merged.pdf`.
    ///
    /// # Errors
    ///
    /// See [`Composer::merge`].
    pub async fn merge<S: DeliverySink>(&self, sink: &mut S) -> Result<OperationReport> {
        self.composer().merge(&self.merge_files, sink).await
    }

    /// Split the selected file into one file per page.
    ///
    /// # Errors
    ///
    /// See [`Composer::split`].
    pub async fn split<S: DeliverySink>(&self, sink: &mut S) -> Result<OperationReport> {
        self.composer().split(self.split_files.first(), sink).await
    }

    /// Compress the selected file.
    ///
    /// # Errors
    ///
    /// See [`Composer::compress`].
    pub async fn compress<S: DeliverySink>(&self, sink: &mut S) -> Result<OperationReport> {
        self.composer()
            .compress(self.compress_files.first(), sink)
            .await
    }

    /// Write the kept pages of the reviewed document to `pages_deleted.pdf`.
    ///
    /// The review is released after a successful delivery; on error it stays
    /// loaded with its selection so the user can adjust and retry.
    ///
    /// # Errors
    ///
    /// See [`Composer::delete`].
    pub async fn commit_delete<S: DeliverySink>(
        &mut self,
        sink: &mut S,
    ) -> Result<OperationReport> {
        let report = self.composer().delete(self.review.as_ref(), sink).await?;
        self.review = None;
        Ok(report)
    }

    /// Resolve the outputs `operation` would produce without writing anything.
    ///
    /// # Errors
    ///
    /// Same preconditions and decode errors as the operation itself.
    pub async fn plan(&self, operation: Operation) -> Result<CompositionPlan> {
        let composer = self.composer();
        match operation {
            Operation::Merge => composer.plan_merge(&self.merge_files).await,
            Operation::Split => composer.plan_split(self.split_files.first()).await,
            Operation::Compress => composer.plan_compress(self.compress_files.first()).await,
            Operation::Delete => composer.plan_delete(self.review.as_ref()),
        }
    }
}
