//! The composition reducer.
//!
//! Each operation reads session state, drives the codec strictly in sequence
//! (decode, copy, serialize) and hands every finished buffer to the sink. A
//! buffer is delivered only after its own serialize step succeeded, so a
//! failing merge delivers nothing and a failing split stops after the last
//! page that was fully written.

use std::time::Instant;

use super::plan::{
    COMPRESSED_FILENAME, CompositionPlan, MERGED_FILENAME, Operation, PAGES_DELETED_FILENAME,
    split_filename,
};
use super::report::OperationReport;
use crate::codec::{DocumentCodec, SaveOptions};
use crate::error::{PageSmithError, Result};
use crate::io::DeliverySink;
use crate::session::Review;
use crate::source::{SourceFile, SourceRegistry};

/// Runs operations against a codec.
///
/// Preconditions are checked before the codec is touched: an operation
/// without input never decodes anything, and a delete with nothing kept never
/// creates or saves a document.
#[derive(Debug)]
pub struct Composer<'a, C: DocumentCodec> {
    codec: &'a C,
    save_options: SaveOptions,
}

impl<'a, C: DocumentCodec> Composer<'a, C> {
    /// Create a composer that saves merge, split and delete outputs with `save_options`.
    pub fn new(codec: &'a C, save_options: SaveOptions) -> Self {
        Self {
            codec,
            save_options,
        }
    }

    /// Concatenate every file of `registry`, in registry order, into `merged.pdf`.
    ///
    /// # Errors
    ///
    /// Returns [`PageSmithError::NoInputFile`] for an empty registry, or the
    /// first codec or sink error. Nothing is delivered on error.
    pub async fn merge<S: DeliverySink>(
        &self,
        registry: &SourceRegistry,
        sink: &mut S,
    ) -> Result<OperationReport> {
        if registry.is_empty() {
            return Err(PageSmithError::no_input(Operation::Merge));
        }

        let started = Instant::now();
        tracing::info!(files = registry.len(), "merging documents");

        let mut merged = self.codec.create()?;
        for source in registry {
            let document = self.codec.load(source).await?;
            let indices = self.codec.page_indices(&document);
            for page in self.codec.copy_pages(&mut merged, &document, &indices)? {
                self.codec.add_page(&mut merged, page)?;
            }
        }

        let page_count = self.codec.page_count(&merged);
        let bytes = self.codec.save(merged, self.save_options).await?;

        let mut report = OperationReport::new(Operation::Merge, registry.total_size());
        report.record(MERGED_FILENAME, page_count, bytes.len());
        sink.deliver(bytes, MERGED_FILENAME).await?;

        Ok(report.finish(started))
    }

    /// Write every page of `source` to its own `page_<n>.pdf`.
    ///
    /// Pages are processed one at a time; each output is delivered as soon as
    /// it is serialized.
    ///
    /// # Errors
    ///
    /// Returns [`PageSmithError::NoInputFile`] without a source, or the first
    /// codec or sink error. Outputs delivered before the error stay delivered.
    pub async fn split<S: DeliverySink>(
        &self,
        source: Option<&SourceFile>,
        sink: &mut S,
    ) -> Result<OperationReport> {
        let source = source.ok_or_else(|| PageSmithError::no_input(Operation::Split))?;

        let started = Instant::now();
        let document = self.codec.load(source).await?;
        let page_count = self.codec.page_count(&document);
        tracing::info!(name = source.name(), pages = page_count, "splitting document");

        let mut report = OperationReport::new(Operation::Split, source.size());
        for index in 0..page_count {
            let mut single = self.codec.create()?;
            for page in self.codec.copy_pages(&mut single, &document, &[index])? {
                self.codec.add_page(&mut single, page)?;
            }

            let bytes = self.codec.save(single, self.save_options).await?;
            let filename = split_filename(index + 1);
            report.record(&filename, 1, bytes.len());
            sink.deliver(bytes, &filename).await?;
        }

        Ok(report.finish(started))
    }

    /// Re-serialize `source` into `compressed.pdf` with object streams.
    ///
    /// The configured save options are not used; compress always writes the
    /// most compact form.
    ///
    /// # Errors
    ///
    /// Returns [`PageSmithError::NoInputFile`] without a source, or the first
    /// codec or sink error.
    pub async fn compress<S: DeliverySink>(
        &self,
        source: Option<&SourceFile>,
        sink: &mut S,
    ) -> Result<OperationReport> {
        let source = source.ok_or_else(|| PageSmithError::no_input(Operation::Compress))?;

        let started = Instant::now();
        let document = self.codec.load(source).await?;
        let page_count = self.codec.page_count(&document);
        let bytes = self.codec.save(document, SaveOptions::compact()).await?;

        tracing::info!(
            name = source.name(),
            before = source.size(),
            after = bytes.len(),
            "document compressed"
        );

        let mut report = OperationReport::new(Operation::Compress, source.size());
        report.record(COMPRESSED_FILENAME, page_count, bytes.len());
        sink.deliver(bytes, COMPRESSED_FILENAME).await?;

        Ok(report.finish(started))
    }

    /// Copy the kept pages of the reviewed document, in ascending page
    /// order, into `pages_deleted.pdf`.
    ///
    /// # Errors
    ///
    /// Returns [`PageSmithError::NoInputFile`] without a review,
    /// [`PageSmithError::NothingKept`] when every page is discarded, or the
    /// first codec or sink error.
    pub async fn delete<S: DeliverySink>(
        &self,
        review: Option<&Review<C::Document>>,
        sink: &mut S,
    ) -> Result<OperationReport> {
        let review = review.ok_or_else(|| PageSmithError::no_input(Operation::Delete))?;
        let kept = review.selection().require_kept()?;

        let started = Instant::now();
        tracing::info!(
            name = review.source().name(),
            kept = kept.len(),
            discarded = review.selection().len() - kept.len(),
            "deleting pages"
        );

        let mut output = self.codec.create()?;
        for page in self
            .codec
            .copy_pages(&mut output, review.document(), &kept)?
        {
            self.codec.add_page(&mut output, page)?;
        }

        let page_count = self.codec.page_count(&output);
        let bytes = self.codec.save(output, self.save_options).await?;

        let mut report = OperationReport::new(Operation::Delete, review.source().size());
        report.record(PAGES_DELETED_FILENAME, page_count, bytes.len());
        sink.deliver(bytes, PAGES_DELETED_FILENAME).await?;

        Ok(report.finish(started))
    }

    /// Resolve what [`merge`](Self::merge) would produce.
    ///
    /// Every file is decoded to learn its page count; nothing is written.
    ///
    /// # Errors
    ///
    /// Same preconditions and decode errors as `merge`.
    pub async fn plan_merge(&self, registry: &SourceRegistry) -> Result<CompositionPlan> {
        if registry.is_empty() {
            return Err(PageSmithError::no_input(Operation::Merge));
        }

        let mut counts = Vec::with_capacity(registry.len());
        for source in registry {
            let document = self.codec.load(source).await?;
            counts.push((source.name(), self.codec.page_count(&document)));
        }

        Ok(CompositionPlan::merge(counts))
    }

    /// Resolve what [`split`](Self::split) would produce.
    ///
    /// # Errors
    ///
    /// Same preconditions and decode errors as `split`.
    pub async fn plan_split(&self, source: Option<&SourceFile>) -> Result<CompositionPlan> {
        let source = source.ok_or_else(|| PageSmithError::no_input(Operation::Split))?;
        let document = self.codec.load(source).await?;
        Ok(CompositionPlan::split(
            source.name(),
            self.codec.page_count(&document),
        ))
    }

    /// Resolve what [`compress`](Self::compress) would produce.
    ///
    /// # Errors
    ///
    /// Same preconditions and decode errors as `compress`.
    pub async fn plan_compress(&self, source: Option<&SourceFile>) -> Result<CompositionPlan> {
        let source = source.ok_or_else(|| PageSmithError::no_input(Operation::Compress))?;
        let document = self.codec.load(source).await?;
        Ok(CompositionPlan::compress(
            source.name(),
            self.codec.page_count(&document),
        ))
    }

    /// Resolve what [`delete`](Self::delete) would produce.
    ///
    /// # Errors
    ///
    /// Same preconditions as `delete`.
    pub fn plan_delete(&self, review: Option<&Review<C::Document>>) -> Result<CompositionPlan> {
        let review = review.ok_or_else(|| PageSmithError::no_input(Operation::Delete))?;
        let kept = review.selection().require_kept()?;
        Ok(CompositionPlan::delete(review.source().name(), &kept))
    }
}
