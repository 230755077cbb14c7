//! Review grid: one rendered thumbnail per page of the document under review.

use super::{PageRasterizer, Viewport};
use crate::error::Result;
use crate::session::{PageMark, SelectionState};
use crate::source::SourceFile;

/// A rendered page preview.
///
/// Only the rendered dimensions are kept; pixels are released once the page
/// has been drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    /// One-based page number.
    pub number: usize,
    /// Viewport the page was rendered at.
    pub viewport: Viewport,
    /// Rendered width in pixels.
    pub width: u32,
    /// Rendered height in pixels.
    pub height: u32,
}

/// One line of the grid as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailRow {
    /// One-based page number.
    pub number: usize,
    /// Rendered width in pixels.
    pub width: u32,
    /// Rendered height in pixels.
    pub height: u32,
    /// Current selection mark of the page.
    pub mark: PageMark,
}

/// Thumbnails for every page of a document, in page order.
#[derive(Debug, Clone, Default)]
pub struct ReviewGrid {
    thumbnails: Vec<Thumbnail>,
}

impl ReviewGrid {
    /// Render every page of `source` at `scale`.
    ///
    /// Pages are rendered one after another, in order.
    ///
    /// # Errors
    ///
    /// Returns the first open or render error; no partial grid is returned.
    pub async fn build<R: PageRasterizer>(
        rasterizer: &R,
        source: &SourceFile,
        scale: f32,
    ) -> Result<Self> {
        let document = rasterizer.open(source).await?;
        let page_count = rasterizer.page_count(&document);

        let mut thumbnails = Vec::with_capacity(page_count);
        for number in 1..=page_count {
            let page = rasterizer.page(&document, number)?;
            let viewport = rasterizer.viewport(&page, scale);
            let surface = rasterizer.render(&page, &viewport).await?;
            thumbnails.push(Thumbnail {
                number,
                viewport,
                width: surface.width,
                height: surface.height,
            });
        }

        tracing::debug!(name = source.name(), pages = page_count, scale, "review grid built");
        Ok(Self { thumbnails })
    }

    /// Thumbnails in page order.
    pub fn thumbnails(&self) -> &[Thumbnail] {
        &self.thumbnails
    }

    /// Number of thumbnails.
    pub fn len(&self) -> usize {
        self.thumbnails.len()
    }

    /// Check if the grid has no thumbnails.
    pub fn is_empty(&self) -> bool {
        self.thumbnails.is_empty()
    }

    /// Grid rows annotated with the current selection.
    ///
    /// Pages the selection does not cover are shown as kept.
    pub fn rows(&self, selection: &SelectionState) -> Vec<ThumbnailRow> {
        self.thumbnails
            .iter()
            .map(|thumb| ThumbnailRow {
                number: thumb.number,
                width: thumb.width,
                height: thumb.height,
                mark: selection
                    .mark(thumb.number - 1)
                    .unwrap_or(PageMark::Kept),
            })
            .collect()
    }
}
