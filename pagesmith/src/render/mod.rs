//! Page rasterization for the review grid.
//!
//! Rendering is a collaborator: the review surface asks a [`PageRasterizer`]
//! for one page at a time, sizes a [`Viewport`] at the preview scale, and
//! draws into a [`Surface`]. [`GeometryRasterizer`] is a dependency-light
//! implementation that lays out pages from their geometry.

mod geometry;
mod grid;

pub use geometry::{GeometryRasterizer, PageGeometry};
pub use grid::{ReviewGrid, Thumbnail, ThumbnailRow};

use crate::error::Result;
use crate::source::SourceFile;

/// Longest side, in pixels, a rasterizer lays a page out at.
pub const MAX_SURFACE_SIDE: u32 = 4096;

/// Largest surface, in pixels, a rasterizer will allocate.
pub const MAX_SURFACE_PIXELS: u64 = MAX_SURFACE_SIDE as u64 * MAX_SURFACE_SIDE as u64;

/// Size of a rendered page, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Pixel dimensions of a surface that can hold this viewport.
    ///
    /// Returns `None` when a side is not finite or the surface would exceed
    /// [`MAX_SURFACE_PIXELS`].
    pub fn pixel_size(&self) -> Option<(u32, u32)> {
        let side = |value: f32| -> Option<u32> {
            let value = value.ceil();
            (value.is_finite() && value >= 0.0 && value <= u32::MAX as f32)
                .then_some(value as u32)
        };
        let (width, height) = (side(self.width)?, side(self.height)?);

        (u64::from(width) * u64::from(height) <= MAX_SURFACE_PIXELS).then_some((width, height))
    }
}

/// RGBA pixel buffer produced by a rasterizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA pixels, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl Surface {
    /// RGBA value at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels
            .get(offset..offset + 4)
            .and_then(|p| p.try_into().ok())
    }
}

/// A page renderer.
///
/// Page numbers are one-based, matching how pages are shown to the user.
#[allow(async_fn_in_trait)]
pub trait PageRasterizer {
    /// Document opened for rendering.
    type Document;

    /// A single page ready to render.
    type Page;

    /// Open a source file for rendering.
    ///
    /// # Errors
    ///
    /// Returns a load error if the bytes cannot be decoded.
    async fn open(&self, source: &SourceFile) -> Result<Self::Document>;

    /// Number of pages in `document`.
    fn page_count(&self, document: &Self::Document) -> usize;

    /// Page `number` (one-based) of `document`.
    ///
    /// # Errors
    ///
    /// Returns [`PageOutOfRange`](crate::PageSmithError::PageOutOfRange) for a
    /// page that does not exist.
    fn page(&self, document: &Self::Document, number: usize) -> Result<Self::Page>;

    /// Viewport of `page` at `scale`.
    fn viewport(&self, page: &Self::Page, scale: f32) -> Viewport;

    /// Draw `page` into a surface sized to `viewport`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderFailed`](crate::PageSmithError::RenderFailed) if the
    /// page cannot be drawn.
    async fn render(&self, page: &Self::Page, viewport: &Viewport) -> Result<Surface>;
}
