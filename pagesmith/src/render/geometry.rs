//! Rasterizer that draws page outlines from page geometry.
//!
//! Pages are laid out at their true size and orientation but drawn as blank
//! sheets: white fill, one-pixel dark border. Content streams are not
//! interpreted.

use std::sync::Arc;

use lopdf::{Document, Object};
use tokio::task;

use super::{MAX_SURFACE_SIDE, PageRasterizer, Surface, Viewport};
use crate::codec::{decode, flatten_page, page_id};
use crate::error::{PageSmithError, Result};
use crate::source::SourceFile;

/// US Letter, used when a page has no usable MediaBox.
const DEFAULT_MEDIA_BOX: [f32; 4] = [0.0, 0.0, 612.0, 792.0];

const PAPER: [u8; 4] = [255, 255, 255, 255];
const BORDER: [u8; 4] = [64, 64, 64, 255];

/// Size and orientation of one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// One-based page number.
    pub number: usize,
    /// Effective MediaBox `[llx, lly, urx, ury]` in points.
    pub media_box: [f32; 4],
    /// Clockwise rotation in degrees, normalized to 0, 90, 180 or 270.
    pub rotate: i64,
}

impl PageGeometry {
    /// Unscaled width and height in points, after rotation.
    pub fn size(&self) -> (f32, f32) {
        let [llx, lly, urx, ury] = self.media_box;
        let (width, height) = ((urx - llx).abs(), (ury - lly).abs());
        if self.rotate % 180 == 90 {
            (height, width)
        } else {
            (width, height)
        }
    }
}

/// Page rasterizer that needs nothing beyond `lopdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometryRasterizer;

impl GeometryRasterizer {
    /// Create a new rasterizer.
    pub fn new() -> Self {
        Self
    }
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        _ => object,
    }
}

fn media_box(doc: &Document, page: &lopdf::Dictionary) -> Option<[f32; 4]> {
    let array = resolve(doc, page.get(b"MediaBox").ok()?).as_array().ok()?;
    if array.len() != 4 {
        return None;
    }

    let mut rect = [0.0f32; 4];
    for (slot, value) in rect.iter_mut().zip(array) {
        *slot = resolve(doc, value).as_float().ok()?;
    }
    Some(rect)
}

impl PageRasterizer for GeometryRasterizer {
    type Document = Document;
    type Page = PageGeometry;

    async fn open(&self, source: &SourceFile) -> Result<Document> {
        let name = source.name().to_string();
        let bytes: Arc<[u8]> = source.shared_bytes();

        task::spawn_blocking(move || decode(&name, &bytes))
            .await
            .map_err(|e| PageSmithError::other(format!("Load task failed: {e}")))?
    }

    fn page_count(&self, document: &Document) -> usize {
        document.get_pages().len()
    }

    fn page(&self, document: &Document, number: usize) -> Result<PageGeometry> {
        let index = number.checked_sub(1).ok_or(PageSmithError::PageOutOfRange {
            index: 0,
            page_count: self.page_count(document),
        })?;
        let page = flatten_page(document, page_id(document, index)?)?;

        let rotate = page
            .get(b"Rotate")
            .ok()
            .and_then(|r| resolve(document, r).as_i64().ok())
            .unwrap_or(0)
            .rem_euclid(360);

        Ok(PageGeometry {
            number,
            media_box: media_box(document, &page).unwrap_or(DEFAULT_MEDIA_BOX),
            rotate: rotate - rotate % 90,
        })
    }

    /// Pages whose longest side would exceed [`MAX_SURFACE_SIDE`] pixels are
    /// scaled down to fit it.
    fn viewport(&self, page: &PageGeometry, scale: f32) -> Viewport {
        let (width, height) = page.size();
        let (width, height) = (width * scale, height * scale);
        let longest = width.max(height);
        if longest <= MAX_SURFACE_SIDE as f32 {
            return Viewport { width, height };
        }

        let fit = MAX_SURFACE_SIDE as f32 / longest;
        Viewport {
            width: (width * fit).min(MAX_SURFACE_SIDE as f32),
            height: (height * fit).min(MAX_SURFACE_SIDE as f32),
        }
    }

    async fn render(&self, page: &PageGeometry, viewport: &Viewport) -> Result<Surface> {
        let (width, height) = viewport.pixel_size().ok_or_else(|| PageSmithError::RenderFailed {
            page: page.number,
            reason: format!(
                "viewport {}x{} exceeds the surface limit",
                viewport.width, viewport.height
            ),
        })?;
        if width == 0 || height == 0 {
            return Err(PageSmithError::RenderFailed {
                page: page.number,
                reason: format!("empty viewport {width}x{height}"),
            });
        }

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(width as usize * height as usize * 4)
            .map_err(|e| PageSmithError::RenderFailed {
                page: page.number,
                reason: e.to_string(),
            })?;
        for y in 0..height {
            for x in 0..width {
                let edge = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                pixels.extend_from_slice(if edge { &BORDER } else { &PAPER });
            }
        }

        tracing::trace!(page = page.number, width, height, "page rendered");
        Ok(Surface {
            width,
            height,
            pixels,
        })
    }
}
