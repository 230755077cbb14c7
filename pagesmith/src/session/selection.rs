//! Per-page keep/discard selection.

use serde::Serialize;

use crate::error::{PageSmithError, Result};

/// Selection state of a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageMark {
    /// The page survives a deletion.
    Kept,
    /// The page is dropped by a deletion.
    Discarded,
}

impl PageMark {
    fn flipped(self) -> Self {
        match self {
            Self::Kept => Self::Discarded,
            Self::Discarded => Self::Kept,
        }
    }
}

/// Keep/discard marks for every page of one loaded document.
///
/// Every page starts out [`Kept`](PageMark::Kept); deletion is opt-in per
/// page through [`toggle`](Self::toggle).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    marks: Vec<PageMark>,
}

impl SelectionState {
    /// Selection over `page_count` pages, all kept.
    pub fn new(page_count: usize) -> Self {
        Self {
            marks: vec![PageMark::Kept; page_count],
        }
    }

    /// Flip the mark of page `index` and return its new mark.
    ///
    /// No other page is affected.
    ///
    /// # Errors
    ///
    /// Returns [`PageSmithError::PageOutOfRange`] if `index` is not a page of
    /// the document.
    pub fn toggle(&mut self, index: usize) -> Result<PageMark> {
        let page_count = self.marks.len();
        let mark = self
            .marks
            .get_mut(index)
            .ok_or(PageSmithError::PageOutOfRange { index, page_count })?;

        *mark = mark.flipped();
        tracing::trace!(index, mark = ?*mark, "page toggled");
        Ok(*mark)
    }

    /// Mark of page `index`.
    pub fn mark(&self, index: usize) -> Option<PageMark> {
        self.marks.get(index).copied()
    }

    /// Check if page `index` is kept.
    pub fn is_kept(&self, index: usize) -> bool {
        self.mark(index) == Some(PageMark::Kept)
    }

    /// Kept page indices, strictly ascending.
    ///
    /// Output documents are built from this order, so original page order is
    /// preserved no matter in which order pages were toggled.
    pub fn kept_indices(&self) -> Vec<usize> {
        self.indices_marked(PageMark::Kept)
    }

    /// Discarded page indices, strictly ascending.
    pub fn discarded_indices(&self) -> Vec<usize> {
        self.indices_marked(PageMark::Discarded)
    }

    /// Number of kept pages.
    pub fn kept_count(&self) -> usize {
        self.marks.iter().filter(|m| **m == PageMark::Kept).count()
    }

    /// Kept indices, refusing an empty result.
    ///
    /// # Errors
    ///
    /// Returns [`PageSmithError::NothingKept`] when every page is discarded.
    pub fn require_kept(&self) -> Result<Vec<usize>> {
        let kept = self.kept_indices();
        if kept.is_empty() {
            return Err(PageSmithError::NothingKept);
        }
        Ok(kept)
    }

    /// Number of pages covered by the selection.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Check if the selection covers no pages.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    fn indices_marked(&self, wanted: PageMark) -> Vec<usize> {
        self.marks
            .iter()
            .enumerate()
            .filter(|(_, mark)| **mark == wanted)
            .map(|(index, _)| index)
            .collect()
    }
}
