//! Source files and the ordered registry that holds them.
//!
//! A [`SourceFile`] is an immutable, cheaply clonable handle to the bytes a
//! user selected. A [`SourceRegistry`] keeps the files chosen for one
//! operation in the order they will be composed.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{PageSmithError, Result};

/// A user-supplied file.
///
/// The payload is shared, so cloning a `SourceFile` never copies the bytes.
/// Two handles built from the same file are still distinct registry entries.
#[derive(Debug, Clone)]
pub struct SourceFile {
    name: String,
    bytes: Arc<[u8]>,
    path: Option<PathBuf>,
}

impl SourceFile {
    /// Create a source file from a display name and its bytes.
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
            path: None,
        }
    }

    /// Remember where the file was read from.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Display name of the file.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw file contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle to the file contents, for moving into worker tasks.
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    /// Size of the file in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Path the file was read from, if it came from disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Ordered set of source files selected for one operation.
///
/// Selecting files always starts a fresh registry; there is no append. The
/// only other mutation is [`reorder`](Self::reorder), a positional swap.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    files: Vec<SourceFile>,
}

impl SourceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current selection with `files`, in the given order.
    pub fn add(&mut self, files: impl IntoIterator<Item = SourceFile>) {
        self.files = files.into_iter().collect();
        tracing::debug!(count = self.files.len(), "source registry replaced");
    }

    /// Swap the files at positions `from` and `to`.
    ///
    /// This is an element swap, not a move: `[a, b, c]` with `reorder(0, 2)`
    /// becomes `[c, b, a]`. Swapping a position with itself is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`PageSmithError::PositionOutOfRange`] if either position does
    /// not exist; the sequence is left unchanged.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.files.len();
        for position in [from, to] {
            if position >= len {
                return Err(PageSmithError::PositionOutOfRange { position, len });
            }
        }

        self.files.swap(from, to);
        tracing::debug!(from, to, "source registry reordered");
        Ok(())
    }

    /// Remove every file.
    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Number of files in the registry.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if no file is selected.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// File at `position`.
    pub fn get(&self, position: usize) -> Option<&SourceFile> {
        self.files.get(position)
    }

    /// First file, used by single-input operations.
    pub fn first(&self) -> Option<&SourceFile> {
        self.files.first()
    }

    /// Iterate files in composition order.
    pub fn iter(&self) -> std::slice::Iter<'_, SourceFile> {
        self.files.iter()
    }

    /// Display names in composition order.
    pub fn names(&self) -> Vec<&str> {
        self.files.iter().map(SourceFile::name).collect()
    }

    /// Combined size of every file.
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(SourceFile::size).sum()
    }
}

impl<'a> IntoIterator for &'a SourceRegistry {
    type Item = &'a SourceFile;
    type IntoIter = std::slice::Iter<'a, SourceFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
