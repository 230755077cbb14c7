//! Reading source files from disk.
//!
//! This module turns user-supplied paths into [`SourceFile`]s:
//! - Existence and file-type checks with precise errors
//! - Concurrent reads that keep the order the paths were given in
//!
//! # Examples
//!
//! ```no_run
//! use pagesmith::io::SourceReader;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = SourceReader::new();
//! let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let files = reader.read_all(&paths).await?;
//! assert_eq!(files.len(), 2);
//! # Ok(())
//! # }
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt, TryStreamExt};

use crate::error::{PageSmithError, Result};
use crate::source::SourceFile;

/// Default number of files read concurrently.
const DEFAULT_CONCURRENCY: usize = 4;

/// Reads source files with bounded concurrency.
#[derive(Debug, Clone)]
pub struct SourceReader {
    concurrency: usize,
}

impl SourceReader {
    /// Create a reader with default concurrency.
    pub fn new() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Create a reader that reads at most `concurrency` files at once.
    pub fn with_concurrency(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    /// Check that `path` exists and is a regular file.
    ///
    /// # Errors
    ///
    /// Returns [`PageSmithError::FileNotFound`], [`PageSmithError::NotAFile`]
    /// or [`PageSmithError::FileNotAccessible`].
    pub fn check_path_exists(path: &Path) -> Result<()> {
        let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PageSmithError::file_not_found(path.to_path_buf()),
            _ => PageSmithError::FileNotAccessible {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        if !metadata.is_file() {
            return Err(PageSmithError::not_a_file(path.to_path_buf()));
        }

        Ok(())
    }

    /// Read one file.
    ///
    /// The display name of the result is the file name component of `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a readable regular file.
    pub async fn read(&self, path: &Path) -> Result<SourceFile> {
        Self::check_path_exists(path)?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| PageSmithError::FileNotAccessible {
                path: path.to_path_buf(),
                source: e,
            })?;

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        tracing::debug!(path = %path.display(), size = bytes.len(), "source file read");
        Ok(SourceFile::new(name, bytes).with_path(path))
    }

    /// Read every path, preserving the input order.
    ///
    /// # Errors
    ///
    /// Returns the first error in input order; no files are returned then.
    pub async fn read_all(&self, paths: &[PathBuf]) -> Result<Vec<SourceFile>> {
        stream::iter(paths.iter().map(|path| self.read(path)))
            .buffered(self.concurrency)
            .try_collect()
            .await
    }
}

impl Default for SourceReader {
    fn default() -> Self {
        Self::new()
    }
}
