//! Writing outputs to a directory.
//!
//! [`DirectorySink`] is the on-disk [`DeliverySink`]:
//! - Atomic writes (write to a temp file, then rename)
//! - Overwrite protection following [`OverwriteMode`]
//! - Buffered writes on the blocking thread pool
//!
//! # Examples
//!
//! ```no_run
//! use pagesmith::config::OverwriteMode;
//! use pagesmith::io::{DeliverySink, DirectorySink};
//!
//! # async fn example(bytes: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let mut sink = DirectorySink::new("out", OverwriteMode::Force);
//! sink.deliver(bytes, "merged.pdf").await?;
//! # Ok(())
//! # }
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use tokio::task;

use super::sink::DeliverySink;
use crate::config::OverwriteMode;
use crate::error::{PageSmithError, Result};

/// Buffer size for writing, in bytes.
const BUFFER_SIZE: usize = 8192;

/// Asked whether an existing file may be overwritten.
pub type ConfirmOverwrite = Box<dyn FnMut(&Path) -> Result<bool> + Send>;

/// Sink that writes each output as a file in a directory.
pub struct DirectorySink {
    dir: PathBuf,
    overwrite_mode: OverwriteMode,
    confirm: Option<ConfirmOverwrite>,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    /// Create a sink writing into `dir`.
    ///
    /// The directory is created on first delivery if it does not exist.
    pub fn new(dir: impl Into<PathBuf>, overwrite_mode: OverwriteMode) -> Self {
        Self {
            dir: dir.into(),
            overwrite_mode,
            confirm: None,
            written: Vec::new(),
        }
    }

    /// Ask `confirm` before overwriting when the mode is [`OverwriteMode::Prompt`].
    ///
    /// Without a confirmation hook, `Prompt` behaves like
    /// [`OverwriteMode::NoClobber`].
    pub fn with_confirm(mut self, confirm: ConfirmOverwrite) -> Self {
        self.confirm = Some(confirm);
        self
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in delivery order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Decide whether `path` may be written.
    fn check_overwrite(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }

        match self.overwrite_mode {
            OverwriteMode::Force => Ok(()),
            OverwriteMode::NoClobber => Err(PageSmithError::output_exists(path.to_path_buf())),
            OverwriteMode::Prompt => match self.confirm.as_mut() {
                Some(confirm) => {
                    if confirm(path)? {
                        Ok(())
                    } else {
                        Err(PageSmithError::Cancelled)
                    }
                }
                None => Err(PageSmithError::output_exists(path.to_path_buf())),
            },
        }
    }
}

impl std::fmt::Debug for DirectorySink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectorySink")
            .field("dir", &self.dir)
            .field("overwrite_mode", &self.overwrite_mode)
            .field("confirm", &self.confirm.is_some())
            .field("written", &self.written)
            .finish()
    }
}

/// Write `bytes` to `path` through a uniquely named temp file in the same
/// directory. The temp file is removed if any step fails.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| PageSmithError::FailedToCreateOutput {
        path: parent.to_path_buf(),
        source: e,
    })?;

    let prefix = format!(
        ".{}.",
        path.file_name().unwrap_or_default().to_string_lossy()
    );
    let temp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|e| PageSmithError::FailedToCreateOutput {
            path: parent.to_path_buf(),
            source: e,
        })?;

    let mut writer = std::io::BufWriter::with_capacity(BUFFER_SIZE, temp);
    writer
        .write_all(bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| PageSmithError::FailedToWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    let temp = writer.into_inner().map_err(|e| PageSmithError::FailedToWrite {
        path: path.to_path_buf(),
        source: e.into_error(),
    })?;

    temp.persist(path).map_err(|e| PageSmithError::FailedToWrite {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

impl DeliverySink for DirectorySink {
    async fn deliver(&mut self, bytes: Vec<u8>, filename: &str) -> Result<()> {
        let path = self.dir.join(filename);
        self.check_overwrite(&path)?;

        let target = path.clone();
        let size = bytes.len();
        task::spawn_blocking(move || write_atomic(&target, &bytes))
            .await
            .map_err(|e| PageSmithError::other(format!("Write task failed: {e}")))??;

        tracing::info!(path = %path.display(), size, "output written");
        self.written.push(path);
        Ok(())
    }
}
