//! File I/O for pagesmith.
//!
//! This module moves bytes between the filesystem and the rest of the crate:
//! - Reading user-selected files into [`SourceFile`](crate::source::SourceFile)s
//! - Delivering finished outputs through a [`DeliverySink`]
//! - Atomic writes into an output directory
//!
//! # Examples
//!
//! ```no_run
//! use pagesmith::codec::LopdfCodec;
//! use pagesmith::config::OverwriteMode;
//! use pagesmith::io::{DirectorySink, SourceReader};
//! use pagesmith::Session;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let files = SourceReader::new()
//!     .read_all(&[PathBuf::from("a.pdf"), PathBuf::from("b.pdf")])
//!     .await?;
//!
//! let mut session = Session::new(LopdfCodec::new());
//! session.select_merge_files(files);
//!
//! let mut sink = DirectorySink::new("out", OverwriteMode::NoClobber);
//! session.merge(&mut sink).await?;
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod sink;
pub mod writer;

pub use reader::SourceReader;
pub use sink::{Delivered, DeliverySink, MemorySink};
pub use writer::{ConfirmOverwrite, DirectorySink};

use std::path::Path;

use crate::error::Result;
use crate::source::SourceFile;

/// Read a single source file.
///
/// Convenience wrapper around [`SourceReader::read`].
///
/// # Errors
///
/// Returns an error if the path is not a readable regular file.
pub async fn read_source(path: &Path) -> Result<SourceFile> {
    SourceReader::new().read(path).await
}
