//! pagesmith - Merge, split, compress and prune PDF documents.
//!
//! This library holds the state and composition logic of a page-set editor:
//!
//! - An ordered registry of selected source files, reorderable by drag
//! - A keep/discard selection over the pages of a reviewed document, toggled
//!   by tap or leftward swipe
//! - Four operations: merge, split, compress and delete
//! - Pluggable codec, rasterizer and delivery sink collaborators
//!
//! # Examples
//!
//! ## Merge in a chosen order
//!
//! ```no_run
//! use pagesmith::codec::LopdfCodec;
//! use pagesmith::io::{MemorySink, SourceReader};
//! use pagesmith::session::DragEvent;
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
//! // Move b.pdf in front of a.pdf.
//! session.drag(DragEvent::Start { index: 1 })?;
//! session.drag(DragEvent::Over { index: 0 })?;
//! session.drag(DragEvent::Drop { index: 0 })?;
//!
//! let mut sink = MemorySink::new();
//! let report = session.merge(&mut sink).await?;
//! println!("merged.pdf has {} pages", report.total_pages());
//! # Ok(())
//! # }
//! ```
//!
//! ## Delete pages
//!
//! ```no_run
//! use pagesmith::codec::LopdfCodec;
//! use pagesmith::config::OverwriteMode;
//! use pagesmith::io::{read_source, DirectorySink};
//! use pagesmith::Session;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = Session::new(LopdfCodec::new());
//! session.load_review(read_source(Path::new("report.pdf")).await?).await?;
//!
//! session.toggle_page(1)?;
//!
//! let mut sink = DirectorySink::new(".", OverwriteMode::NoClobber);
//! session.commit_delete(&mut sink).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod compose;
pub mod config;
pub mod error;
pub mod io;
pub mod output;
pub mod render;
pub mod session;
pub mod source;
pub mod utils;

pub use config::Config;
pub use error::{PageSmithError, Result};
pub use session::Session;
pub use source::{SourceFile, SourceRegistry};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
