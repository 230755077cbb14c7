//! Operations and their planned outputs.
//!
//! A [`CompositionPlan`] is the fully resolved shape of an operation: which
//! files it will produce and which source page lands where. The reducer
//! builds exactly this; dry runs print it instead.

use std::fmt;

use serde::Serialize;

/// The four user-invocable operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Concatenate every selected file, in registry order.
    Merge,
    /// One single-page file per page.
    Split,
    /// Re-serialize one file in its most compact form.
    Compress,
    /// Keep only the pages marked as kept.
    Delete,
}

impl Operation {
    /// Lowercase name of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Split => "split",
            Self::Compress => "compress",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output file name of a merge.
pub const MERGED_FILENAME: &str = "merged.pdf";

/// Output file name of a compress.
pub const COMPRESSED_FILENAME: &str = "compressed.pdf";

/// Output file name of a delete.
pub const PAGES_DELETED_FILENAME: &str = "pages_deleted.pdf";

/// Output file name of page `number` (one-based) of a split.
pub fn split_filename(number: usize) -> String {
    format!("page_{number}.pdf")
}

/// A source page placed into an output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSource {
    /// Display name of the source file.
    pub source: String,
    /// One-based page number within the source.
    pub page: usize,
}

/// One file an operation will deliver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedOutput {
    /// File name handed to the delivery sink.
    pub filename: String,
    /// Output pages, in output order.
    pub pages: Vec<PageSource>,
}

/// Resolved outputs of one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompositionPlan {
    /// Operation being planned.
    pub operation: Operation,
    /// Outputs in delivery order.
    pub outputs: Vec<PlannedOutput>,
}

fn pages_of(name: &str, indices: impl IntoIterator<Item = usize>) -> Vec<PageSource> {
    indices
        .into_iter()
        .map(|index| PageSource {
            source: name.to_string(),
            page: index + 1,
        })
        .collect()
}

impl CompositionPlan {
    /// Plan a merge of `(name, page_count)` pairs, in the given order.
    pub fn merge<'a>(sources: impl IntoIterator<Item = (&'a str, usize)>) -> Self {
        let pages = sources
            .into_iter()
            .flat_map(|(name, count)| pages_of(name, 0..count))
            .collect();

        Self {
            operation: Operation::Merge,
            outputs: vec![PlannedOutput {
                filename: MERGED_FILENAME.to_string(),
                pages,
            }],
        }
    }

    /// Plan a split of a `page_count`-page document.
    pub fn split(name: &str, page_count: usize) -> Self {
        let outputs = (0..page_count)
            .map(|index| PlannedOutput {
                filename: split_filename(index + 1),
                pages: pages_of(name, [index]),
            })
            .collect();

        Self {
            operation: Operation::Split,
            outputs,
        }
    }

    /// Plan a compress of a `page_count`-page document.
    pub fn compress(name: &str, page_count: usize) -> Self {
        Self {
            operation: Operation::Compress,
            outputs: vec![PlannedOutput {
                filename: COMPRESSED_FILENAME.to_string(),
                pages: pages_of(name, 0..page_count),
            }],
        }
    }

    /// Plan a delete that keeps the zero-based `kept` pages.
    pub fn delete(name: &str, kept: &[usize]) -> Self {
        Self {
            operation: Operation::Delete,
            outputs: vec![PlannedOutput {
                filename: PAGES_DELETED_FILENAME.to_string(),
                pages: pages_of(name, kept.iter().copied()),
            }],
        }
    }

    /// Total number of pages across every output.
    pub fn total_pages(&self) -> usize {
        self.outputs.iter().map(|output| output.pages.len()).sum()
    }
}
