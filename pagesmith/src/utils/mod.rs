//! Utilities for path collection and size display.

use std::path::PathBuf;

use crate::error::{PageSmithError, Result};
use crate::io::SourceReader;

/// Expand glob patterns into file paths, keeping the pattern order.
///
/// A pattern without glob metacharacters is taken literally, so a missing
/// file surfaces as [`PageSmithError::FileNotFound`] instead of silently
/// matching nothing. Matches of one pattern come back in the sorted order
/// `glob` yields them.
///
/// # Errors
///
/// Returns an error if a pattern is malformed, a literal path is missing, or
/// a pattern matches nothing.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved = Vec::new();
    for pattern in patterns {
        resolved.extend(collect_paths_for_pattern(pattern.as_ref())?);
    }
    Ok(resolved)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

fn collect_paths_for_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    if !is_glob(pattern) {
        let path = PathBuf::from(pattern);
        SourceReader::check_path_exists(&path)?;
        return Ok(vec![path]);
    }

    let entries = glob::glob(pattern)
        .map_err(|e| PageSmithError::invalid_config(format!("Invalid pattern {pattern}: {e}")))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| PageSmithError::other(e.to_string()))?;
        if path.is_file() {
            paths.push(path);
        }
    }

    if paths.is_empty() {
        return Err(PageSmithError::file_not_found(PathBuf::from(pattern)));
    }
    Ok(paths)
}

/// Format a byte count for display.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    match size {
        s if s >= GB => format!("{:.2} GB", s as f64 / GB as f64),
        s if s >= MB => format!("{:.2} MB", s as f64 / MB as f64),
        s if s >= KB => format!("{:.2} KB", s as f64 / KB as f64),
        s => format!("{s} bytes"),
    }
}
