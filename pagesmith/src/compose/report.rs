//! Operation reports.

use std::time::{Duration, Instant};

use serde::Serialize;

use super::plan::Operation;
use crate::error::{PageSmithError, Result};

/// One delivered output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputSummary {
    /// File name handed to the sink.
    pub filename: String,
    /// Number of pages in the output.
    pub page_count: usize,
    /// Serialized size in bytes.
    pub size: u64,
}

/// What an operation produced.
#[derive(Debug, Clone, Serialize)]
pub struct OperationReport {
    /// Operation that ran.
    pub operation: Operation,
    /// Delivered outputs, in delivery order.
    pub outputs: Vec<OutputSummary>,
    /// Combined size of the inputs in bytes.
    pub input_size: u64,
    /// Wall-clock time of the whole operation.
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

fn serialize_secs<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

impl OperationReport {
    pub(crate) fn new(operation: Operation, input_size: u64) -> Self {
        Self {
            operation,
            outputs: Vec::new(),
            input_size,
            elapsed: Duration::ZERO,
        }
    }

    pub(crate) fn record(&mut self, filename: &str, page_count: usize, size: usize) {
        self.outputs.push(OutputSummary {
            filename: filename.to_string(),
            page_count,
            size: size as u64,
        });
    }

    pub(crate) fn finish(mut self, started: Instant) -> Self {
        self.elapsed = started.elapsed();
        self
    }

    /// Total pages across every output.
    pub fn total_pages(&self) -> usize {
        self.outputs.iter().map(|o| o.page_count).sum()
    }

    /// Total bytes delivered.
    pub fn output_size(&self) -> u64 {
        self.outputs.iter().map(|o| o.size).sum()
    }

    /// Serialize the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PageSmithError::other(format!("Failed to serialize report: {e}")))
    }
}
