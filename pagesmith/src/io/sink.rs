//! Delivery of finished output buffers.

use crate::error::Result;

/// Hands a finished output to the user.
///
/// A buffer is only delivered after it has been fully serialized, so a sink
/// never sees partial output. Sinks are called sequentially, in output order.
#[allow(async_fn_in_trait)]
pub trait DeliverySink {
    /// Deliver `bytes` under `filename`.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be stored.
    async fn deliver(&mut self, bytes: Vec<u8>, filename: &str) -> Result<()>;
}

/// A delivered output held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivered {
    /// File name the output was delivered under.
    pub filename: String,
    /// Output bytes.
    pub bytes: Vec<u8>,
}

/// Sink that keeps every delivered output in memory, in delivery order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    delivered: Vec<Delivered>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Outputs delivered so far.
    pub fn delivered(&self) -> &[Delivered] {
        &self.delivered
    }

    /// File names delivered so far.
    pub fn filenames(&self) -> Vec<&str> {
        self.delivered.iter().map(|d| d.filename.as_str()).collect()
    }

    /// Take ownership of the delivered outputs.
    pub fn into_delivered(self) -> Vec<Delivered> {
        self.delivered
    }
}

impl DeliverySink for MemorySink {
    async fn deliver(&mut self, bytes: Vec<u8>, filename: &str) -> Result<()> {
        tracing::debug!(filename, size = bytes.len(), "output kept in memory");
        self.delivered.push(Delivered {
            filename: filename.to_string(),
            bytes,
        });
        Ok(())
    }
}
