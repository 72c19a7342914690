//! Logging sink injected into the store
//!
//! The store reports its diagnostics through a [`LogSink`] instead of a
//! process-wide logger. [`TracingSink`] forwards to `tracing`;
//! [`MemorySink`] keeps the messages for inspection.

use parking_lot::Mutex;
use tracing::Level;

/// Receiver of leveled diagnostic messages
pub trait LogSink: Send + Sync {
    /// Record one message at `level`
    fn log(&self, level: Level, message: &str);
}

/// Forwards every message to `tracing` under the `rtb_store` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::ERROR => tracing::error!(target: "rtb_store", "{}", message),
            Level::WARN => tracing::warn!(target: "rtb_store", "{}", message),
            Level::INFO => tracing::info!(target: "rtb_store", "{}", message),
            Level::DEBUG => tracing::debug!(target: "rtb_store", "{}", message),
            _ => tracing::trace!(target: "rtb_store", "{}", message),
        }
    }
}

/// Keeps every message in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<(Level, String)>>,
}

impl MemorySink {
    /// Create an empty sink
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded messages
    #[must_use]
    pub fn records(&self) -> Vec<(Level, String)> {
        self.records.lock().clone()
    }

    /// Number of messages recorded at `level`
    #[must_use]
    pub fn count(&self, level: Level) -> usize {
        self.records.lock().iter().filter(|(l, _)| *l == level).count()
    }

    /// Drop all recorded messages
    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl LogSink for MemorySink {
    fn log(&self, level: Level, message: &str) {
        self.records.lock().push((level, message.to_string()));
    }
}
