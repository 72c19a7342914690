//! Required-files bootstrap
//!
//! Creates an empty-sequence envelope for every configured path that does
//! not exist yet. Existing files are never rewritten, so running it again is
//! a no-op.

use crate::backend::Format;
use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::envelope::Payload;
use crate::error::SaveError;
use crate::sink::{LogSink, TracingSink};
use crate::store::EnvelopeStore;
use std::path::Path;
use std::sync::Arc;
use tracing::Level;

/// Outcome of one [`RequiredFiles::ensure`] run, by logical name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnsureReport {
    /// Files written by this run
    pub created: Vec<String>,
    /// Files that already existed
    pub present: Vec<String>,
    /// Paths with no matching backend
    pub skipped: Vec<String>,
}

impl EnsureReport {
    /// True if this run wrote nothing
    #[inline]
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.created.is_empty()
    }
}

/// Idempotent creator of required envelope files
#[derive(Clone)]
pub struct RequiredFiles {
    config: StoreConfig,
    sink: Arc<dyn LogSink>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for RequiredFiles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequiredFiles")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for RequiredFiles {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl RequiredFiles {
    /// Create ensurer with configuration
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            sink: Arc::new(TracingSink),
            clock: Arc::new(SystemClock),
        }
    }

    /// With logging sink
    #[inline]
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// With clock
    #[inline]
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Create every missing file with an empty sequence payload
    ///
    /// The backend is chosen by suffix (`.json` or `.yml`); other paths are
    /// skipped. Paths are resolved against the configured root.
    ///
    /// # Errors
    /// Returns the first [`SaveError`] encountered; files created before it
    /// stay in place.
    pub fn ensure<I, K, P>(&self, files: I) -> Result<EnsureReport, SaveError>
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: AsRef<Path>,
    {
        let mut report = EnsureReport::default();
        for (name, path) in files {
            let name = name.into();
            let path = path.as_ref();

            let Some(format) = Format::from_path(path) else {
                self.sink.log(
                    Level::DEBUG,
                    &format!("Skipping '{}' ({name}): no backend for suffix", path.display()),
                );
                report.skipped.push(name);
                continue;
            };

            let Some(filename) = path.to_str() else {
                report.skipped.push(name);
                continue;
            };

            let store = self.store_for(format);
            if store.exists(filename) {
                report.present.push(name);
                continue;
            }

            store.save(Payload::empty_sequence(), filename, None)?;
            self.sink.log(
                Level::DEBUG,
                &format!("Created required file '{}' ({name})", path.display()),
            );
            report.created.push(name);
        }
        Ok(report)
    }

    fn store_for(&self, format: Format) -> EnvelopeStore {
        EnvelopeStore::with_config(format, self.config.clone())
            .with_sink(Arc::clone(&self.sink))
            .with_clock(Arc::clone(&self.clock))
    }
}
