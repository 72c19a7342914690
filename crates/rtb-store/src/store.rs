//! Envelope store - main entry point
//!
//! Saves list-or-mapping payloads wrapped in a dated envelope and loads
//! them back. Loading is lenient: a missing, unreadable or malformed file,
//! or a payload of the wrong kind, degrades to an empty container and a
//! logged diagnostic. Saving is strict: write failures are returned.
//!
//! The empty-container fallback is part of the contract. Callers that
//! need to tell "empty" from "absent" use the `try_*` loaders.

use crate::backend::{Backend, Format};
use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::envelope::{timestamp, Envelope, Payload, Shape};
use crate::error::{EncodeError, LoadError, SaveError};
use crate::filename::{dated_filename, normalize_filename};
use crate::sink::{LogSink, TracingSink};
use chrono::{NaiveDate, SubsecRound};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Level;

/// What a load operation hands back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadScope {
    /// Only the stored payload
    #[default]
    Payload,
    /// The whole envelope, timestamp re-parsed
    Envelope,
}

/// Dated envelope file store bound to one backend
#[derive(Clone)]
pub struct EnvelopeStore {
    backend: Arc<dyn Backend>,
    config: StoreConfig,
    sink: Arc<dyn LogSink>,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for EnvelopeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvelopeStore")
            .field("format", &self.backend.format())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl EnvelopeStore {
    /// Create store for `format` with default configuration
    #[inline]
    #[must_use]
    pub fn new(format: Format) -> Self {
        Self::with_config(format, StoreConfig::default())
    }

    /// Create JSON store
    #[inline]
    #[must_use]
    pub fn json() -> Self {
        Self::new(Format::Json)
    }

    /// Create YAML store
    #[inline]
    #[must_use]
    pub fn yaml() -> Self {
        Self::new(Format::Yaml)
    }

    /// Create store for `format` with explicit configuration
    #[must_use]
    pub fn with_config(format: Format, config: StoreConfig) -> Self {
        Self::with_backend(Arc::from(format.backend(&config)), config)
    }

    /// Create store around a custom backend
    #[must_use]
    pub fn with_backend(backend: Arc<dyn Backend>, config: StoreConfig) -> Self {
        Self {
            backend,
            config,
            sink: Arc::new(TracingSink),
            clock: Arc::new(SystemClock),
        }
    }

    /// Create store whose backend matches the suffix of `path`
    ///
    /// Returns `None` when the path carries neither `.json` nor `.yml`.
    #[must_use]
    pub fn for_path(path: impl AsRef<Path>, config: StoreConfig) -> Option<Self> {
        Format::from_path(path).map(|format| Self::with_config(format, config))
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

    /// Backend format
    #[inline]
    #[must_use]
    pub fn format(&self) -> Format {
        self.backend.format()
    }

    /// Backend suffix
    #[inline]
    #[must_use]
    pub fn suffix(&self) -> &'static str {
        self.backend.suffix()
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Qualify `filename` with this backend's suffix
    #[inline]
    #[must_use]
    pub fn normalize(&self, filename: &str) -> String {
        normalize_filename(filename, self.suffix())
    }

    /// On-disk path for `filename`
    #[must_use]
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.config.resolve(&self.normalize(filename))
    }

    /// Whether the normalized file exists
    #[must_use]
    pub fn exists(&self, filename: &str) -> bool {
        self.path_for(filename).exists()
    }

    /// Dated filename for today, according to the store's clock
    #[must_use]
    pub fn dated_filename(&self, name: &str) -> String {
        self.dated_filename_on(name, self.clock.now().date())
    }

    /// Dated filename for `date`
    #[must_use]
    pub fn dated_filename_on(&self, name: &str, date: NaiveDate) -> String {
        dated_filename(name, date, self.suffix())
    }

    /// Save `payload` wrapped in a fresh envelope
    ///
    /// Overwrites any existing file at the normalized path and returns the
    /// envelope that was written. A `None` comment falls back to the
    /// configured default (empty unless set).
    ///
    /// # Errors
    /// - `SaveError::Encode` if the backend cannot encode the envelope
    /// - `SaveError::Io` if the file cannot be written
    pub fn save(
        &self,
        payload: impl Into<Payload>,
        filename: &str,
        comment: Option<&str>,
    ) -> Result<Envelope, SaveError> {
        let filename = self.normalize(filename);
        let path = self.config.resolve(&filename);
        let comment = comment.map_or_else(|| self.config.comment_default.clone(), str::to_string);
        let saved_at = self.clock.now().trunc_subsecs(6);
        let envelope = Envelope::new(filename, comment, saved_at, payload.into());

        let text = self.backend.encode(&envelope).map_err(|source| SaveError::Encode {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, text).map_err(|e| SaveError::io_error(&path, e))?;

        self.sink.log(
            Level::DEBUG,
            &format!(
                "Saved file '{}', dated: {}",
                path.display(),
                timestamp::format(&saved_at)
            ),
        );
        Ok(envelope)
    }

    /// Save a sequence payload
    ///
    /// # Errors
    /// See [`EnvelopeStore::save`]
    #[inline]
    pub fn save_sequence(
        &self,
        items: Vec<Value>,
        filename: &str,
        comment: Option<&str>,
    ) -> Result<Envelope, SaveError> {
        self.save(Payload::Sequence(items), filename, comment)
    }

    /// Save a mapping payload
    ///
    /// # Errors
    /// See [`EnvelopeStore::save`]
    #[inline]
    pub fn save_mapping(
        &self,
        map: Map<String, Value>,
        filename: &str,
        comment: Option<&str>,
    ) -> Result<Envelope, SaveError> {
        self.save(Payload::Mapping(map), filename, comment)
    }

    /// Save any serializable value that serializes to a sequence or mapping
    ///
    /// # Errors
    /// - `SaveError::UnsupportedPayload` if `value` serializes to a scalar
    /// - otherwise see [`EnvelopeStore::save`]
    pub fn save_serializable<T: Serialize + ?Sized>(
        &self,
        value: &T,
        filename: &str,
        comment: Option<&str>,
    ) -> Result<Envelope, SaveError> {
        let value = serde_json::to_value(value).map_err(|e| SaveError::Encode {
            path: self.path_for(filename),
            source: EncodeError::Json(e),
        })?;
        let payload = Payload::try_from(value).map_err(SaveError::UnsupportedPayload)?;
        self.save(payload, filename, comment)
    }

    /// Delete the normalized file
    ///
    /// Returns `false` if there was nothing to delete.
    ///
    /// # Errors
    /// Returns `SaveError::Io` for failures other than absence
    pub fn remove(&self, filename: &str) -> Result<bool, SaveError> {
        let path = self.path_for(filename);
        match fs::remove_file(&path) {
            Ok(()) => {
                self.sink
                    .log(Level::DEBUG, &format!("Deleted file '{}'", path.display()));
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SaveError::io_error(path, e)),
        }
    }

    /// Read and decode the file into its top-level mapping
    fn read_document(&self, filename: &str) -> Result<(PathBuf, Map<String, Value>), LoadError> {
        let path = self.path_for(filename);
        let text = fs::read_to_string(&path).map_err(|e| LoadError::io_error(&path, e))?;
        let value = self
            .backend
            .decode(&text)
            .map_err(|e| LoadError::malformed(&path, e.to_string()))?;
        match value {
            Value::Object(doc) => Ok((path, doc)),
            other => {
                let reason = format!("expected a mapping at top level, got {}", Shape::of(&other));
                Err(LoadError::Malformed { path, reason })
            }
        }
    }

    /// Load the full envelope, re-parsing the stored timestamp
    ///
    /// # Errors
    /// - `LoadError::NotFound` if the file is absent
    /// - `LoadError::Io` for other read failures
    /// - `LoadError::Malformed` for syntax errors, missing keys, a scalar
    ///   payload or a timestamp not in `YYYY-MM-DD HH:MM:SS.ffffff`
    pub fn try_load_envelope(&self, filename: &str) -> Result<Envelope, LoadError> {
        let (path, doc) = self.read_document(filename)?;
        let envelope: Envelope = serde_json::from_value(Value::Object(doc))
            .map_err(|e| LoadError::malformed(&path, e.to_string()))?;
        self.log_loaded(&path, &timestamp::format(&envelope.saved_at));
        Ok(envelope)
    }

    /// Load only the stored payload
    ///
    /// The timestamp is not validated in this mode.
    ///
    /// # Errors
    /// As [`EnvelopeStore::try_load_envelope`], minus timestamp validation
    pub fn try_load_payload(&self, filename: &str) -> Result<Payload, LoadError> {
        let (path, value) = self.extract(filename, LoadScope::Payload)?;
        Payload::try_from(value).map_err(|shape| {
            LoadError::malformed(path, format!("payload is a {shape}, expected sequence or mapping"))
        })
    }

    /// Load a mapping; `{}` on any load condition
    #[must_use]
    pub fn load_dict(&self, filename: &str, scope: LoadScope) -> Map<String, Value> {
        let result = self.extract(filename, scope).and_then(|(path, value)| match value {
            Value::Object(map) => Ok(map),
            other => Err(LoadError::WrongShape {
                path,
                expected: Shape::Mapping,
                actual: Shape::of(&other),
            }),
        });
        result.unwrap_or_else(|err| {
            self.report(&err);
            Map::new()
        })
    }

    /// Load a sequence; `[]` on any load condition
    ///
    /// With [`LoadScope::Envelope`] the result is always empty, since an
    /// envelope is a mapping.
    #[must_use]
    pub fn load_list(&self, filename: &str, scope: LoadScope) -> Vec<Value> {
        let result = self.extract(filename, scope).and_then(|(path, value)| match value {
            Value::Array(items) => Ok(items),
            other => Err(LoadError::WrongShape {
                path,
                expected: Shape::Sequence,
                actual: Shape::of(&other),
            }),
        });
        result.unwrap_or_else(|err| {
            self.report(&err);
            Vec::new()
        })
    }

    /// Load the full envelope; `None` on any load condition
    #[must_use]
    pub fn load_envelope(&self, filename: &str) -> Option<Envelope> {
        self.try_load_envelope(filename)
            .map_err(|err| self.report(&err))
            .ok()
    }

    fn extract(&self, filename: &str, scope: LoadScope) -> Result<(PathBuf, Value), LoadError> {
        match scope {
            LoadScope::Payload => {
                let (path, mut doc) = self.read_document(filename)?;
                let dated = doc
                    .get("date")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string();
                let data = doc
                    .remove("data")
                    .ok_or_else(|| LoadError::malformed(&path, "missing `data` key"))?;
                self.log_loaded(&path, &dated);
                Ok((path, data))
            }
            LoadScope::Envelope => {
                let envelope = self.try_load_envelope(filename)?;
                Ok((
                    self.path_for(filename),
                    Value::Object(envelope.to_mapping()),
                ))
            }
        }
    }

    fn log_loaded(&self, path: &Path, dated: &str) {
        self.sink.log(
            Level::DEBUG,
            &format!("Loaded file '{}', dated: {dated}", path.display()),
        );
    }

    fn report(&self, err: &LoadError) {
        let level = match err {
            LoadError::NotFound { .. } | LoadError::Io { .. } => Level::ERROR,
            LoadError::Malformed { .. } => Level::WARN,
            LoadError::WrongShape { .. } => Level::DEBUG,
        };
        self.sink.log(level, &err.to_string());
    }
}
