//! RTB Envelope Store
//!
//! Persists list-or-mapping payloads in files wrapped in a dated metadata
//! envelope, with interchangeable JSON and YAML backends.
//!
//! # On-disk format
//!
//! ```text
//! fname:   normalized filename (always carries the backend suffix)
//! comment: free text, possibly empty
//! date:    YYYY-MM-DD HH:MM:SS.ffffff
//! data:    sequence | mapping
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use rtb_store::{EnvelopeStore, LoadScope};
//! use serde_json::json;
//!
//! # fn example() -> Result<(), rtb_store::SaveError> {
//! let store = EnvelopeStore::json();
//! store.save(vec![json!("hi"), json!("there")], "greetings", Some("demo"))?;
//!
//! // Lenient load: an empty list if the file is missing or holds a mapping
//! let items = store.load_list("greetings", LoadScope::Payload);
//! assert_eq!(items.len(), 2);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod backend;
pub mod clock;
pub mod config;
pub mod ensure;
pub mod envelope;
pub mod error;
pub mod filename;
pub mod sink;
pub mod store;

// Re-exports for convenience
pub use backend::{Backend, Format, JsonBackend, YamlBackend};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::StoreConfig;
pub use ensure::{EnsureReport, RequiredFiles};
pub use envelope::{Envelope, Payload, Shape, TIMESTAMP_FORMAT};
pub use error::{DecodeError, EncodeError, LoadError, SaveError, StoreError, StoreResult};
pub use filename::{dated_filename, normalize_filename};
pub use sink::{LogSink, MemorySink, TracingSink};
pub use store::{EnvelopeStore, LoadScope};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    pub use crate::backend::Format;
    pub use crate::envelope::{Envelope, Payload};
    pub use crate::error::{LoadError, SaveError};
    pub use crate::store::{EnvelopeStore, LoadScope};
}
