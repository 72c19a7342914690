//! Testing utilities for RTB workspace
//!
//! Shared test helpers, fixtures, and assertions.

#![allow(missing_docs)]

use rtb_store::{EnvelopeStore, FixedClock, Format, MemorySink, StoreConfig};
use serde_json::{json, Map, Value};
use std::sync::{Arc, Once};
use tempfile::TempDir;

static TRACING: Once = Once::new();

/// Install a fmt subscriber honouring `RUST_LOG`, once per test binary
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn sample_mapping() -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("hello".to_string(), json!("there"));
    map
}

pub fn sample_sequence() -> Vec<Value> {
    vec![json!("hi"), json!("how"), json!("are"), json!("ya")]
}

pub fn sample_records() -> Vec<Value> {
    vec![
        json!({"id": "a1", "name": "core-switch", "ip": "10.0.0.1", "port": 22}),
        json!({"id": "b2", "name": "edge-router", "ip": "10.0.0.254", "port": 443}),
        json!({"id": "c3", "name": "core-router", "ip": null, "port": 22}),
    ]
}

/// A scratch directory plus a store rooted in it
pub struct Scratch {
    pub dir: TempDir,
    pub sink: Arc<MemorySink>,
}

impl Scratch {
    pub fn new() -> Self {
        init_tracing();
        Self {
            dir: TempDir::new().expect("create scratch dir"),
            sink: Arc::new(MemorySink::new()),
        }
    }

    pub fn config(&self) -> StoreConfig {
        StoreConfig::new().with_root(self.dir.path())
    }

    pub fn store(&self, format: Format) -> EnvelopeStore {
        EnvelopeStore::with_config(format, self.config()).with_sink(self.sink.clone())
    }

    pub fn store_at(&self, format: Format, clock: FixedClock) -> EnvelopeStore {
        self.store(format).with_clock(Arc::new(clock))
    }

    pub fn path(&self, name: &str) -> std::path::PathBuf {
        self.dir.path().join(name)
    }
}

impl Default for Scratch {
    fn default() -> Self {
        Self::new()
    }
}
