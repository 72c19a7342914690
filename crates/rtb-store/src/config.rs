//! Store configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration shared by both backends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory relative filenames resolve against (working directory when unset)
    pub root: Option<PathBuf>,
    /// Spaces per indentation level in JSON output
    pub json_indent: usize,
    /// Comment written when the caller supplies none
    pub comment_default: String,
}

impl StoreConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With root directory
    #[inline]
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// With JSON indentation width
    #[inline]
    #[must_use]
    pub fn with_json_indent(mut self, indent: usize) -> Self {
        self.json_indent = indent;
        self
    }

    /// With default comment
    #[inline]
    #[must_use]
    pub fn with_comment_default(mut self, comment: impl Into<String>) -> Self {
        self.comment_default = comment.into();
        self
    }

    /// Resolve a normalized filename against the root
    #[must_use]
    pub fn resolve(&self, filename: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(filename),
            None => Path::new(filename).to_path_buf(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: None,
            json_indent: 2,
            comment_default: String::new(),
        }
    }
}
