//! Configuration for archive loading.
//!
//! [`LoaderConfig`] carries everything the ingestion pipeline needs to know
//! about the archive and its owner. It has no CLI framework dependencies;
//! the binary fills it from flags and environment variables.
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::LoaderConfig;
//!
//! let config = LoaderConfig::new("data/inbox", "Jane Doe")
//!     .with_fix_encoding(true)
//!     .with_cache_dir(".chatlens_cache");
//!
//! assert_eq!(config.self_identity, "Jane Doe");
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default location of the inbox inside an extracted archive.
pub const DEFAULT_ARCHIVE_ROOT: &str = "data/private/messages/inbox";

/// Date layout used by the HTML export, e.g. `Jan 05, 2017 3:04pm`.
pub const DEFAULT_HTML_DATE_FORMAT: &str = "%b %d, %Y %I:%M%p";

/// Configuration for loading a messaging archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Directory holding one subdirectory per conversation.
    pub archive_root: PathBuf,

    /// Display name of the archive owner.
    ///
    /// Direct messages sent by anyone else are addressed to this name.
    pub self_identity: String,

    /// Undo the exporter's Latin-1/UTF-8 double encoding (default: true)
    pub fix_encoding: bool,

    /// `chrono` format of timestamps in HTML fragments.
    pub html_date_format: String,

    /// Directory for the parsed-fragment cache (default: no cache)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            archive_root: PathBuf::from(DEFAULT_ARCHIVE_ROOT),
            self_identity: String::new(),
            fix_encoding: true,
            html_date_format: DEFAULT_HTML_DATE_FORMAT.to_string(),
            cache_dir: None,
        }
    }
}

impl LoaderConfig {
    /// Creates a configuration for the given archive root and owner.
    pub fn new(archive_root: impl Into<PathBuf>, self_identity: impl Into<String>) -> Self {
        Self {
            archive_root: archive_root.into(),
            self_identity: self_identity.into(),
            ..Self::default()
        }
    }

    /// Sets the archive root.
    #[must_use]
    pub fn with_archive_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.archive_root = root.into();
        self
    }

    /// Sets the archive owner's display name.
    #[must_use]
    pub fn with_self_identity(mut self, name: impl Into<String>) -> Self {
        self.self_identity = name.into();
        self
    }

    /// Enables or disables the encoding repair.
    #[must_use]
    pub fn with_fix_encoding(mut self, fix: bool) -> Self {
        self.fix_encoding = fix;
        self
    }

    /// Sets the HTML timestamp format.
    #[must_use]
    pub fn with_html_date_format(mut self, format: impl Into<String>) -> Self {
        self.html_date_format = format.into();
        self
    }

    /// Enables the parsed-fragment cache in the given directory.
    #[must_use]
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Disables the parsed-fragment cache.
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.cache_dir = None;
        self
    }

    /// Returns `true` if `name` is the archive owner.
    pub fn is_self(&self, name: &str) -> bool {
        name == self.self_identity
    }
}
