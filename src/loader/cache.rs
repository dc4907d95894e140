//! Read-through cache of parsed fragments.
//!
//! Each parsed fragment is stored as JSON under the cache directory, in a
//! file named after the SHA-256 of its path. The entry records the path it
//! was parsed from and is only served for that path. Entries are written once
//! and never invalidated; delete the directory to force a re-parse. A corrupt,
//! unreadable or mismatched entry is logged and the fragment is parsed again.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::conversation::Conversation;
use crate::error::Result;
use crate::loader::source::FragmentSource;
use crate::parser::ExportFormat;

/// Wraps a [`FragmentSource`] with an on-disk cache.
///
/// # Example
///
/// ```rust,no_run
/// use chatlens::config::LoaderConfig;
/// use chatlens::loader::{CachedSource, ConversationLoader, ParserSource};
///
/// let config = LoaderConfig::new("inbox", "Me");
/// let source = CachedSource::new(ParserSource::new(&config), ".chatlens_cache");
/// let loader = ConversationLoader::with_source(source);
/// let conv = loader.load("inbox/alice_x1y2".as_ref())?;
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
pub struct CachedSource<S> {
    inner: S,
    dir: PathBuf,
}

impl<S: FragmentSource> CachedSource<S> {
    /// Caches fragments from `inner` in `dir`.
    pub fn new(inner: S, dir: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            dir: dir.into(),
        }
    }

    /// Returns the cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns where the entry for `fragment` lives.
    pub fn entry_path(&self, fragment: &Path) -> PathBuf {
        self.dir.join(cache_key(fragment))
    }

    fn read_entry(&self, entry: &Path, fragment: &Path) -> Option<Conversation> {
        let content = match fs::read_to_string(entry) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(entry = %entry.display(), error = %e, "unreadable cache entry, re-parsing");
                return None;
            }
        };
        match serde_json::from_str::<CacheEntry>(&content) {
            Ok(cached) if cached.source == fragment => Some(cached.conversation),
            Ok(cached) => {
                warn!(
                    entry = %entry.display(),
                    stored = %cached.source.display(),
                    "cache entry belongs to another fragment, re-parsing"
                );
                None
            }
            Err(e) => {
                warn!(entry = %entry.display(), error = %e, "corrupt cache entry, re-parsing");
                None
            }
        }
    }

    fn write_entry(&self, entry: &Path, fragment: &Path, conversation: Conversation) -> Result<Conversation> {
        let cached = CacheEntry {
            source: fragment.to_path_buf(),
            conversation,
        };
        let json = serde_json::to_string(&cached)?;
        if let Err(e) = fs::create_dir_all(&self.dir).and_then(|()| fs::write(entry, json)) {
            warn!(entry = %entry.display(), error = %e, "failed to write cache entry");
        }
        Ok(cached.conversation)
    }
}

impl<S: FragmentSource> FragmentSource for CachedSource<S> {
    fn load_fragment(&self, path: &Path, format: ExportFormat) -> Result<Conversation> {
        let entry = self.entry_path(path);
        if let Some(conversation) = self.read_entry(&entry, path) {
            debug!(fragment = %path.display(), "cache hit");
            return Ok(conversation);
        }

        let conversation = self.inner.load_fragment(path, format)?;
        self.write_entry(&entry, path, conversation)
    }
}

#[derive(Serialize, Deserialize)]
struct CacheEntry {
    source: PathBuf,
    conversation: Conversation,
}

/// File name of the cache entry for `fragment`.
fn cache_key(fragment: &Path) -> String {
    let digest = Sha256::digest(fragment.as_os_str().as_encoded_bytes());
    format!("{digest:x}.cache.json")
}
