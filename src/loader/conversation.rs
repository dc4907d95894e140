//! Loading of one conversation directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::LoaderConfig;
use crate::conversation::Conversation;
use crate::error::{ChatlensError, Result};
use crate::loader::source::{FragmentSource, ParserSource};
use crate::parser::ExportFormat;

/// Turns a conversation directory into one [`Conversation`].
///
/// Fragments are parsed in file-name order and folded with
/// [`Conversation::merge`].
pub struct ConversationLoader {
    source: Box<dyn FragmentSource>,
}

impl ConversationLoader {
    /// Creates a loader for `config`, cached when `config.cache_dir` is set.
    pub fn new(config: &LoaderConfig) -> Self {
        let source = ParserSource::new(config);

        #[cfg(feature = "cache")]
        if let Some(dir) = &config.cache_dir {
            return Self::with_source(super::CachedSource::new(source, dir));
        }

        Self::with_source(source)
    }

    /// Creates a loader reading fragments from `source`.
    pub fn with_source(source: impl FragmentSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Lists the fragment files of `dir`, sorted by file name.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::Io`] if the directory cannot be read.
    pub fn fragments(dir: &Path) -> Result<Vec<(PathBuf, ExportFormat)>> {
        let mut fragments = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if let Some(format) = ExportFormat::from_path(&path) {
                fragments.push((path, format));
            }
        }
        fragments.sort_by(|a, b| a.0.file_name().cmp(&b.0.file_name()));
        Ok(fragments)
    }

    /// Loads and merges every fragment of `dir`.
    ///
    /// A fragment that fails to parse as a whole is skipped with a warning.
    ///
    /// # Errors
    ///
    /// - [`ChatlensError::NoFragments`] if no fragment parses
    /// - [`ChatlensError::InconsistentFragments`] if fragments disagree on
    ///   title or participants
    /// - [`ChatlensError::Io`] on read failures
    pub fn load(&self, dir: &Path) -> Result<Conversation> {
        let mut merged: Option<Conversation> = None;

        for (path, format) in Self::fragments(dir)? {
            let partial = match self.source.load_fragment(&path, format) {
                Ok(partial) => partial,
                Err(e) if e.is_parse() => {
                    warn!(fragment = %path.display(), error = %e, "skipping unparsable fragment");
                    continue;
                }
                Err(e) => return Err(e),
            };
            debug!(fragment = %path.display(), messages = partial.len(), "loaded fragment");

            merged = Some(match merged {
                Some(acc) => acc.merge(partial, dir)?,
                None => partial,
            });
        }

        merged.ok_or_else(|| ChatlensError::NoFragments {
            path: dir.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_fragment(dir: &Path, name: &str, title: &str, messages: serde_json::Value) {
        let content = json!({
            "title": title,
            "participants": [{"name": "Alice"}, {"name": "Me"}],
            "thread_type": "Regular",
            "messages": messages
        });
        fs::write(dir.join(name), content.to_string()).unwrap();
    }

    fn loader() -> ConversationLoader {
        ConversationLoader::new(&LoaderConfig::new("unused", "Me"))
    }

    // =========================================================================
    // Fragment discovery
    // =========================================================================

    #[test]
    fn test_fragments_ignore_other_files() {
        let dir = tempfile::tempdir().unwrap();
        write_fragment(dir.path(), "message_2.json", "Alice", json!([]));
        write_fragment(dir.path(), "message_1.json", "Alice", json!([]));
        fs::write(dir.path().join("photo.jpg"), b"jpg").unwrap();
        fs::create_dir(dir.path().join("photos")).unwrap();

        let fragments = ConversationLoader::fragments(dir.path()).unwrap();
        let names: Vec<_> = fragments
            .iter()
            .map(|(p, _)| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["message_1.json", "message_2.json"]);
    }

    // =========================================================================
    // Merging
    // =========================================================================

    #[test]
    fn test_load_merges_fragments() {
        let dir = tempfile::tempdir().unwrap();
        write_fragment(
            dir.path(),
            "message_1.json",
            "Alice",
            json!([
                {"sender_name": "Alice", "timestamp_ms": 1_700_000_600_000_i64, "content": "ten"},
                {"sender_name": "Alice", "timestamp_ms": 1_700_000_000_000_i64, "content": "zero"}
            ]),
        );
        write_fragment(
            dir.path(),
            "message_2.json",
            "Alice",
            json!([{"sender_name": "Me", "timestamp_ms": 1_700_000_300_000_i64, "content": "five"}]),
        );

        let conv = loader().load(dir.path()).unwrap();
        let contents: Vec<_> = conv.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["zero", "five", "ten"]);
    }

    #[test]
    fn test_title_mismatch_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_fragment(dir.path(), "message_1.json", "Alice", json!([]));
        write_fragment(dir.path(), "message_2.json", "Bob", json!([]));

        let err = loader().load(dir.path()).unwrap_err();
        assert!(err.is_consistency_violation());
        assert!(err.to_string().contains(&dir.path().display().to_string()));
    }

    // =========================================================================
    // Missing and broken fragments
    // =========================================================================

    #[test]
    fn test_empty_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = loader().load(dir.path()).unwrap_err();
        assert!(matches!(err, ChatlensError::NoFragments { .. }));
    }

    #[test]
    fn test_broken_fragment_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_fragment(
            dir.path(),
            "message_1.json",
            "Alice",
            json!([{"sender_name": "Alice", "timestamp_ms": 1_700_000_000_000_i64, "content": "hi"}]),
        );
        fs::write(dir.path().join("message_2.json"), "{ broken").unwrap();

        let conv = loader().load(dir.path()).unwrap();
        assert_eq!(conv.len(), 1);
    }

    #[test]
    fn test_only_broken_fragments_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("message_1.json"), "{ broken").unwrap();
        let err = loader().load(dir.path()).unwrap_err();
        assert!(matches!(err, ChatlensError::NoFragments { .. }));
    }

    #[test]
    fn test_missing_dir_is_io_error() {
        let err = loader().load(Path::new("/nonexistent/chatlens/dir")).unwrap_err();
        assert!(err.is_io());
    }
}
