//! Discovery and flattening of the whole archive.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::Message;
use crate::config::LoaderConfig;
use crate::conversation::Conversation;
use crate::error::{ChatlensError, Result};
use crate::loader::conversation::ConversationLoader;

/// Case-insensitive substring filter on conversation titles.
///
/// `"*"` and the empty pattern match everything. This is a substring test,
/// not a glob.
///
/// # Example
///
/// ```rust
/// use chatlens::loader::NameFilter;
///
/// let filter = NameFilter::from("crew");
/// assert!(filter.matches("Climbing Crew"));
/// assert!(!filter.matches("Alice"));
/// assert!(NameFilter::from("*").matches("Alice"));
/// assert!(NameFilter::from(None).matches("Alice"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameFilter {
    pattern: Option<String>,
}

impl NameFilter {
    /// A filter that matches every conversation.
    pub fn all() -> Self {
        Self::default()
    }

    /// Creates a filter for `pattern`.
    pub fn new(pattern: &str) -> Self {
        let pattern = pattern.trim();
        if pattern.is_empty() || pattern == "*" {
            Self::all()
        } else {
            Self {
                pattern: Some(pattern.to_lowercase()),
            }
        }
    }

    /// Returns `true` if every conversation passes.
    pub fn is_all(&self) -> bool {
        self.pattern.is_none()
    }

    /// Returns `true` if `title` passes.
    pub fn matches(&self, title: &str) -> bool {
        match &self.pattern {
            Some(pattern) => title.to_lowercase().contains(pattern.as_str()),
            None => true,
        }
    }
}

impl From<&str> for NameFilter {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}

impl From<String> for NameFilter {
    fn from(pattern: String) -> Self {
        Self::new(&pattern)
    }
}

impl From<Option<&str>> for NameFilter {
    fn from(pattern: Option<&str>) -> Self {
        pattern.map(Self::new).unwrap_or_default()
    }
}

/// Loads every conversation under the archive root.
pub struct CorpusLoader {
    config: LoaderConfig,
    loader: ConversationLoader,
}

impl CorpusLoader {
    /// Creates a corpus loader with the default fragment source for `config`.
    pub fn new(config: LoaderConfig) -> Self {
        let loader = ConversationLoader::new(&config);
        Self { config, loader }
    }

    /// Creates a corpus loader with a custom conversation loader.
    pub fn with_loader(config: LoaderConfig, loader: ConversationLoader) -> Self {
        Self { config, loader }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Lists conversation directories: non-hidden subdirectories of the
    /// archive root holding at least one fragment file, in name order.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidArchive`] if the root is missing or not
    /// a directory.
    pub fn conversation_dirs(&self) -> Result<Vec<PathBuf>> {
        let root = &self.config.archive_root;
        if !root.is_dir() {
            return Err(ChatlensError::invalid_archive(
                root,
                "archive root does not exist or is not a directory",
            ));
        }

        let mut dirs = Vec::new();
        for entry in fs::read_dir(root)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_dir() || entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }
            if ConversationLoader::fragments(&path)?.is_empty() {
                debug!(dir = %path.display(), "no fragment files, skipping");
                continue;
            }
            dirs.push(path);
        }
        dirs.sort();
        Ok(dirs)
    }

    /// Loads the conversations whose title passes `filter`.
    ///
    /// No match is `Ok(vec![])`.
    ///
    /// # Errors
    ///
    /// Any fatal loader error, see [`ConversationLoader::load`].
    pub fn conversations(&self, filter: impl Into<NameFilter>) -> Result<Vec<Conversation>> {
        let filter = filter.into();
        let mut conversations = Vec::new();

        for dir in self.conversation_dirs()? {
            let conversation = self.loader.load(&dir)?;
            if filter.matches(&conversation.title) {
                conversations.push(conversation);
            } else {
                debug!(title = %conversation.title, "conversation filtered out");
            }
        }

        info!(
            conversations = conversations.len(),
            messages = conversations.iter().map(Conversation::len).sum::<usize>(),
            "loaded archive"
        );
        Ok(conversations)
    }

    /// Loads the flattened message stream of the conversations passing
    /// `filter`.
    ///
    /// Messages stay timestamp-ordered within a conversation; conversations
    /// follow discovery order.
    ///
    /// # Errors
    ///
    /// Any fatal loader error, see [`ConversationLoader::load`].
    pub fn load(&self, filter: impl Into<NameFilter>) -> Result<Vec<Message>> {
        Ok(self
            .conversations(filter)?
            .into_iter()
            .flat_map(|c| c.messages)
            .collect())
    }
}

/// Loads the filtered, flattened message stream of an archive.
///
/// # Example
///
/// ```rust,no_run
/// use chatlens::config::LoaderConfig;
/// use chatlens::load_corpus;
///
/// let config = LoaderConfig::new("data/private/messages/inbox", "Jane Doe");
/// let messages = load_corpus(&config, "*")?;
/// println!("{} messages", messages.len());
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
///
/// # Errors
///
/// See [`CorpusLoader::load`].
pub fn load_corpus(config: &LoaderConfig, filter: impl Into<NameFilter>) -> Result<Vec<Message>> {
    CorpusLoader::new(config.clone()).load(filter)
}

/// Loads the filtered conversations of an archive.
///
/// # Errors
///
/// See [`CorpusLoader::conversations`].
pub fn load_conversations(config: &LoaderConfig, filter: impl Into<NameFilter>) -> Result<Vec<Conversation>> {
    CorpusLoader::new(config.clone()).conversations(filter)
}
