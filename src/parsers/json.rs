//! Messenger JSON fragment parser.
//!
//! Handles the structured export, including its Mojibake encoding defect.
//! Thread-level strings (title, participant names) are repaired here; record
//! strings are repaired by the classifier.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::LoaderConfig;
use crate::conversation::Conversation;
use crate::error::{ChatlensError, Result};
use crate::parser::{ExportFormat, FragmentParser};
use crate::parsing::json::{RawThread, parse_json_record};
use crate::parsing::{ThreadContext, classify, repair_if};

/// Parser for `message_<n>.json` fragments.
///
/// # Example
///
/// ```rust
/// use chatlens::config::LoaderConfig;
/// use chatlens::parser::FragmentParser;
/// use chatlens::parsers::JsonFragmentParser;
///
/// let parser = JsonFragmentParser::new(LoaderConfig::new("inbox", "Me"));
/// let partial = parser.parse_str(r#"{
///     "title": "Alice",
///     "participants": [{"name": "Alice"}, {"name": "Me"}],
///     "messages": [{"sender_name": "Alice", "timestamp_ms": 1500000000000, "content": "hi", "type": "Generic"}]
/// }"#)?;
///
/// assert_eq!(partial.messages[0].receiver, "Me");
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
pub struct JsonFragmentParser {
    config: LoaderConfig,
}

impl JsonFragmentParser {
    /// Creates a parser with the given configuration.
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    fn parse_content(&self, content: &str) -> Result<Conversation> {
        let thread: RawThread = serde_json::from_str(content).map_err(|e| ChatlensError::json_parse(e, None))?;

        let fix = self.config.fix_encoding;
        let is_group = thread.is_group();
        let title = repair_if(&thread.title, fix);
        let participants: Vec<String> = thread
            .participants
            .iter()
            .map(|p| repair_if(&p.name, fix))
            .collect();

        let ctx = ThreadContext {
            title: &title,
            is_group,
            self_identity: &self.config.self_identity,
            fix_encoding: fix,
        };
        let total = thread.messages.len();
        let messages: Vec<_> = thread
            .messages
            .into_iter()
            .filter_map(parse_json_record)
            .filter_map(|record| classify(record, &ctx))
            .collect();

        debug!(title = %title, records = total, kept = messages.len(), is_group, "parsed JSON fragment");

        Ok(Conversation::new(title, participants, messages, is_group))
    }
}

impl Default for JsonFragmentParser {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

impl FragmentParser for JsonFragmentParser {
    fn name(&self) -> &'static str {
        "Messenger JSON"
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn parse(&self, path: &Path) -> Result<Conversation> {
        let content = fs::read_to_string(path)?;
        self.parse_content(&content).map_err(|e| e.with_path(path))
    }

    fn parse_str(&self, content: &str) -> Result<Conversation> {
        self.parse_content(content)
    }
}
