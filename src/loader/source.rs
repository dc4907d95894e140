//! The fragment-source seam.
//!
//! [`ConversationLoader`](super::ConversationLoader) never calls a parser
//! directly; it asks a [`FragmentSource`] for each fragment. The default
//! source parses the file, and [`CachedSource`](super::CachedSource) wraps
//! any source with an on-disk cache.

use std::path::Path;

use crate::config::LoaderConfig;
use crate::conversation::Conversation;
use crate::error::{ChatlensError, Result};
use crate::parser::{ExportFormat, FragmentParser, create_parser};

/// Produces the partial conversation stored in one fragment file.
pub trait FragmentSource: Send + Sync {
    /// Loads one fragment.
    ///
    /// # Errors
    ///
    /// [`ChatlensError::Parse`] marks a fragment that can be skipped; any
    /// other error is fatal for the load.
    fn load_fragment(&self, path: &Path, format: ExportFormat) -> Result<Conversation>;
}

/// Parses fragments with the parsers compiled into this build.
pub struct ParserSource {
    parsers: Vec<Box<dyn FragmentParser>>,
}

impl ParserSource {
    /// Creates a parser for every enabled format.
    pub fn new(config: &LoaderConfig) -> Self {
        let parsers = ExportFormat::all()
            .iter()
            .filter_map(|format| create_parser(*format, config).ok())
            .collect();
        Self { parsers }
    }

    /// Returns the parser for `format`, if it is compiled in.
    pub fn parser(&self, format: ExportFormat) -> Option<&dyn FragmentParser> {
        self.parsers
            .iter()
            .find(|p| p.format() == format)
            .map(|p| &**p)
    }
}

impl FragmentSource for ParserSource {
    fn load_fragment(&self, path: &Path, format: ExportFormat) -> Result<Conversation> {
        let parser = self
            .parser(format)
            .ok_or(ChatlensError::UnsupportedFormat {
                format: format.label(),
                feature: format.extension(),
            })?;
        parser.parse(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_source_has_enabled_formats() {
        let source = ParserSource::new(&LoaderConfig::default());
        #[cfg(feature = "json")]
        assert_eq!(source.parser(ExportFormat::Json).map(|p| p.name()), Some("Messenger JSON"));
        #[cfg(feature = "html")]
        assert_eq!(source.parser(ExportFormat::Html).map(|p| p.name()), Some("Messenger HTML"));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_parser_source_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("message_1.json");
        std::fs::write(&path, r#"{"title": "Alice", "participants": [], "messages": []}"#).unwrap();

        let source = ParserSource::new(&LoaderConfig::new(dir.path(), "Me"));
        let conv = source.load_fragment(&path, ExportFormat::Json).unwrap();
        assert_eq!(conv.title, "Alice");
    }
}
