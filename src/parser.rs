//! Fragment parser trait and export format selection.
//!
//! Every file of a conversation directory is a *fragment*. A
//! [`FragmentParser`] turns one fragment into a partial [`Conversation`];
//! the loader then merges the partials.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "json")]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::config::LoaderConfig;
//! use chatlens::parser::{ExportFormat, create_parser};
//! use std::path::Path;
//!
//! let config = LoaderConfig::new("inbox", "Me");
//! let parser = create_parser(ExportFormat::Json, &config)?;
//! let partial = parser.parse(Path::new("inbox/alice/message_1.json"))?;
//! println!("{}: {} messages", partial.title, partial.len());
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "json"))]
//! # fn main() {}
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::LoaderConfig;
use crate::conversation::Conversation;
use crate::error::{ChatlensError, Result};

/// Prefix shared by every fragment file name.
const FRAGMENT_STEM: &str = "message";

/// The two archive export shapes.
///
/// # Example
///
/// ```rust
/// use chatlens::parser::ExportFormat;
/// use std::str::FromStr;
///
/// assert_eq!(ExportFormat::from_str("json").unwrap(), ExportFormat::Json);
/// assert_eq!(ExportFormat::from_fragment_name("message_2.json"), Some(ExportFormat::Json));
/// assert_eq!(ExportFormat::from_fragment_name("message.html"), Some(ExportFormat::Html));
/// assert_eq!(ExportFormat::from_fragment_name("photo_1.jpg"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Structured per-message JSON records
    Json,

    /// Markup-embedded HTML threads
    #[serde(alias = "htm")]
    Html,
}

impl ExportFormat {
    /// Returns the file extension of fragments in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Html => "html",
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Json => "JSON",
            ExportFormat::Html => "HTML",
        }
    }

    /// Returns all formats.
    pub fn all() -> &'static [ExportFormat] {
        &[ExportFormat::Json, ExportFormat::Html]
    }

    /// Detects the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "html" | "htm" => Some(ExportFormat::Html),
            _ => None,
        }
    }

    /// Recognizes fragment file names: `message.<ext>` or `message_<n>.<ext>`.
    ///
    /// Everything else in a conversation directory (photos, stickers,
    /// attachments) is ignored.
    pub fn from_fragment_name(file_name: &str) -> Option<Self> {
        let (stem, ext) = file_name.rsplit_once('.')?;
        let format = Self::from_extension(ext)?;
        let rest = stem.strip_prefix(FRAGMENT_STEM)?;
        let numbered = rest
            .strip_prefix('_')
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()));
        (rest.is_empty() || numbered).then_some(format)
    }

    /// Recognizes a fragment path by its file name.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_name()
            .and_then(|n| n.to_str())
            .and_then(Self::from_fragment_name)
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| format!("Unknown export format: '{s}'. Expected one of: json, html"))
    }
}

/// Parses one fragment file into a partial conversation.
///
/// Implementations skip bad records (logging them) and fail only when the
/// fragment as a whole is unreadable.
pub trait FragmentParser: Send + Sync {
    /// Returns the human-readable name of this parser.
    fn name(&self) -> &'static str;

    /// Returns the format this parser handles.
    fn format(&self) -> ExportFormat;

    /// Parses a fragment file.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::Io`] if the file cannot be read and
    /// [`ChatlensError::Parse`] (carrying the path) if its structure is
    /// unusable.
    fn parse(&self, path: &Path) -> Result<Conversation>;

    /// Parses fragment content already in memory.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::Parse`] if the content cannot be parsed.
    fn parse_str(&self, content: &str) -> Result<Conversation>;
}

/// Creates a parser for the given format.
///
/// # Errors
///
/// Returns [`ChatlensError::UnsupportedFormat`] if the format's feature is
/// not compiled in.
#[cfg_attr(not(any(feature = "json", feature = "html")), allow(unused_variables))]
pub fn create_parser(format: ExportFormat, config: &LoaderConfig) -> Result<Box<dyn FragmentParser>> {
    match format {
        #[cfg(feature = "json")]
        ExportFormat::Json => Ok(Box::new(crate::parsers::JsonFragmentParser::new(config.clone()))),
        #[cfg(feature = "html")]
        ExportFormat::Html => Ok(Box::new(crate::parsers::HtmlFragmentParser::new(config.clone()))),
        #[allow(unreachable_patterns)]
        other => Err(ChatlensError::UnsupportedFormat {
            format: other.label(),
            feature: other.extension(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::str::FromStr;

    // =========================================================================
    // ExportFormat tests
    // =========================================================================

    #[test]
    fn test_format_from_str() {
        assert_eq!(ExportFormat::from_str("JSON").unwrap(), ExportFormat::Json);
        assert_eq!(ExportFormat::from_str("htm").unwrap(), ExportFormat::Html);
        assert!(ExportFormat::from_str("txt").is_err());
    }

    #[test]
    fn test_format_display() {
        assert_eq!(ExportFormat::Json.to_string(), "JSON");
        assert_eq!(ExportFormat::Html.to_string(), "HTML");
    }

    #[test]
    fn test_fragment_names() {
        assert_eq!(ExportFormat::from_fragment_name("message_1.json"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_fragment_name("message_12.json"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_fragment_name("message.html"), Some(ExportFormat::Html));
        assert_eq!(ExportFormat::from_fragment_name("message_3.html"), Some(ExportFormat::Html));
    }

    #[test]
    fn test_non_fragment_names() {
        assert_eq!(ExportFormat::from_fragment_name("messages.json"), None);
        assert_eq!(ExportFormat::from_fragment_name("message_.json"), None);
        assert_eq!(ExportFormat::from_fragment_name("message_a.json"), None);
        assert_eq!(ExportFormat::from_fragment_name("message_1.txt"), None);
        assert_eq!(ExportFormat::from_fragment_name("photo.jpg"), None);
        assert_eq!(ExportFormat::from_fragment_name("message"), None);
    }

    #[test]
    fn test_from_path() {
        let path = PathBuf::from("inbox").join("alice_abc").join("message_1.json");
        assert_eq!(ExportFormat::from_path(&path), Some(ExportFormat::Json));
    }

    #[test]
    fn test_format_serde() {
        let json = serde_json::to_string(&ExportFormat::Html).unwrap();
        assert_eq!(json, "\"html\"");
        let parsed: ExportFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(parsed, ExportFormat::Json);
    }

    // =========================================================================
    // create_parser tests
    // =========================================================================

    #[cfg(feature = "json")]
    #[test]
    fn test_create_json_parser() {
        let parser = create_parser(ExportFormat::Json, &LoaderConfig::default()).unwrap();
        assert_eq!(parser.name(), "Messenger JSON");
        assert_eq!(parser.format(), ExportFormat::Json);
    }

    #[cfg(feature = "html")]
    #[test]
    fn test_create_html_parser() {
        let parser = create_parser(ExportFormat::Html, &LoaderConfig::default()).unwrap();
        assert_eq!(parser.name(), "Messenger HTML");
        assert_eq!(parser.format(), ExportFormat::Html);
    }

    #[cfg(not(feature = "html"))]
    #[test]
    fn test_create_parser_without_feature() {
        let err = create_parser(ExportFormat::Html, &LoaderConfig::default()).err().unwrap();
        assert!(matches!(err, ChatlensError::UnsupportedFormat { feature: "html", .. }));
    }
}
