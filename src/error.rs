//! Unified error types for chatlens.
//!
//! This module provides a single [`ChatlensError`] enum that covers all error
//! cases in the library.
//!
//! # Error Categories
//!
//! - **Skippable record defects** never show up here. A malformed message
//!   record is logged and dropped by the classifier.
//! - **Archive consistency violations** ([`ChatlensError::InconsistentFragments`],
//!   [`ChatlensError::NoFragments`]) abort the whole load and name the
//!   offending conversation directory.
//! - **Empty results** are not errors: a filter that matches nothing yields
//!   `Ok(vec![])`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
///
/// # Example
///
/// ```rust
/// use chatlens::error::Result;
/// use chatlens::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// The error type for all chatlens operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// An I/O error occurred while reading the archive or the cache.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A whole fragment file could not be parsed.
    ///
    /// Contains the format being parsed, the underlying parse error,
    /// and optionally the file path.
    #[error("Failed to parse {format} fragment{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The format being parsed (e.g., "Messenger JSON", "Messenger HTML")
        format: &'static str,
        /// The underlying parse error
        #[source]
        source: ParseErrorKind,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// Two fragments of the same conversation disagree on a thread field.
    #[error(
        "Inconsistent fragments in {}: {field} differs ('{expected}' vs '{found}')",
        path.display()
    )]
    InconsistentFragments {
        /// The conversation directory
        path: PathBuf,
        /// Which field differs ("title" or "participants")
        field: &'static str,
        /// Value from the fragments merged so far
        expected: String,
        /// Value from the fragment being merged
        found: String,
    },

    /// A conversation directory has no fragment that could be parsed.
    #[error("No parsable message fragments in {}", path.display())]
    NoFragments {
        /// The conversation directory
        path: PathBuf,
    },

    /// The archive root is missing or is not a directory.
    #[error("Invalid archive at {}: {message}", path.display())]
    InvalidArchive {
        /// The configured archive root
        path: PathBuf,
        /// Description of what's wrong
        message: String,
    },

    /// The requested fragment format is not compiled in.
    #[error("{format} fragments are not supported in this build (enable the '{feature}' feature)")]
    UnsupportedFormat {
        /// Format name
        format: &'static str,
        /// Cargo feature that enables it
        feature: &'static str,
    },

    /// Invalid date format in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// JSON serialization error (fragment cache).
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Kinds of parse errors that can occur.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// JSON parsing error
    #[cfg(feature = "json")]
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// Markup did not have the expected structure
    #[error("{0}")]
    Markup(String),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatlensError {
    /// Creates a parse error for the structured JSON format.
    #[cfg(feature = "json")]
    pub fn json_parse(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        ChatlensError::Parse {
            format: "Messenger JSON",
            source: ParseErrorKind::Json(source),
            path,
        }
    }

    /// Creates a parse error for the HTML format.
    pub fn html_parse(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        ChatlensError::Parse {
            format: "Messenger HTML",
            source: ParseErrorKind::Markup(message.into()),
            path,
        }
    }

    /// Attaches a file path to a parse error; other variants are returned as is.
    #[must_use]
    pub fn with_path(self, file: impl Into<PathBuf>) -> Self {
        match self {
            ChatlensError::Parse { format, source, .. } => ChatlensError::Parse {
                format,
                source,
                path: Some(file.into()),
            },
            other => other,
        }
    }

    /// Creates a fragment mismatch error.
    pub fn inconsistent(
        path: impl Into<PathBuf>,
        field: &'static str,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        ChatlensError::InconsistentFragments {
            path: path.into(),
            field,
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates an invalid archive error.
    pub fn invalid_archive(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ChatlensError::InvalidArchive {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatlensError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ChatlensError::Parse { .. })
    }

    /// Returns `true` if the archive itself is inconsistent.
    ///
    /// These errors are fatal for the whole load.
    pub fn is_consistency_violation(&self) -> bool {
        matches!(
            self,
            ChatlensError::InconsistentFragments { .. } | ChatlensError::NoFragments { .. }
        )
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatlensError::InvalidDate { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
