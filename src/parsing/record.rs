//! Source-independent raw records.
//!
//! Both fragment formats normalize each entry into a [`RawRecord`] whose
//! [`RecordKind`] is decided once, right after reading. The classifier then
//! matches on the kind instead of probing optional fields.

use chrono::{DateTime, Utc};

use crate::message::Reaction;

/// What a raw record is, as declared by the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKind {
    /// A plain message. `content` is absent for photos, stickers and other
    /// non-text payloads.
    Text {
        /// Message text, if any.
        content: Option<String>,
    },

    /// A shared link.
    Share {
        /// URL of the shared item, if the export kept it.
        link: Option<String>,
        /// Accompanying text, if any.
        content: Option<String>,
    },

    /// Somebody joined, left or was added to the thread.
    Membership,

    /// The sender withdrew the message.
    Unsent,

    /// A record type this crate does not handle (calls, polls, ...).
    Unsupported(String),
}

impl RecordKind {
    /// Short label used in diagnostics.
    pub fn label(&self) -> &str {
        match self {
            RecordKind::Text { .. } => "text",
            RecordKind::Share { .. } => "share",
            RecordKind::Membership => "membership",
            RecordKind::Unsent => "unsent",
            RecordKind::Unsupported(kind) => kind,
        }
    }
}

/// One entry of a fragment before classification.
///
/// Strings are exactly as read from the file; encoding repair happens in the
/// classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// Sender display name.
    pub sender: String,
    /// When the record was created.
    pub timestamp: DateTime<Utc>,
    /// Declared record type and its payload.
    pub kind: RecordKind,
    /// Reactions in source order.
    pub reactions: Vec<Reaction>,
}

impl RawRecord {
    /// Creates a record without reactions.
    pub fn new(sender: impl Into<String>, timestamp: DateTime<Utc>, kind: RecordKind) -> Self {
        Self {
            sender: sender.into(),
            timestamp,
            kind,
            reactions: Vec::new(),
        }
    }

    /// Creates a plain text record.
    pub fn text(sender: impl Into<String>, timestamp: DateTime<Utc>, content: impl Into<String>) -> Self {
        Self::new(
            sender,
            timestamp,
            RecordKind::Text {
                content: Some(content.into()),
            },
        )
    }

    /// Builder method to attach reactions.
    #[must_use]
    pub fn with_reactions(mut self, reactions: Vec<Reaction>) -> Self {
        self.reactions = reactions;
        self
    }
}
