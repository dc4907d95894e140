//! Normalized message type.
//!
//! This module provides [`Message`], the representation every fragment parser
//! produces. A `Message` is only ever constructed for records that carry real
//! text, so `content` is never empty.
//!
//! # Examples
//!
//! ```
//! use chatlens::{Message, Reaction};
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
//! let msg = Message::new("Alice", "Bob", ts, "Hello, world!")
//!     .with_reaction(Reaction::new("❤", "Bob"));
//!
//! assert_eq!(msg.sender(), "Alice");
//! assert_eq!(msg.word_count(), 2);
//! assert_eq!(msg.reaction_count(), 1);
//! ```

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A single reaction attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reaction {
    /// The reaction symbol, usually a single emoji.
    pub reaction: String,
    /// Display name of whoever reacted.
    pub actor: String,
}

impl Reaction {
    /// Creates a reaction from its symbol and actor.
    pub fn new(reaction: impl Into<String>, actor: impl Into<String>) -> Self {
        Self {
            reaction: reaction.into(),
            actor: actor.into(),
        }
    }
}

/// Flags describing where a message came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageTags {
    /// The message belongs to a group conversation.
    #[serde(default)]
    pub group_chat: bool,
    /// The content is the URL of a shared link.
    #[serde(default)]
    pub shared_link: bool,
}

/// A normalized message from the archive.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `sender` | `String` | Display name of the author |
/// | `receiver` | `String` | Counterpart name, or the conversation title for group traffic |
/// | `timestamp` | `DateTime<Utc>` | When the message was sent |
/// | `content` | `String` | Repaired text, or a URL for shared links |
/// | `reactions` | `Vec<Reaction>` | Reactions in the order the export lists them |
/// | `tags` | `MessageTags` | Group / shared-link flags |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Display name of the message author.
    pub sender: String,

    /// Display name of the counterpart, or the conversation title.
    pub receiver: String,

    /// When the message was sent.
    pub timestamp: DateTime<Utc>,

    /// Text content of the message. Never empty.
    pub content: String,

    /// Reactions in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<Reaction>,

    /// Source flags.
    #[serde(default)]
    pub tags: MessageTags,
}

impl Message {
    /// Creates a message without reactions or tags.
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        timestamp: DateTime<Utc>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            timestamp,
            content: content.into(),
            reactions: Vec::new(),
            tags: MessageTags::default(),
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Builder method to append one reaction.
    #[must_use]
    pub fn with_reaction(mut self, reaction: Reaction) -> Self {
        self.reactions.push(reaction);
        self
    }

    /// Builder method to replace all reactions.
    #[must_use]
    pub fn with_reactions(mut self, reactions: Vec<Reaction>) -> Self {
        self.reactions = reactions;
        self
    }

    /// Builder method to set the source flags.
    #[must_use]
    pub fn with_tags(mut self, tags: MessageTags) -> Self {
        self.tags = tags;
        self
    }

    /// Builder method to mark the message as group traffic.
    #[must_use]
    pub fn in_group(mut self) -> Self {
        self.tags.group_chat = true;
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the receiver name.
    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns `true` if this message belongs to a group conversation.
    pub fn is_group(&self) -> bool {
        self.tags.group_chat
    }

    // =========================================================================
    // Derived values
    // =========================================================================

    /// Number of whitespace-separated tokens in the content.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    /// Number of characters in the content.
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Number of reactions attached to this message.
    pub fn reaction_count(&self) -> usize {
        self.reactions.len()
    }

    /// Calendar date of the timestamp in the local time zone.
    pub fn local_date(&self) -> NaiveDate {
        self.date_in(&Local)
    }

    /// Calendar date of the timestamp in the given time zone.
    pub fn date_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.timestamp.with_timezone(tz).date_naive()
    }

    /// All reaction symbols concatenated, in source order.
    pub fn reaction_text(&self) -> String {
        self.reactions.iter().map(|r| r.reaction.as_str()).collect()
    }
}
