//! Raw structures of the JSON export.
//!
//! A JSON fragment looks like this:
//!
//! ```json
//! {
//!   "title": "Alice",
//!   "participants": [{"name": "Alice"}, {"name": "Me"}],
//!   "thread_type": "Regular",
//!   "messages": [
//!     {"sender_name": "Alice", "timestamp_ms": 1705315800000, "content": "Hi", "type": "Generic",
//!      "reactions": [{"reaction": "...", "actor": "Me"}]}
//!   ]
//! }
//! ```
//!
//! Messages are deserialized one at a time so a single malformed record only
//! costs that record.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::message::Reaction;
use crate::parsing::record::{RawRecord, RecordKind};

/// Thread type marking a group conversation.
pub const GROUP_THREAD_TYPE: &str = "RegularGroup";

/// Top-level structure of a JSON fragment.
#[derive(Debug, Deserialize)]
pub struct RawThread {
    pub title: String,
    #[serde(default)]
    pub participants: Vec<RawParticipant>,
    #[serde(default)]
    pub thread_type: Option<String>,
    pub messages: Vec<serde_json::Value>,
}

impl RawThread {
    /// Returns `true` if the thread type marks a group.
    pub fn is_group(&self) -> bool {
        self.thread_type.as_deref() == Some(GROUP_THREAD_TYPE)
    }
}

/// Participant entry.
#[derive(Debug, Deserialize)]
pub struct RawParticipant {
    pub name: String,
}

/// One message entry.
#[derive(Debug, Deserialize)]
pub struct RawJsonMessage {
    pub sender_name: Option<String>,
    pub timestamp_ms: Option<i64>,
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub reactions: Vec<RawReaction>,
    pub share: Option<RawShare>,
    #[serde(default)]
    pub is_unsent: bool,
}

/// Reaction entry.
#[derive(Debug, Deserialize)]
pub struct RawReaction {
    pub reaction: String,
    pub actor: String,
}

/// Share payload.
#[derive(Debug, Deserialize)]
pub struct RawShare {
    pub link: Option<String>,
    pub share_text: Option<String>,
}

/// Parses a millisecond timestamp to DateTime.
pub fn parse_ms_timestamp(timestamp_ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(timestamp_ms).single()
}

impl RawJsonMessage {
    /// Decides the record kind from the declared type and flags.
    pub fn record_kind(&self) -> RecordKind {
        match self.kind.as_deref() {
            Some("Subscribe" | "Unsubscribe") => RecordKind::Membership,
            _ if self.is_unsent => RecordKind::Unsent,
            None | Some("Generic") => RecordKind::Text {
                content: self.content.clone(),
            },
            Some("Share") => RecordKind::Share {
                link: self.share.as_ref().and_then(|s| s.link.clone()),
                content: self.content.clone(),
            },
            Some(other) => RecordKind::Unsupported(other.to_string()),
        }
    }

    /// Converts into a [`RawRecord`].
    ///
    /// Returns `None` when the entry has no sender or no usable timestamp.
    pub fn into_record(self) -> Option<RawRecord> {
        let kind = self.record_kind();
        let Some(sender) = self.sender_name else {
            debug!(kind = kind.label(), "skipping record without sender_name");
            return None;
        };
        let Some(timestamp) = self.timestamp_ms.and_then(parse_ms_timestamp) else {
            warn!(sender = %sender, ms = ?self.timestamp_ms, "skipping record without usable timestamp_ms");
            return None;
        };
        let reactions = self
            .reactions
            .into_iter()
            .map(|r| Reaction::new(r.reaction, r.actor))
            .collect();

        Some(RawRecord::new(sender, timestamp, kind).with_reactions(reactions))
    }
}

/// Deserializes one message entry into a record, logging anything skipped.
pub fn parse_json_record(value: serde_json::Value) -> Option<RawRecord> {
    match serde_json::from_value::<RawJsonMessage>(value) {
        Ok(raw) => raw.into_record(),
        Err(e) => {
            debug!(error = %e, "skipping malformed message record");
            None
        }
    }
}
