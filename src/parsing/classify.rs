//! Message classification.
//!
//! Turns a [`RawRecord`] into a [`Message`], or drops it. Every drop is
//! logged so data-quality problems in an archive can be audited with
//! `RUST_LOG=chatlens=debug`.

use tracing::{debug, warn};

use crate::message::{Message, MessageTags, Reaction};
use crate::parsing::record::{RawRecord, RecordKind};
use crate::parsing::repair::repair_if;

/// Thread-level facts the classifier needs for every record.
#[derive(Debug, Clone, Copy)]
pub struct ThreadContext<'a> {
    /// Repaired conversation title.
    pub title: &'a str,
    /// Whether the thread is a group.
    pub is_group: bool,
    /// Display name of the archive owner.
    pub self_identity: &'a str,
    /// Whether to undo the exporter's double encoding.
    pub fix_encoding: bool,
}

impl ThreadContext<'_> {
    /// Who a message from `sender` is addressed to.
    ///
    /// Direct messages from others go to the archive owner. The owner's own
    /// messages, and all group traffic, go to the thread title.
    pub fn receiver_for(&self, sender: &str) -> String {
        if !self.is_group && sender != self.self_identity {
            self.self_identity.to_string()
        } else {
            self.title.to_string()
        }
    }
}

/// Classifies one record.
///
/// Returns `None` for membership events, unsent messages, records without
/// text, and unsupported types.
///
/// # Example
///
/// ```
/// use chatlens::parsing::{RawRecord, RecordKind, ThreadContext, classify};
/// use chrono::Utc;
///
/// let ctx = ThreadContext { title: "Alice", is_group: false, self_identity: "Me", fix_encoding: true };
///
/// let msg = classify(RawRecord::text("Alice", Utc::now(), "hi"), &ctx).unwrap();
/// assert_eq!(msg.receiver, "Me");
///
/// let event = RawRecord::new("Alice", Utc::now(), RecordKind::Membership);
/// assert!(classify(event, &ctx).is_none());
/// ```
pub fn classify(record: RawRecord, ctx: &ThreadContext<'_>) -> Option<Message> {
    let RawRecord {
        sender,
        timestamp,
        kind,
        reactions,
    } = record;
    let fix = ctx.fix_encoding;

    let (content, shared_link) = match kind {
        RecordKind::Membership => {
            debug!(sender = %sender, %timestamp, "skipping membership event");
            return None;
        }
        RecordKind::Unsent => {
            debug!(sender = %sender, %timestamp, "skipping unsent message");
            return None;
        }
        RecordKind::Unsupported(kind) => {
            warn!(sender = %sender, %timestamp, kind = %kind, "skipping unhandled record type");
            return None;
        }
        RecordKind::Text { content: None } => {
            debug!(sender = %sender, %timestamp, "skipping non-text message (no content field)");
            return None;
        }
        RecordKind::Text {
            content: Some(content),
        } => (content, false),
        RecordKind::Share {
            link: Some(link),
            content: _,
        } if !link.trim().is_empty() => (link, true),
        RecordKind::Share { link: _, content } => {
            warn!(
                sender = %sender,
                %timestamp,
                "share record has no link payload, falling back to its text"
            );
            match content {
                Some(content) => (content, false),
                None => {
                    debug!(sender = %sender, %timestamp, "skipping share without link or content");
                    return None;
                }
            }
        }
    };

    let content = repair_if(&content, fix);
    if content.trim().is_empty() {
        debug!(sender = %sender, %timestamp, "skipping message with empty content");
        return None;
    }

    let sender = repair_if(&sender, fix);
    let receiver = ctx.receiver_for(&sender);
    let reactions = reactions
        .into_iter()
        .map(|r| Reaction::new(repair_if(&r.reaction, fix), repair_if(&r.actor, fix)))
        .collect();

    Some(
        Message::new(sender, receiver, timestamp, content)
            .with_reactions(reactions)
            .with_tags(MessageTags {
                group_chat: ctx.is_group,
                shared_link,
            }),
    )
}
