//! Conversation threads assembled from one or more fragments.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::error::{ChatlensError, Result};

/// One logical thread, possibly spread across several fragment files.
///
/// Messages are kept in ascending timestamp order. Two fragments can only be
/// merged when they agree on `title` and `participants`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    /// Thread title (the counterpart's name for direct threads).
    pub title: String,

    /// Display names of everyone in the thread.
    pub participants: BTreeSet<String>,

    /// Messages in ascending timestamp order.
    pub messages: Vec<Message>,

    /// Whether this is a group thread.
    pub is_group: bool,
}

impl Conversation {
    /// Creates a conversation and sorts its messages.
    pub fn new(
        title: impl Into<String>,
        participants: impl IntoIterator<Item = String>,
        messages: Vec<Message>,
        is_group: bool,
    ) -> Self {
        let mut conversation = Self {
            title: title.into(),
            participants: participants.into_iter().collect(),
            messages,
            is_group,
        };
        sort_timeline(&mut conversation.messages);
        conversation
    }

    /// Merges another fragment of the same thread into this one.
    ///
    /// `dir` names the conversation directory in the error when the
    /// fragments disagree on title or participants.
    ///
    /// # Example
    ///
    /// ```
    /// use chatlens::{Conversation, Message};
    /// use chrono::{TimeZone, Utc};
    ///
    /// let at = |m| Utc.with_ymd_and_hms(2024, 1, 1, 12, m, 0).unwrap();
    /// let people = || vec!["Alice".to_string(), "Me".to_string()];
    ///
    /// let a = Conversation::new("Alice", people(), vec![Message::new("Alice", "Me", at(10), "later")], false);
    /// let b = Conversation::new("Alice", people(), vec![Message::new("Alice", "Me", at(0), "first")], false);
    ///
    /// let merged = a.merge(b, "inbox/alice")?;
    /// assert_eq!(merged.messages[0].content, "first");
    /// # Ok::<(), chatlens::ChatlensError>(())
    /// ```
    pub fn merge(mut self, other: Conversation, dir: impl AsRef<Path>) -> Result<Self> {
        if self.title != other.title {
            return Err(ChatlensError::inconsistent(
                dir.as_ref(),
                "title",
                self.title,
                other.title,
            ));
        }
        if self.participants != other.participants {
            return Err(ChatlensError::inconsistent(
                dir.as_ref(),
                "participants",
                join_names(&self.participants),
                join_names(&other.participants),
            ));
        }

        self.messages.extend(other.messages);
        sort_timeline(&mut self.messages);
        Ok(self)
    }

    /// Number of messages in the thread.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if no message survived classification.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

// Ties on timestamp fall back to sender and content so the merged order does
// not depend on which fragment came first.
fn sort_timeline(messages: &mut [Message]) {
    messages.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.sender.cmp(&b.sender))
            .then_with(|| a.content.cmp(&b.content))
    });
}

fn join_names(names: &BTreeSet<String>) -> String {
    names.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
