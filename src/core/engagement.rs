//! Engagement of group participants.
//!
//! Lists, per group conversation, how much each participant wrote and
//! reacted, and who did neither.

use std::collections::{BTreeMap, BTreeSet};

use crate::conversation::Conversation;

/// Activity of one participant in a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngagementRow {
    /// Participant name.
    pub name: String,
    /// Messages sent in the group.
    pub messages: usize,
    /// Reactions left in the group.
    pub reactions: usize,
}

/// Engagement table of one group conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngagementReport {
    /// Conversation title.
    pub title: String,
    /// One row per participant, least messages first.
    pub rows: Vec<EngagementRow>,
    /// Participants who neither wrote nor reacted.
    pub silent: BTreeSet<String>,
}

/// Builds the engagement report of a group conversation.
///
/// Returns `None` for direct conversations. Only listed participants get a
/// row; former members who still appear as senders are ignored.
pub fn group_engagement(conversation: &Conversation) -> Option<EngagementReport> {
    if !conversation.is_group {
        return None;
    }

    let mut sent: BTreeMap<&str, usize> = BTreeMap::new();
    let mut reacted: BTreeMap<&str, usize> = BTreeMap::new();
    for message in &conversation.messages {
        *sent.entry(message.sender.as_str()).or_default() += 1;
        for reaction in &message.reactions {
            *reacted.entry(reaction.actor.as_str()).or_default() += 1;
        }
    }

    let mut rows: Vec<EngagementRow> = conversation
        .participants
        .iter()
        .map(|name| EngagementRow {
            name: name.clone(),
            messages: sent.get(name.as_str()).copied().unwrap_or(0),
            reactions: reacted.get(name.as_str()).copied().unwrap_or(0),
        })
        .collect();
    rows.sort_by_key(|row| row.messages);

    let silent = rows
        .iter()
        .filter(|row| row.messages == 0 && row.reactions == 0)
        .map(|row| row.name.clone())
        .collect();

    Some(EngagementReport {
        title: conversation.title.clone(),
        rows,
        silent,
    })
}

/// Engagement reports of every group among `conversations`.
pub fn group_engagements<'a, I>(conversations: I) -> Vec<EngagementReport>
where
    I: IntoIterator<Item = &'a Conversation>,
{
    conversations.into_iter().filter_map(group_engagement).collect()
}
