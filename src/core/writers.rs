//! Per-writer statistics and the top-writer ranking.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Local, NaiveDate, TimeZone};

use crate::Message;

/// Activity of one person across a message stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Dates on which the person sent something.
    pub active_days: BTreeSet<NaiveDate>,
    /// Messages sent.
    pub message_count: usize,
    /// Words sent.
    pub word_count: usize,
    /// Reactions on the person's messages.
    pub reactions_received: usize,
    /// Reactions the person left on others' messages.
    pub reactions_sent: usize,
}

impl WriterStats {
    /// Number of active days.
    pub fn days(&self) -> usize {
        self.active_days.len()
    }
}

/// Statistics per person, dates in the local time zone.
///
/// Reactors who never send a message still get an entry.
pub fn writer_stats<'a, I>(messages: I) -> BTreeMap<String, WriterStats>
where
    I: IntoIterator<Item = &'a Message>,
{
    writer_stats_in(messages, &Local)
}

/// Statistics per person, dates in `tz`.
pub fn writer_stats_in<'a, I, Tz>(messages: I, tz: &Tz) -> BTreeMap<String, WriterStats>
where
    I: IntoIterator<Item = &'a Message>,
    Tz: TimeZone,
{
    let mut stats: BTreeMap<String, WriterStats> = BTreeMap::new();
    for message in messages {
        let writer = stats.entry(message.sender.clone()).or_default();
        writer.active_days.insert(message.date_in(tz));
        writer.message_count += 1;
        writer.word_count += message.word_count();
        writer.reactions_received += message.reaction_count();

        for reaction in &message.reactions {
            stats.entry(reaction.actor.clone()).or_default().reactions_sent += 1;
        }
    }
    stats
}

/// Senders of direct messages ranked by message count, ties by name.
///
/// Group traffic is left out so busy group chats do not drown out
/// one-to-one conversations.
///
/// # Example
///
/// ```
/// use chatlens::Message;
/// use chatlens::core::writers::top_writers;
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let messages = vec![
///     Message::new("Alice", "Me", now, "hi"),
///     Message::new("Bob", "Me", now, "hey"),
///     Message::new("Bob", "Me", now, "you there?"),
///     Message::new("Carol", "Crew", now, "group hello").in_group(),
/// ];
///
/// let ranking = top_writers(&messages);
/// let names: Vec<_> = ranking.iter().map(|(name, _)| name.as_str()).collect();
/// assert_eq!(names, ["Bob", "Alice"]);
/// ```
pub fn top_writers<'a, I>(messages: I) -> Vec<(String, WriterStats)>
where
    I: IntoIterator<Item = &'a Message>,
{
    let direct = messages.into_iter().filter(|m| !m.is_group());
    let mut ranking: Vec<(String, WriterStats)> = writer_stats(direct)
        .into_iter()
        .filter(|(_, s)| s.message_count > 0)
        .collect();
    ranking.sort_by(|a, b| b.1.message_count.cmp(&a.1.message_count).then_with(|| a.0.cmp(&b.0)));
    ranking
}
