//! Pairwise connections and per-relationship summaries.
//!
//! A *directed* pair is `sender -> receiver`. An *undirected* pair ignores
//! direction, so `Alice -> Me` and `Me -> Alice` are the same relationship.
//! Group messages are addressed to the group title (see
//! [`ThreadContext::receiver_for`](crate::parsing::ThreadContext::receiver_for)),
//! so in undirected grouping a group shows up as one side of a pair.

use std::collections::BTreeMap;

use chrono::{Local, TimeZone};

use crate::Message;
use crate::core::calendar::{active_days_in, longest_streak};
use crate::core::emoji::{EmojiCount, most_used_emoji};

/// `"sender -> receiver"`.
pub fn directed_key(message: &Message) -> String {
    directed_label(&message.sender, &message.receiver)
}

/// `"from -> to"` for a pair of names.
pub fn directed_label(from: &str, to: &str) -> String {
    format!("{from} -> {to}")
}

/// The two names in sorted order joined by `" <-> "`.
pub fn undirected_key(message: &Message) -> String {
    let (a, b) = if message.sender <= message.receiver {
        (&message.sender, &message.receiver)
    } else {
        (&message.receiver, &message.sender)
    };
    format!("{a} <-> {b}")
}

/// Message counts per ordered `(sender, receiver)` pair of direct messages.
pub fn connections<'a, I>(messages: I) -> BTreeMap<(String, String), usize>
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut weights: BTreeMap<(String, String), usize> = BTreeMap::new();
    for message in messages.into_iter().filter(|m| !m.is_group()) {
        *weights
            .entry((message.sender.clone(), message.receiver.clone()))
            .or_default() += 1;
    }
    weights
}

/// Connections ordered by weight descending, ties by pair.
pub fn ranked_connections<'a, I>(messages: I) -> Vec<((String, String), usize)>
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut ranked: Vec<_> = connections(messages).into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// Messages grouped by [`undirected_key`].
pub fn group_by_pair<'a, I>(messages: I) -> BTreeMap<String, Vec<&'a Message>>
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut pairs: BTreeMap<String, Vec<&Message>> = BTreeMap::new();
    for message in messages {
        pairs.entry(undirected_key(message)).or_default().push(message);
    }
    pairs
}

/// Activity summary of one relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairSummary {
    /// The [`undirected_key`] of the pair.
    pub key: String,
    /// Messages exchanged in either direction.
    pub messages: usize,
    /// Days with at least one message.
    pub days: usize,
    /// Longest run of consecutive active days.
    pub longest_streak: usize,
    /// Most used emoji in the exchanged messages.
    pub top_emoji: EmojiCount,
}

/// One summary per relationship, in key order, dates in the local time zone.
pub fn pair_summaries<'a, I>(messages: I, top_emoji: usize) -> Vec<PairSummary>
where
    I: IntoIterator<Item = &'a Message>,
{
    pair_summaries_in(messages, top_emoji, &Local)
}

/// One summary per relationship, in key order, dates in `tz`.
pub fn pair_summaries_in<'a, I, Tz>(messages: I, top_emoji: usize, tz: &Tz) -> Vec<PairSummary>
where
    I: IntoIterator<Item = &'a Message>,
    Tz: TimeZone,
{
    group_by_pair(messages)
        .into_iter()
        .map(|(key, bucket)| {
            let days = active_days_in(bucket.iter().copied(), tz);
            let emoji = most_used_emoji(bucket.iter().map(|m| m.content.as_str()));
            PairSummary {
                key,
                messages: bucket.len(),
                days: days.len(),
                longest_streak: longest_streak(days),
                top_emoji: emoji.top(top_emoji),
            }
        })
        .collect()
}
