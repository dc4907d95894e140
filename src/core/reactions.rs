//! Most-reacted message ranking.

use crate::Message;
use crate::core::emoji::{EmojiCount, count_emoji};

/// Messages with at least one reaction, most reacted first.
///
/// The sort is stable: messages with equal reaction counts keep their input
/// order.
///
/// # Example
///
/// ```
/// use chatlens::{Message, Reaction};
/// use chatlens::core::reactions::most_reacted;
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let messages = vec![
///     Message::new("Alice", "Me", now, "meh"),
///     Message::new("Alice", "Me", now, "funny").with_reaction(Reaction::new("😆", "Me")),
/// ];
///
/// let ranked = most_reacted(&messages);
/// assert_eq!(ranked.len(), 1);
/// assert_eq!(ranked[0].content, "funny");
/// ```
pub fn most_reacted<'a, I>(messages: I) -> Vec<&'a Message>
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut reacted: Vec<&Message> = messages.into_iter().filter(|m| m.reaction_count() > 0).collect();
    reacted.sort_by_key(|m| std::cmp::Reverse(m.reaction_count()));
    reacted
}

/// Emoji counts of a message's reactions.
pub fn reaction_summary(message: &Message) -> EmojiCount {
    count_emoji(&message.reaction_text())
}
