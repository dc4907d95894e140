//! Emoji extraction and frequency counting.
//!
//! Only three Unicode blocks count as emoji here: Miscellaneous Symbols and
//! Dingbats (U+2600..U+27BF), Miscellaneous Symbols and Pictographs plus
//! Emoticons (U+1F300..U+1F64F), and Transport and Map Symbols
//! (U+1F680..U+1F6FF). Each matching code point is one symbol; variation
//! selectors and skin-tone modifiers are not counted.
//!
//! # Example
//!
//! ```
//! use chatlens::core::emoji::{count_emoji, format_emoji_count};
//!
//! let counts = count_emoji("👍👍😋😋❤");
//! assert_eq!(counts.get("👍"), 2);
//! assert_eq!(format_emoji_count(&counts), "2x 😋, 2x 👍, 1x ❤");
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Character class matched as a single emoji.
pub const EMOJI_PATTERN: &str = r"[\x{2600}-\x{27BF}\x{1F300}-\x{1F64F}\x{1F680}-\x{1F6FF}]";

static EMOJI_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(EMOJI_PATTERN).expect("emoji pattern is valid"));

/// Iterates over the emoji in `text`, in order of appearance.
pub fn extract_emoji(text: &str) -> impl Iterator<Item = &str> {
    EMOJI_RE.find_iter(text).map(|m| m.as_str())
}

/// Frequency of each emoji symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmojiCount {
    counts: BTreeMap<String, usize>,
}

impl EmojiCount {
    /// Creates an empty count.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every emoji in `text`.
    pub fn add_text(&mut self, text: &str) {
        for symbol in extract_emoji(text) {
            self.add(symbol, 1);
        }
    }

    /// Adds `n` occurrences of `symbol`.
    pub fn add(&mut self, symbol: &str, n: usize) {
        if n == 0 {
            return;
        }
        *self.counts.entry(symbol.to_string()).or_default() += n;
    }

    /// Adds all counts of `other`.
    pub fn merge(&mut self, other: &EmojiCount) {
        for (symbol, n) in &other.counts {
            self.add(symbol, *n);
        }
    }

    /// Occurrences of `symbol`.
    pub fn get(&self, symbol: &str) -> usize {
        self.counts.get(symbol).copied().unwrap_or(0)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no emoji was counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total occurrences over all symbols.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Symbols ordered by descending `(count, symbol)`.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self.counts.iter().map(|(s, n)| (s.as_str(), *n)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(a.0)));
        ranked
    }

    /// The `n` most frequent symbols.
    #[must_use]
    pub fn top(&self, n: usize) -> EmojiCount {
        let counts = self
            .ranked()
            .into_iter()
            .take(n)
            .map(|(s, count)| (s.to_string(), count))
            .collect();
        EmojiCount { counts }
    }
}

impl fmt::Display for EmojiCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (symbol, n)) in self.ranked().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{n}x {symbol}")?;
        }
        Ok(())
    }
}

/// Counts the emoji in one text.
pub fn count_emoji(text: &str) -> EmojiCount {
    let mut counts = EmojiCount::new();
    counts.add_text(text);
    counts
}

/// Sums emoji counts over many texts.
pub fn most_used_emoji<'a, I>(texts: I) -> EmojiCount
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = EmojiCount::new();
    for text in texts {
        counts.add_text(text);
    }
    counts
}

/// Renders counts as `"{count}x {symbol}"` joined by `", "`, most frequent first.
pub fn format_emoji_count(counts: &EmojiCount) -> String {
    counts.to_string()
}
