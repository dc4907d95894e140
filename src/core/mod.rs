//! Aggregation engine.
//!
//! Pure reducers over message streams. Every function takes any iterator of
//! `&Message`, so the same code runs on the whole corpus, one conversation or
//! one pair bucket. Empty input gives an empty or zero result.
//!
//! - [`calendar`] - Date bucketing, volume tables, streaks
//! - [`emoji`] - Emoji extraction and frequency
//! - [`writers`] - Per-writer statistics and ranking
//! - [`pairs`] - Directed connections and undirected pair summaries
//! - [`reactions`] - Most-reacted ranking
//! - [`engagement`] - Group participant engagement
//! - [`filter`] - Message filtering by date and sender

pub mod calendar;
pub mod emoji;
pub mod engagement;
pub mod filter;
pub mod pairs;
pub mod reactions;
pub mod writers;

// Re-export main types for convenience
pub use calendar::{
    VolumeRow, active_days, active_days_in, calendar, calendar_in, daily_volume, daily_volume_in,
    longest_streak, yearly_volume, yearly_volume_in,
};
pub use emoji::{EmojiCount, count_emoji, extract_emoji, format_emoji_count, most_used_emoji};
pub use engagement::{EngagementReport, EngagementRow, group_engagement, group_engagements};
pub use filter::{FilterConfig, apply_filters, filter_author};
pub use pairs::{
    PairSummary, connections, directed_key, directed_label, group_by_pair, pair_summaries, pair_summaries_in,
    ranked_connections, undirected_key,
};
pub use reactions::{most_reacted, reaction_summary};
pub use writers::{WriterStats, top_writers, writer_stats, writer_stats_in};
