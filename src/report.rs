//! Plain-text rendering of analytics results.
//!
//! Every report is a [`prettytable`] table with a title row, a dashed rule
//! under it and no borders. The builders in this module turn reducer output
//! into tables; printing is left to the caller.
//!
//! # Example
//!
//! ```rust
//! use chatlens::core::WriterStats;
//! use chatlens::report::writers_table;
//!
//! let stats = WriterStats { message_count: 12, ..WriterStats::default() };
//! let table = writers_table(&[("Alice".to_string(), stats)]);
//!
//! assert_eq!(table.len(), 1);
//! assert!(table.to_string().contains("Alice"));
//! ```

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use prettytable::format::{FormatBuilder, LinePosition, LineSeparator, TableFormat};
use prettytable::row;

pub use prettytable::Table;

use crate::Message;
use crate::conversation::Conversation;
use crate::core::calendar::VolumeRow;
use crate::core::engagement::EngagementReport;
use crate::core::pairs::{PairSummary, directed_key, directed_label};
use crate::core::reactions::reaction_summary;
use crate::core::writers::WriterStats;

/// Width limit for names in the top-writers table.
pub const NAME_WIDTH: usize = 30;

/// Width limit for pair keys in the people table.
pub const PAIR_WIDTH: usize = 40;

/// Borderless layout with a dashed rule under the titles.
fn report_format() -> TableFormat {
    FormatBuilder::new()
        .column_separator(' ')
        .separator(LinePosition::Title, LineSeparator::new('-', ' ', ' ', ' '))
        .padding(0, 1)
        .build()
}

fn report_table(titles: prettytable::Row) -> Table {
    let mut table = Table::new();
    table.set_format(report_format());
    table.set_titles(titles);
    table
}

/// Shortens `text` to `width` chars, ending in `...` when cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut short: String = text.chars().take(keep).collect();
    short.push_str("...");
    short
}

// ============================================================================
// Report builders
// ============================================================================

/// Title, member count and message count per conversation.
pub fn conversations_table(conversations: &[Conversation]) -> Table {
    let mut table = report_table(row!["name", "members", "messages"]);
    for conversation in conversations {
        table.add_row(row![
            conversation.title,
            r->conversation.participants.len(),
            r->conversation.len()
        ]);
    }
    table
}

fn volume_table<K: ToString>(key: &str, rows: impl IntoIterator<Item = (K, VolumeRow)>) -> Table {
    let mut table = report_table(row![key, "# msgs", "words", "chars"]);
    for (key, row) in rows {
        table.add_row(row![key.to_string(), r->row.messages, r->row.words, r->row.chars]);
    }
    table
}

/// Volume per date.
pub fn daily_table(rows: &BTreeMap<NaiveDate, VolumeRow>) -> Table {
    volume_table("date", rows.iter().map(|(date, row)| (date, *row)))
}

/// Volume per year.
pub fn yearly_table(rows: &BTreeMap<i32, VolumeRow>) -> Table {
    volume_table("year", rows.iter().map(|(year, row)| (year, *row)))
}

/// Name, messages, active days and words per writer, in the given order.
pub fn writers_table(ranking: &[(String, WriterStats)]) -> Table {
    let mut table = report_table(row!["name", "msgs", "days", "words"]);
    for (name, stats) in ranking {
        table.add_row(row![
            truncate(name, NAME_WIDTH),
            r->stats.message_count,
            r->stats.days(),
            r->stats.word_count
        ]);
    }
    table
}

/// One row per relationship.
pub fn pairs_table(summaries: &[PairSummary]) -> Table {
    let mut table = report_table(row!["pair", "msgs", "days", "max streak", "most used emoji"]);
    for summary in summaries {
        table.add_row(row![
            truncate(&summary.key, PAIR_WIDTH),
            r->summary.messages,
            r->summary.days,
            r->summary.longest_streak,
            summary.top_emoji
        ]);
    }
    table
}

/// Directed pair weights.
pub fn connections_table(ranked: &[((String, String), usize)]) -> Table {
    let mut table = report_table(row!["connection", "messages"]);
    for ((from, to), weight) in ranked {
        table.add_row(row![directed_label(from, to), r->weight]);
    }
    table
}

/// Participants of one group, least active first.
pub fn engagement_table(report: &EngagementReport) -> Table {
    let mut table = report_table(row!["name", "messages", "reacts"]);
    for row in &report.rows {
        table.add_row(row![row.name, r->row.messages, r->row.reactions]);
    }
    table
}

/// `No engagement from: a, b` line of an engagement report.
pub fn silent_line(report: &EngagementReport) -> String {
    let names: Vec<&str> = report.silent.iter().map(String::as_str).collect();
    format!("No engagement from: {}", names.join(", "))
}

/// One-line rendering of a reacted message.
///
/// `2024-01-05 | Alice -> Me: that's hilarious  (2x 😆, 1x ❤)`
pub fn message_line(message: &Message) -> String {
    format!(
        "{} | {}: {}  ({})",
        message.date_in(&Local),
        directed_key(message),
        message.content,
        reaction_summary(message)
    )
}
