//! # Chatlens
//!
//! A Rust library for loading Messenger archive exports into one clean,
//! typed message stream and computing messaging statistics over it.
//!
//! ## Overview
//!
//! An archive is a directory with one subdirectory per conversation. Each
//! conversation is split across *fragments* (`message_1.json`,
//! `message_2.json`, ... or `message.html`) that Chatlens parses, repairs
//! and merges:
//!
//! - **JSON** exports - structured per-message records
//! - **HTML** exports - positional markup, dates in local time
//!
//! Text in JSON exports is usually double-encoded (UTF-8 read as Latin-1);
//! the loader repairs it on the fly.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatlens::config::LoaderConfig;
//! use chatlens::core::{most_reacted, top_writers};
//!
//! fn main() -> chatlens::Result<()> {
//!     let config = LoaderConfig::new("data/private/messages/inbox", "Jane Doe");
//!     let messages = chatlens::load_corpus(&config, "*")?;
//!
//!     for (name, stats) in top_writers(&messages).iter().take(5) {
//!         println!("{name}: {} messages", stats.message_count);
//!     }
//!
//!     if let Some(top) = most_reacted(&messages).first() {
//!         println!("most reacted: {}", top.content);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`loader`] - Archive discovery, fragment merging, optional cache
//!   - [`CorpusLoader`](loader::CorpusLoader), [`ConversationLoader`](loader::ConversationLoader)
//! - [`parser`] - [`FragmentParser`](parser::FragmentParser) trait and [`ExportFormat`](parser::ExportFormat)
//! - [`parsers`] - JSON and HTML fragment parsers
//! - [`parsing`] - Raw record extraction, classification, encoding repair
//! - [`core`] - Aggregations (calendar, emoji, writers, pairs, reactions, engagement, filters)
//! - [`report`] - Plain-text tables
//! - [`config`] - [`LoaderConfig`](config::LoaderConfig)
//! - [`error`] - [`ChatlensError`] and [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod conversation;
pub mod core;
pub mod error;
pub mod loader;
pub mod message;
pub mod parser;
pub mod parsers;
pub mod parsing;
pub mod report;

// Re-export the main types at the crate root for convenience
pub use conversation::Conversation;
pub use error::{ChatlensError, Result};
pub use loader::{load_conversations, load_corpus};
pub use message::{Message, MessageTags, Reaction};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    // Data model
    pub use crate::{Conversation, Message, MessageTags, Reaction};

    // Error types
    pub use crate::error::{ChatlensError, Result};

    // Loading
    pub use crate::config::LoaderConfig;
    pub use crate::loader::{CorpusLoader, NameFilter, load_conversations, load_corpus};
    pub use crate::parser::{ExportFormat, FragmentParser, create_parser};

    // Aggregations
    pub use crate::core::{
        EmojiCount, FilterConfig, PairSummary, WriterStats, apply_filters, connections, daily_volume, filter_author,
        group_engagements, longest_streak, most_reacted, most_used_emoji, pair_summaries, ranked_connections,
        top_writers, yearly_volume,
    };

    // Rendering
    pub use crate::report::Table;
}
