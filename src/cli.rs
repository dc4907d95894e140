//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - Global options (archive location, owner, cache, date range)
//! - [`Command`] - One subcommand per report
//!
//! The library types stay free of clap; [`Args::loader_config`] and
//! [`Args::filter_config`] translate the parsed flags.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_ARCHIVE_ROOT, LoaderConfig};
use crate::core::filter::FilterConfig;
use crate::error::Result;

/// Analyze a Messenger archive export: who you talk to, when, and how much.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens --me \"Jane Doe\" convos
    chatlens --me \"Jane Doe\" top-writers alice
    chatlens --archive ./inbox --me \"Jane Doe\" daily --after 2020-01-01
    CHATLENS_ME=\"Jane Doe\" chatlens most-reacted --limit 10")]
pub struct Args {
    /// Directory holding one subdirectory per conversation
    #[arg(long, env = "CHATLENS_ARCHIVE", value_name = "DIR", default_value = DEFAULT_ARCHIVE_ROOT)]
    pub archive: PathBuf,

    /// Your display name as it appears in the archive
    #[arg(long, env = "CHATLENS_ME", value_name = "NAME")]
    pub me: String,

    /// Cache parsed fragments in this directory
    #[arg(long, env = "CHATLENS_CACHE", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Keep text exactly as exported (skip the encoding repair)
    #[arg(long)]
    pub raw_encoding: bool,

    /// Only count messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", global = true)]
    pub after: Option<String>,

    /// Only count messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", global = true)]
    pub before: Option<String>,

    /// Enable debug logging (every skipped record is reported)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Report to print
    #[command(subcommand)]
    pub command: Command,
}

/// Available reports.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List conversations (groups and one-to-one) with member and message counts
    Convos {
        /// Case-insensitive substring of the conversation title ("*" for all)
        #[arg(default_value = "*")]
        filter: String,
    },

    /// Your messages, words and characters per day
    Daily,

    /// Your messages, words and characters per year
    Yearly,

    /// Rank the senders of one-to-one messages
    TopWriters {
        /// Case-insensitive substring of the conversation title ("*" for all)
        #[arg(default_value = "*")]
        filter: String,
    },

    /// Per-relationship activity, streaks and favourite emoji
    People {
        /// Number of emoji to show per relationship
        #[arg(long, default_value_t = 5)]
        emoji: usize,
    },

    /// Messages with the most reactions
    MostReacted {
        /// Number of messages to show
        #[arg(long, default_value_t = 30)]
        limit: usize,
    },

    /// Group participants with little or no engagement
    Creeps {
        /// Case-insensitive substring of the conversation title ("*" for all)
        #[arg(default_value = "*")]
        filter: String,
    },

    /// Strongest directed connections
    Connections {
        /// Number of connections to show
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

impl Command {
    /// The conversation title filter, for commands that take one.
    pub fn title_filter(&self) -> Option<&str> {
        match self {
            Command::Convos { filter } | Command::TopWriters { filter } | Command::Creeps { filter } => {
                Some(filter.as_str())
            }
            _ => None,
        }
    }
}

impl Args {
    /// Builds the loader configuration from the flags.
    pub fn loader_config(&self) -> LoaderConfig {
        let config = LoaderConfig::new(&self.archive, &self.me).with_fix_encoding(!self.raw_encoding);
        match &self.cache_dir {
            Some(dir) => config.with_cache_dir(dir),
            None => config,
        }
    }

    /// Builds the date filter from `--after` / `--before`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`](crate::ChatlensError::InvalidDate)
    /// for a malformed date.
    pub fn filter_config(&self) -> Result<FilterConfig> {
        let mut filter = FilterConfig::new();
        if let Some(after) = &self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(before) = &self.before {
            filter = filter.with_date_to(before)?;
        }
        Ok(filter)
    }
}
