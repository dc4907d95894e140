//! Date-window and sender selection over message streams.
//!
//! The CLI builds a [`FilterConfig`] from `--after` / `--before` and trims
//! every loaded conversation with it; the `daily` and `yearly` reports use
//! [`filter_author`] to keep only the archive owner's messages.
//!
//! ```
//! use chatlens::core::filter::{FilterConfig, apply_filters};
//! use chatlens::Message;
//! use chrono::{TimeZone, Utc};
//!
//! # fn main() -> chatlens::Result<()> {
//! let at = |m| Utc.with_ymd_and_hms(2024, m, 15, 12, 0, 0).unwrap();
//! let messages = vec![
//!     Message::new("Alice", "Me", at(1), "Old"),
//!     Message::new("Alice", "Me", at(6), "New"),
//!     Message::new("Bob", "Me", at(6), "Other"),
//! ];
//!
//! let window = FilterConfig::new()
//!     .with_sender("alice")
//!     .with_date_from("2024-06-01")?
//!     .with_date_to("2024-12-31")?;
//!
//! let kept = apply_filters(messages, &window);
//! assert_eq!(kept.len(), 1);
//! assert_eq!(kept[0].content, "New");
//! # Ok(())
//! # }
//! ```
//!
//! Day bounds are UTC and inclusive at both ends. Sender and window must
//! both match when both are set.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};

use crate::Message;
use crate::error::{ChatlensError, Result};

/// Which messages survive: an optional time window and an optional sender.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Earliest timestamp kept.
    pub after: Option<DateTime<Utc>>,

    /// Latest timestamp kept.
    pub before: Option<DateTime<Utc>>,

    /// Lowercased fragment the sender name must contain.
    pub sender: Option<String>,
}

impl FilterConfig {
    /// Keeps everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the window at midnight UTC of `day` (`YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// [`ChatlensError::InvalidDate`] for anything that is not a calendar day.
    pub fn with_date_from(mut self, day: &str) -> Result<Self> {
        self.after = Some(day_start(parse_day(day)?));
        Ok(self)
    }

    /// Closes the window at the last millisecond of `day` (`YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// [`ChatlensError::InvalidDate`] for anything that is not a calendar day,
    /// or for the last day chrono can represent.
    pub fn with_date_to(mut self, day: &str) -> Result<Self> {
        let next = parse_day(day)?.succ_opt().ok_or_else(|| ChatlensError::invalid_date(day))?;
        self.before = Some(day_start(next) - TimeDelta::milliseconds(1));
        Ok(self)
    }

    /// Keeps senders whose name contains `name`, ignoring case.
    #[must_use]
    pub fn with_sender(mut self, name: impl Into<String>) -> Self {
        self.sender = Some(name.into().to_lowercase());
        self
    }

    /// Opens the window at an exact instant.
    #[must_use]
    pub fn with_after(mut self, instant: DateTime<Utc>) -> Self {
        self.after = Some(instant);
        self
    }

    /// `false` when every message would pass.
    pub fn is_active(&self) -> bool {
        self.after.is_some() || self.before.is_some() || self.sender.is_some()
    }

    pub fn matches(&self, message: &Message) -> bool {
        let in_window = self.after.is_none_or(|after| message.timestamp >= after)
            && self.before.is_none_or(|before| message.timestamp <= before);
        in_window
            && self
                .sender
                .as_deref()
                .is_none_or(|name| message.sender.to_lowercase().contains(name))
    }
}

fn parse_day(day: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| ChatlensError::invalid_date(day))
}

fn day_start(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// Keeps the messages `config` matches. An inactive config returns the input as is.
pub fn apply_filters(messages: Vec<Message>, config: &FilterConfig) -> Vec<Message> {
    if !config.is_active() {
        return messages;
    }
    messages.into_iter().filter(|m| config.matches(m)).collect()
}

/// Messages whose sender contains `name`, case-insensitively.
pub fn filter_author<'a, I>(messages: I, name: &str) -> Vec<&'a Message>
where
    I: IntoIterator<Item = &'a Message>,
{
    let config = FilterConfig::new().with_sender(name);
    messages.into_iter().filter(|m| config.matches(m)).collect()
}
