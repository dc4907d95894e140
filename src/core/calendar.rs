//! Calendar bucketing, volume tables and streaks.
//!
//! Dates are calendar dates in a time zone: [`Local`] for the plain
//! functions, any [`TimeZone`] for the `_in` variants.
//!
//! # Example
//!
//! ```
//! use chatlens::Message;
//! use chatlens::core::calendar::{active_days_in, longest_streak};
//! use chrono::{TimeZone, Utc};
//!
//! let day = |d| Utc.with_ymd_and_hms(2024, 3, d, 12, 0, 0).unwrap();
//! let messages = vec![
//!     Message::new("Alice", "Me", day(1), "a"),
//!     Message::new("Alice", "Me", day(2), "b"),
//!     Message::new("Alice", "Me", day(3), "c"),
//!     Message::new("Alice", "Me", day(9), "d"),
//! ];
//!
//! let days = active_days_in(&messages, &Utc);
//! assert_eq!(days.len(), 4);
//! assert_eq!(longest_streak(days), 2);
//! ```

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Local, NaiveDate, TimeZone};

use crate::Message;

/// Message, word and character totals for one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VolumeRow {
    /// Number of messages.
    pub messages: usize,
    /// Whitespace-separated tokens.
    pub words: usize,
    /// Characters.
    pub chars: usize,
}

impl VolumeRow {
    /// Adds one message to the totals.
    pub fn add(&mut self, message: &Message) {
        self.messages += 1;
        self.words += message.word_count();
        self.chars += message.char_count();
    }
}

/// Groups messages by local calendar date.
pub fn calendar<'a, I>(messages: I) -> BTreeMap<NaiveDate, Vec<&'a Message>>
where
    I: IntoIterator<Item = &'a Message>,
{
    calendar_in(messages, &Local)
}

/// Groups messages by calendar date in `tz`.
pub fn calendar_in<'a, I, Tz>(messages: I, tz: &Tz) -> BTreeMap<NaiveDate, Vec<&'a Message>>
where
    I: IntoIterator<Item = &'a Message>,
    Tz: TimeZone,
{
    let mut days: BTreeMap<NaiveDate, Vec<&Message>> = BTreeMap::new();
    for message in messages {
        days.entry(message.date_in(tz)).or_default().push(message);
    }
    days
}

/// Local dates with at least one message.
pub fn active_days<'a, I>(messages: I) -> BTreeSet<NaiveDate>
where
    I: IntoIterator<Item = &'a Message>,
{
    active_days_in(messages, &Local)
}

/// Dates in `tz` with at least one message.
pub fn active_days_in<'a, I, Tz>(messages: I, tz: &Tz) -> BTreeSet<NaiveDate>
where
    I: IntoIterator<Item = &'a Message>,
    Tz: TimeZone,
{
    messages.into_iter().map(|m| m.date_in(tz)).collect()
}

/// Volume per local date.
pub fn daily_volume<'a, I>(messages: I) -> BTreeMap<NaiveDate, VolumeRow>
where
    I: IntoIterator<Item = &'a Message>,
{
    daily_volume_in(messages, &Local)
}

/// Volume per date in `tz`.
pub fn daily_volume_in<'a, I, Tz>(messages: I, tz: &Tz) -> BTreeMap<NaiveDate, VolumeRow>
where
    I: IntoIterator<Item = &'a Message>,
    Tz: TimeZone,
{
    let mut rows: BTreeMap<NaiveDate, VolumeRow> = BTreeMap::new();
    for message in messages {
        rows.entry(message.date_in(tz)).or_default().add(message);
    }
    rows
}

/// Volume per local calendar year.
pub fn yearly_volume<'a, I>(messages: I) -> BTreeMap<i32, VolumeRow>
where
    I: IntoIterator<Item = &'a Message>,
{
    yearly_volume_in(messages, &Local)
}

/// Volume per calendar year in `tz`.
pub fn yearly_volume_in<'a, I, Tz>(messages: I, tz: &Tz) -> BTreeMap<i32, VolumeRow>
where
    I: IntoIterator<Item = &'a Message>,
    Tz: TimeZone,
{
    let mut rows: BTreeMap<i32, VolumeRow> = BTreeMap::new();
    for message in messages {
        rows.entry(message.date_in(tz).year()).or_default().add(message);
    }
    rows
}

/// Longest run of consecutive dates, counted in day-to-day steps.
///
/// Five consecutive dates give 4; a single date or none gives 0. Order and
/// duplicates in the input do not matter.
pub fn longest_streak<I>(dates: I) -> usize
where
    I: IntoIterator<Item = NaiveDate>,
{
    let dates: BTreeSet<NaiveDate> = dates.into_iter().collect();

    let mut longest = 0;
    let mut current = 0;
    let mut previous: Option<NaiveDate> = None;
    for date in dates {
        if previous.and_then(|p| p.succ_opt()) == Some(date) {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
        previous = Some(date);
    }
    longest
}
