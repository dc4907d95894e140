//! Extraction of message entries from the HTML export.
//!
//! The HTML export has no field names. Every message is an element child of
//! `div[role="main"]`, and its fields sit at fixed positions among the
//! entry's descendant `<div>`s:
//!
//! ```html
//! <div role="main">
//!   <div>Participants: Alice, Bob, Me</div>          <!-- group threads only -->
//!   <div class="pam">
//!     <div>Alice</div>                              <!-- slot 0: sender -->
//!     <div><div><div></div><div>Hello</div><div></div><div></div></div></div>  <!-- slot 1: content -->
//!     <div>Jan 05, 2017 3:04pm</div>                <!-- slot 7: date -->
//!   </div>
//! </div>
//! ```
//!
//! Entries that do not fit this layout are logged and skipped.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::error::{ChatlensError, Result};
use crate::parsing::record::{RawRecord, RecordKind};

/// Position of the sender among an entry's descendant divs.
pub const SENDER_SLOT: usize = 0;
/// Position of the content among an entry's descendant divs.
pub const CONTENT_SLOT: usize = 1;
/// Position of the date string among an entry's descendant divs.
pub const DATE_SLOT: usize = 7;

/// Leading marker of the participant list in group threads.
pub const PARTICIPANTS_MARKER: &str = "Participants:";

/// System notice the export renders as an ordinary message.
const CONNECTED_NOTICE: &str = "You are now connected";

/// Everything read from one HTML fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlThread {
    /// Document title.
    pub title: String,
    /// Names from the leading participant list; present only for groups.
    pub participants: Option<Vec<String>>,
    /// Entries that could be read, in document order.
    pub records: Vec<RawRecord>,
}

impl HtmlThread {
    /// Group status is inferred from the participant list marker.
    pub fn is_group(&self) -> bool {
        self.participants.is_some()
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ChatlensError::html_parse(format!("invalid selector '{css}': {e:?}"), None))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Parses an HTML date string as local wall-clock time.
pub fn parse_html_timestamp(raw: &str, format: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(raw.trim(), format).ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

/// Reads the title, participant marker and message entries of a document.
///
/// Fails only when the document lacks a `<title>` or the main region; single
/// broken entries are skipped.
pub fn parse_html_thread(content: &str, date_format: &str) -> Result<HtmlThread> {
    let document = Html::parse_document(content);
    let title_sel = selector("title")?;
    let main_sel = selector(r#"div[role="main"]"#)?;
    let div_sel = selector("div")?;

    let title = document
        .select(&title_sel)
        .next()
        .map(element_text)
        .ok_or_else(|| ChatlensError::html_parse("document has no <title>", None))?;
    let main = document
        .select(&main_sel)
        .next()
        .ok_or_else(|| ChatlensError::html_parse("document has no div[role=\"main\"]", None))?;

    let mut entries = main.children().filter_map(ElementRef::wrap).peekable();

    let mut participants = None;
    if let Some(first) = entries.peek() {
        let text = element_text(*first);
        if let Some(names) = text.strip_prefix(PARTICIPANTS_MARKER) {
            participants = Some(
                names
                    .split(',')
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .map(str::to_string)
                    .collect(),
            );
            entries.next();
        }
    }

    let records = entries
        .enumerate()
        .filter_map(|(index, entry)| parse_entry(entry, &div_sel, date_format, index))
        .collect();

    Ok(HtmlThread {
        title,
        participants,
        records,
    })
}

fn parse_entry(entry: ElementRef<'_>, div_sel: &Selector, date_format: &str, index: usize) -> Option<RawRecord> {
    let slots: Vec<ElementRef<'_>> = entry.select(div_sel).filter(|div| div.id() != entry.id()).collect();
    if slots.len() <= DATE_SLOT {
        warn!(index, found = slots.len(), "unable to parse entry: missing nested element");
        return None;
    }

    let sender = element_text(slots[SENDER_SLOT]);
    let content = element_text(slots[CONTENT_SLOT]);
    let date = element_text(slots[DATE_SLOT]);

    let Some(timestamp) = parse_html_timestamp(&date, date_format) else {
        warn!(index, date = %date, format = date_format, "unable to parse entry: bad date");
        return None;
    };

    let kind = if content.contains(CONNECTED_NOTICE) {
        RecordKind::Membership
    } else if content.is_empty() {
        RecordKind::Text { content: None }
    } else {
        RecordKind::Text {
            content: Some(content),
        }
    };

    Some(RawRecord::new(sender, timestamp, kind))
}
