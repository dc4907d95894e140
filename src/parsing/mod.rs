//! Shared parsing utilities for both export formats.
//!
//! Format-specific readers turn fragment entries into [`RawRecord`]s; the
//! format-independent [`classify`] step turns records into messages.

pub mod classify;
pub mod record;
pub mod repair;

#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "html")]
pub mod html;

// Re-export commonly used items
pub use classify::{ThreadContext, classify};
pub use record::{RawRecord, RecordKind};
pub use repair::{mojibake, repair, repair_if, try_repair};

#[cfg(feature = "json")]
pub use json::{RawThread, parse_json_record, parse_ms_timestamp};

#[cfg(feature = "html")]
pub use html::{HtmlThread, parse_html_thread, parse_html_timestamp};
