//! Archive ingestion.
//!
//! - [`CorpusLoader`] discovers conversation directories and flattens them
//! - [`ConversationLoader`] merges the fragments of one directory
//! - [`FragmentSource`] is the per-file seam; [`CachedSource`] wraps it with
//!   an on-disk cache

#[cfg(feature = "cache")]
mod cache;
mod conversation;
mod corpus;
mod source;

#[cfg(feature = "cache")]
pub use cache::CachedSource;
pub use conversation::ConversationLoader;
pub use corpus::{CorpusLoader, NameFilter, load_conversations, load_corpus};
pub use source::{FragmentSource, ParserSource};
