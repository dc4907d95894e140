//! Fragment parsers for the two export formats.
//!
//! Each parser implements the [`FragmentParser`](crate::parser::FragmentParser)
//! trait.
//!
//! # Available Parsers
//!
//! - [`JsonFragmentParser`] - Parses structured `message_<n>.json` fragments
//! - [`HtmlFragmentParser`] - Parses markup `message.html` fragments

#[cfg(feature = "json")]
mod json;

#[cfg(feature = "html")]
mod html;

#[cfg(feature = "json")]
pub use json::JsonFragmentParser;

#[cfg(feature = "html")]
pub use html::HtmlFragmentParser;
