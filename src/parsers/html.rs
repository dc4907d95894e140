//! Messenger HTML fragment parser.
//!
//! The older HTML export carries no thread type and no participant list for
//! direct threads. A leading `Participants:` line marks a group; otherwise the
//! thread is direct and its participants are the title and the archive owner.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::LoaderConfig;
use crate::conversation::Conversation;
use crate::error::Result;
use crate::parser::{ExportFormat, FragmentParser};
use crate::parsing::html::parse_html_thread;
use crate::parsing::{ThreadContext, classify, repair_if};

/// Parser for `message.html` / `message_<n>.html` fragments.
pub struct HtmlFragmentParser {
    config: LoaderConfig,
}

impl HtmlFragmentParser {
    /// Creates a parser with the given configuration.
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    fn parse_content(&self, content: &str) -> Result<Conversation> {
        let thread = parse_html_thread(content, &self.config.html_date_format)?;

        let fix = self.config.fix_encoding;
        let is_group = thread.is_group();
        let title = repair_if(&thread.title, fix);
        let participants: Vec<String> = match &thread.participants {
            Some(names) => names.iter().map(|n| repair_if(n, fix)).collect(),
            None => vec![title.clone(), self.config.self_identity.clone()],
        };

        let ctx = ThreadContext {
            title: &title,
            is_group,
            self_identity: &self.config.self_identity,
            fix_encoding: fix,
        };
        let total = thread.records.len();
        let messages: Vec<_> = thread
            .records
            .into_iter()
            .filter_map(|record| classify(record, &ctx))
            .collect();

        debug!(title = %title, entries = total, kept = messages.len(), is_group, "parsed HTML fragment");

        Ok(Conversation::new(title, participants, messages, is_group))
    }
}

impl Default for HtmlFragmentParser {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

impl FragmentParser for HtmlFragmentParser {
    fn name(&self) -> &'static str {
        "Messenger HTML"
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Html
    }

    fn parse(&self, path: &Path) -> Result<Conversation> {
        let content = fs::read_to_string(path)?;
        self.parse_content(&content).map_err(|e| e.with_path(path))
    }

    fn parse_str(&self, content: &str) -> Result<Conversation> {
        self.parse_content(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> HtmlFragmentParser {
        HtmlFragmentParser::new(LoaderConfig::new("inbox", "Me"))
    }

    fn entry(sender: &str, content: &str, date: &str) -> String {
        format!(
            r#"<div class="pam"><div>{sender}</div><div><div><div></div><div>{content}</div><div></div><div></div></div></div><div>{date}</div></div>"#
        )
    }

    fn document(title: &str, body: &str) -> String {
        format!(r#"<html><head><title>{title}</title></head><body><div role="main">{body}</div></body></html>"#)
    }

    #[test]
    fn test_parser_name() {
        assert_eq!(parser().name(), "Messenger HTML");
        assert_eq!(parser().format(), ExportFormat::Html);
    }

    #[test]
    fn test_direct_thread() {
        // newest first, as the export writes them
        let body = format!(
            "{}{}{}",
            entry("Me", "Hi Alice", "Jan 05, 2017 3:06pm"),
            entry("Alice", "You are now connected on Messenger", "Jan 05, 2017 3:00pm"),
            entry("Alice", "Hello", "Jan 05, 2017 3:04pm"),
        );
        let conv = parser().parse_str(&document("Alice", &body)).unwrap();

        assert!(!conv.is_group);
        assert_eq!(conv.participants.len(), 2);
        assert!(conv.participants.contains("Alice"));
        assert!(conv.participants.contains("Me"));

        assert_eq!(conv.len(), 2);
        assert_eq!(conv.messages[0].content, "Hello");
        assert_eq!(conv.messages[0].receiver, "Me");
        assert_eq!(conv.messages[1].receiver, "Alice");
    }

    #[test]
    fn test_group_thread() {
        let body = format!(
            "<div>Participants: Alice, Bob</div>{}",
            entry("Bob", "yo", "Feb 10, 2018 11:00am")
        );
        let conv = parser().parse_str(&document("Crew", &body)).unwrap();

        assert!(conv.is_group);
        assert_eq!(conv.participants.len(), 2);
        assert_eq!(conv.messages[0].receiver, "Crew");
        assert!(conv.messages[0].tags.group_chat);
    }

    #[test]
    fn test_custom_date_format() {
        let config = LoaderConfig::new("inbox", "Me").with_html_date_format("%Y-%m-%d %H:%M");
        let body = entry("Alice", "hi", "2019-06-01 08:15");
        let conv = HtmlFragmentParser::new(config)
            .parse_str(&document("Alice", &body))
            .unwrap();
        assert_eq!(conv.len(), 1);
    }

    #[test]
    fn test_missing_title_is_parse_error() {
        let err = parser()
            .parse_str(r#"<html><body><div role="main"></div></body></html>"#)
            .unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_parse_file_attaches_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("message.html");
        std::fs::write(&path, "<html><head><title>T</title></head></html>").unwrap();
        let err = parser().parse(&path).unwrap_err();
        assert!(err.to_string().contains("message.html"));
    }
}
