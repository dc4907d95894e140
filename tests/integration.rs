//! Integration tests: archives on disk through loading and every report.

use chatlens::config::LoaderConfig;
use chatlens::core::{
    active_days, group_engagements, most_reacted, pair_summaries, ranked_connections, top_writers,
};
use chatlens::loader::{ConversationLoader, CorpusLoader};
use chatlens::parsing::mojibake;
use chatlens::prelude::*;
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const BASE_MS: i64 = 1_700_000_000_000;
const MINUTE_MS: i64 = 60_000;

// ============================================================================
// Fixtures
// ============================================================================

fn msg(sender: &str, minute: i64, content: &str) -> Value {
    json!({"sender_name": sender, "timestamp_ms": BASE_MS + minute * MINUTE_MS, "content": content, "type": "Generic"})
}

fn reacted(sender: &str, minute: i64, content: &str, reaction: &str, actor: &str) -> Value {
    let mut value = msg(sender, minute, content);
    value["reactions"] = json!([{"reaction": reaction, "actor": actor}]);
    value
}

fn write_fragment(root: &Path, dir: &str, file: &str, title: &str, people: &[&str], group: bool, messages: Vec<Value>) {
    let dir = root.join(dir);
    fs::create_dir_all(&dir).unwrap();
    let participants: Vec<Value> = people.iter().map(|p| json!({"name": p})).collect();
    let content = json!({
        "title": title,
        "participants": participants,
        "thread_type": if group { "RegularGroup" } else { "Regular" },
        "messages": messages,
    });
    fs::write(dir.join(file), content.to_string()).unwrap();
}

/// Four conversations: Alice (two fragments), Bob, Carol and the "Crew" group.
fn archive() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    let r = root.path();

    write_fragment(r, "alice_1", "message_1.json", "Alice", &["Alice", "Me"], false, vec![
        msg("Alice", 0, "hi"),
        msg("Me", 10, "sup"),
    ]);
    write_fragment(r, "alice_1", "message_2.json", "Alice", &["Alice", "Me"], false, vec![
        reacted("Alice", 5, "there 😆", "😆", "Me"),
        json!({"sender_name": "Alice", "timestamp_ms": BASE_MS + MINUTE_MS, "type": "Subscribe"}),
    ]);
    write_fragment(r, "bob_2", "message_1.json", "Bob", &["Bob", "Me"], false, vec![
        msg("Bob", 0, "b1"),
        msg("Bob", 1, "b2"),
        msg("Bob", 2, "b3"),
        msg("Me", 3, "ok"),
    ]);
    write_fragment(r, "carol_3", "message_1.json", "Carol", &["Carol", "Me"], false, vec![msg("Carol", 0, "c")]);
    write_fragment(r, "crew_4", "message_1.json", "Crew", &["Alice", "Bob", "Dave", "Me"], true, vec![
        reacted("Alice", 0, "group hi", "❤", "Bob"),
        msg("Me", 1, "yo"),
    ]);
    root
}

fn config(root: &TempDir) -> LoaderConfig {
    LoaderConfig::new(root.path(), "Me")
}

fn at_minute(minute: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(BASE_MS + minute * MINUTE_MS).unwrap()
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_fragments_merge_in_time_order() {
    let root = archive();
    let convs = load_conversations(&config(&root), "alice").unwrap();
    assert_eq!(convs.len(), 1);

    let alice = &convs[0];
    let times: Vec<_> = alice.messages.iter().map(|m| m.timestamp).collect();
    assert_eq!(times, vec![at_minute(0), at_minute(5), at_minute(10)]);
    assert_eq!(alice.participants.len(), 2);
    assert!(!alice.is_group);
}

#[test]
fn test_membership_events_never_surface() {
    let root = archive();
    let messages = load_corpus(&config(&root), "*").unwrap();
    assert!(messages.iter().all(|m| m.timestamp != at_minute(1) || m.sender != "Alice"));
    assert_eq!(messages.len(), 10);
}

#[test]
fn test_direct_and_group_receivers() {
    let root = archive();
    let messages = load_corpus(&config(&root), "*").unwrap();

    let from_alice = messages.iter().find(|m| m.content == "hi").unwrap();
    assert_eq!(from_alice.receiver, "Me");

    let mine = messages.iter().find(|m| m.content == "sup").unwrap();
    assert_eq!(mine.receiver, "Alice");

    let group = messages.iter().find(|m| m.content == "group hi").unwrap();
    assert_eq!(group.receiver, "Crew");
    assert!(group.is_group());
}

#[test]
fn test_unmatched_filter_is_empty() {
    let root = archive();
    let messages = load_corpus(&config(&root), "nobody-by-this-name").unwrap();
    assert!(messages.is_empty());
}

#[test]
fn test_title_mismatch_is_fatal() {
    let root = archive();
    write_fragment(root.path(), "alice_1", "message_3.json", "Alicia", &["Alice", "Me"], false, vec![msg(
        "Alice", 20, "late",
    )]);

    let err = load_corpus(&config(&root), "*").unwrap_err();
    assert!(err.is_consistency_violation());
}

#[test]
fn test_unparsable_fragment_is_skipped() {
    let root = archive();
    fs::write(root.path().join("bob_2").join("message_2.json"), "{ not json").unwrap();

    let convs = load_conversations(&config(&root), "bob").unwrap();
    assert_eq!(convs[0].len(), 4);
}

#[test]
fn test_directory_without_fragments_is_skipped() {
    let root = archive();
    let stickers = root.path().join("stickers_used");
    fs::create_dir(&stickers).unwrap();
    fs::write(stickers.join("sticker.png"), "png").unwrap();

    let convs = load_conversations(&config(&root), "*").unwrap();
    let titles: Vec<_> = convs.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Alice", "Bob", "Carol", "Crew"]);
}

#[test]
fn test_directory_of_broken_fragments_errors() {
    let root = archive();
    let broken = root.path().join("broken_5");
    fs::create_dir(&broken).unwrap();
    fs::write(broken.join("message_1.json"), "{ not json").unwrap();

    let err = load_corpus(&config(&root), "*").unwrap_err();
    assert!(matches!(err, ChatlensError::NoFragments { .. }));
}

#[test]
fn test_missing_archive_root() {
    let root = archive();
    let err = load_corpus(&LoaderConfig::new(root.path().join("nope"), "Me"), "*").unwrap_err();
    assert!(matches!(err, ChatlensError::InvalidArchive { .. }));
}

#[test]
fn test_double_encoded_text_is_repaired() {
    let root = tempfile::tempdir().unwrap();
    let mangled = mojibake("café 😆");
    write_fragment(root.path(), "zoe_1", "message_1.json", "Zoë", &["Zoë", "Me"], false, vec![msg(
        "Zoë", 0, &mangled,
    )]);
    let title_mangled = mojibake("Zoë");
    let raw = fs::read_to_string(root.path().join("zoe_1").join("message_1.json"))
        .unwrap()
        .replace("Zoë", &title_mangled);
    fs::write(root.path().join("zoe_1").join("message_1.json"), raw).unwrap();

    let convs = load_conversations(&config(&root), "*").unwrap();
    assert_eq!(convs[0].title, "Zoë");
    assert_eq!(convs[0].messages[0].content, "café 😆");
    assert_eq!(convs[0].messages[0].sender, "Zoë");

    let raw = load_conversations(&config(&root).with_fix_encoding(false), "*").unwrap();
    assert_eq!(raw[0].messages[0].content, mangled);
}

#[cfg(feature = "html")]
#[test]
fn test_html_fragment_loads() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("dana_1");
    fs::create_dir_all(&dir).unwrap();
    let entry = |sender: &str, content: &str, date: &str| {
        format!(
            r#"<div class="pam"><div>{sender}</div><div><div><div></div><div>{content}</div><div></div><div></div></div></div><div>{date}</div></div>"#
        )
    };
    let html = format!(
        r#"<html><head><title>Dana</title></head><body><div role="main">{}{}</div></body></html>"#,
        entry("Dana", "hello there", "Mar 02, 2016 9:15am"),
        entry("Me", "hey Dana", "Mar 02, 2016 9:20am"),
    );
    fs::write(dir.join("message.html"), html).unwrap();

    let convs = load_conversations(&config(&root), "*").unwrap();
    assert_eq!(convs.len(), 1);
    let dana = &convs[0];
    assert_eq!(dana.title, "Dana");
    assert_eq!(dana.len(), 2);
    assert_eq!(dana.messages[0].receiver, "Me");
    assert_eq!(dana.messages[1].receiver, "Dana");

    let expected = Local
        .with_ymd_and_hms(2016, 3, 2, 9, 15, 0)
        .earliest()
        .unwrap()
        .with_timezone(&Utc);
    assert_eq!(dana.messages[0].timestamp, expected);
    assert_eq!(dana.messages[1].timestamp - dana.messages[0].timestamp, Duration::minutes(5));
}

#[cfg(feature = "cache")]
#[test]
fn test_cache_serves_second_load() {
    let root = archive();
    let cache = tempfile::tempdir().unwrap();
    let cached = config(&root).with_cache_dir(cache.path());

    let first = load_corpus(&cached, "carol").unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(fs::read_dir(cache.path()).unwrap().count(), 1);

    // Entries are never invalidated: a rewritten fragment is still served from cache
    write_fragment(root.path(), "carol_3", "message_1.json", "Carol", &["Carol", "Me"], false, vec![
        msg("Carol", 0, "c"),
        msg("Carol", 1, "new"),
    ]);
    let second = load_corpus(&cached, "carol").unwrap();
    assert_eq!(second, first);

    let uncached = load_corpus(&config(&root), "carol").unwrap();
    assert_eq!(uncached.len(), 2);
}

#[cfg(feature = "cache")]
#[test]
fn test_cache_keeps_similar_names_apart() {
    let root = tempfile::tempdir().unwrap();
    let r = root.path();
    write_fragment(r, "jörg", "message_1.json", "Jörg", &["Jörg", "Me"], false, vec![msg("Jörg", 0, "hallo")]);
    write_fragment(r, "jürg", "message_1.json", "Jürg", &["Jürg", "Me"], false, vec![msg("Jürg", 0, "grüezi")]);

    let cache = tempfile::tempdir().unwrap();
    let cached = config(&root).with_cache_dir(cache.path());

    for _ in 0..2 {
        let convs = load_conversations(&cached, "*").unwrap();
        let titles: Vec<_> = convs.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Jörg", "Jürg"]);
    }
    assert_eq!(fs::read_dir(cache.path()).unwrap().count(), 2);
}

#[test]
fn test_custom_source() {
    struct Fixed;

    impl FragmentSource for Fixed {
        fn load_fragment(&self, _path: &Path, _format: ExportFormat) -> Result<Conversation> {
            Ok(Conversation::new(
                "Fixed",
                vec!["Me".to_string(), "X".to_string()],
                vec![Message::new("X", "Me", at_minute(0), "stub")],
                false,
            ))
        }
    }

    use chatlens::loader::FragmentSource;

    let root = archive();
    let loader = CorpusLoader::with_loader(config(&root), ConversationLoader::with_source(Fixed));
    let messages = loader.load("fixed").unwrap();
    assert_eq!(messages.len(), 4);
    assert!(messages.iter().all(|m| m.content == "stub"));
}

// ============================================================================
// Analytics over a loaded archive
// ============================================================================

#[test]
fn test_top_writers_ranking() {
    let root = archive();
    let messages = load_corpus(&config(&root), "*").unwrap();
    let ranking = top_writers(&messages);
    let names: Vec<_> = ranking.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["Bob", "Alice", "Me", "Carol"]);
    assert_eq!(ranking[0].1.message_count, 3);
}

#[test]
fn test_top_writers_by_volume() {
    let root = tempfile::tempdir().unwrap();
    for (dir, name, n) in [("a_1", "A", 5), ("b_2", "B", 9), ("c_3", "C", 2)] {
        let messages = (0..n).map(|i| msg(name, i, "x")).collect();
        write_fragment(root.path(), dir, "message_1.json", name, &[name, "Me"], false, messages);
    }
    let messages = load_corpus(&config(&root), "*").unwrap();
    let names: Vec<_> = top_writers(&messages).into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, ["B", "A", "C"]);
}

#[test]
fn test_top_writers_with_filter() {
    let root = archive();
    let messages = load_corpus(&config(&root), "bob").unwrap();
    let names: Vec<_> = top_writers(&messages).into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, ["Bob", "Me"]);
}

#[test]
fn test_connections_skip_groups() {
    let root = archive();
    let messages = load_corpus(&config(&root), "*").unwrap();
    let ranked = ranked_connections(&messages);
    assert_eq!(ranked[0], (("Bob".to_string(), "Me".to_string()), 3));
    assert!(ranked.iter().all(|((_, to), _)| to != "Crew"));
}

#[test]
fn test_most_reacted_order() {
    let root = archive();
    let messages = load_corpus(&config(&root), "*").unwrap();
    let top = most_reacted(&messages);
    let contents: Vec<_> = top.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, ["there 😆", "group hi"]);
}

#[test]
fn test_group_engagement() {
    let root = archive();
    let convs = load_conversations(&config(&root), "*").unwrap();
    let reports = group_engagements(&convs);
    assert_eq!(reports.len(), 1);

    let crew = &reports[0];
    assert_eq!(crew.title, "Crew");
    assert!(crew.silent.contains("Dave"));
    assert!(!crew.silent.contains("Bob"));
    assert_eq!(crew.rows.last().map(|r| r.messages), Some(1));
}

#[test]
fn test_pair_summaries() {
    let root = archive();
    let messages = load_corpus(&config(&root), "*").unwrap();
    let summaries = pair_summaries(&messages, 5);

    let alice = summaries.iter().find(|s| s.key.contains("Alice") && s.key.contains("Me")).unwrap();
    assert_eq!(alice.messages, 3);
    assert_eq!(alice.days, active_days(&messages[..3]).len());
    assert!(alice.longest_streak >= 1);
    assert_eq!(alice.top_emoji.get("😆"), 1);
}

#[test]
fn test_date_filter_over_corpus() {
    let root = archive();
    let messages = load_corpus(&config(&root), "*").unwrap();

    let after = FilterConfig::new().with_after(at_minute(5));
    let late = apply_filters(messages, &after);
    assert!(late.iter().all(|m| m.timestamp >= at_minute(5)));
    assert_eq!(late.len(), 2);
}
