use std::sync::Once;

use pretty_assertions::assert_eq;
use scout_core::{parse_url_input, update, AddStats, AppState, Msg, UrlQueue};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(scout_logging::initialize_for_tests);
}

fn submit_urls(state: AppState, input: &str) -> AppState {
    let (state, _) = update(state, Msg::UrlInputChanged(input.to_string()));
    let (state, _) = update(state, Msg::UrlsSubmitted);
    state
}

#[test]
fn parse_splits_on_newlines_and_commas_and_trims() {
    let parsed = parse_url_input(" https://a.com ,b.org\n\n  ,c.net\r\n");
    assert_eq!(parsed, vec!["https://a.com", "b.org", "c.net"]);
}

#[test]
fn parse_drops_text_that_is_not_url_like() {
    let parsed = parse_url_input("hello\nhttp://localhost\nworld,example.com");
    assert_eq!(parsed, vec!["http://localhost", "example.com"]);
}

#[test]
fn every_entry_is_trimmed_valid_and_unique() {
    let inputs = [
        "https://a.com,https://a.com, https://a.com ",
        "x\ny\nz.io\n\n,,,",
        "  http://q  ,\tftp.example.org\t,not a url",
        "a.b,a.b\na.b",
    ];
    for input in inputs {
        let mut queue = UrlQueue::new();
        queue.add(input);
        let urls = queue.urls();
        for url in urls {
            assert_eq!(url.trim(), url);
            assert!(!url.is_empty());
            assert!(url.starts_with("http://") || url.starts_with("https://") || url.contains('.'));
        }
        let mut deduped = urls.to_vec();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), urls.len(), "duplicates after {input:?}");
    }
}

#[test]
fn merge_keeps_first_occurrence_order() {
    let mut queue = UrlQueue::new();
    let first = queue.add("https://b.com\nhttps://a.com");
    let second = queue.add("https://c.com, https://a.com, https://b.com, https://c.com");

    assert_eq!(first, AddStats { added: 2, skipped: 0 });
    assert_eq!(second, AddStats { added: 1, skipped: 3 });
    assert_eq!(queue.urls(), ["https://b.com", "https://a.com", "https://c.com"]);
}

#[test]
fn no_normalization_between_trivially_different_urls() {
    let mut queue = UrlQueue::new();
    queue.add("https://a.com\nhttps://a.com/\nHTTPS://A.COM");
    assert_eq!(queue.len(), 3);
}

#[test]
fn remove_and_clear() {
    let mut queue = UrlQueue::new();
    queue.add("a.com,b.com");
    assert!(queue.remove("a.com"));
    assert!(!queue.remove("a.com"));
    assert_eq!(queue.urls(), ["b.com"]);
    queue.clear();
    assert!(queue.is_empty());
}

#[test]
fn submit_clears_input_only_when_something_parsed() {
    init_logging();
    let state = submit_urls(AppState::new(), "not a url");
    let view = state.view();
    assert_eq!(view.url_input, "not a url");
    assert!(view.queued_urls.is_empty());

    let mut state = submit_urls(state, "https://a.com\nhttps://b.com");
    let view = state.view();
    assert_eq!(view.url_input, "");
    assert_eq!(view.queued_urls, vec!["https://a.com", "https://b.com"]);
    assert_eq!(view.last_add_stats, Some(AddStats { added: 2, skipped: 0 }));
    assert!(state.consume_dirty());
}

#[test]
fn duplicate_submission_is_reported_as_skipped() {
    init_logging();
    let state = submit_urls(AppState::new(), "https://a.com");
    let state = submit_urls(state, "https://a.com");
    let view = state.view();

    assert_eq!(view.queued_urls, vec!["https://a.com"]);
    assert_eq!(view.last_add_stats, Some(AddStats { added: 0, skipped: 1 }));
    assert_eq!(view.url_input, "");
}

#[test]
fn remove_and_clear_messages_update_queue() {
    init_logging();
    let state = submit_urls(AppState::new(), "a.com,b.com,c.com");
    let (state, _) = update(state, Msg::UrlRemoved("b.com".to_string()));
    assert_eq!(state.view().queued_urls, vec!["a.com", "c.com"]);

    let (state, effects) = update(state, Msg::QueueCleared);
    assert!(state.view().queued_urls.is_empty());
    assert!(effects.is_empty());
}
