//! Integration tests for the query engine's pagination and filtering

mod common;

use std::sync::Arc;

use futures::{pin_mut, StreamExt};

use self::common::{seeded_store, RecordingStore};

use ::common::explore::{drain_entries, stream_entries};
use ::common::storage::{ListQuery, StorageError};

#[tokio::test]
async fn test_drain_spans_pages() {
    let store = Arc::new(RecordingStore::new(seeded_store().with_page_size(1)));
    let query = ListQuery::new("test");

    let entries = drain_entries(store.as_ref(), &query, true).await.unwrap();

    let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["p/q/x", "p/x"]);
    assert_eq!(store.list_calls(), 2, "one call per page");
}

#[tokio::test]
async fn test_self_filter_only_drops_the_queried_prefix() {
    let store = seeded_store();
    store.put_object("test", "p/");
    let query = ListQuery::single_level("test", "p/");

    let filtered = drain_entries(&store, &query, true).await.unwrap();
    assert!(!filtered
        .iter()
        .any(|e| e.is_grouping() && e.common_prefix == "p/"));
    // the deeper grouping survives
    assert!(filtered
        .iter()
        .any(|e| e.is_grouping() && e.common_prefix == "p/q/"));

    let unfiltered = drain_entries(&store, &query, false).await.unwrap();
    assert!(unfiltered
        .iter()
        .any(|e| e.is_grouping() && e.common_prefix == "p/"));
    assert_eq!(unfiltered.len(), filtered.len() + 1);
}

#[tokio::test]
async fn test_self_filter_ignores_empty_prefix() {
    let store = seeded_store();
    let query = ListQuery::single_level("test", "");

    // nothing to drop at the root: the filter only applies to a non-empty
    // query prefix
    let entries = drain_entries(&store, &query, true).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].common_prefix, "p/");
}

#[tokio::test]
async fn test_mid_drain_failure_discards_everything() {
    let store = Arc::new(
        RecordingStore::new(seeded_store().with_page_size(1)).with_fail_list_at_page(1),
    );
    let query = ListQuery::new("test");

    let result = drain_entries(store.as_ref(), &query, true).await;
    assert!(matches!(result, Err(StorageError::Transport(_))));
}

#[tokio::test]
async fn test_stream_fetches_pages_on_demand() {
    let store = Arc::new(RecordingStore::new(seeded_store().with_page_size(1)));
    let query = ListQuery::new("test");

    let stream = stream_entries(store.as_ref(), &query, true);
    pin_mut!(stream);

    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first.key, "p/q/x");
    assert_eq!(
        store.list_calls(),
        1,
        "only the first page is fetched for the first entry"
    );
}
