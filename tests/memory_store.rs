use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use render_cache::prelude::*;

#[tokio::test]
async fn test_miss_computes_once_and_writes_once() {
    let store = MemoryStore::new();
    let options = StoreOptions::new();
    let calls = AtomicUsize::new(0);

    let value = store
        .fetch(
            "k",
            &options,
            Box::new(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                Box::pin(async { Ok("v".to_string()) })
            }),
        )
        .await
        .unwrap();

    assert_eq!(value, "v");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("k"), Some("v".to_string()));
}

#[tokio::test]
async fn test_hit_returns_stored_value_without_computing() {
    let store = MemoryStore::new();
    let options = StoreOptions::new();

    store
        .fetch(
            "k",
            &options,
            Box::new(|| Box::pin(async { Ok("original".to_string()) })),
        )
        .await
        .unwrap();

    // A hit never invokes the callback; if it did, fetch would return this error.
    let value = store
        .fetch(
            "k",
            &options,
            Box::new(|| {
                Box::pin(async { Err(CacheError::Operation("hit must not compute".into())) })
            }),
        )
        .await
        .unwrap();

    assert_eq!(value, "original");
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_compute_error_propagates_without_writing() {
    let store = MemoryStore::new();
    let options = StoreOptions::new();

    let result = store
        .fetch(
            "k",
            &options,
            Box::new(|| {
                Box::pin(async { Err(CacheError::render(anyhow::anyhow!("render blew up"))) })
            }),
        )
        .await;

    assert!(matches!(result, Err(CacheError::Render(_))));
    assert!(store.is_empty());
    assert!(!store.contains_key("k"));
}

#[tokio::test]
async fn test_expiration_options_are_accepted_and_ignored() {
    let store = MemoryStore::new();
    let mut options = StoreOptions::new();
    options.set_expire_in(1);

    store
        .fetch(
            "k",
            &options,
            Box::new(|| Box::pin(async { Ok("v".to_string()) })),
        )
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(1100)).await;

    // No expiration support: the value outlives the requested TTL.
    let value = store
        .fetch(
            "k",
            &options,
            Box::new(|| Box::pin(async { Err(CacheError::Operation("must not recompute".into())) })),
        )
        .await
        .unwrap();

    assert_eq!(value, "v");
}
