#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use render_cache::prelude::*;
use render_cache::store::Compute;
use serde_json::json;

/// Store that keeps track of how many times it served from cache or actually
/// invoked the compute callback.
pub struct CountingStore {
    inner: MemoryStore,
    rendered: AtomicUsize,
    from_cache: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            rendered: AtomicUsize::new(0),
            from_cache: AtomicUsize::new(0),
        }
    }

    /// Number of times the compute callback actually ran.
    pub fn rendered(&self) -> usize {
        self.rendered.load(Ordering::SeqCst)
    }

    /// Number of fetches served from the stored value.
    pub fn from_cache(&self) -> usize {
        self.from_cache.load(Ordering::SeqCst)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

#[async_trait]
impl Store for CountingStore {
    async fn fetch(
        &self,
        key: &str,
        options: &StoreOptions,
        compute: Compute<'_>,
    ) -> CacheResult<String> {
        if self.inner.contains_key(key) {
            self.from_cache.fetch_add(1, Ordering::SeqCst);
        }

        let rendered = &self.rendered;
        let counted: Compute<'_> = Box::new(move || {
            rendered.fetch_add(1, Ordering::SeqCst);
            compute()
        });

        self.inner.fetch(key, options, counted).await
    }
}

#[derive(Clone)]
pub struct Person {
    pub id: u64,
    pub name: String,
    pub updated_at: DateTime<Utc>,
}

impl Person {
    pub fn jane() -> Self {
        Self {
            id: 1,
            name: "Jane Doe".to_string(),
            updated_at: Utc.with_ymd_and_hms(2016, 11, 20, 23, 0, 0).unwrap(),
        }
    }

    pub fn john() -> Self {
        Self {
            id: 2,
            name: "John Doe".to_string(),
            updated_at: Utc.with_ymd_and_hms(2016, 11, 21, 9, 30, 0).unwrap(),
        }
    }
}

impl CacheKeyProvider for Person {
    fn cache_key(&self) -> String {
        format!("{}:{}", self.id, self.updated_at.timestamp())
    }
}

/// The external render step: serializes a person to JSON.
pub fn render_person(person: &Person) -> CacheResult<String> {
    serde_json::to_string(&json!({ "id": person.id, "name": person.name }))
        .map_err(CacheError::render)
}
