//! In-process reference store.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use super::{Compute, Store};
use crate::error::CacheResult;
use crate::options::StoreOptions;

/// Reference [`Store`] backed by an in-process map.
///
/// No expiration (TTL options are accepted and ignored), no eviction, no size
/// bound. Serves as the zero-configuration default so the crate works out of
/// the box in single-threaded and test contexts; production deployments
/// should bind a store with real persistence, e.g. [`super::RedisStore`].
///
/// The map lock is not held across the compute await, so two concurrent
/// callers missing on the same key will both compute and the last write wins.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `key`, if any.
    ///
    /// Read-only peek used by instrumentation and tests; never triggers a
    /// compute.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Returns true when `key` holds a value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn fetch(
        &self,
        key: &str,
        _options: &StoreOptions,
        compute: Compute<'_>,
    ) -> CacheResult<String> {
        if let Some(value) = self.get(key) {
            debug!("Cache HIT: {}", key);
            return Ok(value);
        }

        debug!("Cache MISS: {}", key);
        let value = compute().await?;

        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.clone());

        Ok(value)
    }
}
