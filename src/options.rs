//! Per-type cache configuration and store passthrough options.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::Store;

/// Options forwarded verbatim to the backing store.
///
/// The pipeline treats this as an opaque bag: keys it does not recognize are
/// passed through untouched, and stores ignore keys they do not understand.
/// The only key interpreted anywhere in this crate is [`StoreOptions::EXPIRE_IN`],
/// read by stores that support time-based expiration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreOptions {
    values: HashMap<String, Value>,
}

impl StoreOptions {
    /// TTL in seconds. Interpreted only by stores with expiration support;
    /// silently ignored by those without (not an error).
    pub const EXPIRE_IN: &'static str = "expire_in";

    /// Creates an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Sets an arbitrary passthrough option.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns the configured TTL in seconds, if any.
    pub fn expire_in(&self) -> Option<u64> {
        self.values.get(Self::EXPIRE_IN).and_then(Value::as_u64)
    }

    /// Sets the TTL in seconds.
    pub fn set_expire_in(&mut self, seconds: u64) {
        self.set(Self::EXPIRE_IN, seconds);
    }

    /// Returns true when no options are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Cache configuration for a single renderable type.
///
/// One instance per *type* (not per object), held by the
/// [`crate::registry::CacheRegistry`] and created lazily on the first
/// configuration call. `enabled` stays false until
/// [`crate::registry::CacheRegistry::configure_cache`] flips it.
#[derive(Clone, Default)]
pub struct CacheConfig {
    /// Whether renders of this type consult the store at all.
    pub enabled: bool,
    /// Prefix joined with the object's cache key by a `/` separator.
    pub key_prefix: Option<String>,
    /// Store override for this type. Falls back to the registry default
    /// when absent.
    pub store: Option<Arc<dyn Store>>,
    /// Passthrough options handed to the store on every fetch (e.g. TTL).
    pub options: StoreOptions,
}

impl fmt::Debug for CacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheConfig")
            .field("enabled", &self.enabled)
            .field("key_prefix", &self.key_prefix)
            .field("store", &self.store.as_ref().map(|_| "<override>"))
            .field("options", &self.options)
            .finish()
    }
}
