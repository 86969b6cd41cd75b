//! Pluggable backing stores for cached renderings.
//!
//! Provides the [`Store`] contract with two implementations:
//! - [`MemoryStore`] - In-process reference store, the zero-configuration default
//! - [`RedisStore`] - Redis-backed store with native TTL support

mod memory_store;
mod redis_store;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

use crate::error::CacheResult;
use crate::options::StoreOptions;

/// Future produced by a [`Compute`] callback.
pub type ComputeFuture<'a> = Pin<Box<dyn Future<Output = CacheResult<String>> + Send + 'a>>;

/// One-shot callback performing the underlying render step on a cache miss.
pub type Compute<'a> = Box<dyn FnOnce() -> ComputeFuture<'a> + Send + 'a>;

/// Get-or-compute contract for cached renderings.
///
/// Implementations own persistence and expiration entirely; the pipeline
/// never inspects or mutates stored bytes.
///
/// # Contract
///
/// - If `key` holds an unexpired value, return it without invoking `compute`.
/// - Otherwise invoke `compute` exactly once, write its result under `key`
///   (honoring any TTL in `options` when expiration is supported), and return
///   it. A successful miss performs exactly one write.
/// - Errors from `compute` propagate unchanged with no write performed.
/// - Errors from the backing medium propagate as well: there is no silent
///   fallback to direct computation.
///
/// # Implementations
///
/// - [`MemoryStore`] - In-process map, no expiration
/// - [`RedisStore`] - External key/value service, TTL via Redis `EX`
#[async_trait]
pub trait Store: Send + Sync {
    /// Fetches the value stored under `key`, computing and storing it on a miss.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::CacheError::Render`] when `compute` fails, and
    /// store-specific errors when the backing medium does.
    async fn fetch(
        &self,
        key: &str,
        options: &StoreOptions,
        compute: Compute<'_>,
    ) -> CacheResult<String>;
}
