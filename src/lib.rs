//! # render-cache
//!
//! A cache-aside layer that sits in front of an object-serialization step:
//! given an object and a function that renders it to a string (e.g. JSON), it
//! returns a previously computed rendering if one exists under a derived key,
//! and otherwise invokes the render function, stores the result, and returns it.
//!
//! ## Architecture
//!
//! - **Store layer** ([`store`]) - The [`store::Store`] get-or-compute
//!   contract, the in-process [`store::MemoryStore`] default, and the
//!   Redis-backed [`store::RedisStore`] with native TTL support
//! - **Configuration** ([`registry`], [`options`]) - Per-type cache config
//!   (enabled flag, key prefix, store override, passthrough options) and the
//!   process-wide default store binding
//! - **Key derivation** ([`key`]) - The [`key::CacheKeyProvider`] capability
//!   and prefix composition
//! - **Orchestration** ([`pipeline`]) - [`pipeline::CachingRenderPipeline`],
//!   deciding per render call whether the store is consulted
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use render_cache::prelude::*;
//!
//! struct PersonView { id: u64, updated_at: i64 }
//!
//! impl CacheKeyProvider for PersonView {
//!     fn cache_key(&self) -> String {
//!         format!("{}:{}", self.id, self.updated_at)
//!     }
//! }
//!
//! # async fn example(person: PersonView) -> CacheResult<String> {
//! let registry = Arc::new(CacheRegistry::new());
//! registry.configure_cache::<PersonView>(|config| {
//!     config.key_prefix = Some("person".into());
//!     config.options.set_expire_in(3600);
//! });
//!
//! let pipeline = CachingRenderPipeline::new(registry);
//!
//! // First call renders and stores under "person/{id}:{updated_at}";
//! // subsequent calls with an unchanged cache key come from the store.
//! pipeline.render(&person, || async { Ok("{...}".to_string()) }).await
//! # }
//! ```
//!
//! ## Semantics
//!
//! Caching is per *type*, enabled explicitly via
//! [`registry::CacheRegistry::configure_cache`]. A derived key that changes
//! with the object's content (identity + revision marker) is what invalidates
//! stale renderings: old keys are simply never referenced again, no deletion
//! is performed. Check-then-set is not atomic anywhere in this crate -
//! concurrent callers missing on one key may each compute once (convenience
//! caching, not a consistency guarantee).
//!
//! ## Configuration
//!
//! Hosts that want the Redis store bound from the environment can use
//! [`config::CacheSettings`]. See the [`config`] module for the recognized
//! variables.

pub mod config;
pub mod error;
pub mod key;
pub mod options;
pub mod pipeline;
pub mod registry;
pub mod store;

pub use error::{CacheError, CacheResult};

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::config::CacheSettings;
    pub use crate::error::{CacheError, CacheResult};
    pub use crate::key::CacheKeyProvider;
    pub use crate::options::{CacheConfig, StoreOptions};
    pub use crate::pipeline::CachingRenderPipeline;
    pub use crate::registry::CacheRegistry;
    pub use crate::store::{MemoryStore, RedisStore, Store};
}
