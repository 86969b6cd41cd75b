//! Per-type cache configuration and the process-wide store binding.

use std::any::TypeId;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use tracing::debug;

use crate::key::CacheKeyProvider;
use crate::options::CacheConfig;
use crate::store::{MemoryStore, Store};

static GLOBAL: OnceLock<Arc<CacheRegistry>> = OnceLock::new();

/// Registry of per-type [`CacheConfig`] entries and the active default store.
///
/// Configuration is keyed on the renderable's `TypeId`: one entry per type,
/// created lazily on the first configuration call. The default store is
/// initialized to a [`MemoryStore`] so everything works with zero setup;
/// [`CacheRegistry::set_store`] rebinds it for all subsequent fetches
/// (in-flight fetches keep the store they already resolved).
///
/// Construct registries explicitly and pass them to the pipeline for
/// dependency injection, or use the shared [`CacheRegistry::global`] instance
/// for process-wide configuration.
///
/// # Concurrency
///
/// Reads and writes are synchronized internally, but [`Self::configure_cache`]
/// mutates type-wide state and is meant for configuration time (startup), not
/// request time. [`Self::without_caching`] toggles the shared per-type flag:
/// concurrent callers on the same type interleave and will observe each
/// other's override.
pub struct CacheRegistry {
    inner: RwLock<Inner>,
}

struct Inner {
    store: Arc<dyn Store>,
    configs: HashMap<TypeId, CacheConfig>,
}

impl CacheRegistry {
    /// Creates a registry with a fresh [`MemoryStore`] as the default store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                store: Arc::new(MemoryStore::new()),
                configs: HashMap::new(),
            }),
        }
    }

    /// Returns the shared process-wide registry, creating it on first use.
    pub fn global() -> Arc<CacheRegistry> {
        GLOBAL.get_or_init(|| Arc::new(CacheRegistry::new())).clone()
    }

    /// Rebinds the default store used when a type has no override.
    pub fn set_store(&self, store: Arc<dyn Store>) {
        self.write().store = store;
    }

    /// Returns the active default store.
    pub fn store(&self) -> Arc<dyn Store> {
        self.read().store.clone()
    }

    /// Enables caching for `T` and applies `configure` to its config.
    ///
    /// Creates the entry on first call; later calls merge into the existing
    /// entry, so prefix, store override, and passthrough options accumulate.
    /// The `CacheKeyProvider` bound rejects types without a cache key at
    /// compile time, which is as early as a configuration error can surface.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// registry.configure_cache::<PersonView>(|config| {
    ///     config.key_prefix = Some("person".into());
    ///     config.options.set_expire_in(3600);
    /// });
    /// ```
    pub fn configure_cache<T>(&self, configure: impl FnOnce(&mut CacheConfig))
    where
        T: CacheKeyProvider + 'static,
    {
        let mut inner = self.write();
        let config = inner.configs.entry(TypeId::of::<T>()).or_default();
        config.enabled = true;
        configure(config);
        debug!("Cache configured for {}", std::any::type_name::<T>());
    }

    /// Returns the current config for `T`, or the disabled default when the
    /// type was never configured.
    pub fn cache_options<T: 'static>(&self) -> CacheConfig {
        self.config_for(TypeId::of::<T>())
    }

    /// Disables caching for `T` for the duration of `f`.
    ///
    /// The previous `enabled` value is restored on every exit path, including
    /// errors returned by `f` and unwinding.
    pub async fn without_caching<T, F, Fut, R>(&self, f: F) -> R
    where
        T: 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = R>,
    {
        let type_id = TypeId::of::<T>();
        let previous = {
            let mut inner = self.write();
            let config = inner.configs.entry(type_id).or_default();
            let previous = config.enabled;
            config.enabled = false;
            previous
        };

        let _restore = RestoreEnabled {
            registry: self,
            type_id,
            previous,
        };

        f().await
    }

    pub(crate) fn config_for(&self, type_id: TypeId) -> CacheConfig {
        self.read().configs.get(&type_id).cloned().unwrap_or_default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CacheRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Restores the scoped `enabled` override when the guard drops.
struct RestoreEnabled<'a> {
    registry: &'a CacheRegistry,
    type_id: TypeId,
    previous: bool,
}

impl Drop for RestoreEnabled<'_> {
    fn drop(&mut self) {
        let mut inner = self.registry.write();
        if let Some(config) = inner.configs.get_mut(&self.type_id) {
            config.enabled = self.previous;
        }
    }
}
