//! Cache-aside orchestration around an external render step.

use std::any::TypeId;
use std::future::Future;
use std::sync::Arc;

use tracing::debug;

use crate::error::CacheResult;
use crate::key::{CacheKeyProvider, compose_key};
use crate::registry::CacheRegistry;
use crate::store::{Compute, ComputeFuture};

/// Wraps a render step with the cache-aside protocol.
///
/// Per render call the pipeline resolves the subject type's [`crate::options::CacheConfig`],
/// bypasses the store entirely when caching is disabled, and otherwise
/// composes the full key and delegates to [`crate::store::Store::fetch`] with
/// the render function as the compute callback. It keeps no failure state of
/// its own: store and render errors propagate unchanged, and there are no
/// retries at this level.
///
/// # Examples
///
/// ```ignore
/// let registry = Arc::new(CacheRegistry::new());
/// registry.configure_cache::<PersonView>(|config| {
///     config.key_prefix = Some("person".into());
/// });
///
/// let pipeline = CachingRenderPipeline::new(registry);
/// let json = pipeline
///     .render(&person, || async { render_person(&person) })
///     .await?;
/// ```
pub struct CachingRenderPipeline {
    registry: Arc<CacheRegistry>,
}

impl CachingRenderPipeline {
    /// Creates a pipeline bound to an explicit registry.
    pub fn new(registry: Arc<CacheRegistry>) -> Self {
        Self { registry }
    }

    /// Creates a pipeline bound to the shared [`CacheRegistry::global`] registry.
    pub fn global() -> Self {
        Self::new(CacheRegistry::global())
    }

    /// Returns the registry this pipeline resolves configuration from.
    pub fn registry(&self) -> &CacheRegistry {
        &self.registry
    }

    /// Renders `subject`, consulting the store when its type has caching
    /// enabled.
    ///
    /// `render` is the external render step: a one-shot async callback
    /// producing the serialized string. It runs at most once per call - on a
    /// cache hit it is not invoked at all.
    ///
    /// # Errors
    ///
    /// Propagates render failures ([`crate::error::CacheError::Render`]) and
    /// store failures unchanged.
    pub async fn render<S, F, Fut>(&self, subject: &S, render: F) -> CacheResult<String>
    where
        S: CacheKeyProvider + 'static,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = CacheResult<String>> + Send,
    {
        self.cached_render(TypeId::of::<S>(), || subject.cache_key(), render)
            .await
    }

    /// Renders a homogeneous collection of items.
    ///
    /// The collection wrapper has no cache identity of its own: configuration
    /// is resolved via the *item* type, and the object key component is the
    /// per-item [`CacheKeyProvider::cache_key`] values joined with `,` so any
    /// item change invalidates the collection rendering.
    pub async fn render_list<T, F, Fut>(&self, items: &[T], render: F) -> CacheResult<String>
    where
        T: CacheKeyProvider + 'static,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = CacheResult<String>> + Send,
    {
        self.cached_render(
            TypeId::of::<T>(),
            || {
                items
                    .iter()
                    .map(CacheKeyProvider::cache_key)
                    .collect::<Vec<_>>()
                    .join(",")
            },
            render,
        )
        .await
    }

    /// Shared cache-aside path. `object_key` is only evaluated when caching
    /// is enabled: the disabled path computes no key and touches no store.
    async fn cached_render<F, Fut>(
        &self,
        type_id: TypeId,
        object_key: impl FnOnce() -> String,
        render: F,
    ) -> CacheResult<String>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = CacheResult<String>> + Send,
    {
        let config = self.registry.config_for(type_id);

        if !config.enabled {
            return render().await;
        }

        let store = config
            .store
            .clone()
            .unwrap_or_else(|| self.registry.store());
        let full_key = compose_key(config.key_prefix.as_deref(), &object_key());

        debug!("Cache FETCH: {}", full_key);

        let compute: Compute<'_> = Box::new(move || {
            let fut: ComputeFuture<'_> = Box::pin(render());
            fut
        });

        store.fetch(&full_key, &config.options, compute).await
    }
}
