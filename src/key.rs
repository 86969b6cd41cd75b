//! Cache key derivation and composition.

/// Capability trait for types whose renderings can be cached.
///
/// The returned key must be a pure function of the object's current state:
/// deterministic, side-effect free, and content-sensitive. Two objects with
/// semantically different renderable content must never produce the same key,
/// and identical content must always produce the same key. The usual shape is
/// stable identity plus a content-revision marker, e.g.
/// `"{id}:{updated_at_epoch}"`.
pub trait CacheKeyProvider {
    /// Derives the object-level component of the cache key.
    fn cache_key(&self) -> String;
}

/// Composes the full store key from an optional configured prefix and the
/// object-derived component.
///
/// The parts are joined with `/`; an absent prefix yields the object key
/// exactly, with no leading separator.
pub fn compose_key(prefix: Option<&str>, object_key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}/{}", prefix, object_key),
        None => object_key.to_string(),
    }
}
